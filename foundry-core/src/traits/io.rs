//! Hardware capability interface
//!
//! The controller reaches the outside world only through [`HardwareIo`].
//! Production boards implement it over real peripherals; tests inject a
//! deterministic fake.

/// Normally-closed safety contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyInput {
    /// Emergency-stop mushroom button
    EmergencyStop,
    /// Enclosure door switch
    Door,
}

/// Analog temperature inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogInput {
    /// Induction coil temperature
    CoilTemperature,
    /// Cooling water temperature
    WaterTemperature,
}

/// ADC failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel could not be configured
    Config,
    /// Conversion did not finish in time
    Timeout,
}

/// UART failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// No (complete) response before the receive deadline
    Timeout,
    /// Framing, overrun or line error
    Bus,
}

/// Everything the controller needs from the board
///
/// All methods are synchronous. `read_safety_input`, `set_enable` and
/// `set_duty` must complete in microseconds; they are called on the
/// shutdown path. `sample_adc` and `uart_transact` must be bounded by
/// their own timeouts.
pub trait HardwareIo {
    /// Read a normally-closed contact; `true` means electrically high (closed)
    fn read_safety_input(&mut self, input: SafetyInput) -> bool;

    /// Drive the enable line to the induction module (`true` = asserted)
    fn set_enable(&mut self, asserted: bool);

    /// Set the power-control duty on the 0–`full_scale` scale
    fn set_duty(&mut self, duty: u16);

    /// Sample a temperature channel, raw 12-bit counts
    fn sample_adc(&mut self, input: AnalogInput) -> Result<u16, AdcError>;

    /// Send `request` and collect the reply into `response`
    ///
    /// Returns the number of bytes received.
    fn uart_transact(&mut self, request: &[u8], response: &mut [u8]) -> Result<usize, UartError>;

    /// Monotonic milliseconds, wrapping
    fn now_ms(&self) -> u32;
}
