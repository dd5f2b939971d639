//! UART serial communication abstractions
//!
//! Blocking-style transmit and receive. Implementations must bound the
//! time spent in [`UartRx::read_blocking`]; a receiver that has nothing
//! ready reports a timeout instead of waiting indefinitely.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read data from the UART
    ///
    /// Returns the number of bytes placed in `buf`, which may be fewer
    /// than requested if the line went quiet.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_blocking(&mut buf)?;
        Ok(buf[0])
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Receive timeout in milliseconds
    pub rx_timeout_ms: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        // PZEM-series meters talk 9600 8N1
        Self {
            baudrate: 9600,
            rx_timeout_ms: 50,
        }
    }
}
