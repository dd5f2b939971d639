//! Analog sampling abstractions
//!
//! Furnace boards share one converter between several sensor inputs,
//! so the trait addresses channels by index rather than owning one pin.

/// Reasons a conversion can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcFault {
    /// Channel could not be selected or configured
    ChannelConfig,
    /// Conversion did not complete within its deadline
    Timeout,
}

/// Multiplexed analog-to-digital converter
pub trait AdcBank {
    /// Sample one channel, blocking for at most the converter's timeout
    fn read(&mut self, channel: u8) -> Result<u16, AdcFault>;
}
