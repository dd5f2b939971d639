//! Hardware configuration types
//!
//! Input polarity, bias and ADC channels of the furnace control board.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Input bias applied by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinPull {
    /// Externally biased
    #[default]
    None,
    Up,
    Down,
}

/// Digital input polarity and bias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Active level is low
    pub inverted: bool,
    pub pull: PinPull,
}

impl InputConfig {
    pub const fn new(inverted: bool, pull: PinPull) -> Self {
        Self { inverted, pull }
    }

    /// Normally-closed contact switching the supply rail
    ///
    /// Closed reads high. Open, a cut wire or a short to ground is pulled
    /// low and reads open.
    pub const fn normally_closed() -> Self {
        Self::new(false, PinPull::Down)
    }
}

/// ADC channel numbers of the temperature sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalogChannels {
    /// Induction coil sensor
    pub coil: u8,
    /// Cooling water sensor
    pub water: u8,
}

impl Default for AnalogChannels {
    fn default() -> Self {
        Self { coil: 0, water: 1 }
    }
}

/// Furnace board wiring
///
/// Pin numbers belong to the target crate; this only carries what the
/// drivers need to interpret the levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FurnaceHwConfig {
    /// Enable line is active-low
    pub enable_inverted: bool,
    /// Flow meter pulse input (rising edge)
    pub flow: InputConfig,
    /// Emergency-stop contact
    pub estop: InputConfig,
    /// Enclosure door contact
    pub door: InputConfig,
    /// Temperature sensor channels
    pub analog: AnalogChannels,
}

impl Default for FurnaceHwConfig {
    fn default() -> Self {
        Self {
            enable_inverted: false,
            flow: InputConfig::new(false, PinPull::Up),
            estop: InputConfig::normally_closed(),
            door: InputConfig::normally_closed(),
            analog: AnalogChannels::default(),
        }
    }
}
