//! Controller error types

use crate::config::ConfigError;
use crate::state::FaultKind;

/// Why the controller refused to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Configuration would loosen a protective limit
    Config(ConfigError),
    /// Initial interlock check failed; carries the reported fault
    Interlock(FaultKind),
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        InitError::Config(e)
    }
}

/// Why a command did not raise power
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Lockout still running
    CoolingDown {
        /// Seconds until power commands are accepted again
        remaining_s: u32,
    },
    /// Interlocks failed; the command tripped the controller
    Interlock(FaultKind),
}
