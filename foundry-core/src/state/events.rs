//! Events that trigger phase transitions

use super::fault::FaultKind;

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A power command passed the interlocks
    PowerGranted,
    /// Interlocks failed while running or on a power command
    InterlockTrip(FaultKind),
    /// Operator requested an orderly stop
    Disable,
    /// Cooldown countdown reached zero
    CooldownExpired,
}
