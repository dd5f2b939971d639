//! Fault taxonomy

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fault codes reported by the controller
///
/// Numeric codes are stable and match the fault log format.
/// `PowerLoss` and `CommError` exist for the meter link but no sampling
/// path raises them yet: a failed meter read degrades to the cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FaultKind {
    /// No fault active
    #[default]
    None = 0,
    /// Emergency-stop contact open
    EStop = 1,
    /// Coolant flow below minimum
    NoFlow = 2,
    /// Induction coil over temperature
    OvertempCoil = 3,
    /// Cooling water over temperature
    OvertempWater = 4,
    /// Crucible over absolute limit
    OvertempCrucible = 5,
    /// Enclosure door open
    DoorOpen = 6,
    /// Mains or module power lost
    PowerLoss = 7,
    /// Power meter link failure
    CommError = 8,
    /// Temperature sensor could not be sampled
    SensorError = 9,
}

impl FaultKind {
    /// Stable numeric code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Upper-case name used in fault records
    pub fn name(self) -> &'static str {
        match self {
            FaultKind::None => "NONE",
            FaultKind::EStop => "ESTOP",
            FaultKind::NoFlow => "NO_FLOW",
            FaultKind::OvertempCoil => "OVERTEMP_COIL",
            FaultKind::OvertempWater => "OVERTEMP_WATER",
            FaultKind::OvertempCrucible => "OVERTEMP_CRUCIBLE",
            FaultKind::DoorOpen => "DOOR_OPEN",
            FaultKind::PowerLoss => "POWER_LOSS",
            FaultKind::CommError => "COMM_ERROR",
            FaultKind::SensorError => "SENSOR_ERROR",
        }
    }
}
