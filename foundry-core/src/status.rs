//! Status reporting
//!
//! An immutable copy of the controller's externally visible state, safe
//! to hand to another task or a telemetry link.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::{ControlMode, FaultKind, Material, Phase};

/// Point-in-time controller status
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusSnapshot {
    pub enabled: bool,
    /// Commanded power (%)
    pub power_setpoint: f32,
    /// Metered power (W), possibly stale
    pub actual_power: f32,
    pub crucible_temp: f32,
    pub coil_temp: f32,
    pub water_temp: f32,
    /// L/min
    pub flow_rate: f32,
    pub fault_code: FaultKind,
    /// Hours spent enabled
    pub runtime_hours: f32,
    pub phase: Phase,
    pub cooldown_remaining_s: u32,
    pub control_mode: ControlMode,
    pub material: Material,
    /// Power reading did not come from the latest meter exchange
    pub meter_stale: bool,
}

/// Convert whole seconds to fractional hours
pub fn seconds_to_hours(seconds: u32) -> f32 {
    seconds as f32 / 3600.0
}
