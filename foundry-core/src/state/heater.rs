//! Process state owned by the controller

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MaterialTargets;

/// How commanded power is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlMode {
    /// Operator sets power directly
    #[default]
    Manual,
    /// Power follows the crucible PID
    AutoPid,
}

/// Charge material, selects the AutoPID target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Material {
    #[default]
    Aluminum,
    Steel,
}

impl Material {
    /// Crucible target for this material
    pub fn target_c(self, targets: &MaterialTargets) -> f32 {
        match self {
            Material::Aluminum => targets.aluminum_c,
            Material::Steel => targets.steel_c,
        }
    }
}

/// Sampled and commanded process values
///
/// Mutated only by the controller. The enable flag, fault code and
/// cooldown countdown live in [`FaultMachine`](super::FaultMachine).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeaterState {
    /// Commanded power, always within 0–100 %
    pub power_setpoint: f32,
    /// Last power meter reading (W), possibly stale
    pub actual_power: f32,
    pub coil_temperature: f32,
    pub water_temperature: f32,
    /// From the external thermal camera feed
    pub crucible_temperature: f32,
    /// Coolant flow (L/min), refreshed once per window
    pub flow_rate: f32,
    pub control_mode: ControlMode,
    pub material: Material,
    /// Seconds spent enabled
    pub runtime_seconds: u32,
}

impl HeaterState {
    /// Zeroed state, manual mode
    pub const fn new() -> Self {
        Self {
            power_setpoint: 0.0,
            actual_power: 0.0,
            coil_temperature: 0.0,
            water_temperature: 0.0,
            crucible_temperature: 0.0,
            flow_rate: 0.0,
            control_mode: ControlMode::Manual,
            material: Material::Aluminum,
            runtime_seconds: 0,
        }
    }
}
