//! Supervisor commands
//!
//! One typed entry point for whatever link drives the controller
//! (operator panel, host supervisor, thermal camera).

use crate::state::{ControlMode, Material};

/// Commands accepted by [`FurnaceController::apply`](crate::FurnaceController::apply)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Request power (%), clamped to 0–100
    SetPower(f32),
    /// Select manual or closed-loop control and the charge material
    SetControlMode(ControlMode, Material),
    /// New crucible reading from the thermal camera (°C)
    SetCrucibleTemperature(f32),
    /// Orderly stop without a fault
    Disable,
}
