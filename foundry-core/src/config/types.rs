//! Configuration type definitions
//!
//! [`FurnaceConfig::new`] is the production configuration. Firmware may
//! override individual values at build time, but only in the safe
//! direction: [`FurnaceConfig::validate`] rejects any limit above its
//! ceiling and any cooldown shorter than the minimum.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::calibration::{FlowCalibration, ThermalCalibration};

/// Hard ceiling for the minimum coolant flow (it may only be raised)
pub const FLOOR_MIN_FLOW_LPM: f32 = 1.5;

/// Hard ceiling for the coil temperature limit
pub const CEILING_COIL_TEMP_C: f32 = 60.0;

/// Hard ceiling for the cooling water temperature limit
pub const CEILING_WATER_TEMP_C: f32 = 35.0;

/// Hard ceiling for the crucible temperature limit
pub const CEILING_CRUCIBLE_TEMP_C: f32 = 1600.0;

/// Shortest lockout allowed after a trip
pub const MIN_COOLDOWN_S: u32 = 300;

/// Control tick period
pub const TICK_PERIOD_MS: u32 = 10;

/// Time allowed from fault detection to output disable
pub const SHUTDOWN_DEADLINE_MS: u32 = 10;

/// Interlock thresholds
///
/// A reading beyond a threshold (strictly) is a violation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InterlockLimits {
    /// Below this coolant flow (L/min) the coil is not cooled
    pub min_flow_lpm: f32,
    /// Induction coil limit (°C)
    pub max_coil_c: f32,
    /// Cooling water limit (°C)
    pub max_water_c: f32,
    /// Absolute crucible limit (°C)
    pub max_crucible_c: f32,
}

impl InterlockLimits {
    pub const fn new() -> Self {
        Self {
            min_flow_lpm: FLOOR_MIN_FLOW_LPM,
            max_coil_c: CEILING_COIL_TEMP_C,
            max_water_c: CEILING_WATER_TEMP_C,
            max_crucible_c: CEILING_CRUCIBLE_TEMP_C,
        }
    }
}

impl Default for InterlockLimits {
    fn default() -> Self {
        Self::new()
    }
}

/// PID regulator configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PidConfig {
    /// Proportional gain
    pub kp: f32,
    /// Integral gain
    pub ki: f32,
    /// Derivative gain
    pub kd: f32,
    /// Fixed sample period used for the integral and derivative terms
    pub sample_period_ms: u32,
    /// Lower output clamp (% power)
    pub output_min: f32,
    /// Upper output clamp (% power)
    pub output_max: f32,
}

impl PidConfig {
    pub const fn new() -> Self {
        Self {
            kp: 0.5,
            ki: 0.1,
            kd: 0.05,
            sample_period_ms: 100,
            output_min: 0.0,
            output_max: 100.0,
        }
    }
}

impl Default for PidConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed-loop crucible targets per charge material
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialTargets {
    /// Aluminum pour temperature (°C)
    pub aluminum_c: f32,
    /// Steel pour temperature (°C)
    pub steel_c: f32,
}

impl MaterialTargets {
    pub const fn new() -> Self {
        Self {
            aluminum_c: 700.0,
            steel_c: 1580.0,
        }
    }
}

impl Default for MaterialTargets {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FurnaceConfig {
    /// Interlock thresholds
    pub limits: InterlockLimits,
    /// Crucible PID
    pub pid: PidConfig,
    /// Heating rate above which PID output is halved (°C/min)
    pub rate_limit_c_per_min: f32,
    /// Lockout after a trip (seconds)
    pub cooldown_s: u32,
    /// Coolant flow meter
    pub flow: FlowCalibration,
    /// Coil and water sensors
    pub thermal: ThermalCalibration,
    /// AutoPID targets
    pub targets: MaterialTargets,
    /// Duty value commanded at 100% power
    pub pwm_full_scale: u16,
}

impl FurnaceConfig {
    /// Production configuration
    pub const fn new() -> Self {
        Self {
            limits: InterlockLimits::new(),
            pid: PidConfig::new(),
            rate_limit_c_per_min: 100.0,
            cooldown_s: MIN_COOLDOWN_S,
            flow: FlowCalibration::new(),
            thermal: ThermalCalibration::new(),
            targets: MaterialTargets::new(),
            pwm_full_scale: 1000,
        }
    }

    /// Check that no value loosens a protective limit
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        if !(limits.min_flow_lpm >= FLOOR_MIN_FLOW_LPM) {
            return Err(ConfigError::FlowBelowFloor);
        }
        if !(limits.max_coil_c <= CEILING_COIL_TEMP_C)
            || !(limits.max_water_c <= CEILING_WATER_TEMP_C)
            || !(limits.max_crucible_c <= CEILING_CRUCIBLE_TEMP_C)
        {
            return Err(ConfigError::LimitAboveCeiling);
        }
        if self.cooldown_s < MIN_COOLDOWN_S {
            return Err(ConfigError::CooldownTooShort);
        }
        if self.pid.sample_period_ms == 0 || self.flow.window_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if !(self.pid.output_min < self.pid.output_max) {
            return Err(ConfigError::InvalidOutputBounds);
        }
        if !(self.flow.pulse_factor > 0.0) || self.thermal.adc_counts == 0 {
            return Err(ConfigError::InvalidCalibration);
        }
        if !(self.thermal.sentinel_c > limits.max_coil_c)
            || !(self.thermal.sentinel_c > limits.max_water_c)
        {
            return Err(ConfigError::SentinelInRange);
        }
        if self.targets.aluminum_c > limits.max_crucible_c
            || self.targets.steel_c > limits.max_crucible_c
        {
            return Err(ConfigError::TargetAboveLimit);
        }
        if self.pwm_full_scale == 0 {
            return Err(ConfigError::InvalidCalibration);
        }
        Ok(())
    }
}

impl Default for FurnaceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Minimum flow set below the safe floor
    FlowBelowFloor,
    /// A temperature limit set above its ceiling
    LimitAboveCeiling,
    /// Cooldown shorter than the mandatory lockout
    CooldownTooShort,
    /// Sample period or flow window of zero
    ZeroPeriod,
    /// PID output bounds empty or inverted
    InvalidOutputBounds,
    /// Calibration constant that cannot convert a reading
    InvalidCalibration,
    /// Sensor sentinel would not trip the interlocks
    SentinelInRange,
    /// AutoPID target above the crucible limit
    TargetAboveLimit,
}
