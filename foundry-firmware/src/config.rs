//! Build-time furnace configuration
//!
//! `build.rs` validates `furnace.toml` and emits the constants included
//! below. The result is checked again by the controller on init.

use foundry_core::config::{FurnaceConfig, FurnaceHwConfig};
use foundry_core::state::{ControlMode, Material};

include!(concat!(env!("OUT_DIR"), "/furnace_config.rs"));

/// Controller configuration from furnace.toml over the production defaults
pub fn furnace_config() -> FurnaceConfig {
    let mut config = FurnaceConfig::new();

    config.limits.min_flow_lpm = MIN_FLOW_LPM;
    config.limits.max_coil_c = MAX_COIL_C;
    config.limits.max_water_c = MAX_WATER_C;
    config.limits.max_crucible_c = MAX_CRUCIBLE_C;
    config.cooldown_s = COOLDOWN_S;

    config.pid.kp = PID_KP;
    config.pid.ki = PID_KI;
    config.pid.kd = PID_KD;
    config.pid.sample_period_ms = PID_SAMPLE_PERIOD_MS;
    config.rate_limit_c_per_min = RATE_LIMIT_C_PER_MIN;

    config.targets.aluminum_c = TARGET_ALUMINUM_C;
    config.targets.steel_c = TARGET_STEEL_C;

    config.flow.pulse_factor = FLOW_PULSE_FACTOR;
    config.flow.window_ms = FLOW_WINDOW_MS;

    config.thermal.vref = THERMAL_VREF;
    config.thermal.adc_counts = THERMAL_ADC_COUNTS;
    config.thermal.degrees_per_volt = THERMAL_DEGREES_PER_VOLT;

    config
}

/// Initial control mode and material
pub fn startup_mode() -> (ControlMode, Material) {
    (CONTROL_MODE, MATERIAL)
}

/// Input polarity, bias and ADC channels for this board
pub fn hardware() -> FurnaceHwConfig {
    FurnaceHwConfig::default()
}
