//! Sensor calibration constants
//!
//! Fixed conversions for the coolant flow meter and the linear
//! temperature sensors. These are not tuned in the field.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hall-effect flow meter calibration
///
/// `flow_lpm = pulses × 60 / pulse_factor / 1000`, evaluated once per window.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlowCalibration {
    /// Sensor constant from the meter datasheet
    pub pulse_factor: f32,
    /// Counting window in milliseconds
    pub window_ms: u32,
}

impl FlowCalibration {
    pub const fn new() -> Self {
        Self {
            pulse_factor: 4.5,
            window_ms: 1000,
        }
    }

    /// Convert a window's pulse count to L/min
    pub fn pulses_to_lpm(&self, pulses: u32) -> f32 {
        pulses as f32 * 60.0 / self.pulse_factor / 1000.0
    }
}

impl Default for FlowCalibration {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear 10 mV/°C temperature sensor on a 12-bit, 3.3 V converter
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThermalCalibration {
    /// ADC reference voltage
    pub vref: f32,
    /// ADC full-scale count
    pub adc_counts: u16,
    /// Degrees per volt (100 for a 10 mV/°C part)
    pub degrees_per_volt: f32,
    /// Reading substituted when the channel cannot be sampled
    ///
    /// Must sit above every interlock threshold so an unreadable sensor
    /// trips instead of reading as cold.
    pub sentinel_c: f32,
}

impl ThermalCalibration {
    pub const fn new() -> Self {
        Self {
            vref: 3.3,
            adc_counts: 4096,
            degrees_per_volt: 100.0,
            sentinel_c: 999.0,
        }
    }

    /// Convert a raw ADC count to °C
    pub fn counts_to_celsius(&self, counts: u16) -> f32 {
        let voltage = counts as f32 * self.vref / self.adc_counts as f32;
        voltage * self.degrees_per_volt
    }
}

impl Default for ThermalCalibration {
    fn default() -> Self {
        Self::new()
    }
}
