//! Coil and water temperature sampling
//!
//! Linear 10 mV/°C sensors on the 12-bit ADC. An unreadable channel
//! reads as the fail-safe sentinel (999 °C), which is above every
//! interlock threshold, so the controller trips instead of seeing a cold
//! sensor.

use crate::config::ThermalCalibration;
use crate::traits::{AdcError, AnalogInput, HardwareIo};

/// Result of one temperature sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureSample {
    /// Converted reading (°C)
    Valid(f32),
    /// Channel failed; carries the sentinel to use in its place
    Failed(AdcError, f32),
}

impl TemperatureSample {
    /// Temperature to feed the interlocks
    pub fn celsius(&self) -> f32 {
        match self {
            TemperatureSample::Valid(c) => *c,
            TemperatureSample::Failed(_, sentinel) => *sentinel,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, TemperatureSample::Valid(_))
    }
}

/// Sample one temperature channel
pub fn sample_temperature<IO: HardwareIo>(
    io: &mut IO,
    input: AnalogInput,
    calibration: &ThermalCalibration,
) -> TemperatureSample {
    match io.sample_adc(input) {
        Ok(counts) => TemperatureSample::Valid(calibration.counts_to_celsius(counts)),
        Err(e) => TemperatureSample::Failed(e, calibration.sentinel_c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{SafetyInput, UartError};

    struct MockAdc {
        result: Result<u16, AdcError>,
    }

    impl HardwareIo for MockAdc {
        fn read_safety_input(&mut self, _input: SafetyInput) -> bool {
            true
        }
        fn set_enable(&mut self, _asserted: bool) {}
        fn set_duty(&mut self, _duty: u16) {}
        fn sample_adc(&mut self, _input: AnalogInput) -> Result<u16, AdcError> {
            self.result
        }
        fn uart_transact(&mut self, _req: &[u8], _resp: &mut [u8]) -> Result<usize, UartError> {
            Err(UartError::Timeout)
        }
        fn now_ms(&self) -> u32 {
            0
        }
    }

    #[test]
    fn test_valid_reading() {
        let mut io = MockAdc { result: Ok(310) };
        let sample = sample_temperature(
            &mut io,
            AnalogInput::CoilTemperature,
            &ThermalCalibration::new(),
        );
        assert!(sample.is_valid());
        // 310 counts ≈ 0.2498 V ≈ 25 °C
        let c = sample.celsius();
        assert!(c > 24.9 && c < 25.0);
    }

    #[test]
    fn test_config_failure_reads_sentinel() {
        let mut io = MockAdc {
            result: Err(AdcError::Config),
        };
        let sample = sample_temperature(
            &mut io,
            AnalogInput::WaterTemperature,
            &ThermalCalibration::new(),
        );
        assert!(!sample.is_valid());
        assert_eq!(sample.celsius(), 999.0);
    }

    #[test]
    fn test_timeout_reads_sentinel() {
        let mut io = MockAdc {
            result: Err(AdcError::Timeout),
        };
        let sample = sample_temperature(
            &mut io,
            AnalogInput::CoilTemperature,
            &ThermalCalibration::new(),
        );
        assert_eq!(sample, TemperatureSample::Failed(AdcError::Timeout, 999.0));
    }
}
