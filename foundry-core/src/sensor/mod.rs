//! Sensor and meter adapters
//!
//! Conversions from raw board readings to engineering units, each with a
//! defined fallback when the hardware does not answer.

pub mod flow;
pub mod meter;
pub mod thermal;

pub use flow::{FlowEstimator, FlowPulseCounter};
pub use meter::{parse_response, MeterError, PowerMeter, METER_REQUEST, METER_RESPONSE_LEN};
pub use thermal::{sample_temperature, TemperatureSample};
