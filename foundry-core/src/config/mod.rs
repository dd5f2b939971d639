//! Configuration types
//!
//! Board-agnostic configuration for the furnace controller. Every default
//! is the production safety constant; [`FurnaceConfig::validate`] refuses
//! anything that would loosen a protective limit.

pub mod calibration;
pub mod hardware;
pub mod types;

pub use calibration::*;
pub use hardware::*;
pub use types::*;
