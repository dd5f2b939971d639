//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod io;

pub use io::{AdcError, AnalogInput, HardwareIo, SafetyInput, UartError};
