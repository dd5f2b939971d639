//! Safety interlocks
//!
//! Decides whether power may be delivered and keeps a record of every
//! time it was cut.

pub mod interlock;
pub mod log;

pub use interlock::{evaluate, Interlock, InterlockInputs, InterlockStatus, INTERLOCKS};
pub use log::{FaultLog, FaultRecord, FAULT_LOG_CAPACITY};
