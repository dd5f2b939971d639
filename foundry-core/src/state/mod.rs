//! Controller state
//!
//! Process values, the fault taxonomy, and the fault/cooldown phase
//! machine that gates power delivery.

pub mod events;
pub mod fault;
pub mod heater;
pub mod machine;

pub use events::Event;
pub use fault::FaultKind;
pub use heater::{ControlMode, HeaterState, Material};
pub use machine::{FaultMachine, Phase};
