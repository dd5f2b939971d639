//! Board-agnostic core logic for the induction furnace firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware capability trait ([`traits::HardwareIo`])
//! - Safety interlock table and fault log
//! - Fault/cooldown state machine
//! - Crucible PID and heating rate limiter
//! - Flow, temperature and power meter sampling
//! - Configuration types and validation
//!
//! Everything is driven through [`FurnaceController`].

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod control;
pub mod controller;
pub mod error;
pub mod safety;
pub mod sensor;
pub mod state;
pub mod status;
pub mod traits;

pub use command::Command;
pub use controller::FurnaceController;
pub use error::{CommandError, InitError};
pub use status::StatusSnapshot;
