//! Hardware driver implementations
//!
//! This crate provides the board-level implementation of the
//! `foundry-core` [`HardwareIo`](foundry_core::traits::HardwareIo) trait
//! on top of the `foundry-hal` peripheral traits:
//!
//! - Enable line and PWM power reference
//! - Normally-closed safety contacts
//! - [`FurnaceBoard`] composing them with the ADC, meter UART and clock

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod contact;
pub mod output;

pub use board::{BoardParts, FurnaceBoard};
pub use contact::SafetyContact;
pub use output::{EnableLine, PowerPwm};
