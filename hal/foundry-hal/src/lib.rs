//! Foundry Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits the furnace board driver is
//! written against. Chip-specific code (the RP2040 firmware, host test
//! doubles) implements them, so the same board wiring runs everywhere.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  foundry-core (controller, interlocks)  │
//! └─────────────────────────────────────────┘
//!                     │ HardwareIo
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  foundry-drivers (FurnaceBoard)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  foundry-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  foundry-firmware (embassy-rp)          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`adc::AdcBank`] - Multiplexed analog sampling
//! - [`pwm::PwmChannel`] - Duty-cycle output
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`clock::Monotonic`] - Millisecond time base

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod clock;
pub mod gpio;
pub mod pwm;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::{AdcBank, AdcFault};
pub use clock::Monotonic;
pub use gpio::{InputPin, OutputPin};
pub use pwm::PwmChannel;
pub use uart::{Uart, UartConfig, UartRx, UartTx};
