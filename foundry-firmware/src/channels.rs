//! Inter-task communication channels
//!
//! Static embassy-sync primitives shared between the firmware tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use foundry_core::{Command, StatusSnapshot};

/// Channel capacity for supervisor commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Supervisor commands, drained by the control task once per tick
pub static COMMANDS: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Latest controller status (published by the control task)
pub static STATUS: Signal<CriticalSectionRawMutex, StatusSnapshot> = Signal::new();

/// Request for one power meter exchange
pub static METER_POLL: Signal<CriticalSectionRawMutex, ()> = Signal::new();
