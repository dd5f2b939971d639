//! Fault log
//!
//! Bounded in-RAM record of emergency shutdowns. The platform drains it
//! and decides where records go (RTT log, flash, supervisor link).

use heapless::Deque;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::state::FaultKind;

/// Records kept before the oldest is dropped
pub const FAULT_LOG_CAPACITY: usize = 16;

/// One emergency shutdown
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaultRecord {
    /// Reported fault
    pub fault: FaultKind,
    /// Controller runtime when it tripped
    pub runtime_seconds: u32,
    /// Crucible temperature at the trip (°C)
    pub crucible_temp: f32,
    /// Last metered power at the trip (W)
    pub actual_power: f32,
}

/// FIFO of fault records, oldest dropped on overflow
#[derive(Debug, Default)]
pub struct FaultLog {
    records: Deque<FaultRecord, FAULT_LOG_CAPACITY>,
}

impl FaultLog {
    pub const fn new() -> Self {
        Self {
            records: Deque::new(),
        }
    }

    /// Append a record, evicting the oldest when full
    pub fn push(&mut self, record: FaultRecord) {
        if self.records.is_full() {
            self.records.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.records.push_back(record);
    }

    /// Remove and return the oldest record
    pub fn pop(&mut self) -> Option<FaultRecord> {
        self.records.pop_front()
    }

    /// Records waiting to be drained
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
