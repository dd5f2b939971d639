//! PZEM power meter transaction
//!
//! Request/response over the meter UART. A failed or malformed exchange
//! leaves the cached reading in place; it does not raise a fault.

use crate::traits::{HardwareIo, UartError};

/// Fixed read request
pub const METER_REQUEST: [u8; 8] = [0xF8, 0x04, 0x00, 0x00, 0x00, 0x0A, 0x64, 0x64];

/// Reply length
pub const METER_RESPONSE_LEN: usize = 25;

/// Offset of the big-endian power register in the reply
const POWER_OFFSET: usize = 7;

/// Power register resolution (W per count)
const WATTS_PER_COUNT: f32 = 0.1;

/// Why a reply was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeterError {
    /// Link failure or timeout
    Link(UartError),
    /// Fewer bytes than a full reply
    ShortFrame(usize),
    /// Reply does not echo the request's address and function
    BadHeader,
}

/// Parse a complete reply into watts
pub fn parse_response(frame: &[u8]) -> Result<f32, MeterError> {
    if frame.len() < METER_RESPONSE_LEN {
        return Err(MeterError::ShortFrame(frame.len()));
    }
    if frame[0] != METER_REQUEST[0] || frame[1] != METER_REQUEST[1] {
        return Err(MeterError::BadHeader);
    }
    let raw = u16::from_be_bytes([frame[POWER_OFFSET], frame[POWER_OFFSET + 1]]);
    Ok(raw as f32 * WATTS_PER_COUNT)
}

/// Power meter with stale-value fallback
#[derive(Debug, Clone, Default)]
pub struct PowerMeter {
    last_watts: f32,
    consecutive_failures: u32,
}

impl PowerMeter {
    pub const fn new() -> Self {
        Self {
            last_watts: 0.0,
            consecutive_failures: 0,
        }
    }

    /// Run one transaction and return the freshest known reading
    pub fn sample<IO: HardwareIo>(&mut self, io: &mut IO) -> f32 {
        match self.transact(io) {
            Ok(watts) => {
                self.last_watts = watts;
                self.consecutive_failures = 0;
            }
            Err(_) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            }
        }
        self.last_watts
    }

    fn transact<IO: HardwareIo>(&mut self, io: &mut IO) -> Result<f32, MeterError> {
        let mut frame = [0u8; METER_RESPONSE_LEN];
        let received = io
            .uart_transact(&METER_REQUEST, &mut frame)
            .map_err(MeterError::Link)?;
        parse_response(&frame[..received.min(METER_RESPONSE_LEN)])
    }

    /// True when the cached reading did not come from the latest exchange
    pub fn is_stale(&self) -> bool {
        self.consecutive_failures > 0
    }
}
