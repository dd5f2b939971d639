//! Coolant flow measurement
//!
//! The flow meter's pulse edges are counted in interrupt context while the
//! control tick consumes the count once per window. The hand-off is a
//! single atomic swap: a pulse that lands during the read is either in
//! this window or the next, never lost.
//!
//! `portable_atomic` provides the swap on cores without native
//! read-modify-write atomics (Cortex-M0+ via a critical section).

use portable_atomic::{AtomicU32, Ordering};

use crate::config::FlowCalibration;

/// Pulse counter shared between the edge handler and the control tick
///
/// Lives in a `static` on target; the controller holds a shared borrow.
#[derive(Debug, Default)]
pub struct FlowPulseCounter {
    pulses: AtomicU32,
}

impl FlowPulseCounter {
    pub const fn new() -> Self {
        Self {
            pulses: AtomicU32::new(0),
        }
    }

    /// Count one edge. Called from the interrupt/edge context only.
    pub fn record_pulse(&self) {
        self.pulses.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the count and reset it to zero in one atomic step
    pub fn take(&self) -> u32 {
        self.pulses.swap(0, Ordering::AcqRel)
    }

    /// Current count without consuming it
    pub fn peek(&self) -> u32 {
        self.pulses.load(Ordering::Relaxed)
    }
}

/// Converts counted pulses to L/min once per window
#[derive(Debug, Clone)]
pub struct FlowEstimator {
    calibration: FlowCalibration,
    window_start_ms: u32,
}

impl FlowEstimator {
    /// Start the first window at `now_ms`
    pub fn new(calibration: FlowCalibration, now_ms: u32) -> Self {
        Self {
            calibration,
            window_start_ms: now_ms,
        }
    }

    /// Close the current window unconditionally and start a new one
    pub fn close_window(&mut self, counter: &FlowPulseCounter, now_ms: u32) -> f32 {
        self.window_start_ms = now_ms;
        self.calibration.pulses_to_lpm(counter.take())
    }

    /// Close the window if it has run its full length
    ///
    /// Returns the new flow rate, or `None` while the window is still open.
    pub fn poll(&mut self, counter: &FlowPulseCounter, now_ms: u32) -> Option<f32> {
        if now_ms.wrapping_sub(self.window_start_ms) >= self.calibration.window_ms {
            Some(self.close_window(counter, now_ms))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulses(counter: &FlowPulseCounter, n: u32) {
        for _ in 0..n {
            counter.record_pulse();
        }
    }

    #[test]
    fn test_take_resets() {
        let counter = FlowPulseCounter::new();
        pulses(&counter, 42);
        assert_eq!(counter.peek(), 42);
        assert_eq!(counter.take(), 42);
        assert_eq!(counter.peek(), 0);
        assert_eq!(counter.take(), 0);
    }

    #[test]
    fn test_window_not_closed_early() {
        let counter = FlowPulseCounter::new();
        let mut estimator = FlowEstimator::new(FlowCalibration::new(), 0);
        pulses(&counter, 150);
        assert_eq!(estimator.poll(&counter, 999), None);
        // Pulses stay counted while the window is open
        assert_eq!(counter.peek(), 150);
    }

    #[test]
    fn test_window_converts_and_resets() {
        let counter = FlowPulseCounter::new();
        let mut estimator = FlowEstimator::new(FlowCalibration::new(), 0);
        pulses(&counter, 150);
        assert_eq!(estimator.poll(&counter, 1000), Some(2.0));
        assert_eq!(counter.peek(), 0);

        // Next window starts at the close time
        pulses(&counter, 75);
        assert_eq!(estimator.poll(&counter, 1999), None);
        assert_eq!(estimator.poll(&counter, 2000), Some(1.0));
    }

    #[test]
    fn test_pulse_after_swap_lands_in_next_window() {
        let counter = FlowPulseCounter::new();
        let mut estimator = FlowEstimator::new(FlowCalibration::new(), 0);
        pulses(&counter, 150);
        assert_eq!(estimator.poll(&counter, 1000), Some(2.0));

        // Edge arriving right after the swap
        counter.record_pulse();
        pulses(&counter, 149);
        assert_eq!(estimator.poll(&counter, 2000), Some(2.0));
    }
}
