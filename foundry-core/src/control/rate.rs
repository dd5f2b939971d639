//! Crucible heating-rate limiter
//!
//! Guards the crucible against thermal shock: when the temperature moved
//! faster than the limit between the last two samples, the PID output
//! for this tick is halved.

/// Rate limiter over consecutive crucible samples
///
/// The first sample after [`new`](Self::new) or [`reset`](Self::reset)
/// has no reference, so its output passes through unhalved however far
/// the temperature has moved.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// °C/min
    limit_c_per_min: f32,
    previous_c: Option<f32>,
}

impl RateLimiter {
    pub fn new(limit_c_per_min: f32) -> Self {
        Self {
            limit_c_per_min,
            previous_c: None,
        }
    }

    /// Forget the reference sample
    pub fn reset(&mut self) {
        self.previous_c = None;
    }

    /// Rate between the stored sample and `current_c`, in °C/min
    ///
    /// The difference is scaled by 60 as if samples were one second
    /// apart, regardless of the actual tick period.
    fn rate(&self, current_c: f32) -> Option<f32> {
        self.previous_c.map(|previous| (current_c - previous) * 60.0)
    }

    /// Apply the limit to `output` and remember `current_c`
    pub fn limit(&mut self, output: f32, current_c: f32) -> f32 {
        let limited = match self.rate(current_c) {
            Some(rate) if rate > self.limit_c_per_min || rate < -self.limit_c_per_min => {
                output * 0.5
            }
            _ => output,
        };
        self.previous_c = Some(current_c);
        limited
    }
}
