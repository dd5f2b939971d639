//! PID temperature regulator
//!
//! Textbook proportional-integral-derivative control on a fixed sample
//! period with a hard output clamp.
//!
//! There is no anti-windup beyond the clamp: the integral term is not
//! bounded on its own. During long saturation (cold start towards a
//! steel target) it keeps growing and must unwind before the output
//! leaves the clamp, so expect overshoot on plants with a long thermal
//! time constant.

use crate::config::PidConfig;

/// PID gains
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct PidGains {
    /// Proportional gain (Kp)
    kp: f32,
    /// Integral gain (Ki)
    ki: f32,
    /// Derivative gain (Kd)
    kd: f32,
}

/// Regulator memory
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct PidState {
    /// Accumulated error × seconds
    integral: f32,
    /// Previous error for the derivative term
    prev_error: f32,
}

/// PID controller with output clamp
#[derive(Debug, Clone)]
pub struct PidController {
    gains: PidGains,
    /// Sample period in seconds
    dt: f32,
    output_min: f32,
    output_max: f32,
    state: PidState,
}

impl PidController {
    /// Create a regulator from configuration
    pub fn new(config: &PidConfig) -> Self {
        Self {
            gains: PidGains {
                kp: config.kp,
                ki: config.ki,
                kd: config.kd,
            },
            dt: config.sample_period_ms as f32 / 1000.0,
            output_min: config.output_min,
            output_max: config.output_max,
            state: PidState::default(),
        }
    }

    /// Zero the integral and derivative memory
    pub fn reset(&mut self) {
        self.state = PidState::default();
    }

    /// Compute one output sample from `error = target - measured`
    pub fn compute(&mut self, error: f32) -> f32 {
        let gains = &self.gains;

        let p_term = gains.kp * error;

        self.state.integral += error * self.dt;
        let i_term = gains.ki * self.state.integral;

        let d_term = gains.kd * (error - self.state.prev_error) / self.dt;
        self.state.prev_error = error;

        (p_term + i_term + d_term).clamp(self.output_min, self.output_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid() -> PidController {
        PidController::new(&PidConfig::new())
    }

    fn approx(a: f32, b: f32) -> bool {
        let diff = a - b;
        diff < 1e-4 && diff > -1e-4
    }

    #[test]
    fn test_first_sample() {
        let mut pid = pid();
        // P = 0.5·10, I = 0.1·(10·0.1), D = 0.05·(10 - 0)/0.1
        let output = pid.compute(10.0);
        assert!(approx(output, 5.0 + 0.1 + 5.0));
    }

    #[test]
    fn test_integral_accumulates() {
        let mut pid = pid();
        pid.compute(10.0);
        pid.compute(10.0);
        assert!(approx(pid.state.integral, 2.0));
    }

    #[test]
    fn test_output_clamped() {
        let mut pid = pid();
        assert_eq!(pid.compute(10_000.0), 100.0);

        let mut pid = self::pid();
        assert_eq!(pid.compute(-10_000.0), 0.0);
    }

    #[test]
    fn test_integral_not_bounded_by_clamp() {
        let mut pid = pid();
        for _ in 0..100 {
            assert_eq!(pid.compute(500.0), 100.0);
        }
        // 100 samples × 500 °C × 0.1 s keeps winding up past the clamp
        assert!(approx(pid.state.integral, 5000.0));
    }

    #[test]
    fn test_reset_clears_memory() {
        let mut pid = pid();
        pid.compute(50.0);
        pid.compute(40.0);
        pid.reset();
        assert_eq!(pid.state.integral, 0.0);

        let mut fresh = self::pid();
        assert!(approx(pid.compute(10.0), fresh.compute(10.0)));
    }
}
