//! PWM output abstraction

/// A single PWM compare channel
pub trait PwmChannel {
    /// Compare value that produces 100% duty
    fn max_duty(&self) -> u16;

    /// Set the compare value, `0..=max_duty()`
    fn set_duty(&mut self, duty: u16);

    /// Currently programmed compare value
    fn duty(&self) -> u16;
}
