//! Digital pins
//!
//! Levels only. Polarity is resolved by the drivers from the board
//! configuration, never here.

/// Push-pull output that remembers the level it drives
pub trait OutputPin {
    fn set_high(&mut self);

    fn set_low(&mut self);

    /// Drive `high` as the electrical level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Level last driven, not a read-back of the pad
    fn is_set_high(&self) -> bool;
}

/// Digital input
///
/// Reads must be cheap and non-blocking: interlock inputs are sampled
/// inside the shutdown path.
pub trait InputPin {
    /// Electrical level is high
    fn is_high(&self) -> bool;
}
