//! Safety contact inputs

use foundry_hal::InputPin;

/// Normally-closed safety contact (e-stop, door switch)
///
/// Reports whether the contact is closed, i.e. whether the circuit it
/// guards permits operation. With `inverted` set, closed reads low.
pub struct SafetyContact<P> {
    pin: P,
    inverted: bool,
}

impl<P: InputPin> SafetyContact<P> {
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    /// Sample the contact, no debounce
    pub fn is_closed(&self) -> bool {
        self.pin.is_high() != self.inverted
    }
}
