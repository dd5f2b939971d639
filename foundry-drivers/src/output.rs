//! Power stage outputs
//!
//! The induction module has two control inputs: a hardware enable line
//! and a PWM power reference.

use foundry_hal::{OutputPin, PwmChannel};

/// Enable line to the induction module
///
/// Controls the module's enable input via a GPIO pin. The pin can be
/// configured as active-high (default) or active-low. The line is
/// released on construction.
pub struct EnableLine<P> {
    pin: P,
    /// If true, asserted = pin LOW
    inverted: bool,
    asserted: bool,
}

impl<P: OutputPin> EnableLine<P> {
    /// Create an enable line and drive it released
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut line = Self {
            pin,
            inverted,
            asserted: false,
        };
        line.set(false);
        line
    }

    pub fn set(&mut self, asserted: bool) {
        self.asserted = asserted;
        // Normal: asserted → high. Inverted: asserted → low
        self.pin.set_state(asserted != self.inverted);
    }

    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

/// PWM power reference scaled from controller units
///
/// The controller commands `0..=full_scale`; the channel is programmed
/// in its own compare units.
pub struct PowerPwm<P> {
    channel: P,
    full_scale: u16,
}

impl<P: PwmChannel> PowerPwm<P> {
    /// Wrap a channel and force it to zero duty
    pub fn new(channel: P, full_scale: u16) -> Self {
        let mut pwm = Self {
            channel,
            full_scale: full_scale.max(1),
        };
        pwm.set(0);
        pwm
    }

    /// Program `duty` out of `full_scale`, saturating above full scale
    pub fn set(&mut self, duty: u16) {
        let duty = duty.min(self.full_scale) as u32;
        let compare = duty * self.channel.max_duty() as u32 / self.full_scale as u32;
        self.channel.set_duty(compare as u16);
    }

    pub fn channel(&self) -> &P {
        &self.channel
    }
}
