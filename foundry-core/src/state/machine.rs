//! Fault and cooldown state machine
//!
//! Power delivery is a function of the current phase. The phase machine
//! is explicit, finite and deterministic; [`FaultMachine`] adds the fault
//! code and the cooldown countdown around it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::events::Event;
use super::fault::FaultKind;

/// Milliseconds per cooldown decrement
const SECOND_MS: u32 = 1000;

/// Controller phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Not enabled, no fault
    #[default]
    Idle,
    /// Enabled, power may be delivered
    Running,
    /// Tripped; outputs disabled until the countdown expires
    Cooldown,
}

impl Phase {
    /// Process an event and return the next phase
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Idle, PowerGranted) => Running,
            (Running, PowerGranted) => Running,

            (Idle, InterlockTrip(_)) => Cooldown,
            (Running, InterlockTrip(_)) => Cooldown,

            (Running, Disable) => Idle,

            (Cooldown, CooldownExpired) => Idle,

            // Nothing leaves cooldown early
            _ => self,
        }
    }
}

/// Owns the phase, the reported fault code and the cooldown countdown
#[derive(Debug, Clone)]
pub struct FaultMachine {
    phase: Phase,
    fault: FaultKind,
    cooldown_s: u32,
    remaining_s: u32,
    /// Start of the second currently being counted down
    second_anchor_ms: u32,
}

impl FaultMachine {
    /// Create an idle machine with the given lockout length
    pub fn new(cooldown_s: u32) -> Self {
        Self {
            phase: Phase::Idle,
            fault: FaultKind::None,
            cooldown_s,
            remaining_s: 0,
            second_anchor_ms: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True only while running
    pub fn is_enabled(&self) -> bool {
        self.phase == Phase::Running
    }

    /// True while the lockout is counting down
    pub fn is_cooling_down(&self) -> bool {
        self.phase == Phase::Cooldown
    }

    /// Reported fault code
    pub fn fault(&self) -> FaultKind {
        self.fault
    }

    /// Seconds left in the lockout (0 outside cooldown)
    pub fn cooldown_remaining_s(&self) -> u32 {
        self.remaining_s
    }

    /// Record a fault code without changing phase
    ///
    /// Used by interlock evaluation, which reports but does not act.
    pub fn record(&mut self, fault: FaultKind) {
        self.fault = fault;
    }

    /// Record a sensor failure unless a trip already owns the fault code
    pub fn record_sensor_error(&mut self) {
        if !self.is_cooling_down() {
            self.fault = FaultKind::SensorError;
        }
    }

    /// Drop a sensor error once both channels read again
    pub fn clear_sensor_error(&mut self) {
        if self.fault == FaultKind::SensorError && !self.is_cooling_down() {
            self.fault = FaultKind::None;
        }
    }

    /// A power command passed the interlocks
    ///
    /// Returns `true` on the disabled→enabled edge. Has no effect during
    /// cooldown. A fault code left over from a failed check that never
    /// tripped (init, idle sensor error) is cleared.
    pub fn grant_power(&mut self) -> bool {
        let was_enabled = self.is_enabled();
        self.phase = self.phase.transition(Event::PowerGranted);
        if self.is_enabled() {
            self.fault = FaultKind::None;
        }
        !was_enabled && self.is_enabled()
    }

    /// Enter cooldown with `fault` as the reported code
    pub fn trip(&mut self, fault: FaultKind, now_ms: u32) {
        self.fault = fault;
        self.phase = self.phase.transition(Event::InterlockTrip(fault));
        if self.is_cooling_down() {
            self.remaining_s = self.cooldown_s;
            self.second_anchor_ms = now_ms;
        }
    }

    /// Orderly stop, Running → Idle
    pub fn disable(&mut self) {
        self.phase = self.phase.transition(Event::Disable);
    }

    /// Count the lockout down by one per elapsed second
    ///
    /// Returns `true` on the call that expires the cooldown. Expiry clears
    /// the fault code without re-checking the condition that caused it;
    /// a plant that is still unsafe trips again on the next power command.
    pub fn tick_cooldown(&mut self, now_ms: u32) -> bool {
        if !self.is_cooling_down() {
            return false;
        }

        while self.remaining_s > 0 && now_ms.wrapping_sub(self.second_anchor_ms) >= SECOND_MS {
            self.remaining_s -= 1;
            self.second_anchor_ms = self.second_anchor_ms.wrapping_add(SECOND_MS);
        }

        if self.remaining_s == 0 {
            self.fault = FaultKind::None;
            self.phase = self.phase.transition(Event::CooldownExpired);
            return true;
        }

        false
    }
}
