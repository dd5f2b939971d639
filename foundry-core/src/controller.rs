//! Furnace control loop
//!
//! [`FurnaceController`] owns every output decision. Interlock evaluation,
//! power application and emergency shutdown all go through here, so the
//! enable line is only ever asserted by a power command that passed the
//! interlocks in the same call.
//!
//! The caller drives [`FurnaceController::tick`] every
//! [`TICK_PERIOD_MS`](crate::config::TICK_PERIOD_MS) and feeds flow
//! pulses through a shared [`FlowPulseCounter`].

use crate::command::Command;
use crate::config::FurnaceConfig;
use crate::control::{PidController, RateLimiter};
use crate::error::{CommandError, InitError};
use crate::safety::{evaluate, FaultLog, FaultRecord, InterlockInputs, InterlockStatus};
use crate::sensor::{sample_temperature, FlowEstimator, FlowPulseCounter, PowerMeter};
use crate::state::{ControlMode, FaultKind, FaultMachine, HeaterState, Material, Phase};
use crate::status::{seconds_to_hours, StatusSnapshot};
use crate::traits::{AnalogInput, HardwareIo, SafetyInput};

/// Milliseconds per runtime increment
const RUNTIME_STEP_MS: u32 = 1000;

/// Induction furnace controller
pub struct FurnaceController<'a, IO> {
    io: IO,
    config: FurnaceConfig,
    pulses: &'a FlowPulseCounter,
    state: HeaterState,
    machine: FaultMachine,
    pid: PidController,
    rate: RateLimiter,
    flow: FlowEstimator,
    meter: PowerMeter,
    log: FaultLog,
    /// Start of the runtime second being counted
    runtime_anchor_ms: u32,
    /// Last duty written to the PWM output
    duty: u16,
}

impl<'a, IO: HardwareIo> FurnaceController<'a, IO> {
    /// Create a controller
    ///
    /// No hardware is touched until [`init`](Self::init).
    pub fn new(io: IO, config: FurnaceConfig, pulses: &'a FlowPulseCounter) -> Self {
        let now = io.now_ms();
        Self {
            machine: FaultMachine::new(config.cooldown_s),
            pid: PidController::new(&config.pid),
            rate: RateLimiter::new(config.rate_limit_c_per_min),
            flow: FlowEstimator::new(config.flow, now),
            meter: PowerMeter::new(),
            log: FaultLog::new(),
            state: HeaterState::new(),
            runtime_anchor_ms: now,
            duty: 0,
            io,
            config,
            pulses,
        }
    }

    /// Force outputs off, prime the sensors and check the interlocks
    ///
    /// The first flow window is closed here, so callers should let one
    /// window of pulses accumulate after [`new`](Self::new). A running
    /// controller is stopped the same way as [`disable`](Self::disable);
    /// a pending cooldown is kept. An interlock failure is reported with
    /// its fault code; the controller stays idle and usable.
    pub fn init(&mut self) -> Result<(), InitError> {
        self.outputs_off();
        self.state.power_setpoint = 0.0;
        self.machine.disable();

        self.config.validate()?;

        let now = self.io.now_ms();
        self.state.flow_rate = self.flow.close_window(self.pulses, now);
        self.sample_sensors();
        self.runtime_anchor_ms = now;

        match self.evaluate_safety() {
            InterlockStatus::Safe => Ok(()),
            InterlockStatus::Unsafe(fault) => Err(InitError::Interlock(fault)),
        }
    }

    /// One control cycle
    pub fn tick(&mut self) {
        let now = self.io.now_ms();

        if let Some(rate) = self.flow.poll(self.pulses, now) {
            self.state.flow_rate = rate;
        }

        self.sample_sensors();

        if self.machine.is_enabled()
            && now.wrapping_sub(self.runtime_anchor_ms) >= RUNTIME_STEP_MS
        {
            self.state.runtime_seconds = self.state.runtime_seconds.saturating_add(1);
            self.runtime_anchor_ms = self.runtime_anchor_ms.wrapping_add(RUNTIME_STEP_MS);
        }

        // Outputs are already off; nothing else runs until expiry
        if self.machine.is_cooling_down() {
            self.machine.tick_cooldown(now);
            return;
        }

        if self.machine.is_enabled() {
            if let InterlockStatus::Unsafe(fault) = self.evaluate_safety() {
                self.emergency_shutdown(fault);
                return;
            }
        }

        if self.machine.is_enabled() && self.state.control_mode == ControlMode::AutoPid {
            self.regulate();
        }
    }

    /// Operator power request (%)
    ///
    /// Rejected outright during cooldown. Otherwise the interlocks are
    /// evaluated first; a failure trips the controller and is returned.
    pub fn set_power(&mut self, percent: f32) -> Result<(), CommandError> {
        if self.machine.is_cooling_down() {
            return Err(CommandError::CoolingDown {
                remaining_s: self.machine.cooldown_remaining_s(),
            });
        }
        self.command_power(percent)
    }

    /// Select control mode and material
    ///
    /// Entering AutoPid clears the PID history and the rate limiter
    /// reference.
    pub fn set_control_mode(&mut self, mode: ControlMode, material: Material) {
        self.state.control_mode = mode;
        self.state.material = material;
        if mode == ControlMode::AutoPid {
            self.pid.reset();
            self.rate.reset();
        }
    }

    /// Store a crucible reading from the thermal camera
    ///
    /// Evaluated on the next interlock check.
    pub fn update_crucible_temperature(&mut self, celsius: f32) {
        self.state.crucible_temperature = celsius;
    }

    /// Orderly stop without a fault or cooldown
    ///
    /// No-op while cooling down.
    pub fn disable(&mut self) {
        if !self.machine.is_enabled() {
            return;
        }
        self.outputs_off();
        self.state.power_setpoint = 0.0;
        self.machine.disable();
    }

    /// Dispatch a supervisor command
    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::SetPower(percent) => self.set_power(percent),
            Command::SetControlMode(mode, material) => {
                self.set_control_mode(mode, material);
                Ok(())
            }
            Command::SetCrucibleTemperature(celsius) => {
                self.update_crucible_temperature(celsius);
                Ok(())
            }
            Command::Disable => {
                self.disable();
                Ok(())
            }
        }
    }

    /// Read the safety inputs and evaluate every interlock
    ///
    /// Records the fault code on failure but never changes outputs.
    pub fn evaluate_safety(&mut self) -> InterlockStatus {
        let inputs = InterlockInputs {
            estop_closed: self.io.read_safety_input(SafetyInput::EmergencyStop),
            door_closed: self.io.read_safety_input(SafetyInput::Door),
            flow_rate: self.state.flow_rate,
            coil_temperature: self.state.coil_temperature,
            water_temperature: self.state.water_temperature,
            crucible_temperature: self.state.crucible_temperature,
        };

        let status = evaluate(&inputs, &self.config.limits);
        if let InterlockStatus::Unsafe(fault) = status {
            self.machine.record(fault);
        }
        status
    }

    /// Snapshot of externally visible state
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            enabled: self.machine.is_enabled(),
            power_setpoint: self.state.power_setpoint,
            actual_power: self.state.actual_power,
            crucible_temp: self.state.crucible_temperature,
            coil_temp: self.state.coil_temperature,
            water_temp: self.state.water_temperature,
            flow_rate: self.state.flow_rate,
            fault_code: self.machine.fault(),
            runtime_hours: seconds_to_hours(self.state.runtime_seconds),
            phase: self.machine.phase(),
            cooldown_remaining_s: self.machine.cooldown_remaining_s(),
            control_mode: self.state.control_mode,
            material: self.state.material,
            meter_stale: self.meter.is_stale(),
        }
    }

    /// Oldest unreported shutdown record
    pub fn take_fault_record(&mut self) -> Option<FaultRecord> {
        self.log.pop()
    }

    pub fn state(&self) -> &HeaterState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn fault(&self) -> FaultKind {
        self.machine.fault()
    }

    /// Duty last written to the PWM output
    pub fn commanded_duty(&self) -> u16 {
        self.duty
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Evaluate-then-apply, shared by operator commands and AutoPid
    fn command_power(&mut self, percent: f32) -> Result<(), CommandError> {
        let percent = clamp_percent(percent);
        self.state.power_setpoint = percent;

        match self.evaluate_safety() {
            InterlockStatus::Safe => {
                let duty = percent_to_duty(percent, self.config.pwm_full_scale);
                self.io.set_duty(duty);
                self.duty = duty;

                if self.machine.grant_power() {
                    self.io.set_enable(true);
                    self.runtime_anchor_ms = self.io.now_ms();
                }
                Ok(())
            }
            InterlockStatus::Unsafe(fault) => {
                self.emergency_shutdown(fault);
                Err(CommandError::Interlock(fault))
            }
        }
    }

    /// Trip: outputs off first, then bookkeeping
    ///
    /// No sensor or link access on this path.
    fn emergency_shutdown(&mut self, fault: FaultKind) {
        self.outputs_off();

        let now = self.io.now_ms();
        self.state.power_setpoint = 0.0;
        self.machine.trip(fault, now);
        self.log.push(FaultRecord {
            fault,
            runtime_seconds: self.state.runtime_seconds,
            crucible_temp: self.state.crucible_temperature,
            actual_power: self.state.actual_power,
        });
    }

    fn outputs_off(&mut self) {
        self.io.set_enable(false);
        self.io.set_duty(0);
        self.duty = 0;
    }

    fn sample_sensors(&mut self) {
        let thermal = self.config.thermal;
        let coil = sample_temperature(&mut self.io, AnalogInput::CoilTemperature, &thermal);
        let water = sample_temperature(&mut self.io, AnalogInput::WaterTemperature, &thermal);

        self.state.coil_temperature = coil.celsius();
        self.state.water_temperature = water.celsius();

        if coil.is_valid() && water.is_valid() {
            self.machine.clear_sensor_error();
        } else {
            self.machine.record_sensor_error();
        }

        self.state.actual_power = self.meter.sample(&mut self.io);
    }

    fn regulate(&mut self) {
        let target = self.state.material.target_c(&self.config.targets);
        let current = self.state.crucible_temperature;

        let output = self.pid.compute(target - current);
        let output = self.rate.limit(output, current);

        // A trip here is already handled; the next tick sees cooldown
        let _ = self.command_power(output);
    }
}

/// Clamp to 0–100 %, NaN reads as zero
fn clamp_percent(percent: f32) -> f32 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

fn percent_to_duty(percent: f32, full_scale: u16) -> u16 {
    (percent * full_scale as f32 / 100.0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-5.0), 0.0);
        assert_eq!(clamp_percent(42.5), 42.5);
        assert_eq!(clamp_percent(150.0), 100.0);
        assert_eq!(clamp_percent(f32::NAN), 0.0);
        assert_eq!(clamp_percent(f32::INFINITY), 100.0);
    }

    #[test]
    fn test_percent_to_duty() {
        assert_eq!(percent_to_duty(0.0, 1000), 0);
        assert_eq!(percent_to_duty(50.0, 1000), 500);
        assert_eq!(percent_to_duty(100.0, 1000), 1000);
        assert_eq!(percent_to_duty(100.0, 4095), 4095);
    }
}
