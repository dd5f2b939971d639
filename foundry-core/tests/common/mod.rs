//! Scriptable furnace hardware for host tests

#![allow(dead_code)]

use foundry_core::config::{FurnaceConfig, ThermalCalibration};
use foundry_core::sensor::{FlowPulseCounter, METER_RESPONSE_LEN};
use foundry_core::traits::{AdcError, AnalogInput, HardwareIo, SafetyInput, UartError};
use foundry_core::FurnaceController;

/// Pulses in one 1 s window that give ~2.67 L/min
pub const HEALTHY_PULSES: u32 = 200;

/// Simulated board: contacts, outputs, converters, meter link and clock
#[derive(Debug, Clone)]
pub struct FakeIo {
    pub estop_closed: bool,
    pub door_closed: bool,
    pub coil: Result<u16, AdcError>,
    pub water: Result<u16, AdcError>,
    /// `None` makes every meter exchange time out
    pub meter_frame: Option<[u8; METER_RESPONSE_LEN]>,
    pub now_ms: u32,

    pub enable: bool,
    pub duty: u16,
    /// Every write to the enable line, in order
    pub enable_writes: Vec<bool>,
    pub duty_writes: usize,
    pub safety_reads: usize,
    pub adc_reads: usize,
    pub uart_exchanges: usize,
}

impl FakeIo {
    /// Safe plant: contacts closed, 25 °C coil, 20 °C water, meter at 1500 W
    pub fn healthy() -> Self {
        Self {
            estop_closed: true,
            door_closed: true,
            coil: Ok(counts_for(25.0)),
            water: Ok(counts_for(20.0)),
            meter_frame: Some(meter_frame(15_000)),
            now_ms: 0,
            enable: false,
            duty: 0,
            enable_writes: Vec::new(),
            duty_writes: 0,
            safety_reads: 0,
            adc_reads: 0,
            uart_exchanges: 0,
        }
    }

    pub fn advance(&mut self, ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(ms);
    }

    /// Zero the access counters
    pub fn clear_counters(&mut self) {
        self.enable_writes.clear();
        self.duty_writes = 0;
        self.safety_reads = 0;
        self.adc_reads = 0;
        self.uart_exchanges = 0;
    }
}

impl HardwareIo for FakeIo {
    fn read_safety_input(&mut self, input: SafetyInput) -> bool {
        self.safety_reads += 1;
        match input {
            SafetyInput::EmergencyStop => self.estop_closed,
            SafetyInput::Door => self.door_closed,
        }
    }

    fn set_enable(&mut self, asserted: bool) {
        self.enable = asserted;
        self.enable_writes.push(asserted);
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty = duty;
        self.duty_writes += 1;
    }

    fn sample_adc(&mut self, input: AnalogInput) -> Result<u16, AdcError> {
        self.adc_reads += 1;
        match input {
            AnalogInput::CoilTemperature => self.coil,
            AnalogInput::WaterTemperature => self.water,
        }
    }

    fn uart_transact(&mut self, _request: &[u8], response: &mut [u8]) -> Result<usize, UartError> {
        self.uart_exchanges += 1;
        let frame = self.meter_frame.ok_or(UartError::Timeout)?;
        let n = frame.len().min(response.len());
        response[..n].copy_from_slice(&frame[..n]);
        Ok(n)
    }

    fn now_ms(&self) -> u32 {
        self.now_ms
    }
}

/// ADC counts that read back as roughly `celsius`
pub fn counts_for(celsius: f32) -> u16 {
    let cal = ThermalCalibration::new();
    let volts = celsius / cal.degrees_per_volt;
    (volts / cal.vref * cal.adc_counts as f32 + 0.5) as u16
}

/// Meter reply carrying `raw` tenths of a watt
pub fn meter_frame(raw: u16) -> [u8; METER_RESPONSE_LEN] {
    let mut frame = [0u8; METER_RESPONSE_LEN];
    frame[0] = 0xF8;
    frame[1] = 0x04;
    frame[7..9].copy_from_slice(&raw.to_be_bytes());
    frame
}

pub fn feed(pulses: &FlowPulseCounter, n: u32) {
    for _ in 0..n {
        pulses.record_pulse();
    }
}

/// Controller after a successful init with healthy flow
pub fn started(pulses: &FlowPulseCounter) -> FurnaceController<'_, FakeIo> {
    let mut controller = FurnaceController::new(FakeIo::healthy(), FurnaceConfig::new(), pulses);
    feed(pulses, HEALTHY_PULSES);
    controller.io_mut().advance(1000);
    controller.init().expect("healthy plant must init");
    controller
}

/// Advance one tick period and run a tick
pub fn step(controller: &mut FurnaceController<'_, FakeIo>, pulses: &FlowPulseCounter, flowing: bool) {
    // Keep each 1 s window topped up: HEALTHY_PULSES spread over 100 ticks
    if flowing {
        feed(pulses, HEALTHY_PULSES / 100);
    }
    controller.io_mut().advance(10);
    controller.tick();
}

/// Run `ms` worth of ticks
pub fn run_for(
    controller: &mut FurnaceController<'_, FakeIo>,
    pulses: &FlowPulseCounter,
    ms: u32,
    flowing: bool,
) {
    for _ in 0..ms / 10 {
        step(controller, pulses, flowing);
    }
}
