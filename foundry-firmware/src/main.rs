//! Foundry - Induction Furnace Controller Firmware
//!
//! Main firmware binary for RP2040-based furnace control boards. Wires the
//! board peripherals into the controller and spawns the control, flow,
//! meter and status tasks.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Output, Pull};
use embassy_rp::peripherals::UART1;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use foundry_core::sensor::FlowPulseCounter;
use foundry_core::{Command, FurnaceController};
use foundry_drivers::{BoardParts, FurnaceBoard};
use foundry_hal::UartConfig as MeterUartConfig;

use crate::board::{
    enable_off_level, pull, AnalogBank, ContactPin, EmbassyClock, EnablePin, HeaterPwm, MeterLink,
};
use crate::channels::COMMANDS;

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

/// PWM counter top; 125 MHz / 25 000 = 5 kHz carrier
const PWM_TOP: u16 = 25_000;

/// Flow pulses, counted by the flow task and consumed by the control tick
static FLOW_PULSES: FlowPulseCounter = FlowPulseCounter::new();

// Static cells for UART buffers (must live forever)
static METER_TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static METER_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Foundry firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let furnace = config::furnace_config();
    let hw = config::hardware();

    // Outputs are claimed first and held off until the controller owns them
    // Wiring: GPIO14 enable, GPIO16 PWM, GPIO18 flow, GPIO20 E-stop, GPIO21 door
    let enable = Output::new(p.PIN_14, enable_off_level(hw.enable_inverted));
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());
    let pwm = HeaterPwm::new(pwm, PWM_TOP);

    // Normally-closed contacts to the supply rail; a broken wire is pulled low and reads open
    let estop = Input::new(p.PIN_20, pull(hw.estop.pull));
    let door = Input::new(p.PIN_21, pull(hw.door.pull));
    let flow = Input::new(p.PIN_18, pull(hw.flow.pull));

    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let coil = Channel::new_pin(p.PIN_26, Pull::None);
    let water = Channel::new_pin(p.PIN_27, Pull::None);

    info!("GPIO, PWM and ADC initialized");

    // PZEM meter on UART1 (GPIO4 TX, GPIO5 RX)
    let meter_config = MeterUartConfig::default();
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = meter_config.baudrate;

    let tx_buf = METER_TX_BUF.init([0u8; 64]);
    let rx_buf = METER_RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (meter_tx, meter_rx) = uart.split();

    info!("Meter UART initialized at {} baud", meter_config.baudrate);

    let parts = BoardParts {
        estop: ContactPin(estop),
        door: ContactPin(door),
        enable: EnablePin(enable),
        pwm,
        adc: AnalogBank::new(adc, [coil, water]),
        meter: MeterLink,
        clock: EmbassyClock,
    };
    let board = FurnaceBoard::new(parts, &hw, furnace.pwm_full_scale);
    let mut controller = FurnaceController::new(board, furnace, &FLOW_PULSES);

    spawner
        .spawn(tasks::flow_task(flow, hw.flow.inverted, &FLOW_PULSES))
        .unwrap();
    spawner
        .spawn(tasks::meter_task(meter_tx, meter_rx, meter_config))
        .unwrap();

    // One full flow window so init sees a real rate
    Timer::after_millis(furnace.flow.window_ms as u64).await;

    match controller.init() {
        Ok(()) => info!("Interlocks satisfied, furnace ready"),
        Err(e) => warn!("Furnace not ready: {}", e),
    }

    let (mode, material) = config::startup_mode();
    info!("Control mode {}, material {}", mode, material);
    if COMMANDS.try_send(Command::SetControlMode(mode, material)).is_err() {
        warn!("Command queue full at startup");
    }

    spawner.spawn(tasks::control_task(controller)).unwrap();
    spawner.spawn(tasks::status_task()).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
