//! RP2040 peripherals behind the foundry-hal traits
//!
//! Thin newtypes over embassy-rp drivers. Together with
//! [`FurnaceBoard`] they form the controller's `HardwareIo`.

use core::cell::Cell;

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Instant;

use foundry_core::config::PinPull;
use foundry_core::sensor::METER_RESPONSE_LEN;
use foundry_core::traits::UartError;
use foundry_drivers::FurnaceBoard;
use foundry_hal::{AdcBank, AdcFault, InputPin, Monotonic, OutputPin, PwmChannel, UartRx, UartTx};

use crate::channels::METER_POLL;

/// The furnace board as wired on this target
pub type Board =
    FurnaceBoard<ContactPin, EnablePin, HeaterPwm, AnalogBank, MeterLink, EmbassyClock>;

/// Pad bias for a configured input
pub fn pull(bias: PinPull) -> Pull {
    match bias {
        PinPull::None => Pull::None,
        PinPull::Up => Pull::Up,
        PinPull::Down => Pull::Down,
    }
}

/// Pad level that leaves the induction module disabled
pub fn enable_off_level(inverted: bool) -> Level {
    if inverted {
        Level::High
    } else {
        Level::Low
    }
}

/// Safety contact input
pub struct ContactPin(pub Input<'static>);

impl InputPin for ContactPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Induction module enable output
pub struct EnablePin(pub Output<'static>);

impl OutputPin for EnablePin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Power reference on PWM channel A of one slice
pub struct HeaterPwm {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl HeaterPwm {
    /// Take over a slice and start at zero duty with the given `top`
    pub fn new(mut pwm: Pwm<'static>, top: u16) -> Self {
        let mut config = PwmConfig::default();
        config.top = top;
        config.compare_a = 0;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl PwmChannel for HeaterPwm {
    fn max_duty(&self) -> u16 {
        self.config.top
    }

    fn set_duty(&mut self, duty: u16) {
        self.config.compare_a = duty.min(self.config.top);
        self.pwm.set_config(&self.config);
    }

    fn duty(&self) -> u16 {
        self.config.compare_a
    }
}

/// Blocking ADC with the sensor channels in index order
pub struct AnalogBank {
    adc: Adc<'static, Blocking>,
    channels: [Channel<'static>; 2],
}

impl AnalogBank {
    pub fn new(adc: Adc<'static, Blocking>, channels: [Channel<'static>; 2]) -> Self {
        Self { adc, channels }
    }
}

impl AdcBank for AnalogBank {
    fn read(&mut self, channel: u8) -> Result<u16, AdcFault> {
        let channel = self
            .channels
            .get_mut(channel as usize)
            .ok_or(AdcFault::ChannelConfig)?;
        self.adc
            .blocking_read(channel)
            .map_err(|_| AdcFault::Timeout)
    }
}

/// Outcome of the most recent meter exchange
#[derive(Clone, Copy)]
pub enum MeterReply {
    Frame {
        bytes: [u8; METER_RESPONSE_LEN],
        len: usize,
    },
    Failed(UartError),
}

/// Latest exchange result, published by the meter task
pub static METER_REPLY: Mutex<CriticalSectionRawMutex, Cell<Option<MeterReply>>> =
    Mutex::new(Cell::new(None));

/// Meter link as seen from the control tick
///
/// Writing only asks the meter task for another exchange; reading
/// returns whatever the last completed exchange produced. Neither
/// waits on the UART.
pub struct MeterLink;

/// Bus fault reported by the meter task
#[derive(Debug)]
pub struct MeterBusError;

impl UartTx for MeterLink {
    type Error = MeterBusError;

    fn write_blocking(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        // The request frame is fixed; the meter task owns it
        METER_POLL.signal(());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl UartRx for MeterLink {
    type Error = MeterBusError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match METER_REPLY.lock(|reply| reply.get()) {
            Some(MeterReply::Frame { bytes, len }) => {
                let n = len.min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Some(MeterReply::Failed(UartError::Bus)) => Err(MeterBusError),
            // Timed out, or nothing exchanged yet
            Some(MeterReply::Failed(UartError::Timeout)) | None => Ok(0),
        }
    }
}

/// embassy-time as the controller's millisecond clock
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
