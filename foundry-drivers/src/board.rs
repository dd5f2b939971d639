//! Furnace control board
//!
//! Composes the peripherals of one board into the controller's
//! [`HardwareIo`] capability. Polarity, channel mapping and duty scaling
//! are resolved here so the controller only sees logical values.

use foundry_core::config::{AnalogChannels, FurnaceHwConfig};
use foundry_core::traits::{AdcError, AnalogInput, HardwareIo, SafetyInput, UartError};
use foundry_hal::uart::Uart;
use foundry_hal::{AdcBank, AdcFault, InputPin, Monotonic, OutputPin, PwmChannel};

use crate::contact::SafetyContact;
use crate::output::{EnableLine, PowerPwm};

/// Raw peripherals handed to [`FurnaceBoard::new`]
pub struct BoardParts<I, O, P, A, U, C> {
    pub estop: I,
    pub door: I,
    pub enable: O,
    pub pwm: P,
    pub adc: A,
    pub meter: U,
    pub clock: C,
}

/// Board driver implementing [`HardwareIo`]
pub struct FurnaceBoard<I, O, P, A, U, C> {
    estop: SafetyContact<I>,
    door: SafetyContact<I>,
    enable: EnableLine<O>,
    pwm: PowerPwm<P>,
    adc: A,
    channels: AnalogChannels,
    meter: U,
    clock: C,
}

impl<I, O, P, A, U, C> FurnaceBoard<I, O, P, A, U, C>
where
    I: InputPin,
    O: OutputPin,
    P: PwmChannel,
    A: AdcBank,
    U: Uart,
    C: Monotonic,
{
    /// Wire up the board; the enable line and PWM start off
    ///
    /// `full_scale` is the controller's duty value for 100% power.
    pub fn new(parts: BoardParts<I, O, P, A, U, C>, hw: &FurnaceHwConfig, full_scale: u16) -> Self {
        Self {
            estop: SafetyContact::new(parts.estop, hw.estop.inverted),
            door: SafetyContact::new(parts.door, hw.door.inverted),
            enable: EnableLine::new(parts.enable, hw.enable_inverted),
            pwm: PowerPwm::new(parts.pwm, full_scale),
            adc: parts.adc,
            channels: hw.analog,
            meter: parts.meter,
            clock: parts.clock,
        }
    }

    pub fn enable_line(&self) -> &EnableLine<O> {
        &self.enable
    }

    pub fn pwm(&self) -> &PowerPwm<P> {
        &self.pwm
    }

    pub fn meter(&self) -> &U {
        &self.meter
    }
}

impl<I, O, P, A, U, C> HardwareIo for FurnaceBoard<I, O, P, A, U, C>
where
    I: InputPin,
    O: OutputPin,
    P: PwmChannel,
    A: AdcBank,
    U: Uart,
    C: Monotonic,
{
    fn read_safety_input(&mut self, input: SafetyInput) -> bool {
        match input {
            SafetyInput::EmergencyStop => self.estop.is_closed(),
            SafetyInput::Door => self.door.is_closed(),
        }
    }

    fn set_enable(&mut self, asserted: bool) {
        self.enable.set(asserted);
    }

    fn set_duty(&mut self, duty: u16) {
        self.pwm.set(duty);
    }

    fn sample_adc(&mut self, input: AnalogInput) -> Result<u16, AdcError> {
        let channel = match input {
            AnalogInput::CoilTemperature => self.channels.coil,
            AnalogInput::WaterTemperature => self.channels.water,
        };
        self.adc.read(channel).map_err(|fault| match fault {
            AdcFault::ChannelConfig => AdcError::Config,
            AdcFault::Timeout => AdcError::Timeout,
        })
    }

    fn uart_transact(&mut self, request: &[u8], response: &mut [u8]) -> Result<usize, UartError> {
        self.meter
            .write_blocking(request)
            .map_err(|_| UartError::Bus)?;
        self.meter.flush().map_err(|_| UartError::Bus)?;

        match self.meter.read_blocking(response) {
            Ok(0) => Err(UartError::Timeout),
            Ok(n) => Ok(n),
            Err(_) => Err(UartError::Bus),
        }
    }

    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use foundry_core::config::FurnaceConfig;
    use foundry_core::sensor::{FlowPulseCounter, METER_REQUEST, METER_RESPONSE_LEN};
    use foundry_core::state::FaultKind;
    use foundry_core::{CommandError, FurnaceController, InitError};
    use foundry_hal::{UartRx, UartTx};

    struct MockInput<'a> {
        level: &'a Cell<bool>,
    }

    impl InputPin for MockInput<'_> {
        fn is_high(&self) -> bool {
            self.level.get()
        }
    }

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct MockPwm {
        duty: u16,
    }

    impl PwmChannel for MockPwm {
        fn max_duty(&self) -> u16 {
            25_000
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }

        fn duty(&self) -> u16 {
            self.duty
        }
    }

    /// Channel 0 = coil, 1 = water; anything else is unconfigured
    struct MockAdc {
        coil: Result<u16, AdcFault>,
        water: Result<u16, AdcFault>,
    }

    impl AdcBank for MockAdc {
        fn read(&mut self, channel: u8) -> Result<u16, AdcFault> {
            match channel {
                0 => self.coil,
                1 => self.water,
                _ => Err(AdcFault::ChannelConfig),
            }
        }
    }

    #[derive(Debug)]
    struct LinkDown;

    struct MockMeter {
        reply: Option<[u8; METER_RESPONSE_LEN]>,
        sent: [u8; 8],
        broken: bool,
    }

    impl UartTx for MockMeter {
        type Error = LinkDown;

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if self.broken {
                return Err(LinkDown);
            }
            let n = data.len().min(self.sent.len());
            self.sent[..n].copy_from_slice(&data[..n]);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    impl UartRx for MockMeter {
        type Error = LinkDown;

        fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            match self.reply {
                Some(frame) => {
                    let n = frame.len().min(buf.len());
                    buf[..n].copy_from_slice(&frame[..n]);
                    Ok(n)
                }
                None => Ok(0),
            }
        }
    }

    struct MockClock<'a> {
        ms: &'a Cell<u32>,
    }

    impl Monotonic for MockClock<'_> {
        fn now_ms(&self) -> u32 {
            self.ms.get()
        }
    }

    type TestBoard<'a> =
        FurnaceBoard<MockInput<'a>, MockPin, MockPwm, MockAdc, MockMeter, MockClock<'a>>;

    fn reply(raw: u16) -> [u8; METER_RESPONSE_LEN] {
        let mut frame = [0u8; METER_RESPONSE_LEN];
        frame[0] = 0xF8;
        frame[1] = 0x04;
        frame[7..9].copy_from_slice(&raw.to_be_bytes());
        frame
    }

    fn board<'a>(estop: &'a Cell<bool>, door: &'a Cell<bool>, clock: &'a Cell<u32>) -> TestBoard<'a> {
        let parts = BoardParts {
            estop: MockInput { level: estop },
            door: MockInput { level: door },
            enable: MockPin { high: true },
            pwm: MockPwm { duty: 123 },
            // 310 counts ≈ 25 °C, 248 ≈ 20 °C
            adc: MockAdc {
                coil: Ok(310),
                water: Ok(248),
            },
            meter: MockMeter {
                reply: Some(reply(12_345)),
                sent: [0; 8],
                broken: false,
            },
            clock: MockClock { ms: clock },
        };
        FurnaceBoard::new(parts, &FurnaceHwConfig::default(), 1000)
    }

    #[test]
    fn test_outputs_start_off() {
        let (estop, door, clock) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let board = board(&estop, &door, &clock);

        assert!(!board.enable_line().is_asserted());
        assert!(!board.enable_line().pin().is_set_high());
        assert_eq!(board.pwm().channel().duty(), 0);
    }

    #[test]
    fn test_contacts_read_high_as_closed() {
        let (estop, door, clock) = (Cell::new(true), Cell::new(false), Cell::new(0));
        let mut board = board(&estop, &door, &clock);

        assert!(board.read_safety_input(SafetyInput::EmergencyStop));
        assert!(!board.read_safety_input(SafetyInput::Door));

        estop.set(false);
        door.set(true);
        assert!(!board.read_safety_input(SafetyInput::EmergencyStop));
        assert!(board.read_safety_input(SafetyInput::Door));
    }

    #[test]
    fn test_low_contacts_trip_from_idle() {
        let (estop, door, clock) = (Cell::new(true), Cell::new(false), Cell::new(0));
        let pulses = FlowPulseCounter::new();
        let mut controller =
            FurnaceController::new(board(&estop, &door, &clock), FurnaceConfig::new(), &pulses);
        for _ in 0..200 {
            pulses.record_pulse();
        }
        clock.set(1000);
        assert_eq!(controller.init(), Err(InitError::Interlock(FaultKind::DoorOpen)));

        door.set(true);
        estop.set(false);
        assert_eq!(
            controller.set_power(20.0),
            Err(CommandError::Interlock(FaultKind::EStop))
        );
        assert!(!controller.io().enable_line().pin().is_set_high());
    }

    #[test]
    fn test_duty_scaled_to_channel() {
        let (estop, door, clock) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let mut board = board(&estop, &door, &clock);

        board.set_duty(400);
        assert_eq!(board.pwm().channel().duty(), 10_000);
    }

    #[test]
    fn test_adc_errors_map() {
        let (estop, door, clock) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let mut board = board(&estop, &door, &clock);

        assert_eq!(board.sample_adc(AnalogInput::CoilTemperature), Ok(310));
        board.adc.water = Err(AdcFault::Timeout);
        assert_eq!(
            board.sample_adc(AnalogInput::WaterTemperature),
            Err(AdcError::Timeout)
        );

        board.channels.coil = 7;
        assert_eq!(
            board.sample_adc(AnalogInput::CoilTemperature),
            Err(AdcError::Config)
        );
    }

    #[test]
    fn test_meter_exchange() {
        let (estop, door, clock) = (Cell::new(false), Cell::new(false), Cell::new(0));
        let mut board = board(&estop, &door, &clock);
        let mut frame = [0u8; METER_RESPONSE_LEN];

        assert_eq!(board.uart_transact(&METER_REQUEST, &mut frame), Ok(METER_RESPONSE_LEN));
        assert_eq!(board.meter().sent, METER_REQUEST);
        assert_eq!(frame[7..9], 12_345u16.to_be_bytes());

        board.meter.reply = None;
        assert_eq!(
            board.uart_transact(&METER_REQUEST, &mut frame),
            Err(UartError::Timeout)
        );

        board.meter.broken = true;
        assert_eq!(
            board.uart_transact(&METER_REQUEST, &mut frame),
            Err(UartError::Bus)
        );
    }

    #[test]
    fn test_controller_on_board() {
        let (estop, door, clock) = (Cell::new(true), Cell::new(true), Cell::new(0));
        let pulses = FlowPulseCounter::new();
        let mut controller =
            FurnaceController::new(board(&estop, &door, &clock), FurnaceConfig::new(), &pulses);

        for _ in 0..200 {
            pulses.record_pulse();
        }
        clock.set(1000);
        assert_eq!(controller.init(), Ok(()));

        controller.set_power(50.0).unwrap();
        assert!(controller.io().enable_line().pin().is_set_high());
        assert_eq!(controller.io().pwm().channel().duty(), 12_500);

        // E-stop pressed: the contact opens and the pin is pulled low
        estop.set(false);
        clock.set(1010);
        controller.tick();

        assert_eq!(controller.fault(), FaultKind::EStop);
        assert!(!controller.io().enable_line().pin().is_set_high());
        assert_eq!(controller.io().pwm().channel().duty(), 0);
    }
}
