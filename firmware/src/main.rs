// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Arm controller firmware.
//!
//! USART2 receive interrupts feed the command link; the main loop runs the position controller,
//! one joint every [`config::JOINT_PERIOD_MS`].
//!
//! The main loop only holds the board lock for one actuation primitive or one transmitted byte at
//! a time, so the receive interrupt is never held off for longer than about a character time.

#![no_main]
#![no_std]

use core::cell::RefCell;
use core::fmt::Write;

use cortex_m::delay::Delay;
use cortex_m::interrupt::{free, Mutex};
use cortex_m_rt::entry;
use embedded_hal::serial::Read;
use heapless::String;
use panic_halt as _;

use hal::{
    gpio::{ErasedPin, Output, PushPull},
    pac::{self, interrupt, USART2},
    prelude::*,
    serial::{Config, Event, Rx, Serial, Tx},
};
use stm32f7xx_hal as hal;

use armlink::control::{JointGoals, JointId, PositionController, JOINT_COUNT};
use armlink::drivers::MotorChannel;
use armlink::hw::{Direction, EnableState, JointBank, Usart};
use armlink::protocol::Link;

mod config;
mod hw;
use hw::{Adc, AdcChannel, BoardPins, Channel, PwmChannel, PwmTimer};

type JointMotor =
    MotorChannel<ErasedPin<Output<PushPull>>, ErasedPin<Output<PushPull>>, PwmChannel, AdcChannel>;

/// Hardware shared between the USART2 interrupt and the control loop.
struct Board {
    arm: [JointMotor; JOINT_COUNT],
    usart: Usart<Tx<USART2>>,
    rx: Rx<USART2>,
    link: Link<'static>,
}

static GOALS: JointGoals = JointGoals::new();
static BOARD: Mutex<RefCell<Option<Board>>> = Mutex::new(RefCell::new(None));

/// Longest diagnostic line the control loop produces, with room to spare.
const LOG_LINE_CAPACITY: usize = 64;

type ArmError = <[JointMotor; JOINT_COUNT] as JointBank>::Error;

/// Run `f` on the arm under the board lock. `Err(None)` if the board is not installed yet.
fn with_arm<R>(
    f: impl FnOnce(&mut [JointMotor; JOINT_COUNT]) -> Result<R, ArmError>,
) -> Result<R, Option<ArmError>> {
    free(|cs| match BOARD.borrow(cs).borrow_mut().as_mut() {
        Some(board) => f(&mut board.arm).map_err(Some),
        None => Err(None),
    })
}

/// The arm as seen from the control loop: each primitive locks the board on its own.
struct SharedArm;

impl JointBank for SharedArm {
    type Error = Option<ArmError>;

    fn set_enable(&mut self, joint: JointId, state: EnableState) -> Result<(), Self::Error> {
        with_arm(|arm| arm.set_enable(joint, state))
    }

    fn set_direction(&mut self, joint: JointId, direction: Direction) -> Result<(), Self::Error> {
        with_arm(|arm| arm.set_direction(joint, direction))
    }

    fn set_speed(&mut self, joint: JointId, percent: u8) -> Result<(), Self::Error> {
        with_arm(|arm| arm.set_speed(joint, percent))
    }

    fn read_position(&mut self, joint: JointId) -> Result<u16, Self::Error> {
        with_arm(|arm| arm.read_position(joint))
    }
}

/// Send `text` on the command link, one byte per critical section.
fn send(text: &str) {
    for &b in text.as_bytes() {
        free(|cs| {
            if let Some(board) = BOARD.borrow(cs).borrow_mut().as_mut() {
                board.usart.write_byte(b);
            }
        });
    }
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    let mut delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    let BoardPins { usart2, efe, sfe } = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART2 (command link)
    let usart_cfg = Config {
        baud_rate: config::BAUD_RATE.bps(),
        ..Default::default()
    };
    let mut serial = Serial::new(
        dp.USART2,
        (usart2.tx, usart2.rx),
        &clocks,
        usart_cfg,
    );
    serial.listen(Event::Rxne);
    let (tx, rx) = serial.split();
    let mut usart = Usart::new(tx);

    // Motors
    let pwm = PwmTimer::tim4(
        dp.TIM4,
        (efe.pwm, sfe.pwm),
        clocks.timclk1().raw(),
        config::PWM_FREQUENCY_HZ,
    );
    let adc = Adc::adc1(dp.ADC1, (efe.sense, sfe.sense));
    let [efe_ch, sfe_ch] = config::POSITION_ADC_CHANNELS;

    let efe_motor = MotorChannel::new(
        efe.enable,
        efe.direction,
        pwm.channel(Channel::C1),
        adc.channel(efe_ch),
    )
    .unwrap();
    let sfe_motor = MotorChannel::new(
        sfe.enable,
        sfe.direction,
        pwm.channel(Channel::C2),
        adc.channel(sfe_ch),
    )
    .unwrap();
    let mut arm = [efe_motor, sfe_motor];

    delay.delay_ms(config::STARTUP_DELAY_MS);

    let mut controller = PositionController::new(&GOALS, config::JOINT_CONFIGS);
    if let Err(e) = controller.latch_goals(&mut arm) {
        let _ = write!(usart, "E: {:?}\r\n", e);
    }

    usart.println("Ready");

    free(|cs| {
        BOARD.borrow(cs).replace(Some(Board {
            arm,
            usart,
            rx,
            link: Link::new(&GOALS),
        }));
    });
    unsafe { cortex_m::peripheral::NVIC::unmask(pac::Interrupt::USART2) };

    let mut line: String<LOG_LINE_CAPACITY> = String::new();
    loop {
        line.clear();
        if let Err(e) = controller.tick(&mut SharedArm, &mut line) {
            let _ = write!(line, "E: {:?}\r\n", e);
        }
        send(&line);

        delay.delay_ms(config::JOINT_PERIOD_MS);
    }
}

#[interrupt]
fn USART2() {
    free(|cs| {
        if let Some(board) = BOARD.borrow(cs).borrow_mut().as_mut() {
            // Reading RDR clears RXNE; a read error clears its flag.
            match board.rx.read() {
                Ok(byte) => {
                    // Failures are already reported on the link.
                    let _ = board.link.on_byte_received(&mut board.arm, &mut board.usart, byte);
                }
                Err(e) => {
                    // A byte was lost, so the frame in progress cannot be trusted.
                    board.link.reset();
                    let _ = write!(board.usart, "E: rx {:?}\r\n", e);
                }
            }
        }
    });
}
