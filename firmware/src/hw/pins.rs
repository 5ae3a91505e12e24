// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767 arm controller board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, Alternate, Analog, ErasedPin, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub usart2: Usart2Pins,
    pub efe: EfePins,
    pub sfe: SfePins,
}

/// Command link to the host.
pub struct Usart2Pins {
    pub tx: gpiod::PD5<Alternate<7>>,
    pub rx: gpiod::PD6<Alternate<7>>,
}

/// Elbow joint motor driver and potentiometer.
pub struct EfePins {
    pub enable: ErasedPin<Output<PushPull>>,
    pub direction: ErasedPin<Output<PushPull>>,
    pub pwm: gpiod::PD12<Alternate<2>>, // TIM4_CH1
    pub sense: gpioa::PA3<Analog>,      // ADC1_IN3
}

/// Shoulder joint motor driver and potentiometer.
pub struct SfePins {
    pub enable: ErasedPin<Output<PushPull>>,
    pub direction: ErasedPin<Output<PushPull>>,
    pub pwm: gpiod::PD13<Alternate<2>>, // TIM4_CH2
    pub sense: gpioc::PC0<Analog>,      // ADC1_IN10
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            usart2: Usart2Pins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            efe: EfePins {
                enable: gpioe.pe2.into_push_pull_output().erase(),
                direction: gpioe.pe3.into_push_pull_output().erase(),
                pwm: gpiod.pd12.into_alternate::<2>(),
                sense: gpioa.pa3.into_analog(),
            },

            sfe: SfePins {
                enable: gpioe.pe4.into_push_pull_output().erase(),
                direction: gpioe.pe5.into_push_pull_output().erase(),
                pwm: gpiod.pd13.into_alternate::<2>(),
                sense: gpioc.pc0.into_analog(),
            },
        }
    }
}
