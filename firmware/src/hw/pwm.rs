// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Motor speed PWM on TIM4 channels 1 and 2, using direct PAC register access.
//!
//! Edge-aligned PWM mode 1 with preloaded compare registers, so a duty change takes effect at
//! the next period boundary.

use core::ops::Deref;

use embedded_hal::PwmPin;
use stm32f7xx_hal::{
    gpio::{gpiod, Alternate},
    pac,
};

/// Speed outputs: TIM4_CH1 on PD12 (EFE), TIM4_CH2 on PD13 (SFE).
pub type PwmPins = (gpiod::PD12<Alternate<2>>, gpiod::PD13<Alternate<2>>);

/// TIM4 configured as a two-channel PWM generator. Owns the timer and its output pins.
pub struct PwmTimer {
    _tim: pac::TIM4,
    _pins: PwmPins,
}

/// TIM4 output channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channel {
    C1,
    C2,
}

impl PwmTimer {
    /// Enable TIM4 and start it at `frequency_hz`, both channels at zero duty.
    ///
    /// `timer_clock_hz` is the APB1 timer clock (`clocks.timclk1()`).
    pub fn tim4(tim: pac::TIM4, pins: PwmPins, timer_clock_hz: u32, frequency_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        // Smallest prescaler that keeps the period inside the 16-bit auto-reload register.
        let ticks = timer_clock_hz / frequency_hz;
        let psc = (ticks - 1) / (1 << 16);
        let arr = ticks / (psc + 1) - 1;

        tim.cr1.modify(|_, w| unsafe { w.bits(0) });
        tim.psc.write(|w| unsafe { w.bits(psc) });
        tim.arr.write(|w| unsafe { w.bits(arr) });
        tim.ccr1.write(|w| unsafe { w.bits(0) });
        tim.ccr2.write(|w| unsafe { w.bits(0) });

        // OC1M = OC2M = PWM mode 1 (0b110), OC1PE = OC2PE = 1
        tim.ccmr1_output()
            .write(|w| unsafe { w.bits((0b110 << 4) | (1 << 3) | (0b110 << 12) | (1 << 11)) });

        // Load PSC/ARR, then ARPE + CEN
        tim.egr.write(|w| unsafe { w.bits(1) });
        tim.cr1.write(|w| unsafe { w.bits((1 << 7) | 1) });

        Self {
            _tim: tim,
            _pins: pins,
        }
    }

    pub fn channel(&self, channel: Channel) -> PwmChannel {
        PwmChannel { channel }
    }
}

/// One TIM4 compare output.
pub struct PwmChannel {
    channel: Channel,
}

impl PwmChannel {
    #[inline]
    fn regs() -> &'static <pac::TIM4 as Deref>::Target {
        unsafe { &*pac::TIM4::ptr() }
    }

    #[inline]
    fn enable_bit(&self) -> u32 {
        match self.channel {
            Channel::C1 => 1 << 0,
            Channel::C2 => 1 << 4,
        }
    }
}

impl PwmPin for PwmChannel {
    type Duty = u16;

    fn disable(&mut self) {
        let bit = self.enable_bit();
        Self::regs()
            .ccer
            .modify(|r, w| unsafe { w.bits(r.bits() & !bit) });
    }

    fn enable(&mut self) {
        let bit = self.enable_bit();
        Self::regs()
            .ccer
            .modify(|r, w| unsafe { w.bits(r.bits() | bit) });
    }

    fn get_duty(&self) -> u16 {
        let tim = Self::regs();
        match self.channel {
            Channel::C1 => tim.ccr1.read().bits() as u16,
            Channel::C2 => tim.ccr2.read().bits() as u16,
        }
    }

    fn get_max_duty(&self) -> u16 {
        Self::regs().arr.read().bits() as u16
    }

    fn set_duty(&mut self, duty: u16) {
        let tim = Self::regs();
        match self.channel {
            Channel::C1 => tim.ccr1.write(|w| unsafe { w.bits(u32::from(duty)) }),
            Channel::C2 => tim.ccr2.write(|w| unsafe { w.bits(u32::from(duty)) }),
        }
    }
}
