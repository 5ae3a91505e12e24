// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Joint position feedback through ADC1 using direct PAC register access.
//!
//! Blocking single-channel reads: start a conversion, spin on EOC, return the 12-bit result.
//!
//! Example:
//! ```ignore
//! let adc = Adc::adc1(dp.ADC1, (pins.efe.sense, pins.sfe.sense));
//! let efe = adc.channel(3);
//! ```

use armlink::drivers::PositionSensor;
use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, Analog},
    pac,
};

/// Potentiometer inputs: EFE on ADC1_IN3, SFE on ADC1_IN10.
pub type SensePins = (gpioa::PA3<Analog>, gpioc::PC0<Analog>);

/// Initialized ADC1. Holds the peripheral and the analog pins for as long as the channels are in
/// use.
pub struct Adc {
    _adc: pac::ADC1,
    _pins: SensePins,
}

impl Adc {
    /// Enable the ADC1 clock and configure 12-bit, right-aligned, software-triggered conversions.
    pub fn adc1(adc1: pac::ADC1, pins: SensePins) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        // Power off to configure
        adc1.cr2.modify(|_, w| w.adon().clear_bit());

        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });

        // 144-cycle sample time (0b110) on every regular channel. Conversions run with interrupts
        // masked and must finish inside one character time on the command link.
        adc1.smpr1.write(|w| unsafe { w.bits(0x06DB_6DB6) });
        adc1.smpr2.write(|w| unsafe { w.bits(0x36DB_6DB6) });

        // Sequence length = 1 conversion
        adc1.sqr1.modify(|_, w| w.l().bits(0));

        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self {
            _adc: adc1,
            _pins: pins,
        }
    }

    /// Handle for one input channel.
    pub fn channel(&self, channel: u8) -> AdcChannel {
        AdcChannel { channel }
    }
}

/// One ADC1 input, used as a joint's position sensor.
///
/// Conversions from different channels must not overlap; the firmware only samples from inside
/// the board critical section, which serializes them.
pub struct AdcChannel {
    channel: u8,
}

impl PositionSensor for AdcChannel {
    fn read_raw(&mut self) -> u16 {
        let adc = unsafe { &*pac::ADC1::ptr() };
        read_channel(adc, self.channel)
    }
}

/// Read a single channel from the given ADC peripheral.
fn read_channel(adc: &pac::adc1::RegisterBlock, channel: u8) -> u16 {
    // Set channel
    adc.sqr3
        .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

    // Start
    adc.cr2.modify(|_, w| w.swstart().set_bit());

    // Wait for completion
    while adc.sr.read().eoc().bit_is_clear() {}

    adc.dr.read().data().bits() as u16
}
