// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod adc;
pub mod pins;
pub mod pwm;

pub use adc::{Adc, AdcChannel};
pub use pins::BoardPins;
pub use pwm::{Channel, PwmChannel, PwmTimer};
