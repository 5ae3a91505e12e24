// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Joint Actuation Layer
//!
//! The seams between the protocol/control logic and the hardware. Everything here is blocking:
//! ADC reads spin until the conversion completes and serial writes spin until the byte is
//! accepted.
//!
//! - [`JointBank`] - per-joint enable/direction/speed outputs and position feedback
//! - [`SerialTx`] - outbound serial channel, also used for diagnostics
//! - [`usart`] - [`SerialTx`] over any `embedded-hal` serial writer

use core::fmt;

pub mod usart;

pub use usart::Usart;

use crate::control::JointId;

/// Motor driver enable line request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnableState {
    Disable,
    Enable,
    Toggle,
}

/// Motor rotation request. `Cw` is forward, `Ccw` is backward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Cw,
    Ccw,
    Toggle,
}

/// GPIO/PWM/ADC primitives for every joint of the arm.
pub trait JointBank {
    type Error: fmt::Debug;

    /// Drive the motor enable line.
    fn set_enable(&mut self, joint: JointId, state: EnableState) -> Result<(), Self::Error>;

    /// Drive the motor direction line.
    fn set_direction(&mut self, joint: JointId, direction: Direction) -> Result<(), Self::Error>;

    /// Set the PWM duty cycle, `percent` in 0..=100 (larger values are clamped).
    fn set_speed(&mut self, joint: JointId, percent: u8) -> Result<(), Self::Error>;

    /// Take a fresh 12-bit position sample. Blocks until the conversion is done.
    fn read_position(&mut self, joint: JointId) -> Result<u16, Self::Error>;
}

/// Blocking outbound serial channel.
///
/// Protocol replies go out through [`write_byte`](Self::write_byte); human-readable diagnostics
/// go through `core::fmt::Write`, so `writeln!` works on any implementor.
pub trait SerialTx: fmt::Write {
    fn write_byte(&mut self, byte: u8);

    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}
