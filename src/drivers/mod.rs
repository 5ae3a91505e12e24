// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains drivers that sit above the `embedded-hal` traits and below the
//! protocol/control logic.
//!
//! ## Existing drivers
//!
//! - [`motor_channel`] – DC motor with enable/direction/PWM lines and potentiometer feedback

pub mod motor_channel;

pub use motor_channel::{MotorChannel, MotorError, PositionSensor};
