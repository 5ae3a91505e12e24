// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # armlink
//!
//! Firmware core for the simple 2R arm: the serial command link that turns a byte stream into
//! motor actions, and the closed-loop position controller that drives each joint toward its
//! goal using potentiometer (ADC) feedback.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Frame layouts, byte-stream decoder, command dispatcher, serial link |
//! | [`control`]  | Joint identities, limits, shared goals and the position controller |
//! | [`hw`]       | Actuation-layer traits and the blocking USART wrapper |
//! | [`drivers`]  | `embedded-hal` motor channel (enable, direction, PWM, position sensor) |
//!
//! The crate is `no_std` and hardware agnostic. The board binary in `firmware/` binds it to
//! STM32F7 peripherals.
//!
//! ## Getting Started
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod control;
pub mod drivers;
pub mod error;
pub mod hw;
pub mod protocol;

pub use error::Error;
