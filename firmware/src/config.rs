// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board-level tuning for the simple 2R arm.

use armlink::control::{JointConfig, JOINT_COUNT};

/// Command link baud rate (USART2).
pub const BAUD_RATE: u32 = 115_200;

/// Time between two control steps. Joints are serviced round-robin, one per period.
pub const JOINT_PERIOD_MS: u32 = 20;

/// Settling time after power-up before the first position sample is latched.
pub const STARTUP_DELAY_MS: u32 = 50;

/// Motor PWM carrier frequency (TIM4).
pub const PWM_FREQUENCY_HZ: u32 = 20_000;

/// ADC1 input of each joint potentiometer, indexed by joint id.
pub const POSITION_ADC_CHANNELS: [u8; JOINT_COUNT] = [
    3,  // EFE: PA3 / ADC1_IN3
    10, // SFE: PC0 / ADC1_IN10
];

/// Travel limits and dead-band, indexed by joint id. Raw 12-bit ADC units.
pub const JOINT_CONFIGS: [JointConfig; JOINT_COUNT] = [
    JointConfig::new(850, 3250, 20), // EFE
    JointConfig::new(600, 3500, 20), // SFE
];
