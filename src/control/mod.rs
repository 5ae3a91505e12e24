// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Algorithms
//!
//! ## Modules
//!
//! - [`joint`] - Joint identities, travel limits and the shared goal slots.
//! - [`position_controller`] - Dead-band position controller run from the main loop.

pub mod joint;
pub mod position_controller;

pub use joint::{JointConfig, JointGoals, JointId, JOINT_COUNT, POSITION_FULL_SCALE};
pub use position_controller::{Decision, PositionController, SEEK_SPEED_PERCENT};
