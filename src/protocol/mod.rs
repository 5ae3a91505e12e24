// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial command protocol spoken between the host and the arm controller.

pub mod dispatcher;
pub mod link;
pub mod messages;
pub mod parser;

pub use dispatcher::Dispatcher;
pub use link::Link;
pub use messages::{BasicControl, Frame, PositionControl, SensorQuery, StateQuery};
pub use parser::{Event, Parser};
