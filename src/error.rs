// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error type shared by the dispatcher and the position controller.

use core::fmt;

/// Failure while acting on a command or running a control step.
///
/// `E` is the error type of the underlying [`JointBank`](crate::hw::JointBank).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// A GPIO/PWM/ADC primitive reported a failure.
    Actuator(E),
    /// A frame addressed a joint id that this arm does not have.
    UnknownJoint(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::Actuator(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Actuator(e) => write!(f, "actuator error: {:?}", e),
            Error::UnknownJoint(id) => write!(f, "unknown joint id {}", id),
        }
    }
}
