// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Generic driver for one joint: a DC motor behind an enable/direction/PWM driver stage, with a
//! potentiometer read through a 12-bit ADC for position feedback.
//!
//! The driver remembers the last level it put on each output line, so a toggle request flips
//! the line without having to read it back.

use core::fmt::Debug;

use embedded_hal::digital::v2::OutputPin;
use embedded_hal::PwmPin;

use crate::control::{JointId, JOINT_COUNT};
use crate::hw::{Direction, EnableState, JointBank};

/// Source of raw 12-bit position samples (0..4095).
///
/// Implemented for any `FnMut() -> u16`, so an ADC reader closure can be passed in directly.
pub trait PositionSensor {
    fn read_raw(&mut self) -> u16;
}

impl<F: FnMut() -> u16> PositionSensor for F {
    #[inline]
    fn read_raw(&mut self) -> u16 {
        self()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotorError<PinError: Debug> {
    Enable(PinError),
    Direction(PinError),
}

pub struct MotorChannel<En, Dir, Pwm, Pos> {
    enable: En,
    direction: Dir,
    pwm: Pwm,
    sensor: Pos,
    enabled: bool,
    ccw: bool,
}

impl<En, Dir, Pwm, Pos, E> MotorChannel<En, Dir, Pwm, Pos>
where
    En: OutputPin<Error = E>,
    Dir: OutputPin<Error = E>,
    Pwm: PwmPin<Duty = u16>,
    Pos: PositionSensor,
    E: Debug,
{
    /// Take ownership of the lines and park the motor: disabled, CW, zero duty.
    pub fn new(
        enable: En,
        direction: Dir,
        mut pwm: Pwm,
        sensor: Pos,
    ) -> Result<Self, MotorError<E>> {
        pwm.set_duty(0);
        pwm.enable();

        let mut channel = Self {
            enable,
            direction,
            pwm,
            sensor,
            enabled: false,
            ccw: false,
        };
        channel.set_enable(EnableState::Disable)?;
        channel.set_direction(Direction::Cw)?;

        Ok(channel)
    }

    pub fn set_enable(&mut self, state: EnableState) -> Result<(), MotorError<E>> {
        let on = match state {
            EnableState::Enable => true,
            EnableState::Disable => false,
            EnableState::Toggle => !self.enabled,
        };

        if on {
            self.enable.set_high().map_err(MotorError::Enable)?;
        } else {
            self.enable.set_low().map_err(MotorError::Enable)?;
        }
        self.enabled = on;

        Ok(())
    }

    pub fn set_direction(&mut self, direction: Direction) -> Result<(), MotorError<E>> {
        let ccw = match direction {
            Direction::Ccw => true,
            Direction::Cw => false,
            Direction::Toggle => !self.ccw,
        };

        if ccw {
            self.direction.set_high().map_err(MotorError::Direction)?;
        } else {
            self.direction.set_low().map_err(MotorError::Direction)?;
        }
        self.ccw = ccw;

        Ok(())
    }

    /// Set duty cycle as a percentage of the PWM period. Values above 100 are clamped.
    pub fn set_speed(&mut self, percent: u8) {
        let percent = u32::from(percent.min(100));
        let max_duty = u32::from(self.pwm.get_max_duty());

        self.pwm.set_duty((max_duty * percent / 100) as u16);
    }

    #[inline]
    pub fn position_raw(&mut self) -> u16 {
        self.sensor.read_raw()
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        if self.ccw {
            Direction::Ccw
        } else {
            Direction::Cw
        }
    }
}

/// One channel per joint, indexed by [`JointId`].
impl<En, Dir, Pwm, Pos, E> JointBank for [MotorChannel<En, Dir, Pwm, Pos>; JOINT_COUNT]
where
    En: OutputPin<Error = E>,
    Dir: OutputPin<Error = E>,
    Pwm: PwmPin<Duty = u16>,
    Pos: PositionSensor,
    E: Debug,
{
    type Error = MotorError<E>;

    fn set_enable(&mut self, joint: JointId, state: EnableState) -> Result<(), Self::Error> {
        self[joint.index()].set_enable(state)
    }

    fn set_direction(&mut self, joint: JointId, direction: Direction) -> Result<(), Self::Error> {
        self[joint.index()].set_direction(direction)
    }

    fn set_speed(&mut self, joint: JointId, percent: u8) -> Result<(), Self::Error> {
        self[joint.index()].set_speed(percent);
        Ok(())
    }

    fn read_position(&mut self, joint: JointId) -> Result<u16, Self::Error> {
        Ok(self[joint.index()].position_raw())
    }
}
