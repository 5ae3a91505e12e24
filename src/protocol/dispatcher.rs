// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Acts on decoded frames.
//!
//! Runs in the serial interrupt right after the last byte of a frame arrives, so nothing here
//! waits on anything except the blocking GPIO/PWM primitives themselves.

use core::fmt::Write;

use crate::control::{JointGoals, JointId};
use crate::error::Error;
use crate::hw::JointBank;
use crate::protocol::messages::{BasicControl, Frame, PositionControl, SensorQuery, StateQuery};

pub struct Dispatcher<'g> {
    goals: &'g JointGoals,
}

impl<'g> Dispatcher<'g> {
    pub fn new(goals: &'g JointGoals) -> Self {
        Self { goals }
    }

    /// Decode `payload` as a frame of type `header` and act on it.
    ///
    /// The decoder only completes frames for headers it knows, so an unknown header (or a
    /// payload too short for its header) means the caller handed over a bad buffer. It gets a
    /// one-line diagnostic on `log` and is otherwise ignored.
    pub fn dispatch_raw<A, W>(
        &self,
        arm: &mut A,
        log: &mut W,
        header: u8,
        payload: &[u8],
    ) -> Result<Option<Frame>, Error<A::Error>>
    where
        A: JointBank,
        W: Write,
    {
        match Frame::decode(header, payload) {
            Some(frame) => self.dispatch(arm, frame).map(|_| Some(frame)),
            None => {
                let _ = write!(
                    log,
                    "E: cannot decode header {:#04x} ({} bytes)\r\n",
                    header,
                    payload.len()
                );
                Ok(None)
            }
        }
    }

    pub fn dispatch<A: JointBank>(&self, arm: &mut A, frame: Frame) -> Result<(), Error<A::Error>> {
        match frame {
            Frame::BasicControl(cmd) => self.basic_control(arm, cmd),
            Frame::PositionControl(cmd) => self.position_control(cmd),
            Frame::StateQuery(query) => self.state_query(query),
            Frame::SensorQuery(query) => self.sensor_query(query),
        }
    }

    /// Enable, direction, then speed, in that order.
    fn basic_control<A: JointBank>(
        &self,
        arm: &mut A,
        cmd: BasicControl,
    ) -> Result<(), Error<A::Error>> {
        let joint = joint(cmd.id)?;

        arm.set_enable(joint, cmd.enable)?;
        arm.set_direction(joint, cmd.direction)?;
        arm.set_speed(joint, cmd.speed_percent())?;

        Ok(())
    }

    /// Only moves the goal; the control loop does the driving.
    fn position_control<E>(&self, cmd: PositionControl) -> Result<(), Error<E>> {
        let joint = joint(cmd.id)?;
        self.goals.set(joint, cmd.position);
        Ok(())
    }

    /// Motor state report. Not implemented on the wire yet; the frame is accepted and dropped.
    fn state_query<E>(&self, query: StateQuery) -> Result<(), Error<E>> {
        joint(query.id)?;
        Ok(())
    }

    /// Force sensor report. Not implemented on the wire yet; the frame is accepted and dropped.
    fn sensor_query<E>(&self, _query: SensorQuery) -> Result<(), Error<E>> {
        Ok(())
    }
}

#[inline]
fn joint<E>(id: u8) -> Result<JointId, Error<E>> {
    JointId::try_from(id).map_err(Error::UnknownJoint)
}
