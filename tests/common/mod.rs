// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fake actuation layer: records every primitive call and serves positions from a table.

#![allow(dead_code)]

use core::convert::Infallible;
use core::fmt;

use armlink::control::{JointId, JOINT_COUNT};
use armlink::hw::{Direction, EnableState, JointBank, SerialTx};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Enable(JointId, EnableState),
    Direction(JointId, Direction),
    Speed(JointId, u8),
    Read(JointId),
}

#[derive(Default)]
pub struct FakeArm {
    pub positions: [u16; JOINT_COUNT],
    pub calls: Vec<Call>,
}

impl FakeArm {
    pub fn at(efe: u16, sfe: u16) -> Self {
        Self {
            positions: [efe, sfe],
            calls: Vec::new(),
        }
    }

    /// Calls that changed an output, reads left out.
    pub fn writes(&self) -> Vec<Call> {
        self.calls
            .iter()
            .copied()
            .filter(|c| !matches!(c, Call::Read(_)))
            .collect()
    }
}

impl JointBank for FakeArm {
    type Error = Infallible;

    fn set_enable(&mut self, joint: JointId, state: EnableState) -> Result<(), Infallible> {
        self.calls.push(Call::Enable(joint, state));
        Ok(())
    }

    fn set_direction(&mut self, joint: JointId, direction: Direction) -> Result<(), Infallible> {
        self.calls.push(Call::Direction(joint, direction));
        Ok(())
    }

    fn set_speed(&mut self, joint: JointId, percent: u8) -> Result<(), Infallible> {
        self.calls.push(Call::Speed(joint, percent));
        Ok(())
    }

    fn read_position(&mut self, joint: JointId) -> Result<u16, Infallible> {
        self.calls.push(Call::Read(joint));
        Ok(self.positions[joint.index()])
    }
}

#[derive(Default)]
pub struct FakeTx {
    pub sent: Vec<u8>,
}

impl FakeTx {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.sent).into_owned()
    }
}

impl SerialTx for FakeTx {
    fn write_byte(&mut self, byte: u8) {
        self.sent.push(byte);
    }
}

impl fmt::Write for FakeTx {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sent.extend_from_slice(s.as_bytes());
        Ok(())
    }
}
