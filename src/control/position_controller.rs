// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Dead-band position controller for the arm joints.
//!
//! Each step reads a fresh position sample and makes a three-way decision: drive backward, drive
//! forward, or stop. There are only two speeds (stopped and [`SEEK_SPEED_PERCENT`]); the
//! tolerance band around the goal is what keeps the joint from hunting.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! static GOALS: JointGoals = JointGoals::new();
//!
//! let mut controller = PositionController::new(&GOALS, [JointConfig::default(); JOINT_COUNT]);
//! controller.latch_goals(&mut arm)?;
//!
//! loop {
//!     controller.tick(&mut arm, &mut usart)?;
//!     delay.delay_ms(20_u32);
//! }
//! ```

use core::fmt::Write;

use crate::control::{JointConfig, JointGoals, JointId, JOINT_COUNT};
use crate::hw::{Direction, EnableState, JointBank};

/// Duty cycle used whenever a joint is moving toward its goal.
pub const SEEK_SPEED_PERCENT: u8 = 15;

/// Outcome of one control step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    /// Above goal: drive CCW.
    Backward,
    /// Below goal: drive CW.
    Forward,
    /// Inside the band, or pinned against a travel limit: motor disabled.
    Hold,
}

impl Decision {
    /// Pure decision for a joint reading `current` with target `goal`.
    ///
    /// The backward branch is checked first.
    pub fn evaluate(config: &JointConfig, current: u16, goal: u16) -> Self {
        let current_i = i32::from(current);
        let goal_i = i32::from(goal);
        let tolerance = i32::from(config.allowable_error);

        if current_i - goal_i > tolerance && current >= config.min_position {
            Decision::Backward
        } else if goal_i - current_i > tolerance && current <= config.max_position {
            Decision::Forward
        } else {
            Decision::Hold
        }
    }
}

/// Per-joint limits plus a view of the shared goals.
pub struct PositionController<'g> {
    goals: &'g JointGoals,
    configs: [JointConfig; JOINT_COUNT],

    /// Round-robin cursor for [`tick`](Self::tick).
    next: usize,
}

impl<'g> PositionController<'g> {
    pub fn new(goals: &'g JointGoals, configs: [JointConfig; JOINT_COUNT]) -> Self {
        Self {
            goals,
            configs,
            next: 0,
        }
    }

    #[inline]
    pub fn config(&self, joint: JointId) -> &JointConfig {
        &self.configs[joint.index()]
    }

    #[inline]
    pub fn goals(&self) -> &'g JointGoals {
        self.goals
    }

    /// Make every joint's current position its goal, so nothing moves until commanded.
    pub fn latch_goals<A: JointBank>(&self, arm: &mut A) -> Result<(), A::Error> {
        for joint in JointId::ALL {
            let now = arm.read_position(joint)?;
            self.goals.set(joint, now);
        }
        Ok(())
    }

    /// Run one control step for `joint` toward an explicit `goal` (raw units).
    pub fn drive_to<A, W>(
        &self,
        arm: &mut A,
        log: &mut W,
        joint: JointId,
        goal: u16,
    ) -> Result<Decision, A::Error>
    where
        A: JointBank,
        W: Write,
    {
        let now = arm.read_position(joint)?;
        let decision = Decision::evaluate(self.config(joint), now, goal);

        match decision {
            Decision::Backward | Decision::Forward => {
                let (direction, label) = if decision == Decision::Backward {
                    (Direction::Ccw, "CCW")
                } else {
                    (Direction::Cw, "CW")
                };

                arm.set_direction(joint, direction)?;
                arm.set_speed(joint, SEEK_SPEED_PERCENT)?;
                arm.set_enable(joint, EnableState::Enable)?;

                let _ = write!(
                    log,
                    "J: {}, G: {:4}, N: {:4} ({})\r\n",
                    joint.index(),
                    goal,
                    now,
                    label
                );
            }
            Decision::Hold => {
                arm.set_enable(joint, EnableState::Disable)?;
                arm.set_speed(joint, 0)?;

                let _ = write!(log, "J: {}, Done\r\n", joint.index());
            }
        }

        Ok(decision)
    }

    /// Same as [`drive_to`](Self::drive_to) with the goal given as 0–100 % of the joint's travel.
    pub fn drive_to_percentage<A, W>(
        &self,
        arm: &mut A,
        log: &mut W,
        joint: JointId,
        percent: u16,
    ) -> Result<Decision, A::Error>
    where
        A: JointBank,
        W: Write,
    {
        let goal = self.config(joint).goal_for_percentage(percent);
        self.drive_to(arm, log, joint, goal)
    }

    /// Run one control step for `joint` toward its stored goal.
    pub fn step<A, W>(&self, arm: &mut A, log: &mut W, joint: JointId) -> Result<Decision, A::Error>
    where
        A: JointBank,
        W: Write,
    {
        let goal = self.goals.get(joint);
        self.drive_to(arm, log, joint, goal)
    }

    /// Service the next joint in round-robin order.
    pub fn tick<A, W>(&mut self, arm: &mut A, log: &mut W) -> Result<(JointId, Decision), A::Error>
    where
        A: JointBank,
        W: Write,
    {
        let joint = JointId::ALL[self.next];
        self.next = (self.next + 1) % JOINT_COUNT;

        let decision = self.step(arm, log, joint)?;
        Ok((joint, decision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: JointConfig = JointConfig::new(0, 4095, 5);

    #[test]
    fn below_goal_drives_forward() {
        assert_eq!(Decision::evaluate(&FULL, 50, 60), Decision::Forward);
    }

    #[test]
    fn above_goal_drives_backward() {
        assert_eq!(Decision::evaluate(&FULL, 60, 50), Decision::Backward);
    }

    #[test]
    fn inside_band_holds() {
        assert_eq!(Decision::evaluate(&FULL, 55, 52), Decision::Hold);
        // Band edge is inclusive.
        assert_eq!(Decision::evaluate(&FULL, 55, 50), Decision::Hold);
        assert_eq!(Decision::evaluate(&FULL, 50, 55), Decision::Hold);
    }

    #[test]
    fn travel_limits_stop_the_drive() {
        let cfg = JointConfig::new(1000, 3000, 5);
        // Already below min: refuse to go further back.
        assert_eq!(Decision::evaluate(&cfg, 900, 100), Decision::Hold);
        // Already above max: refuse to go further forward.
        assert_eq!(Decision::evaluate(&cfg, 3100, 4000), Decision::Hold);
        // Out of range but heading back inside is fine.
        assert_eq!(Decision::evaluate(&cfg, 900, 2000), Decision::Forward);
        assert_eq!(Decision::evaluate(&cfg, 3100, 2000), Decision::Backward);
    }

    #[test]
    fn no_unsigned_wrap_near_zero() {
        assert_eq!(Decision::evaluate(&FULL, 0, 4095), Decision::Forward);
        assert_eq!(Decision::evaluate(&FULL, 4095, 0), Decision::Backward);
    }
}
