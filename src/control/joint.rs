// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Joint identities, travel limits and the goal slots shared with the serial interrupt.

use core::sync::atomic::{AtomicU16, Ordering};

/// Number of joints on the arm.
pub const JOINT_COUNT: usize = 2;

/// Full-scale reading of the 12-bit position ADC.
pub const POSITION_FULL_SCALE: u16 = 4095;

/// A controlled rotational axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum JointId {
    /// Elbow flexion/extension.
    Efe = 0,
    /// Shoulder flexion/extension.
    Sfe = 1,
}

impl JointId {
    pub const ALL: [JointId; JOINT_COUNT] = [JointId::Efe, JointId::Sfe];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for JointId {
    type Error = u8;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(JointId::Efe),
            1 => Ok(JointId::Sfe),
            other => Err(other),
        }
    }
}

/// Travel limits and dead-band of one joint, all in raw ADC units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointConfig {
    /// The controller will not drive backward once the joint reads below this.
    pub min_position: u16,
    /// The controller will not drive forward once the joint reads above this.
    pub max_position: u16,
    /// Half-width of the "at goal" band.
    pub allowable_error: u16,
}

impl JointConfig {
    pub const fn new(min_position: u16, max_position: u16, allowable_error: u16) -> Self {
        Self {
            min_position,
            max_position,
            allowable_error,
        }
    }

    /// Map a 0–100 % request onto `[min_position, max_position]`. Values above 100 saturate.
    pub fn goal_for_percentage(&self, percent: u16) -> u16 {
        let percent = u32::from(percent.min(100));
        let span = u32::from(self.max_position.saturating_sub(self.min_position));
        let offset = span * percent / 100;

        self.min_position + offset as u16
    }
}

impl Default for JointConfig {
    fn default() -> Self {
        Self::new(0, POSITION_FULL_SCALE, 5)
    }
}

/// Goal position per joint.
///
/// Written by the dispatcher from the serial interrupt and read by the control loop, so every
/// slot is an atomic. Place one instance in a `static` and hand out `&JointGoals`.
pub struct JointGoals {
    slots: [AtomicU16; JOINT_COUNT],
}

impl JointGoals {
    pub const fn new() -> Self {
        Self {
            slots: [AtomicU16::new(0), AtomicU16::new(0)],
        }
    }

    #[inline]
    pub fn get(&self, joint: JointId) -> u16 {
        self.slots[joint.index()].load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, joint: JointId, position: u16) {
        self.slots[joint.index()].store(position, Ordering::Release);
    }
}

impl Default for JointGoals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_ids_follow_wire_numbering() {
        assert_eq!(JointId::try_from(0), Ok(JointId::Efe));
        assert_eq!(JointId::try_from(1), Ok(JointId::Sfe));
        assert_eq!(JointId::try_from(2), Err(2));
        assert_eq!(JointId::try_from(31), Err(31));
    }

    #[test]
    fn percentage_endpoints_hit_limits() {
        let cfg = JointConfig::new(600, 3400, 20);
        assert_eq!(cfg.goal_for_percentage(0), 600);
        assert_eq!(cfg.goal_for_percentage(100), 3400);
        assert_eq!(cfg.goal_for_percentage(50), 2000);
    }

    #[test]
    fn percentage_saturates_above_full_travel() {
        let cfg = JointConfig::new(100, 200, 5);
        assert_eq!(cfg.goal_for_percentage(250), 200);
    }

    #[test]
    fn goals_are_independent_per_joint() {
        let goals = JointGoals::new();
        goals.set(JointId::Efe, 1234);
        goals.set(JointId::Sfe, 42);
        assert_eq!(goals.get(JointId::Efe), 1234);
        assert_eq!(goals.get(JointId::Sfe), 42);
    }
}
