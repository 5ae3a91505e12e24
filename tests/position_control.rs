// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

mod common;

use armlink::control::{Decision, JointConfig, JointGoals, JointId, PositionController};
use armlink::hw::{Direction, EnableState};
use armlink::protocol::messages::{Frame, PositionControl};
use armlink::protocol::Link;

use common::{Call, FakeArm, FakeTx};

const FULL: JointConfig = JointConfig::new(0, 4095, 5);

#[test]
fn below_goal_seeks_forward() {
    let goals = JointGoals::new();
    let controller = PositionController::new(&goals, [FULL; 2]);
    let (mut arm, mut log) = (FakeArm::at(50, 0), FakeTx::default());

    let decision = controller.drive_to(&mut arm, &mut log, JointId::Efe, 60).unwrap();

    assert_eq!(decision, Decision::Forward);
    assert_eq!(
        arm.writes(),
        [
            Call::Direction(JointId::Efe, Direction::Cw),
            Call::Speed(JointId::Efe, 15),
            Call::Enable(JointId::Efe, EnableState::Enable),
        ]
    );
    assert_eq!(log.text(), "J: 0, G:   60, N:   50 (CW)\r\n");
}

#[test]
fn above_goal_seeks_backward() {
    let goals = JointGoals::new();
    let controller = PositionController::new(&goals, [FULL; 2]);
    let (mut arm, mut log) = (FakeArm::at(0, 60), FakeTx::default());

    let decision = controller.drive_to(&mut arm, &mut log, JointId::Sfe, 50).unwrap();

    assert_eq!(decision, Decision::Backward);
    assert_eq!(
        arm.writes(),
        [
            Call::Direction(JointId::Sfe, Direction::Ccw),
            Call::Speed(JointId::Sfe, 15),
            Call::Enable(JointId::Sfe, EnableState::Enable),
        ]
    );
    assert_eq!(log.text(), "J: 1, G:   50, N:   60 (CCW)\r\n");
}

#[test]
fn inside_band_disables_motor() {
    let goals = JointGoals::new();
    let controller = PositionController::new(&goals, [FULL; 2]);
    let (mut arm, mut log) = (FakeArm::at(55, 0), FakeTx::default());

    let decision = controller.drive_to(&mut arm, &mut log, JointId::Efe, 52).unwrap();

    assert_eq!(decision, Decision::Hold);
    assert_eq!(
        arm.writes(),
        [
            Call::Enable(JointId::Efe, EnableState::Disable),
            Call::Speed(JointId::Efe, 0),
        ]
    );
    assert_eq!(log.text(), "J: 0, Done\r\n");
}

#[test]
fn percentage_goal_resolves_to_limits() {
    let goals = JointGoals::new();
    let cfg = JointConfig::new(1000, 3000, 10);
    let controller = PositionController::new(&goals, [cfg; 2]);
    let (mut arm, mut log) = (FakeArm::at(2000, 2000), FakeTx::default());

    let decision = controller
        .drive_to_percentage(&mut arm, &mut log, JointId::Efe, 0)
        .unwrap();
    assert_eq!(decision, Decision::Backward);
    assert_eq!(log.text(), "J: 0, G: 1000, N: 2000 (CCW)\r\n");

    log.sent.clear();
    let decision = controller
        .drive_to_percentage(&mut arm, &mut log, JointId::Efe, 100)
        .unwrap();
    assert_eq!(decision, Decision::Forward);
    assert_eq!(log.text(), "J: 0, G: 3000, N: 2000 (CW)\r\n");
}

#[test]
fn latched_goals_hold_still() {
    let goals = JointGoals::new();
    let mut controller = PositionController::new(&goals, [FULL; 2]);
    let (mut arm, mut log) = (FakeArm::at(1234, 3210), FakeTx::default());

    controller.latch_goals(&mut arm).unwrap();
    assert_eq!(goals.get(JointId::Efe), 1234);
    assert_eq!(goals.get(JointId::Sfe), 3210);

    assert_eq!(
        controller.tick(&mut arm, &mut log).unwrap(),
        (JointId::Efe, Decision::Hold)
    );
    assert_eq!(
        controller.tick(&mut arm, &mut log).unwrap(),
        (JointId::Sfe, Decision::Hold)
    );
    assert_eq!(log.text(), "J: 0, Done\r\nJ: 1, Done\r\n");
}

#[test]
fn tick_round_robins_joints() {
    let goals = JointGoals::new();
    let mut controller = PositionController::new(&goals, [FULL; 2]);
    let (mut arm, mut log) = (FakeArm::at(0, 0), FakeTx::default());

    let serviced: Vec<JointId> = (0..5)
        .map(|_| controller.tick(&mut arm, &mut log).unwrap().0)
        .collect();

    assert_eq!(
        serviced,
        [
            JointId::Efe,
            JointId::Sfe,
            JointId::Efe,
            JointId::Sfe,
            JointId::Efe,
        ]
    );
}

#[test]
fn commanded_goal_drives_until_reached() {
    let goals = JointGoals::new();
    let mut link = Link::new(&goals);
    let mut controller = PositionController::new(&goals, [JointConfig::new(500, 3500, 20); 2]);
    let (mut arm, mut tx) = (FakeArm::at(1000, 2000), FakeTx::default());

    controller.latch_goals(&mut arm).unwrap();

    let frame = Frame::PositionControl(PositionControl {
        id: 1,
        position: 2500,
    });
    for &b in frame.encode().iter() {
        link.on_byte_received(&mut arm, &mut tx, b).unwrap();
    }
    assert!(arm.writes().is_empty());

    controller.tick(&mut arm, &mut tx).unwrap();
    let (joint, decision) = controller.tick(&mut arm, &mut tx).unwrap();
    assert_eq!((joint, decision), (JointId::Sfe, Decision::Forward));

    // Joint arrives inside the band.
    arm.positions[1] = 2490;
    controller.tick(&mut arm, &mut tx).unwrap();
    let (_, decision) = controller.tick(&mut arm, &mut tx).unwrap();
    assert_eq!(decision, Decision::Hold);
}

#[test]
fn refuses_to_push_past_travel_limit() {
    let goals = JointGoals::new();
    let controller = PositionController::new(&goals, [JointConfig::new(500, 3500, 20); 2]);
    let (mut arm, mut log) = (FakeArm::at(3600, 0), FakeTx::default());

    let decision = controller.drive_to(&mut arm, &mut log, JointId::Efe, 4000).unwrap();

    assert_eq!(decision, Decision::Hold);
    assert!(arm
        .writes()
        .contains(&Call::Enable(JointId::Efe, EnableState::Disable)));
}
