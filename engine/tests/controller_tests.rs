//! Controller Tests - Jumping, Poses, Landings and Speed Limits
//!
//! Drives the full controller through a minimal host loop: step, integrate
//! the body, then keep it out of the floor the way a solver would.

use approx::assert_relative_eq;
use glam::Vec3;
use rstest::rstest;
use vantage_engine::physics::{BodyDesc, ColliderDesc, Shape};
use vantage_engine::player::{ButtonInputMode, MovementMode};
use vantage_engine::{
    CharacterBody, ControllerConfig, ControllerEvent, FirstPersonController, InputFrame, PoseState, SceneWorld,
};

const DT: f32 = 1.0 / 60.0;

// ============================================================================
// Host loop
// ============================================================================

fn floor() -> SceneWorld {
    let mut world = SceneWorld::new();
    world.add_collider(ColliderDesc::new(Shape::floor(0.0)));
    world
}

/// Integrate the body and rest it on whatever is under it.
fn host_step(controller: &mut FirstPersonController, world: &SceneWorld) {
    let gravity = controller.gravity();
    let body = controller.body_mut();
    body.integrate(DT, gravity);

    if body.velocity.y > 0.0 {
        return;
    }
    if let Some(ground) = world.ground_height(body.position) {
        if body.position.y < ground {
            body.position.y = ground;
            body.velocity.y = 0.0;
        }
    }
}

/// Run `frames` steps with the same input and collect every event.
fn run(
    controller: &mut FirstPersonController,
    world: &mut SceneWorld,
    input: InputFrame,
    frames: usize,
) -> Vec<ControllerEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        controller.step(DT, &input, world);
        host_step(controller, world);
        events.extend(controller.drain_events());
    }
    events
}

fn count(events: &[ControllerEvent], wanted: ControllerEvent) -> usize {
    events.iter().filter(|e| **e == wanted).count()
}

// ============================================================================
// Jumping
// ============================================================================

#[test]
fn test_basic_jump() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();

    run(&mut controller, &mut world, InputFrame::idle(), 5);
    assert!(controller.is_grounded());
    assert!(controller.can_jump());

    let mut events = run(&mut controller, &mut world, InputFrame::idle().with_jump(), 1);
    assert_eq!(controller.jump().power_value(), 12.0);
    assert_eq!(controller.jump().count(), 1);

    events.extend(run(&mut controller, &mut world, InputFrame::idle(), 1));
    assert!(!controller.is_grounded());
    assert!(!controller.can_jump());
    assert!(controller.body().velocity.y > 11.0);
    assert!(!controller.body().use_gravity);

    events.extend(run(&mut controller, &mut world, InputFrame::idle(), 400));
    assert_eq!(count(&events, ControllerEvent::JumpStart), 1);
    assert_eq!(count(&events, ControllerEvent::LeftGround), 1);
    assert_eq!(count(&events, ControllerEvent::JumpEnd), 1);
    // Straight up and down stays under the landing threshold
    assert!(!events.iter().any(|e| matches!(e, ControllerEvent::Landed(_))));

    assert!(controller.is_grounded());
    assert_eq!(controller.jump().count(), 0);
    assert!(controller.can_jump());
}

#[test]
fn test_jump_reaches_apex_then_falls() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    run(&mut controller, &mut world, InputFrame::idle(), 2);
    run(&mut controller, &mut world, InputFrame::idle().with_jump(), 1);

    let mut apex = 0.0_f32;
    let mut saw_fall = false;
    for _ in 0..300 {
        let output = controller.step(DT, &InputFrame::idle(), &mut world);
        host_step(&mut controller, &world);
        apex = apex.max(controller.position().y);
        saw_fall |= output.mode == MovementMode::AirFall;
    }

    assert!(saw_fall);
    // 12 m/s decaying at 7 m/s² peaks a little above 10 m
    assert!(apex > 9.5 && apex < 10.8, "apex {apex}");
}

#[test]
fn test_double_jump_from_config() {
    let config = ControllerConfig::from_json_str(r#"{ "jump": { "max_count": 2 } }"#).unwrap();
    let mut world = floor();
    let mut controller = FirstPersonController::new(config, CharacterBody::default()).unwrap();

    let mut events = run(&mut controller, &mut world, InputFrame::idle(), 2);
    events.extend(run(&mut controller, &mut world, InputFrame::idle().with_jump(), 1));
    events.extend(run(&mut controller, &mut world, InputFrame::idle(), 30));
    assert!(controller.can_jump());

    events.extend(run(&mut controller, &mut world, InputFrame::idle().with_jump(), 1));
    assert_eq!(controller.jump().count(), 2);
    assert_eq!(controller.jump().power_value(), 12.0);
    assert!(!controller.can_jump());

    // A third press is ignored
    events.extend(run(&mut controller, &mut world, InputFrame::idle().with_jump(), 1));
    assert_eq!(count(&events, ControllerEvent::JumpStart), 2);
}

#[test]
fn test_jump_disabled_by_constraint() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    controller.constraints_mut().set_jump(false);

    let events = run(&mut controller, &mut world, InputFrame::idle().with_jump(), 3);
    assert!(events.is_empty());
    assert!(controller.is_grounded());
}

#[test]
fn test_jump_pushes_dynamic_platform_down() {
    let mut world = SceneWorld::new();
    let platform = world.add_body(BodyDesc::dynamic(100.0));
    world.add_collider(
        ColliderDesc::new(Shape::Box {
            min: Vec3::new(-5.0, -1.0, -5.0),
            max: Vec3::new(5.0, 0.0, 5.0),
        })
        .attached_to(platform),
    );

    let mut controller = FirstPersonController::default();
    controller.step(DT, &InputFrame::idle(), &mut world);
    assert!(controller.is_grounded());
    assert!(controller.ground().result().on_dynamic_body());

    controller.step(DT, &InputFrame::idle().with_jump(), &mut world);
    // 12 m/s * 2.5 over 100 kg
    let velocity = world.body(platform).unwrap().velocity;
    assert_relative_eq!(velocity.y, -0.3, epsilon = 1e-5);
    assert_eq!(controller.jump().start_velocity(), 0.0);
}

// ============================================================================
// Landings
// ============================================================================

#[test]
fn test_walk_off_ledge_reports_landing() {
    let mut world = floor();
    // 2 m ledge covering z in [0, 10]
    world.add_collider(ColliderDesc::new(Shape::Box {
        min: Vec3::new(-10.0, 0.0, 0.0),
        max: Vec3::new(10.0, 2.0, 10.0),
    }));

    let mut controller = FirstPersonController::at(Vec3::new(0.0, 2.0, 1.0));
    let events = run(&mut controller, &mut world, InputFrame::moving(0.0, 1.0), 150);

    assert_eq!(count(&events, ControllerEvent::LeftGround), 1);
    let landings: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ControllerEvent::Landed(record) => Some(*record),
            _ => None,
        })
        .collect();
    assert_eq!(landings.len(), 1);

    let record = landings[0];
    assert_eq!(record.jump_count, 0);
    assert!(record.fall_distance > 1.8 && record.fall_distance <= 2.0 + 1e-4);
    assert!(record.travel_distance > 1.8);
    assert_eq!(controller.ground().last_landing(), Some(&record));
    assert!(controller.is_grounded());
}

#[test]
fn test_running_jump_lands_with_jump_counted() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    let forward = InputFrame::moving(0.0, 1.0);

    let mut events = run(&mut controller, &mut world, forward, 60);
    events.extend(run(&mut controller, &mut world, forward.with_jump(), 1));
    events.extend(run(&mut controller, &mut world, forward, 400));

    let record = events
        .iter()
        .find_map(|e| match e {
            ControllerEvent::Landed(record) => Some(*record),
            _ => None,
        })
        .expect("running jump should land past the threshold");
    assert_eq!(record.jump_count, 1);
    // Fall is measured from the apex
    assert!(record.fall_distance > 9.0);
    assert!(record.travel_distance > 1.0);
}

// ============================================================================
// Poses
// ============================================================================

#[test]
fn test_crouch_blends_down_monotonically() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();

    let first = controller.step(DT, &InputFrame::idle().with_crouch(), &mut world);
    assert_eq!(first.state, PoseState::Crouching);

    let mut last = first.envelope.height;
    for _ in 0..60 {
        let output = controller.step(DT, &InputFrame::idle(), &mut world);
        assert!(output.envelope.height <= last + 1e-6);
        last = output.envelope.height;
    }
    assert_relative_eq!(last, 1.0, epsilon = 1e-5);
    assert!(controller.traverser().is_settled());

    let events = controller.drain_events();
    assert_eq!(
        events,
        vec![
            ControllerEvent::TransitionStart {
                from: PoseState::Standing,
                to: PoseState::Crouching
            },
            ControllerEvent::TransitionEnd {
                state: PoseState::Crouching
            },
        ]
    );
}

#[test]
fn test_stand_up_blocked_by_ceiling() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    run(&mut controller, &mut world, InputFrame::idle().with_crouch(), 1);
    run(&mut controller, &mut world, InputFrame::idle(), 60);
    assert_eq!(controller.state(), PoseState::Crouching);

    // Just above the crouched head
    let ceiling = world.add_collider(ColliderDesc::new(Shape::ceiling(1.1)));

    let events = run(&mut controller, &mut world, InputFrame::idle().with_crouch(), 1);
    assert_eq!(controller.state(), PoseState::Crouching);
    assert_relative_eq!(controller.traverser().current().height, 1.0, epsilon = 1e-5);
    assert_eq!(
        events.last(),
        Some(&ControllerEvent::TransitionEnd {
            state: PoseState::Crouching
        })
    );

    // Jumping while crouched asks to stand; the next pose update refuses it
    run(&mut controller, &mut world, InputFrame::idle().with_jump(), 1);
    assert_eq!(controller.state(), PoseState::Standing);
    run(&mut controller, &mut world, InputFrame::idle(), 1);
    assert_eq!(controller.state(), PoseState::Crouching);
    assert_eq!(controller.jump().count(), 0);

    world.disable_collider(ceiling);
    run(&mut controller, &mut world, InputFrame::idle().with_crouch(), 1);
    run(&mut controller, &mut world, InputFrame::idle(), 60);
    assert_eq!(controller.state(), PoseState::Standing);
    assert_relative_eq!(controller.traverser().current().height, 1.8, epsilon = 1e-5);
}

#[test]
fn test_stand_from_prone_under_low_ceiling_settles_crouched() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    run(&mut controller, &mut world, InputFrame::idle().with_prone(), 1);
    run(&mut controller, &mut world, InputFrame::idle(), 60);
    assert_eq!(controller.state(), PoseState::Proning);

    world.add_collider(ColliderDesc::new(Shape::ceiling(1.0)));
    controller.go_to(PoseState::Standing).unwrap();

    let mut tallest: f32 = 0.0;
    for _ in 0..240 {
        run(&mut controller, &mut world, InputFrame::idle(), 1);
        tallest = tallest.max(controller.traverser().current().height);
    }

    assert_eq!(controller.state(), PoseState::Crouching);
    assert_eq!(controller.traverser().target().state, PoseState::Crouching);
    assert!(controller.traverser().is_settled());
    assert_relative_eq!(controller.traverser().current().height, 1.0, epsilon = 1e-5);
    assert!(tallest <= 1.0 + 1e-5);
}

#[test]
fn test_stand_from_prone_under_crawlspace_stays_prone() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    run(&mut controller, &mut world, InputFrame::idle().with_prone(), 1);
    run(&mut controller, &mut world, InputFrame::idle(), 60);

    world.add_collider(ColliderDesc::new(Shape::ceiling(0.7)));
    controller.go_to(PoseState::Standing).unwrap();
    run(&mut controller, &mut world, InputFrame::idle(), 240);

    assert_eq!(controller.state(), PoseState::Proning);
    assert_relative_eq!(controller.traverser().current().height, 0.4, epsilon = 1e-5);
}

#[test]
fn test_hold_sprint() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();

    run(&mut controller, &mut world, InputFrame::moving(0.0, 1.0).with_sprint(), 1);
    assert_eq!(controller.state(), PoseState::Sprinting);

    run(&mut controller, &mut world, InputFrame::moving(0.0, 1.0), 1);
    assert_eq!(controller.state(), PoseState::Standing);
}

#[test]
fn test_toggle_sprint() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    controller.set_sprint_mode(ButtonInputMode::Toggle);
    let walk = InputFrame::moving(0.0, 1.0);

    run(&mut controller, &mut world, walk.with_sprint(), 3);
    assert_eq!(controller.state(), PoseState::Sprinting);

    // Released: stays sprinting
    run(&mut controller, &mut world, walk, 10);
    assert_eq!(controller.state(), PoseState::Sprinting);

    run(&mut controller, &mut world, walk.with_sprint(), 1);
    assert_eq!(controller.state(), PoseState::Standing);
}

#[test]
fn test_disabling_movement_stops_walk_at_once() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    run(&mut controller, &mut world, InputFrame::moving(0.0, 1.0), 60);
    assert!(controller.body().velocity.length() > 3.0);

    controller.constraints_mut().set_movement(false);
    run(&mut controller, &mut world, InputFrame::moving(0.0, 1.0), 1);
    assert_eq!(controller.body().velocity, Vec3::ZERO);
}

#[test]
fn test_toggle_sprint_press_in_air_is_kept() {
    let mut world = SceneWorld::new();
    let mut controller = FirstPersonController::at(Vec3::new(0.0, 5.0, 0.0));
    controller.set_sprint_mode(ButtonInputMode::Toggle);

    controller.step(DT, &InputFrame::idle().with_sprint(), &mut world);
    assert_eq!(controller.state(), PoseState::Sprinting);
}

#[test]
fn test_uncrouch_with_crouch_disabled() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    run(&mut controller, &mut world, InputFrame::idle().with_crouch(), 1);
    run(&mut controller, &mut world, InputFrame::idle(), 60);
    assert_eq!(controller.state(), PoseState::Crouching);

    controller.constraints_mut().set_crouch(false);
    run(&mut controller, &mut world, InputFrame::idle().with_crouch(), 1);
    run(&mut controller, &mut world, InputFrame::idle(), 60);
    assert_eq!(controller.state(), PoseState::Standing);
}

#[test]
fn test_hold_sprint_needs_ground() {
    let mut world = SceneWorld::new();
    let mut controller = FirstPersonController::at(Vec3::new(0.0, 5.0, 0.0));

    controller.step(DT, &InputFrame::idle().with_sprint(), &mut world);
    assert_eq!(controller.state(), PoseState::Standing);
}

// ============================================================================
// Slopes
// ============================================================================

#[test]
fn test_steep_slope_drops_ground_contact() {
    let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
    let mut world = SceneWorld::new();
    world.add_collider(ColliderDesc::new(Shape::plane_through(Vec3::ZERO, normal)));

    let mut controller = FirstPersonController::default();
    let output = controller.step(DT, &InputFrame::idle(), &mut world);
    assert!(output.grounded);
    assert_relative_eq!(output.slope, 45.0, epsilon = 0.01);

    let mut config = ControllerConfig::default();
    config.ground.max_slope = 40.0;
    let mut controller = FirstPersonController::new(config, CharacterBody::default()).unwrap();
    let output = controller.step(DT, &InputFrame::idle(), &mut world);
    assert!(!output.grounded);
    assert_eq!(output.mode, MovementMode::AirFall);
}

// ============================================================================
// Speed limits
// ============================================================================

#[rstest]
#[case(PoseState::Standing, 3.5)]
#[case(PoseState::Sprinting, 7.0)]
#[case(PoseState::Crouching, 1.0)]
#[case(PoseState::Proning, 0.5)]
fn test_speed_clamped_to_pose(#[case] state: PoseState, #[case] speed: f32) {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    controller.step(DT, &InputFrame::idle(), &mut world);
    controller.go_to(state).unwrap();

    // Diagonal input would exceed the limit if not clamped as a whole
    let mut input = InputFrame::moving(1.0, 1.0);
    input.sprint = state == PoseState::Sprinting;
    run(&mut controller, &mut world, input, 120);

    let horizontal = controller.body().velocity.with_y(0.0);
    assert_relative_eq!(horizontal.length(), speed, epsilon = 1e-3);
}

// ============================================================================
// Footsteps and look
// ============================================================================

#[test]
fn test_walking_emits_footsteps() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();

    let events = run(&mut controller, &mut world, InputFrame::moving(0.0, 1.0), 120);
    let steps = events
        .iter()
        .filter(|e| matches!(e, ControllerEvent::Footstep(_)))
        .count();
    assert!(steps >= 2, "only {steps} footsteps in 2 s of walking");

    let idle = run(&mut controller, &mut world, InputFrame::idle(), 120);
    // Decelerating takes a few frames, then silence
    assert!(idle.iter().filter(|e| matches!(e, ControllerEvent::Footstep(_))).count() <= 1);
}

#[test]
fn test_look_turns_body() {
    let mut world = floor();
    let mut controller = FirstPersonController::default();
    run(&mut controller, &mut world, InputFrame::idle().with_look(2.0, 0.0), 1);
    run(&mut controller, &mut world, InputFrame::idle(), 60);

    // Positive x turns right, which is negative yaw
    assert!(controller.body().yaw < -9.0);
}
