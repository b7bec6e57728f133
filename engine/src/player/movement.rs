//! Velocity solver
//!
//! Turns the 2-axis move input into the body velocity for this frame.
//!
//! - Grounded: smoothed input, clamped to the pose speed, rotated into world
//!   space and projected onto the ground plane so slopes are followed.
//! - Airborne: existing horizontal velocity decays, a fraction of the input
//!   steers, and vertical velocity comes from gravity or the jump power.
//!
//! Speed clamps always scale the whole vector so direction is kept.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::CharacterBody;
use crate::physics::types::project_on_plane;
use crate::smoothing::{BoundedFloat, SpeedAxisSmoothValue, move_towards_vec3};

/// Move axis acceleration (m/s per second)
pub const DEFAULT_AXIS_SMOOTHING: f32 = 15.0;
/// 15% of the input steers while airborne
pub const DEFAULT_AIR_CONTROL: f32 = 0.15;
/// Horizontal speed lost per second in the air (m/s per second)
pub const DEFAULT_AIR_DECELERATION: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Forward/back acceleration (m/s per second)
    pub walk_smoothing: f32,
    /// Sideways acceleration (m/s per second)
    pub strafe_smoothing: f32,
    /// Gravity scale while falling
    pub gravity_multiplier: f32,
    /// Share of the input applied while airborne, `[0, 1]`
    pub air_control: f32,
    /// Horizontal speed lost per second while airborne
    pub air_deceleration: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_smoothing: DEFAULT_AXIS_SMOOTHING,
            strafe_smoothing: DEFAULT_AXIS_SMOOTHING,
            gravity_multiplier: 1.0,
            air_control: DEFAULT_AIR_CONTROL,
            air_deceleration: DEFAULT_AIR_DECELERATION,
        }
    }
}

/// Smoothed move axes and the speed envelope they live in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedData {
    walk: SpeedAxisSmoothValue,
    strafe: SpeedAxisSmoothValue,
    /// max = target pose speed, value = blended pose speed
    limit: BoundedFloat,
}

impl SpeedData {
    pub fn new(walk_smoothing: f32, strafe_smoothing: f32) -> Self {
        Self {
            walk: SpeedAxisSmoothValue::new(walk_smoothing),
            strafe: SpeedAxisSmoothValue::new(strafe_smoothing),
            limit: BoundedFloat::new(0.0, 0.0),
        }
    }

    /// Track the pose: `blended` is the live speed, `target` where it is heading.
    pub fn set_pose_speed(&mut self, blended: f32, target: f32) {
        self.limit = BoundedFloat::new(0.0, target.max(0.0)).with_value(blended);
    }

    /// Current speed cap, never above the target pose speed.
    pub fn max_speed(&self) -> f32 {
        self.limit.value()
    }

    pub fn target_speed(&self) -> f32 {
        self.limit.max()
    }

    /// Advance both axes toward `input` (x strafe, y walk).
    pub fn update(&mut self, input: Vec2, dt: f32) -> Vec2 {
        let max = self.max_speed();
        Vec2::new(
            self.strafe.update(input.x, max, dt),
            self.walk.update(input.y, max, dt),
        )
    }

    /// Smoothed speeds, x strafe and y walk (m/s).
    pub fn vector(&self) -> Vec2 {
        Vec2::new(self.strafe.value(), self.walk.value())
    }

    /// Smoothed speeds as a body-local velocity (forward is -Z).
    pub fn local_vector(&self) -> Vec3 {
        to_local(self.vector())
    }

    pub fn reset(&mut self) {
        self.walk.reset();
        self.strafe.reset();
    }
}

/// Everything the solver reads besides its own state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementFrame {
    /// Move input, zeroed when movement is not allowed
    pub input: Vec2,
    /// Off: the ground branch stops the body dead
    pub movement_allowed: bool,
    pub grounded: bool,
    pub ground_normal: Vec3,
    /// Standing on a body the world simulates
    pub on_dynamic_body: bool,
    pub jump_power: f32,
    pub jump_start_velocity: f32,
    /// Blended pose speed
    pub pose_speed: f32,
    /// Target pose speed
    pub target_speed: f32,
    /// World gravity magnitude (m/s²)
    pub gravity: f32,
    pub dt: f32,
}

/// Which branch produced the velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementMode {
    Ground,
    AirJump,
    AirFall,
}

#[derive(Debug, Clone)]
pub struct VelocitySolver {
    config: MovementConfig,
    speed: SpeedData,
}

impl Default for VelocitySolver {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}

impl VelocitySolver {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            speed: SpeedData::new(config.walk_smoothing, config.strafe_smoothing),
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn speed(&self) -> &SpeedData {
        &self.speed
    }

    /// Write this frame's velocity (and gravity flag) into `body`.
    pub fn solve(&mut self, frame: &MovementFrame, body: &mut CharacterBody) -> MovementMode {
        self.speed.set_pose_speed(frame.pose_speed, frame.target_speed);
        let dt = frame.dt.max(0.0);

        if frame.grounded {
            self.solve_ground(frame, dt, body);
            MovementMode::Ground
        } else {
            self.solve_air(frame, dt, body)
        }
    }

    fn solve_ground(&mut self, frame: &MovementFrame, dt: f32, body: &mut CharacterBody) {
        if !frame.movement_allowed {
            self.speed.reset();
            body.velocity = Vec3::ZERO;
            return;
        }

        let vec = self.speed.update(frame.input, dt);
        let local = to_local(vec).clamp_length_max(self.speed.max_speed());

        let mut velocity = project_on_plane(body.transform_direction(local), frame.ground_normal);
        if frame.on_dynamic_body || body.velocity.y < 0.0 {
            velocity.y = body.velocity.y;
        }
        body.velocity = velocity;
    }

    fn solve_air(&mut self, frame: &MovementFrame, dt: f32, body: &mut CharacterBody) -> MovementMode {
        let control = self.config.air_control.clamp(0.0, 1.0);

        let mut local = body.inverse_transform_direction(body.velocity);
        local.y = 0.0;
        local = move_towards_vec3(local, Vec3::ZERO, self.config.air_deceleration.max(0.0) * dt);

        let vec = self.speed.update(frame.input * control, dt);
        local += to_local(vec) * control;
        local = local.clamp_length_max(self.speed.max_speed());

        let mut velocity = body.transform_direction(local);
        let mode = if frame.jump_power > 0.0 {
            body.use_gravity = false;
            velocity.y = frame.jump_power + frame.jump_start_velocity;
            MovementMode::AirJump
        } else {
            body.use_gravity = true;
            let extra = (self.config.gravity_multiplier - 1.0) * frame.gravity * dt;
            velocity.y = body.velocity.y - extra;
            MovementMode::AirFall
        };
        body.velocity = velocity;
        mode
    }
}

/// Speed vector (x strafe, y walk) to a local velocity; forward is -Z.
fn to_local(vec: Vec2) -> Vec3 {
    Vec3::new(vec.x, 0.0, -vec.y)
}
