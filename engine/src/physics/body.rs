//! Character rigid body state.

use glam::{Quat, Vec3};

use super::types::WORLD_UP;

/// The character's rigid body as the controller sees it.
///
/// The controller writes `velocity` and `use_gravity` every frame. Integration
/// belongs to the host's physics step; [`CharacterBody::integrate`] is provided
/// for hosts (and tests) without one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterBody {
    /// Feet position in world space
    pub position: Vec3,
    /// Heading around world up, in degrees
    pub yaw: f32,
    /// Linear velocity in world space (m/s)
    pub velocity: Vec3,
    /// Whether the physics step should apply gravity
    pub use_gravity: bool,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            use_gravity: true,
        }
    }
}

impl CharacterBody {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(WORLD_UP, self.yaw.to_radians())
    }

    /// Local direction to world space.
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation() * local
    }

    /// World direction to local space.
    pub fn inverse_transform_direction(&self, world: Vec3) -> Vec3 {
        self.rotation().inverse() * world
    }

    /// Body forward (-Z rotated by yaw).
    pub fn forward(&self) -> Vec3 {
        self.transform_direction(Vec3::NEG_Z)
    }

    /// Body right (+X rotated by yaw).
    pub fn right(&self) -> Vec3 {
        self.transform_direction(Vec3::X)
    }

    /// Semi-implicit Euler step: gravity (if enabled) then position.
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        let dt = dt.max(0.0);
        if self.use_gravity {
            self.velocity.y -= gravity * dt;
        }
        self.position += self.velocity * dt;
    }
}
