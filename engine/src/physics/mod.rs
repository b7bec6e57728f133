//! Physics module
//!
//! The controller is not a physics engine. It only needs a world that can
//! answer shape casts and expose the rigid bodies standing under or over the
//! character. This module defines that seam and ships a small reference world.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3, Quat) re-exported from glam
//! - [`collision`] - Sphere cast math against planes and boxes
//! - [`body`] - The character's own rigid body state
//! - [`scene`] - [`SceneWorld`], a plane/box world implementing [`PhysicsWorld`]

pub mod body;
pub mod collision;
pub mod scene;
pub mod types;

pub use body::CharacterBody;
pub use collision::{SweepHit, aabb_surface_normal, ray_aabb_intersect};
pub use scene::{BodyDesc, ColliderDesc, SceneWorld, Shape, SurfaceSource};
pub use types::{Quat, Vec2, Vec3};

use serde::{Deserialize, Serialize};

/// Identifies a collider inside a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderHandle(pub u32);

/// Identifies a rigid body inside a [`PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Opaque surface identifier (grass, metal, ...) handed to the audio side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceTag(pub u32);

/// Bit set of collision layers (0..32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    pub const ALL: Self = Self(u32::MAX);
    pub const NONE: Self = Self(0);

    /// Mask containing a single layer. Layers above 31 are ignored.
    pub fn layer(layer: u8) -> Self {
        if layer < 32 { Self(1 << layer) } else { Self::NONE }
    }

    pub fn with(self, layer: u8) -> Self {
        Self(self.0 | Self::layer(layer).0)
    }

    pub fn without(self, layer: u8) -> Self {
        Self(self.0 & !Self::layer(layer).0)
    }

    pub fn contains(self, layer: u8) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

impl Default for CollisionMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Which colliders a cast may hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub mask: CollisionMask,
    pub ignore_triggers: bool,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            mask: CollisionMask::ALL,
            ignore_triggers: true,
        }
    }
}

/// Nearest hit reported by [`PhysicsWorld::sphere_cast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastHit {
    /// Distance the sphere center travelled along the cast direction
    pub distance: f32,
    /// Contact point in world space
    pub point: Vec3,
    /// Surface normal at the contact (normalized)
    pub normal: Vec3,
    /// Collider that was struck
    pub collider: ColliderHandle,
    /// Rigid body the collider belongs to, if any
    pub body: Option<BodyHandle>,
}

/// The physics queries the controller consumes.
///
/// Implement this over your engine's physics scene. Casts have unbounded
/// length; the probes apply their own near-field range.
pub trait PhysicsWorld {
    /// Sweep a sphere from `origin` along `direction` and return the nearest hit.
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        filter: QueryFilter,
    ) -> Option<CastHit>;

    /// Current linear velocity of a rigid body.
    fn body_velocity(&self, body: BodyHandle) -> Vec3;

    /// Kinematic bodies are moved by script and ignore impulses.
    fn body_is_kinematic(&self, body: BodyHandle) -> bool;

    /// Apply an instantaneous impulse (N·s) at a world-space point.
    ///
    /// The controller passes momentum, not a velocity change: the world is
    /// expected to divide by the body's mass, so heavy platforms barely move.
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3, point: Vec3);

    /// Explicit surface tag on the collider or on its attached body.
    fn surface_override(&self, _collider: ColliderHandle) -> Option<SurfaceTag> {
        None
    }

    /// Procedural surface lookup on terrain-like colliders at world `(x, z)`.
    fn terrain_surface(&self, _collider: ColliderHandle, _x: f32, _z: f32) -> Option<SurfaceTag> {
        None
    }
}
