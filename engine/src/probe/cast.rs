//! Shared sphere cast probe.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::types::WORLD_UP;
use crate::physics::{BodyHandle, CollisionMask, ColliderHandle, PhysicsWorld, QueryFilter, SurfaceTag};

/// Tunables for one probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Layers the cast can hit
    pub mask: CollisionMask,
    /// Skip trigger volumes
    pub ignore_triggers: bool,
    /// How far past the body surface a hit still counts as touching
    pub check_range: f32,
    /// Cast sphere radius as a fraction of the collider radius
    pub radius_scale: f32,
    /// Extra pull-back of the cast start, so hits right at the surface are seen
    pub start_offset: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            mask: CollisionMask::ALL,
            ignore_triggers: true,
            check_range: 0.15,
            radius_scale: 0.5,
            start_offset: 0.1,
        }
    }
}

/// Which way a probe looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeDirection {
    /// From the feet, downward
    Down,
    /// From the top of the collider, upward
    Up,
}

impl ProbeDirection {
    pub fn vector(self) -> Vec3 {
        match self {
            ProbeDirection::Down => -WORLD_UP,
            ProbeDirection::Up => WORLD_UP,
        }
    }
}

/// Body envelope a probe is cast from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeFrame {
    /// Feet position
    pub position: Vec3,
    /// Live collider height
    pub height: f32,
    /// Live collider radius
    pub radius: f32,
}

/// A rigid body behind the struck surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedBody {
    pub handle: BodyHandle,
    pub kinematic: bool,
}

impl AttachedBody {
    /// Simulated by the physics world (moves under forces and impulses).
    pub fn is_dynamic(&self) -> bool {
        !self.kinematic
    }
}

/// Outcome of one probe this frame. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub hit: bool,
    /// Surface normal, world up on a miss
    pub normal: Vec3,
    /// Cast distance of the hit, `0.0` on a miss
    pub distance: f32,
    /// Contact point, the cast start on a miss
    pub point: Vec3,
    pub collider: Option<ColliderHandle>,
    pub body: Option<AttachedBody>,
    pub surface: Option<SurfaceTag>,
}

impl ProbeResult {
    pub fn miss(at: Vec3) -> Self {
        Self {
            hit: false,
            normal: WORLD_UP,
            distance: 0.0,
            point: at,
            collider: None,
            body: None,
            surface: None,
        }
    }

    /// Standing on (or blocked by) a body the world simulates.
    pub fn on_dynamic_body(&self) -> bool {
        self.body.is_some_and(|b| b.is_dynamic())
    }
}

impl Default for ProbeResult {
    fn default() -> Self {
        Self::miss(Vec3::ZERO)
    }
}

/// Sphere cast from the body along a fixed direction.
///
/// The sphere has radius `collider_radius * radius_scale` and starts
/// `radius + start_offset` behind the origin, so surfaces already touching the
/// body are still found. A hit only counts within `check_range + start_offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionProbe {
    config: ProbeConfig,
    direction: ProbeDirection,
    result: ProbeResult,
}

impl CollisionProbe {
    pub fn new(config: ProbeConfig, direction: ProbeDirection) -> Self {
        Self {
            config,
            direction,
            result: ProbeResult::default(),
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn direction(&self) -> ProbeDirection {
        self.direction
    }

    /// Result of the last [`CollisionProbe::process`].
    pub fn result(&self) -> &ProbeResult {
        &self.result
    }

    pub fn cast_radius(&self, frame: &ProbeFrame) -> f32 {
        frame.radius.max(0.0) * self.config.radius_scale.clamp(0.0, 1.0)
    }

    /// Body point the probe looks from.
    pub fn origin(&self, frame: &ProbeFrame) -> Vec3 {
        match self.direction {
            ProbeDirection::Down => frame.position,
            ProbeDirection::Up => frame.position + WORLD_UP * frame.height,
        }
    }

    /// Where the sphere actually starts.
    pub fn start(&self, frame: &ProbeFrame) -> Vec3 {
        let back = self.cast_radius(frame) + self.config.start_offset;
        self.origin(frame) - self.direction.vector() * back
    }

    /// Run the cast and store the result.
    pub fn process<W: PhysicsWorld + ?Sized>(&mut self, world: &W, frame: &ProbeFrame) -> &ProbeResult {
        let start = self.start(frame);
        let filter = QueryFilter {
            mask: self.config.mask,
            ignore_triggers: self.config.ignore_triggers,
        };
        let reach = self.config.check_range + self.config.start_offset;

        self.result = match world.sphere_cast(start, self.cast_radius(frame), self.direction.vector(), filter) {
            Some(hit) if hit.distance <= reach => {
                let body = hit.body.map(|handle| AttachedBody {
                    handle,
                    kinematic: world.body_is_kinematic(handle),
                });
                let surface = world
                    .surface_override(hit.collider)
                    .or_else(|| world.terrain_surface(hit.collider, frame.position.x, frame.position.z));

                ProbeResult {
                    hit: true,
                    normal: hit.normal.normalize_or(WORLD_UP),
                    distance: hit.distance,
                    point: hit.point,
                    collider: Some(hit.collider),
                    body,
                    surface,
                }
            }
            _ => ProbeResult::miss(start),
        };

        log::trace!(
            "{:?} probe: hit={} distance={:.3} normal={:?}",
            self.direction,
            self.result.hit,
            self.result.distance,
            self.result.normal
        );

        &self.result
    }
}
