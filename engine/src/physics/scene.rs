//! Reference physics world
//!
//! [`SceneWorld`] holds infinite planes and axis-aligned boxes, optionally
//! attached to rigid bodies. It implements [`PhysicsWorld`] well enough to run
//! the controller headless: the demo binary and the scenario tests use it.
//!
//! # Example
//!
//! ```ignore
//! use vantage_engine::physics::{SceneWorld, ColliderDesc, Shape};
//! use glam::Vec3;
//!
//! let mut world = SceneWorld::new();
//! world.add_collider(ColliderDesc::new(Shape::floor(0.0)));
//! world.add_collider(ColliderDesc::new(Shape::ceiling(2.2)));
//! ```

use glam::Vec3;

use super::collision::{SweepHit, sphere_cast_aabb, sphere_cast_plane};
use super::{
    BodyHandle, CastHit, ColliderHandle, PhysicsWorld, QueryFilter, SurfaceTag,
};

/// How far above the feet [`SceneWorld::ground_height`] starts looking.
pub const GROUND_SNAP_HEIGHT: f32 = 0.5;

/// Collision geometry supported by the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Half-space below `normal · p = offset`
    Plane { normal: Vec3, offset: f32 },
    /// Axis-aligned box
    Box { min: Vec3, max: Vec3 },
}

impl Shape {
    /// Horizontal floor at height `y`.
    pub fn floor(y: f32) -> Self {
        Shape::Plane {
            normal: Vec3::Y,
            offset: y,
        }
    }

    /// Horizontal ceiling at height `y`, solid above.
    pub fn ceiling(y: f32) -> Self {
        Shape::Plane {
            normal: Vec3::NEG_Y,
            offset: -y,
        }
    }

    /// Plane through `point` with the given upward-facing normal.
    pub fn plane_through(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or(Vec3::Y);
        Shape::Plane {
            normal,
            offset: normal.dot(point),
        }
    }

    fn sweep(&self, origin: Vec3, radius: f32, direction: Vec3) -> Option<SweepHit> {
        match *self {
            Shape::Plane { normal, offset } => {
                sphere_cast_plane(origin, radius, direction, normal, offset)
            }
            Shape::Box { min, max } => sphere_cast_aabb(origin, radius, direction, min, max),
        }
    }
}

/// Where a collider's surface tag comes from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SurfaceSource {
    #[default]
    None,
    /// Explicit tag on the collider
    Fixed(SurfaceTag),
    /// Terrain splat map: square cells of `cell_size` meters, row-major
    /// `columns` wide, starting at world `(0, 0)`
    Terrain {
        cell_size: f32,
        columns: usize,
        cells: Vec<SurfaceTag>,
    },
}

/// Collider description.
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderDesc {
    pub shape: Shape,
    pub layer: u8,
    pub is_trigger: bool,
    pub body: Option<BodyHandle>,
    pub surface: SurfaceSource,
}

impl ColliderDesc {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            layer: 0,
            is_trigger: false,
            body: None,
            surface: SurfaceSource::None,
        }
    }

    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    pub fn attached_to(mut self, body: BodyHandle) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_surface(mut self, surface: SurfaceSource) -> Self {
        self.surface = surface;
        self
    }
}

/// Rigid body description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub velocity: Vec3,
    pub mass: f32,
    pub kinematic: bool,
    /// Tag applied to every collider of this body lacking its own
    pub surface: Option<SurfaceTag>,
}

impl BodyDesc {
    pub fn dynamic(mass: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: mass.max(1e-3),
            kinematic: false,
            surface: None,
        }
    }

    pub fn kinematic() -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass: f32::INFINITY,
            kinematic: true,
            surface: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_surface(mut self, surface: SurfaceTag) -> Self {
        self.surface = Some(surface);
        self
    }
}

/// Plane/box physics world.
#[derive(Debug, Clone, Default)]
pub struct SceneWorld {
    colliders: Vec<ColliderDesc>,
    bodies: Vec<BodyDesc>,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_collider(&mut self, collider: ColliderDesc) -> ColliderHandle {
        self.colliders.push(collider);
        ColliderHandle((self.colliders.len() - 1) as u32)
    }

    pub fn add_body(&mut self, body: BodyDesc) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle((self.bodies.len() - 1) as u32)
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&ColliderDesc> {
        self.colliders.get(handle.0 as usize)
    }

    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut ColliderDesc> {
        self.colliders.get_mut(handle.0 as usize)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&BodyDesc> {
        self.bodies.get(handle.0 as usize)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut BodyDesc> {
        self.bodies.get_mut(handle.0 as usize)
    }

    /// Remove a collider from queries by moving it to an unused layer set.
    pub fn disable_collider(&mut self, handle: ColliderHandle) {
        if let Some(collider) = self.collider_mut(handle) {
            collider.layer = u8::MAX;
        }
    }

    /// Move every box attached to a body by its velocity.
    ///
    /// Planes stay put.
    pub fn step_bodies(&mut self, dt: f32) {
        let bodies = &self.bodies;
        for collider in &mut self.colliders {
            let Some(body) = collider.body.and_then(|b| bodies.get(b.0 as usize)) else {
                continue;
            };
            if let Shape::Box { min, max } = &mut collider.shape {
                *min += body.velocity * dt;
                *max += body.velocity * dt;
            }
        }
    }

    /// Height of the surface under `position`, looking from `GROUND_SNAP_HEIGHT` above it.
    ///
    /// Used by hosts without a solver to keep the character out of the floor.
    pub fn ground_height(&self, position: Vec3) -> Option<f32> {
        let origin = position + Vec3::Y * GROUND_SNAP_HEIGHT;
        self.sphere_cast(origin, 0.01, Vec3::NEG_Y, QueryFilter::default())
            .map(|hit| hit.point.y)
    }
}

impl PhysicsWorld for SceneWorld {
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        filter: QueryFilter,
    ) -> Option<CastHit> {
        let mut nearest: Option<CastHit> = None;

        for (index, collider) in self.colliders.iter().enumerate() {
            if !filter.mask.contains(collider.layer) {
                continue;
            }
            if collider.is_trigger && filter.ignore_triggers {
                continue;
            }
            let Some(sweep) = collider.shape.sweep(origin, radius, direction) else {
                continue;
            };
            if nearest.is_some_and(|best| best.distance <= sweep.distance) {
                continue;
            }
            nearest = Some(CastHit {
                distance: sweep.distance,
                point: sweep.point,
                normal: sweep.normal,
                collider: ColliderHandle(index as u32),
                body: collider.body,
            });
        }

        nearest
    }

    fn body_velocity(&self, body: BodyHandle) -> Vec3 {
        self.body(body).map(|b| b.velocity).unwrap_or(Vec3::ZERO)
    }

    fn body_is_kinematic(&self, body: BodyHandle) -> bool {
        self.body(body).is_none_or(|b| b.kinematic)
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3, _point: Vec3) {
        if let Some(body) = self.body_mut(body) {
            if !body.kinematic {
                body.velocity += impulse / body.mass;
            }
        }
    }

    fn surface_override(&self, collider: ColliderHandle) -> Option<SurfaceTag> {
        let desc = self.collider(collider)?;
        match desc.surface {
            SurfaceSource::Fixed(tag) => Some(tag),
            _ => desc.body.and_then(|b| self.body(b)).and_then(|b| b.surface),
        }
    }

    fn terrain_surface(&self, collider: ColliderHandle, x: f32, z: f32) -> Option<SurfaceTag> {
        let desc = self.collider(collider)?;
        let SurfaceSource::Terrain {
            cell_size,
            columns,
            cells,
        } = &desc.surface
        else {
            return None;
        };
        if *cell_size <= 0.0 || *columns == 0 || x < 0.0 || z < 0.0 {
            return None;
        }
        let column = (x / cell_size) as usize;
        let row = (z / cell_size) as usize;
        if column >= *columns {
            return None;
        }
        cells.get(row * columns + column).copied()
    }
}
