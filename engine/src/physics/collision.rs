//! Shape cast math
//!
//! Sphere casts are resolved as ray casts against the shape inflated by the
//! sphere radius (Minkowski sum). For planes this is exact; for boxes the
//! inflated box has square edges instead of rounded ones, which is close
//! enough for probing floors, ceilings and platforms.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use vantage_engine::physics::collision::{sphere_cast_aabb, SweepHit};
//! use glam::Vec3;
//!
//! let hit = sphere_cast_aabb(
//!     Vec3::new(0.0, 3.0, 0.0),
//!     0.25,
//!     Vec3::NEG_Y,
//!     Vec3::new(-1.0, -1.0, -1.0),
//!     Vec3::new(1.0, 0.0, 1.0),
//! );
//! assert!(hit.is_some());
//! ```

use glam::Vec3;

/// Result of sweeping a sphere into a single shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Distance the sphere center travelled before touching
    pub distance: f32,
    /// Contact point on the shape surface
    pub point: Vec3,
    /// Surface normal at the contact (normalized)
    pub normal: Vec3,
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// The slab method works by finding the intersection of the ray with each pair of
/// axis-aligned planes that make up the AABB. If the ray enters and exits the AABB
/// at valid times (t_enter < t_exit and t_exit > 0), there is an intersection.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero direction components get huge inverse values
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;

    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;

    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;

    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// Computes the surface normal for a point on an AABB surface.
///
/// Determines which face of the AABB the point is on and returns the outward normal.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half_extents = (aabb_max - aabb_min) * 0.5;
    let local = point - center;

    let normalized = Vec3::new(
        local.x / half_extents.x,
        local.y / half_extents.y,
        local.z / half_extents.z,
    );

    // Closest face has the highest absolute normalized coordinate
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.x && abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

/// Sweep a sphere along `direction` into an axis-aligned box.
///
/// A sphere that already overlaps the box at `origin` reports no hit, the same
/// way engine sphere casts skip colliders they start inside.
pub fn sphere_cast_aabb(
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<SweepHit> {
    let direction = direction.try_normalize()?;
    let inflated_min = aabb_min - Vec3::splat(radius);
    let inflated_max = aabb_max + Vec3::splat(radius);

    let inside = origin.cmpgt(inflated_min).all() && origin.cmplt(inflated_max).all();
    if inside {
        return None;
    }

    let distance = ray_aabb_intersect(origin, direction, inflated_min, inflated_max)?;
    let center = origin + direction * distance;
    let normal = aabb_surface_normal(center, inflated_min, inflated_max);

    Some(SweepHit {
        distance,
        point: center - normal * radius,
        normal,
    })
}

/// Sweep a sphere into the solid side of the plane `normal · p = offset`.
///
/// Returns `None` when moving away from or parallel to the plane, or when the
/// sphere starts overlapping it.
pub fn sphere_cast_plane(
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    normal: Vec3,
    offset: f32,
) -> Option<SweepHit> {
    let direction = direction.try_normalize()?;
    let normal = normal.try_normalize()?;

    let separation = normal.dot(origin) - offset;
    if separation < radius {
        return None;
    }

    let approach = normal.dot(direction);
    if approach >= -1e-6 {
        return None;
    }

    let distance = (separation - radius) / -approach;
    let center = origin + direction * distance;

    Some(SweepHit {
        distance,
        point: center - normal * radius,
        normal,
    })
}
