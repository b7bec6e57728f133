//! Physics type re-exports from glam
//!
//! The math types used across the controller, re-exported so hosts do not
//! need to pin their own glam version.

pub use glam::{EulerRot, Quat, Vec2, Vec3};

/// World up. The controller assumes flat gravity along -Y.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Angle between two vectors in degrees, `0.0` if either is zero length.
pub fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() < 1e-12 || b.length_squared() < 1e-12 {
        return 0.0;
    }
    a.angle_between(b).to_degrees()
}

/// Remove the component of `v` along the plane normal.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    match normal.try_normalize() {
        Some(n) => v - n * v.dot(n),
        None => v,
    }
}
