//! Smoothing Module
//!
//! Frame-rate independent value primitives shared by every controller stage.
//!
//! # Components
//!
//! - [`BoundedFloat`] - A float clamped to `[min, max]`
//! - [`SmoothValue`] - A bounded float stepped toward its bounds at a fixed rate
//! - [`SlopeValue`] - An unclamped angle with a "too steep" threshold
//! - [`AxisSmoothValue`] - Tracks an input axis at a fixed rate
//! - [`SpeedAxisSmoothValue`] - An axis whose bounds follow the live max speed
//!
//! All stepping is `rate * dt` and never overshoots the target.

pub mod axis;
pub mod values;

pub use axis::{AxisRelease, AxisSmoothValue, SpeedAxisSmoothValue};
pub use values::{BoundedFloat, SlopeValue, SmoothValue};

use glam::Vec3;

/// Move `current` toward `target` by at most `max_delta`.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Move a vector toward `target` by at most `max_delta` units of length.
pub fn move_towards_vec3(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let diff = target - current;
    let distance = diff.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + diff / distance * max_delta
    }
}

/// Linear interpolation between two values.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns `0.0` for a degenerate span (`a == b`).
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        0.0
    } else {
        ((value - a) / (b - a)).clamp(0.0, 1.0)
    }
}
