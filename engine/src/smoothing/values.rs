//! Bounded scalar values.

use serde::{Deserialize, Serialize};

use super::move_towards;

/// A float that always stays within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedFloat {
    value: f32,
    min: f32,
    max: f32,
}

impl BoundedFloat {
    /// Create a bounded float sitting at `min`.
    ///
    /// Swapped bounds are reordered.
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self { value: min, min, max }
    }

    /// Builder-style initial value (clamped).
    pub fn with_value(mut self, value: f32) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value, clamping into the bounds.
    ///
    /// NaN is treated as `min`.
    pub fn set_value(&mut self, value: f32) {
        self.value = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Move the upper bound. The value is re-clamped.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(self.min);
        self.set_value(self.value);
    }

    /// Move the lower bound. The value is re-clamped.
    pub fn set_min(&mut self, min: f32) {
        self.min = min.min(self.max);
        self.set_value(self.value);
    }

    pub fn set_to_max(&mut self) {
        self.value = self.max;
    }

    pub fn set_to_min(&mut self) {
        self.value = self.min;
    }

    /// Step toward `max` by `amount`.
    pub fn move_toward_max(&mut self, amount: f32) {
        self.value = move_towards(self.value, self.max, amount.max(0.0));
    }

    /// Step toward `min` by `amount`.
    pub fn move_toward_min(&mut self, amount: f32) {
        self.value = move_towards(self.value, self.min, amount.max(0.0));
    }

    pub fn is_at_max(&self) -> bool {
        self.value >= self.max
    }

    pub fn is_at_min(&self) -> bool {
        self.value <= self.min
    }

    /// Position of the value inside its range, `0.0` for an empty range.
    pub fn normalized(&self) -> f32 {
        super::inverse_lerp(self.min, self.max, self.value)
    }
}

/// A bounded float that steps toward its bounds at `delta` units per second.
///
/// Used for the jump power (`0..power_max`) and the pose blend (`0..1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothValue {
    bounds: BoundedFloat,
    delta: f32,
}

impl SmoothValue {
    pub fn new(delta: f32, min: f32, max: f32) -> Self {
        Self {
            bounds: BoundedFloat::new(min, max),
            delta: delta.max(0.0),
        }
    }

    /// Value in `[0, max]`.
    pub fn with_max(delta: f32, max: f32) -> Self {
        Self::new(delta, 0.0, max)
    }

    /// Value in `[0, 1]`.
    pub fn scale(delta: f32) -> Self {
        Self::new(delta, 0.0, 1.0)
    }

    pub fn value(&self) -> f32 {
        self.bounds.value()
    }

    pub fn set_value(&mut self, value: f32) {
        self.bounds.set_value(value);
    }

    pub fn min(&self) -> f32 {
        self.bounds.min()
    }

    pub fn max(&self) -> f32 {
        self.bounds.max()
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: f32) {
        self.delta = delta.max(0.0);
    }

    pub fn move_toward_max(&mut self, dt: f32) {
        self.bounds.move_toward_max(self.delta * dt);
    }

    pub fn move_toward_min(&mut self, dt: f32) {
        self.bounds.move_toward_min(self.delta * dt);
    }

    pub fn set_to_max(&mut self) {
        self.bounds.set_to_max();
    }

    pub fn set_to_min(&mut self) {
        self.bounds.set_to_min();
    }

    pub fn is_at_max(&self) -> bool {
        self.bounds.is_at_max()
    }

    pub fn is_at_min(&self) -> bool {
        self.bounds.is_at_min()
    }
}

/// Ground slope angle in degrees.
///
/// The value itself is not clamped; `max` is the steepest walkable slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlopeValue {
    value: f32,
    max: f32,
}

impl SlopeValue {
    pub fn new(max: f32) -> Self {
        Self { value: 0.0, max }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Record a measured angle. Values are kept within `[0, 180]`.
    pub fn set_value(&mut self, degrees: f32) {
        self.value = if degrees.is_nan() {
            0.0
        } else {
            degrees.clamp(0.0, 180.0)
        };
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn set_max(&mut self, max: f32) {
        self.max = max;
    }

    /// Too steep to stand on.
    pub fn too_steep(&self) -> bool {
        self.value > self.max
    }
}
