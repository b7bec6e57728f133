//! Input axis smoothing.

use serde::{Deserialize, Serialize};

use super::move_towards;

/// What an axis does while its input is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisRelease {
    /// Move back toward zero at the regular rate.
    #[default]
    Track,
    /// Snap straight back to zero.
    SpringBack,
    /// Keep the last value.
    Hold,
}

/// Tracks an input axis, moving toward the requested input at `delta` units per second.
///
/// Signed axes live in `[-extent, extent]`, unsigned ones in `[0, extent]`.
/// For a plain axis the extent is `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSmoothValue {
    value: f32,
    delta: f32,
    signed: bool,
    release: AxisRelease,
}

impl AxisSmoothValue {
    /// Signed axis that tracks back to zero.
    pub fn new(delta: f32) -> Self {
        Self {
            value: 0.0,
            delta: delta.max(0.0),
            signed: true,
            release: AxisRelease::Track,
        }
    }

    /// Axis limited to `[0, 1]`.
    pub fn unsigned(delta: f32) -> Self {
        Self {
            signed: false,
            ..Self::new(delta)
        }
    }

    pub fn with_release(mut self, release: AxisRelease) -> Self {
        self.release = release;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn set_delta(&mut self, delta: f32) {
        self.delta = delta.max(0.0);
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn release(&self) -> AxisRelease {
        self.release
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    /// Advance one frame toward `input` on a unit axis.
    ///
    /// Call once per frame; repeated calls compound.
    pub fn update(&mut self, input: f32, dt: f32) -> f32 {
        self.update_within(input, dt, 1.0)
    }

    /// Advance toward `input * extent`, keeping the value inside the axis bounds.
    pub(crate) fn update_within(&mut self, input: f32, dt: f32, extent: f32) -> f32 {
        let extent = extent.max(0.0);
        let min = if self.signed { -extent } else { 0.0 };
        let input = if input.is_nan() { 0.0 } else { input };
        let input = if self.signed {
            input.clamp(-1.0, 1.0)
        } else {
            input.clamp(0.0, 1.0)
        };

        if input == 0.0 {
            match self.release {
                AxisRelease::Track => {}
                AxisRelease::SpringBack => {
                    self.value = 0.0;
                    return self.value;
                }
                AxisRelease::Hold => {
                    self.value = self.value.clamp(min, extent);
                    return self.value;
                }
            }
        }

        let target = input * extent;
        self.value = move_towards(self.value, target, self.delta * dt.max(0.0)).clamp(min, extent);
        self.value
    }
}

/// An axis measured in speed units, bounded by `±max_speed`.
///
/// The bounds are supplied on every update, so the acceleration curve rescales
/// automatically whenever the pose changes its target speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedAxisSmoothValue {
    axis: AxisSmoothValue,
}

impl SpeedAxisSmoothValue {
    pub fn new(delta: f32) -> Self {
        Self {
            axis: AxisSmoothValue::new(delta),
        }
    }

    pub fn value(&self) -> f32 {
        self.axis.value()
    }

    pub fn delta(&self) -> f32 {
        self.axis.delta()
    }

    pub fn set_delta(&mut self, delta: f32) {
        self.axis.set_delta(delta);
    }

    pub fn reset(&mut self) {
        self.axis.reset();
    }

    /// Advance toward `input * max_speed`.
    pub fn update(&mut self, input: f32, max_speed: f32, dt: f32) -> f32 {
        self.axis.update_within(input, dt, max_speed)
    }
}
