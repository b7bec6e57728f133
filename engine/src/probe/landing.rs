//! Flight bookkeeping between leaving the ground and landing again.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One flight: where it left the ground, the last apex, and where it ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingRecord {
    pub leave_position: Vec3,
    /// Reference point for fall distance: the leave point, then each jump apex
    pub fall_position: Vec3,
    pub land_position: Option<Vec3>,
    /// Jumps completed since leaving the ground
    pub jump_count: u32,
    /// Vertical drop from the fall reference to the landing point
    pub fall_distance: f32,
    /// Straight-line distance from the leave point to the landing point
    pub travel_distance: f32,
}

impl LandingRecord {
    pub fn leave(position: Vec3) -> Self {
        Self {
            leave_position: position,
            fall_position: position,
            land_position: None,
            jump_count: 0,
            fall_distance: 0.0,
            travel_distance: 0.0,
        }
    }

    /// A jump finished rising at `position`.
    pub fn jumped(&mut self, position: Vec3) {
        self.jump_count += 1;
        self.fall_position = position;
    }

    pub fn land(&mut self, position: Vec3) {
        self.land_position = Some(position);
        self.fall_distance = self.fall_position.y - position.y;
        self.travel_distance = self.leave_position.distance(position);
    }

    pub fn is_landed(&self) -> bool {
        self.land_position.is_some()
    }
}
