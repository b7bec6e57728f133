//! Mouse/stick look: body yaw and camera pitch.

use glam::Quat;
use serde::{Deserialize, Serialize};

use crate::physics::CharacterBody;
use crate::smoothing::lerp;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees per unit of look input
    pub sensitivity: f32,
    /// How fast yaw and pitch catch up with their targets (per second)
    pub smoothing: f32,
    pub invert_x: bool,
    pub invert_y: bool,
    /// Highest pitch above the horizon (degrees)
    pub range_up: f32,
    /// Lowest pitch below the horizon (degrees)
    pub range_down: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 5.0,
            smoothing: 80.0,
            invert_x: false,
            invert_y: false,
            range_up: 80.0,
            range_down: 80.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LookController {
    config: LookConfig,
    yaw_target: f32,
    pitch_target: f32,
    pitch: f32,
}

impl LookController {
    /// Start looking where `yaw` points, level with the horizon.
    pub fn new(config: LookConfig, yaw: f32) -> Self {
        Self {
            config,
            yaw_target: yaw,
            pitch_target: 0.0,
            pitch: 0.0,
        }
    }

    pub fn config(&self) -> &LookConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LookConfig {
        &mut self.config
    }

    /// Camera pitch in degrees, up positive.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw_target(&self) -> f32 {
        self.yaw_target
    }

    pub fn pitch_target(&self) -> f32 {
        self.pitch_target
    }

    /// Snap both targets, e.g. after a teleport.
    pub fn set_view(&mut self, body: &mut CharacterBody, yaw: f32, pitch: f32) {
        body.yaw = yaw;
        self.yaw_target = yaw;
        self.pitch_target = self.clamp_pitch(pitch);
        self.pitch = self.pitch_target;
    }

    /// Rotation of the camera relative to the body.
    pub fn pitch_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Apply one frame of look input (x yaw right, y pitch up).
    pub fn process(&mut self, look: glam::Vec2, allowed: bool, body: &mut CharacterBody, dt: f32) {
        if allowed {
            let sign_x = if self.config.invert_x { -1.0 } else { 1.0 };
            let sign_y = if self.config.invert_y { -1.0 } else { 1.0 };
            // Positive yaw turns left
            self.yaw_target -= look.x * self.config.sensitivity * sign_x;
            self.pitch_target = self.clamp_pitch(self.pitch_target + look.y * self.config.sensitivity * sign_y);
        }

        let t = (self.config.smoothing.max(0.0) * dt.max(0.0)).min(1.0);
        body.yaw = lerp(body.yaw, self.yaw_target, t);
        self.pitch = self.clamp_pitch(lerp(self.pitch, self.pitch_target, t));
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(-self.config.range_down.abs(), self.config.range_up.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_yaw_follows_input() {
        let mut look = LookController::new(LookConfig::default(), 0.0);
        let mut body = CharacterBody::default();

        look.process(Vec2::new(2.0, 0.0), true, &mut body, 0.1);
        // Smoothing 80/s saturates within 0.1 s
        assert_eq!(body.yaw, -10.0);
        assert!(body.forward().x > 0.0);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut look = LookController::new(LookConfig::default(), 0.0);
        let mut body = CharacterBody::default();
        for _ in 0..100 {
            look.process(Vec2::new(0.0, 10.0), true, &mut body, 0.1);
        }
        assert_eq!(look.pitch(), 80.0);

        let eye = look.pitch_rotation() * Vec3::NEG_Z;
        assert!(eye.y > 0.9);
    }

    #[test]
    fn test_invert_y() {
        let mut look = LookController::new(
            LookConfig {
                invert_y: true,
                ..LookConfig::default()
            },
            0.0,
        );
        let mut body = CharacterBody::default();
        look.process(Vec2::new(0.0, 1.0), true, &mut body, 0.1);
        assert_eq!(look.pitch(), -5.0);
    }

    #[test]
    fn test_disallowed_look_still_settles() {
        let mut look = LookController::new(
            LookConfig {
                smoothing: 5.0,
                ..LookConfig::default()
            },
            0.0,
        );
        let mut body = CharacterBody::default();
        look.process(Vec2::new(2.0, 0.0), true, &mut body, 0.1);
        let mid = body.yaw;
        assert!(mid > -10.0 && mid < 0.0);

        look.process(Vec2::new(50.0, 0.0), false, &mut body, 0.1);
        assert_eq!(look.yaw_target(), -10.0);
        assert!(body.yaw < mid);
    }
}
