//! Jump controller
//!
//! A jump snaps `power` to its max. While airborne, power decays toward zero
//! and drives the upward velocity; gravity is off until it runs out. A solid
//! ceiling cuts power to zero at once.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::constraints::Constraints;
use crate::events::{ControllerEvent, EventQueue};
use crate::physics::PhysicsWorld;
use crate::physics::types::WORLD_UP;
use crate::probe::ProbeResult;
use crate::smoothing::SmoothValue;

/// Upward speed at take-off (m/s)
pub const DEFAULT_POWER_MAX: f32 = 12.0;
/// Power lost per second while rising
pub const DEFAULT_POWER_DECAY: f32 = 7.0;
/// Single jump, no double jump
pub const DEFAULT_MAX_COUNT: u32 = 1;
/// Push-down multiplier on the take-off impulse
pub const DEFAULT_PUSH_DOWN: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Upward speed at the start of a jump (m/s)
    pub power_max: f32,
    /// Power lost per second while rising
    pub power_decay: f32,
    /// Jumps allowed per flight, at least 1
    pub max_count: u32,
    /// Scales the impulse pushed into a dynamic platform on take-off.
    /// The platform receives `power_max * push_down` N·s downward.
    pub push_down: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            power_max: DEFAULT_POWER_MAX,
            power_decay: DEFAULT_POWER_DECAY,
            max_count: DEFAULT_MAX_COUNT,
            push_down: DEFAULT_PUSH_DOWN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    Grounded,
    /// Power left, gravity off
    Rising,
    /// Power spent or cut, gravity on
    Falling,
}

#[derive(Debug, Clone)]
pub struct JumpController {
    power: SmoothValue,
    count: u32,
    max_count: u32,
    start_velocity: f32,
    push_down: f32,
}

impl Default for JumpController {
    fn default() -> Self {
        Self::new(JumpConfig::default())
    }
}

impl JumpController {
    pub fn new(config: JumpConfig) -> Self {
        let mut jump = Self {
            power: SmoothValue::with_max(config.power_decay, config.power_max.max(0.0)),
            count: 0,
            max_count: 1,
            start_velocity: 0.0,
            push_down: config.push_down.max(0.0),
        };
        jump.set_max_count(config.max_count);
        jump
    }

    pub fn power(&self) -> &SmoothValue {
        &self.power
    }

    /// Remaining upward power.
    pub fn power_value(&self) -> f32 {
        self.power.value()
    }

    pub fn is_active(&self) -> bool {
        self.power.value() > 0.0
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn set_max_count(&mut self, max_count: u32) {
        if max_count < 1 {
            log::warn!("jump max count {} clamped to 1", max_count);
        }
        self.max_count = max_count.max(1);
    }

    pub fn is_maxed(&self) -> bool {
        self.count >= self.max_count
    }

    /// Vertical velocity of the platform at take-off.
    pub fn start_velocity(&self) -> f32 {
        self.start_velocity
    }

    pub fn push_down(&self) -> f32 {
        self.push_down
    }

    pub fn phase(&self, grounded: bool) -> JumpPhase {
        if grounded {
            JumpPhase::Grounded
        } else if self.is_active() {
            JumpPhase::Rising
        } else {
            JumpPhase::Falling
        }
    }

    /// Per-frame update. Returns `true` on the frame a jump ends.
    ///
    /// `roof_solid` is a ceiling hit against static or kinematic geometry.
    pub fn process(&mut self, grounded: bool, roof_solid: bool, dt: f32, events: &mut EventQueue) -> bool {
        if grounded {
            self.count = 0;
            return false;
        }
        if !self.is_active() {
            return false;
        }

        if roof_solid {
            self.power.set_to_min();
        } else {
            self.power.move_toward_min(dt.max(0.0));
        }

        if self.power.is_at_min() {
            log::debug!("jump ended (count {})", self.count);
            events.push(ControllerEvent::JumpEnd);
            return true;
        }
        false
    }

    pub fn can_jump(&self, grounded: bool, constraints: &Constraints) -> bool {
        constraints.jump()
            && !self.is_maxed()
            && (grounded || constraints.jump_from_air() || self.count != 0)
    }

    /// Jump if allowed.
    ///
    /// When standing on a dynamic body the jump inherits its upward velocity
    /// and pushes it down by `power_max * push_down` at the contact point.
    pub fn try_jump<W: PhysicsWorld + ?Sized>(
        &mut self,
        grounded: bool,
        ground: &ProbeResult,
        constraints: &Constraints,
        world: &mut W,
        events: &mut EventQueue,
    ) -> bool {
        if !self.can_jump(grounded, constraints) {
            return false;
        }

        self.count += 1;
        self.power.set_to_max();

        self.start_velocity = match ground.body.filter(|b| grounded && b.is_dynamic()) {
            Some(body) => {
                let inherited = world.body_velocity(body.handle).y.max(0.0);
                let impulse: Vec3 = -WORLD_UP * self.power.max() * self.push_down;
                world.apply_impulse(body.handle, impulse, ground.point);
                inherited
            }
            None => 0.0,
        };

        log::debug!(
            "jump {}/{} (launch velocity {:.2})",
            self.count,
            self.max_count,
            self.start_velocity
        );
        events.push(ControllerEvent::JumpStart);
        true
    }
}
