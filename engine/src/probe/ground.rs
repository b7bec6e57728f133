//! Ground probe
//!
//! Downward cast from the feet. On top of the raw hit it tracks:
//!
//! - slope: angle between the ground normal and world up
//! - directional slope: signed angle of the ground against the direction of
//!   travel, positive uphill, close to +90 when walking into a wall
//! - grounded: a hit that is not vetoed by an active jump or a too-steep slope
//! - the [`LandingRecord`] of the current flight

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::cast::{CollisionProbe, ProbeConfig, ProbeDirection, ProbeFrame, ProbeResult};
use super::landing::LandingRecord;
use crate::events::{ControllerEvent, EventQueue};
use crate::physics::PhysicsWorld;
use crate::physics::types::{WORLD_UP, angle_degrees};
use crate::smoothing::SlopeValue;

pub const DEFAULT_MAX_SLOPE: f32 = 50.0;
pub const DEFAULT_MIN_FALL_DISTANCE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundProbeConfig {
    pub probe: ProbeConfig,
    /// Steepest walkable slope (degrees)
    pub max_slope: f32,
    /// Landings travelling less than this are not reported (m)
    pub min_fall_distance: f32,
}

impl Default for GroundProbeConfig {
    fn default() -> Self {
        Self {
            probe: ProbeConfig::default(),
            max_slope: DEFAULT_MAX_SLOPE,
            min_fall_distance: DEFAULT_MIN_FALL_DISTANCE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroundProbe {
    probe: CollisionProbe,
    slope: SlopeValue,
    directional_slope: f32,
    grounded: bool,
    min_fall_distance: f32,
    flight: Option<LandingRecord>,
    last_landing: Option<LandingRecord>,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self::from_config(&GroundProbeConfig::default())
    }
}

impl GroundProbe {
    pub fn new(config: ProbeConfig, max_slope: f32, min_fall_distance: f32) -> Self {
        Self {
            probe: CollisionProbe::new(config, ProbeDirection::Down),
            slope: SlopeValue::new(max_slope),
            directional_slope: 0.0,
            grounded: false,
            min_fall_distance: min_fall_distance.max(0.0),
            flight: None,
            last_landing: None,
        }
    }

    pub fn from_config(config: &GroundProbeConfig) -> Self {
        Self::new(config.probe, config.max_slope, config.min_fall_distance)
    }

    /// Cast, update slope values and the grounded flag, and report transitions.
    ///
    /// `move_direction` is the world-space direction of travel (any length,
    /// zero when idle). `jump_active` vetoes grounding while jump power remains.
    pub fn process<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &W,
        frame: &ProbeFrame,
        move_direction: Vec3,
        jump_active: bool,
        events: &mut EventQueue,
    ) -> bool {
        let result = *self.probe.process(world, frame);

        if result.hit {
            self.slope.set_value(angle_degrees(result.normal, WORLD_UP));
            self.directional_slope = match move_direction.try_normalize() {
                Some(dir) => angle_degrees(result.normal, dir) - 90.0,
                None => 0.0,
            };
        } else {
            self.slope.set_value(0.0);
            self.directional_slope = 0.0;
        }

        let grounded = result.hit && !jump_active && !self.slope.too_steep();
        if grounded != self.grounded {
            self.grounded = grounded;
            if grounded {
                self.landed(frame.position, events);
            } else {
                self.left(frame.position, events);
            }
        }

        self.grounded
    }

    fn left(&mut self, position: Vec3, events: &mut EventQueue) {
        self.flight = Some(LandingRecord::leave(position));
        log::debug!("left ground at {:?}", position);
        events.push(ControllerEvent::LeftGround);
    }

    fn landed(&mut self, position: Vec3, events: &mut EventQueue) {
        // Spawning on the ground is not a landing
        let Some(mut record) = self.flight.take() else {
            return;
        };
        record.land(position);

        if record.travel_distance.abs() > self.min_fall_distance {
            log::debug!(
                "landed: fell {:.2} m, travelled {:.2} m, {} jump(s)",
                record.fall_distance,
                record.travel_distance,
                record.jump_count
            );
            self.last_landing = Some(record);
            events.push(ControllerEvent::Landed(record));
        }
    }

    /// A jump stopped rising at `position`.
    pub fn jump_ended(&mut self, position: Vec3) {
        if let Some(flight) = self.flight.as_mut() {
            flight.jumped(position);
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn result(&self) -> &ProbeResult {
        self.probe.result()
    }

    pub fn probe(&self) -> &CollisionProbe {
        &self.probe
    }

    /// Ground normal, world up when nothing was hit.
    pub fn normal(&self) -> Vec3 {
        self.probe.result().normal
    }

    pub fn slope(&self) -> &SlopeValue {
        &self.slope
    }

    pub fn set_max_slope(&mut self, max: f32) {
        self.slope.set_max(max);
    }

    pub fn directional_slope(&self) -> f32 {
        self.directional_slope
    }

    pub fn min_fall_distance(&self) -> f32 {
        self.min_fall_distance
    }

    /// The flight in progress, if airborne.
    pub fn flight(&self) -> Option<&LandingRecord> {
        self.flight.as_ref()
    }

    /// The last landing that was reported.
    pub fn last_landing(&self) -> Option<&LandingRecord> {
        self.last_landing.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{ColliderDesc, SceneWorld, Shape};

    fn frame_at(position: Vec3) -> ProbeFrame {
        ProbeFrame {
            position,
            height: 1.8,
            radius: 0.35,
        }
    }

    fn flat_world() -> SceneWorld {
        let mut world = SceneWorld::new();
        world.add_collider(ColliderDesc::new(Shape::floor(0.0)));
        world
    }

    #[test]
    fn test_grounded_on_flat_floor() {
        let world = flat_world();
        let mut ground = GroundProbe::default();
        let mut events = EventQueue::new();

        assert!(ground.process(&world, &frame_at(Vec3::ZERO), Vec3::ZERO, false, &mut events));
        assert!(ground.slope().value().abs() < 1e-3);
        // First contact without a flight is silent
        assert!(events.is_empty());
    }

    #[test]
    fn test_jump_power_vetoes_ground() {
        let world = flat_world();
        let mut ground = GroundProbe::default();
        let mut events = EventQueue::new();

        ground.process(&world, &frame_at(Vec3::ZERO), Vec3::ZERO, false, &mut events);
        let grounded = ground.process(&world, &frame_at(Vec3::ZERO), Vec3::ZERO, true, &mut events);

        assert!(!grounded);
        assert!(ground.result().hit);
        assert_eq!(events.drain().collect::<Vec<_>>(), vec![ControllerEvent::LeftGround]);
    }

    #[test]
    fn test_steep_slope_is_not_ground() {
        let mut world = SceneWorld::new();
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        world.add_collider(ColliderDesc::new(Shape::plane_through(Vec3::ZERO, normal)));

        let mut ground = GroundProbe::default();
        let mut events = EventQueue::new();
        let grounded = ground.process(&world, &frame_at(Vec3::ZERO), Vec3::ZERO, false, &mut events);

        assert!((ground.slope().value() - 45.0).abs() < 1e-2);
        assert!(grounded);

        ground.set_max_slope(40.0);
        assert!(!ground.process(&world, &frame_at(Vec3::ZERO), Vec3::ZERO, false, &mut events));
    }

    #[test]
    fn test_directional_slope_sign() {
        let mut world = SceneWorld::new();
        // Ramp rising toward -Z
        let normal = Vec3::new(0.0, 1.0, 0.5).normalize();
        world.add_collider(ColliderDesc::new(Shape::plane_through(Vec3::ZERO, normal)));

        let mut ground = GroundProbe::default();
        let mut events = EventQueue::new();

        ground.process(&world, &frame_at(Vec3::ZERO), Vec3::NEG_Z, false, &mut events);
        assert!(ground.directional_slope() > 20.0);

        ground.process(&world, &frame_at(Vec3::ZERO), Vec3::Z, false, &mut events);
        assert!(ground.directional_slope() < -20.0);

        ground.process(&world, &frame_at(Vec3::ZERO), Vec3::ZERO, false, &mut events);
        assert_eq!(ground.directional_slope(), 0.0);
    }

    #[test]
    fn test_landing_record_reported_past_threshold() {
        let world = flat_world();
        let mut ground = GroundProbe::default();
        let mut events = EventQueue::new();

        ground.process(&world, &frame_at(Vec3::ZERO), Vec3::ZERO, false, &mut events);
        ground.process(&world, &frame_at(Vec3::new(0.0, 2.0, 0.0)), Vec3::ZERO, false, &mut events);
        assert!(ground.flight().is_some());
        ground.process(&world, &frame_at(Vec3::new(0.0, 0.05, 0.0)), Vec3::ZERO, false, &mut events);

        let drained: Vec<_> = events.drain().collect();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], ControllerEvent::LeftGround);
        let ControllerEvent::Landed(record) = drained[1] else {
            panic!("expected a landing, got {:?}", drained[1]);
        };
        // Contact was lost at 2 m, landed 5 cm above the floor
        assert!((record.fall_distance - 1.95).abs() < 1e-4);
        assert!((record.travel_distance - 1.95).abs() < 1e-4);
        assert!(ground.flight().is_none());
        assert!(ground.last_landing().is_some());
    }

    #[test]
    fn test_hop_below_threshold_is_silent() {
        let world = flat_world();
        let mut ground = GroundProbe::default();
        let mut events = EventQueue::new();

        ground.process(&world, &frame_at(Vec3::ZERO), Vec3::ZERO, false, &mut events);
        // Jump vetoes contact without moving
        ground.process(&world, &frame_at(Vec3::ZERO), Vec3::ZERO, true, &mut events);
        ground.process(&world, &frame_at(Vec3::new(0.1, 0.0, 0.0)), Vec3::ZERO, false, &mut events);

        let drained: Vec<_> = events.drain().collect();
        assert_eq!(drained, vec![ControllerEvent::LeftGround]);
        assert!(ground.last_landing().is_none());
    }
}
