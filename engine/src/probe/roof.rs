//! Roof probe: upward cast from the top of the live collider.

use super::cast::{CollisionProbe, ProbeConfig, ProbeDirection, ProbeFrame, ProbeResult};
use crate::physics::PhysicsWorld;

#[derive(Debug, Clone)]
pub struct RoofProbe {
    probe: CollisionProbe,
}

impl Default for RoofProbe {
    fn default() -> Self {
        Self::new(ProbeConfig::default())
    }
}

impl RoofProbe {
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            probe: CollisionProbe::new(config, ProbeDirection::Up),
        }
    }

    /// Cast above `frame.height` and report whether anything is in range.
    ///
    /// The pose traverser calls this with candidate envelopes as well as the
    /// live one, so the stored result is whatever was checked last.
    pub fn check<W: PhysicsWorld + ?Sized>(&mut self, world: &W, frame: &ProbeFrame) -> bool {
        self.probe.process(world, frame).hit
    }

    /// Feet-to-ceiling height above `frame`, `None` when nothing is in range.
    ///
    /// The cast starts `start_offset` below the top of the envelope, so the
    /// obstruction sits at `height + distance - start_offset`.
    pub fn clearance<W: PhysicsWorld + ?Sized>(&mut self, world: &W, frame: &ProbeFrame) -> Option<f32> {
        let start_offset = self.probe.config().start_offset;
        let result = self.probe.process(world, frame);
        result.hit.then(|| frame.height + result.distance - start_offset)
    }

    /// The last hit is a surface that will not give way: static geometry or
    /// a kinematic body.
    pub fn hit_is_solid(&self) -> bool {
        let result = self.probe.result();
        result.hit && !result.on_dynamic_body()
    }

    pub fn result(&self) -> &ProbeResult {
        self.probe.result()
    }

    pub fn probe(&self) -> &CollisionProbe {
        &self.probe
    }
}
