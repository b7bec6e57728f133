//! Footstep timing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pose::PoseState;
use crate::events::{ControllerEvent, EventQueue};
use crate::physics::SurfaceTag;

/// Seconds of full-speed movement between steps, per pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootstepConfig {
    pub standing: f32,
    pub sprinting: f32,
    pub crouching: f32,
    pub proning: f32,
    pub custom: f32,
}

impl Default for FootstepConfig {
    fn default() -> Self {
        Self {
            standing: 0.5,
            sprinting: 0.3,
            crouching: 0.7,
            proning: 1.0,
            custom: 0.5,
        }
    }
}

impl FootstepConfig {
    pub fn interval(&self, state: PoseState) -> f32 {
        match state {
            PoseState::Standing => self.standing,
            PoseState::Sprinting => self.sprinting,
            PoseState::Crouching => self.crouching,
            PoseState::Proning => self.proning,
            PoseState::Custom => self.custom,
        }
    }
}

/// What the audio side needs to pick a footstep clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootstepCue {
    pub state: PoseState,
    pub surface: Option<SurfaceTag>,
}

#[derive(Debug, Clone, Default)]
pub struct FootstepTimer {
    config: FootstepConfig,
    elapsed: f32,
}

impl FootstepTimer {
    pub fn new(config: FootstepConfig) -> Self {
        Self { config, elapsed: 0.0 }
    }

    pub fn config(&self) -> &FootstepConfig {
        &self.config
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by `clamp01(|speed|) * dt`; idle or airborne frames reset.
    pub fn process(
        &mut self,
        speed: Vec2,
        grounded: bool,
        state: PoseState,
        surface: Option<SurfaceTag>,
        dt: f32,
        events: &mut EventQueue,
    ) -> Option<FootstepCue> {
        let step = speed.length().clamp(0.0, 1.0) * dt.max(0.0);

        if step == 0.0 || !grounded {
            self.elapsed = 0.0;
            return None;
        }
        self.elapsed += step;

        if self.elapsed < self.config.interval(state) {
            return None;
        }
        self.elapsed = 0.0;

        let cue = FootstepCue { state, surface };
        events.push(ControllerEvent::Footstep(cue));
        Some(cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_at_interval() {
        let mut timer = FootstepTimer::default();
        let mut events = EventQueue::new();
        let grass = Some(SurfaceTag(1));

        let mut steps = 0;
        for _ in 0..120 {
            if timer
                .process(Vec2::new(0.0, 3.5), true, PoseState::Standing, grass, 0.01, &mut events)
                .is_some()
            {
                steps += 1;
            }
        }
        // 1.2 seconds of walking at 0.5 s per step
        assert_eq!(steps, 2);
        assert_eq!(
            events.iter().next(),
            Some(&ControllerEvent::Footstep(FootstepCue {
                state: PoseState::Standing,
                surface: grass
            }))
        );
    }

    #[test]
    fn test_slow_movement_stretches_steps() {
        let mut timer = FootstepTimer::default();
        let mut events = EventQueue::new();
        for _ in 0..40 {
            timer.process(Vec2::new(0.0, 0.5), true, PoseState::Standing, None, 0.01, &mut events);
        }
        assert!(events.is_empty());
        assert!((timer.elapsed() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_airborne_resets() {
        let mut timer = FootstepTimer::default();
        let mut events = EventQueue::new();
        timer.process(Vec2::Y, true, PoseState::Standing, None, 0.3, &mut events);
        timer.process(Vec2::Y, false, PoseState::Standing, None, 0.3, &mut events);
        assert_eq!(timer.elapsed(), 0.0);
        assert!(events.is_empty());
    }
}
