//! Pose traverser
//!
//! Blends the collider envelope between pose states over time.
//!
//! The visible [`Traverser::state`] is the *target* state: a transition counts
//! as done the moment it is requested, while height, radius and speed catch up
//! at `blend_rate` per second. Growing transitions consult an overhead check
//! every frame before the blend advances. When the target does not fit under
//! what is in the way they are redirected to the tallest pose that does.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::pose::{PoseState, PoseStateData, StateRegistry};
use crate::events::{ControllerEvent, EventQueue};
use crate::smoothing::move_towards;

/// Blend progress per second (a full transition takes ~0.29 s)
pub const DEFAULT_BLEND_RATE: f32 = 3.5;
/// Camera pivot at half the collider height
pub const DEFAULT_PIVOT_SCALE: f32 = 0.5;
/// Camera sits this far below the top of the collider (meters)
pub const DEFAULT_CAMERA_OFFSET: f32 = 0.05;

/// Slack when comparing a pose height against the overhead clearance (meters)
const CLEARANCE_EPSILON: f32 = 1e-3;

/// States the roof redirect may fall back to, in no particular order.
const SAFE_STATES: [PoseState; 2] = [PoseState::Crouching, PoseState::Proning];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraverserConfig {
    /// Blend progress per second
    pub blend_rate: f32,
    /// Fraction of the height where the camera pivot sits
    pub pivot_scale: f32,
    /// Lowers both camera mounts
    pub camera_offset: f32,
}

impl Default for TraverserConfig {
    fn default() -> Self {
        Self {
            blend_rate: DEFAULT_BLEND_RATE,
            pivot_scale: DEFAULT_PIVOT_SCALE,
            camera_offset: DEFAULT_CAMERA_OFFSET,
        }
    }
}

/// Local offsets of the camera rig relative to the feet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraMounts {
    /// Pitch pivot, relative to the body
    pub pivot: Vec3,
    /// Camera, relative to the pivot
    pub camera: Vec3,
}

impl CameraMounts {
    /// Eye height above the feet.
    pub fn eye_height(&self) -> f32 {
        self.pivot.y + self.camera.y
    }
}

/// Answers "is something overhead of this envelope, and how high is it?".
pub trait OverheadCheck {
    /// Feet-to-obstruction height when something is in range above
    /// `envelope`, `None` for open sky.
    fn clearance(&mut self, envelope: &PoseStateData) -> Option<f32>;
}

impl<F: FnMut(&PoseStateData) -> Option<f32>> OverheadCheck for F {
    fn clearance(&mut self, envelope: &PoseStateData) -> Option<f32> {
        self(envelope)
    }
}

#[derive(Debug, Clone)]
pub struct Traverser {
    config: TraverserConfig,
    previous: PoseStateData,
    target: PoseStateData,
    current: PoseStateData,
    blend: f32,
    mounts: CameraMounts,
}

impl Traverser {
    /// Start settled in `initial`.
    pub fn new(config: TraverserConfig, initial: PoseStateData) -> Self {
        let mut traverser = Self {
            config,
            previous: initial,
            target: initial,
            current: initial,
            blend: 1.0,
            mounts: CameraMounts::default(),
        };
        traverser.mounts = traverser.camera_mounts_for(&initial);
        traverser
    }

    pub fn config(&self) -> &TraverserConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TraverserConfig) {
        self.config = config;
    }

    /// Discrete state: the target of the blend, even mid-blend.
    pub fn state(&self) -> PoseState {
        self.target.state
    }

    pub fn previous(&self) -> &PoseStateData {
        &self.previous
    }

    pub fn target(&self) -> &PoseStateData {
        &self.target
    }

    /// Live blended envelope.
    pub fn current(&self) -> &PoseStateData {
        &self.current
    }

    pub fn blend(&self) -> f32 {
        self.blend
    }

    pub fn is_settled(&self) -> bool {
        self.blend >= 1.0
    }

    /// The transition in progress makes the character taller.
    pub fn is_growing(&self) -> bool {
        !self.is_settled() && self.target.height > self.previous.height
    }

    /// Camera mounts for the live envelope, as of the last advance.
    pub fn camera_mounts(&self) -> CameraMounts {
        self.mounts
    }

    /// Camera mounts a given envelope would produce.
    pub fn camera_mounts_for(&self, data: &PoseStateData) -> CameraMounts {
        let pivot = data.height * self.config.pivot_scale.clamp(0.0, 1.0);
        CameraMounts {
            pivot: Vec3::Y * (pivot - self.config.camera_offset),
            camera: Vec3::Y * (data.height - pivot - self.config.camera_offset),
        }
    }

    /// Retarget toward `data`, resuming from the live height.
    ///
    /// The blend restarts at the point where the old-target to new-target span
    /// already matches the current height, so the collider never pops. Returns
    /// `false` when `data` is already the target.
    pub fn request_transition(&mut self, data: PoseStateData, events: &mut EventQueue) -> bool {
        if data == self.target {
            return false;
        }

        let from = self.target.state;
        let old = self.target;

        match resume_blend(old.height, data.height, self.current.height) {
            Some(blend) => {
                self.previous = old;
                self.blend = blend;
            }
            None => {
                self.previous = self.current;
                self.blend = 0.0;
            }
        }
        self.target = data;
        self.current = self.previous.lerp(&self.target, self.blend);

        log::debug!("pose transition {} -> {} (resume at {:.3})", from, data.state, self.blend);
        events.push(ControllerEvent::TransitionStart { from, to: data.state });

        if self.is_settled() {
            self.current = self.target;
            events.push(ControllerEvent::TransitionEnd { state: self.target.state });
        }
        true
    }

    /// Request the registered data of `state`.
    ///
    /// # Panics
    ///
    /// If `state` has no registered data, see [`StateRegistry::get`].
    pub fn go_to(&mut self, state: PoseState, registry: &StateRegistry, events: &mut EventQueue) -> bool {
        self.request_transition(registry.get(state), events)
    }

    /// One frame: roof veto, blend step, camera mounts.
    ///
    /// Returns the live envelope to apply to the collision shape.
    pub fn advance<C: OverheadCheck + ?Sized>(
        &mut self,
        dt: f32,
        registry: &StateRegistry,
        overhead: &mut C,
        events: &mut EventQueue,
    ) -> PoseStateData {
        let mut hold = false;

        let clearance = if self.is_growing() {
            overhead.clearance(&self.current)
        } else {
            None
        };
        if let Some(clearance) = clearance.filter(|&c| !fits(self.target.height, c)) {
            match self.safe_state(registry, clearance) {
                Some(safe) => {
                    log::debug!(
                        "overhead at {:.2} m blocks {} at {:.2} m, redirecting to {}",
                        clearance,
                        self.target.state,
                        self.current.height,
                        safe.state
                    );
                    self.request_transition(safe, events);
                }
                None => hold = true,
            }
        }

        if !self.is_settled() && !hold {
            self.blend = move_towards(self.blend, 1.0, self.config.blend_rate.max(0.0) * dt.max(0.0));
            self.current = self.previous.lerp(&self.target, self.blend);
            if self.is_settled() {
                self.current = self.target;
                log::debug!("pose transition to {} complete", self.target.state);
                events.push(ControllerEvent::TransitionEnd { state: self.target.state });
            }
        }

        self.mounts = self.camera_mounts_for(&self.current);
        self.current
    }

    /// Tallest fallback pose that fits under `clearance`.
    fn safe_state(&self, registry: &StateRegistry, clearance: f32) -> Option<PoseStateData> {
        SAFE_STATES
            .iter()
            .filter(|&&state| state != self.target.state)
            .filter_map(|&state| registry.try_get(state).ok())
            .filter(|data| fits(data.height, clearance))
            .max_by(|a, b| a.height.total_cmp(&b.height))
    }
}

fn fits(height: f32, clearance: f32) -> bool {
    height <= clearance + CLEARANCE_EPSILON
}

/// Blend along `from_height -> to_height` that reproduces `live_height`.
///
/// `None` if the span is degenerate or does not contain the live height.
fn resume_blend(from_height: f32, to_height: f32, live_height: f32) -> Option<f32> {
    let span = to_height - from_height;
    if span.abs() < f32::EPSILON {
        return None;
    }
    let t = (live_height - from_height) / span;
    (0.0..=1.0).contains(&t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::pose::{CROUCHING, PRONING, SPRINTING, STANDING};

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn open_sky(_: &PoseStateData) -> Option<f32> {
        None
    }

    fn settle(traverser: &mut Traverser, registry: &StateRegistry, events: &mut EventQueue) {
        for _ in 0..100 {
            traverser.advance(0.05, registry, &mut open_sky, events);
        }
    }

    #[test]
    fn test_starts_settled() {
        let traverser = Traverser::new(TraverserConfig::default(), STANDING);
        assert!(traverser.is_settled());
        assert_eq!(traverser.state(), PoseState::Standing);
        assert_eq!(*traverser.current(), STANDING);
    }

    #[test]
    fn test_state_is_target_immediately() {
        let mut traverser = Traverser::new(TraverserConfig::default(), STANDING);
        let mut events = EventQueue::new();

        assert!(traverser.request_transition(CROUCHING, &mut events));
        assert_eq!(traverser.state(), PoseState::Crouching);
        assert!(approx_eq(traverser.current().height, 1.8));
        assert_eq!(
            events.drain().collect::<Vec<_>>(),
            vec![ControllerEvent::TransitionStart {
                from: PoseState::Standing,
                to: PoseState::Crouching
            }]
        );
    }

    #[test]
    fn test_blend_advances_at_rate_and_ends_once() {
        let registry = StateRegistry::default();
        let mut traverser = Traverser::new(TraverserConfig::default(), STANDING);
        let mut events = EventQueue::new();
        traverser.request_transition(CROUCHING, &mut events);
        events.clear();

        traverser.advance(0.1, &registry, &mut open_sky, &mut events);
        assert!(approx_eq(traverser.blend(), 0.35));
        assert!(approx_eq(traverser.current().height, 1.8 - 0.8 * 0.35));

        settle(&mut traverser, &registry, &mut events);
        assert!(traverser.is_settled());
        assert_eq!(*traverser.current(), CROUCHING);
        assert_eq!(
            events.count(|e| matches!(e, ControllerEvent::TransitionEnd { .. })),
            1
        );
    }

    #[test]
    fn test_same_target_is_noop() {
        let mut traverser = Traverser::new(TraverserConfig::default(), STANDING);
        let mut events = EventQueue::new();
        assert!(!traverser.request_transition(STANDING, &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_resume_mid_blend_keeps_height() {
        let registry = StateRegistry::default();
        let mut traverser = Traverser::new(TraverserConfig::default(), STANDING);
        let mut events = EventQueue::new();

        traverser.request_transition(PRONING, &mut events);
        traverser.advance(0.1, &registry, &mut open_sky, &mut events);
        let before = traverser.current().height;

        traverser.request_transition(CROUCHING, &mut events);
        assert!(approx_eq(traverser.current().height, before));
        assert_eq!(traverser.state(), PoseState::Crouching);
        assert_eq!(traverser.previous().state, PoseState::Proning);
    }

    #[test]
    fn test_equal_height_retarget_blends_speed() {
        let registry = StateRegistry::default();
        let mut traverser = Traverser::new(TraverserConfig::default(), STANDING);
        let mut events = EventQueue::new();

        traverser.request_transition(SPRINTING, &mut events);
        assert_eq!(traverser.blend(), 0.0);
        traverser.advance(0.1, &registry, &mut open_sky, &mut events);
        assert!(approx_eq(traverser.current().speed, 3.5 + 3.5 * 0.35));
        assert!(approx_eq(traverser.current().height, 1.8));
    }

    #[test]
    fn test_reversal_at_start_settles_at_once() {
        let mut traverser = Traverser::new(TraverserConfig::default(), STANDING);
        let mut events = EventQueue::new();

        traverser.request_transition(CROUCHING, &mut events);
        traverser.request_transition(STANDING, &mut events);

        assert!(traverser.is_settled());
        assert!(matches!(
            events.iter().last(),
            Some(ControllerEvent::TransitionEnd {
                state: PoseState::Standing
            })
        ));
    }

    #[test]
    fn test_roof_redirects_growth_to_crouch() {
        let registry = StateRegistry::default();
        let mut traverser = Traverser::new(TraverserConfig::default(), PRONING);
        let mut events = EventQueue::new();
        // Ceiling at 1.0 m, seen once the head is within 0.15 m of it
        let mut low_roof = |envelope: &PoseStateData| (envelope.height >= 0.85).then_some(1.0);

        traverser.request_transition(STANDING, &mut events);
        for _ in 0..200 {
            traverser.advance(0.02, &registry, &mut low_roof, &mut events);
            assert!(traverser.current().height < 1.1);
        }

        assert!(traverser.is_settled());
        assert_eq!(traverser.state(), PoseState::Crouching);
        assert!(approx_eq(traverser.current().height, 1.0));
    }

    #[test]
    fn test_roof_with_no_fitting_state_holds_blend() {
        let registry = StateRegistry::default();
        let mut events = EventQueue::new();
        // Custom envelope lower than every fallback
        let low = PoseStateData::new(PoseState::Custom, 0.3, 0.2, 0.5);
        let mut traverser = Traverser::new(TraverserConfig::default(), low);
        traverser.request_transition(STANDING, &mut events);

        let mut crawlspace = |_: &PoseStateData| Some(0.35);
        traverser.advance(0.1, &registry, &mut crawlspace, &mut events);
        assert_eq!(traverser.blend(), 0.0);
        assert_eq!(traverser.state(), PoseState::Standing);
    }

    #[test]
    fn test_roof_too_low_for_crouch_falls_back_to_prone() {
        let registry = StateRegistry::default();
        let mut traverser = Traverser::new(TraverserConfig::default(), PRONING);
        let mut events = EventQueue::new();
        let mut low_roof = |envelope: &PoseStateData| (envelope.height >= 0.75).then_some(0.9);

        traverser.request_transition(STANDING, &mut events);
        for _ in 0..100 {
            traverser.advance(0.02, &registry, &mut low_roof, &mut events);
        }

        assert_eq!(traverser.state(), PoseState::Proning);
        assert!(approx_eq(traverser.current().height, 0.4));
    }

    #[test]
    fn test_roof_that_fits_target_does_not_redirect() {
        let registry = StateRegistry::default();
        let mut traverser = Traverser::new(TraverserConfig::default(), PRONING);
        let mut events = EventQueue::new();
        // Ceiling exactly at crouch height, in range for the whole blend
        let mut low_roof = |_: &PoseStateData| Some(1.0);

        traverser.request_transition(CROUCHING, &mut events);
        for _ in 0..100 {
            traverser.advance(0.02, &registry, &mut low_roof, &mut events);
        }

        assert!(traverser.is_settled());
        assert_eq!(traverser.state(), PoseState::Crouching);
        assert!(approx_eq(traverser.current().height, 1.0));
    }

    #[test]
    fn test_camera_mounts() {
        let traverser = Traverser::new(TraverserConfig::default(), STANDING);
        let mounts = traverser.camera_mounts();
        assert!(approx_eq(mounts.pivot.y, 0.85));
        assert!(approx_eq(mounts.camera.y, 0.85));
        assert!(approx_eq(mounts.eye_height(), 1.7));

        let prone = traverser.camera_mounts_for(&PRONING);
        assert!(approx_eq(prone.pivot.y, 0.15));
    }
}
