//! Input-driven pose requests
//!
//! Decides, once per frame, which pose the player asked for. Requests are
//! evaluated in priority order sprint > crouch > prone and only the first
//! one that acts is applied.

use serde::{Deserialize, Serialize};

use super::constraints::Constraints;
use super::pose::{PoseState, StateRegistry};
use super::traverser::Traverser;
use crate::events::EventQueue;

/// How a button maps to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonInputMode {
    /// Active while held
    #[default]
    Hold,
    /// Each press flips the state
    Toggle,
}

/// Pose intents of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoseIntents {
    /// Held level
    pub sprint: bool,
    /// Press edge
    pub crouch: bool,
    /// Press edge
    pub prone: bool,
}

#[derive(Debug, Clone, Default)]
pub struct StatesModule {
    sprint_mode: ButtonInputMode,
    /// Set while the toggle button stays down after it fired
    sprint_lock: bool,
}

impl StatesModule {
    pub fn new(sprint_mode: ButtonInputMode) -> Self {
        Self {
            sprint_mode,
            sprint_lock: false,
        }
    }

    pub fn sprint_mode(&self) -> ButtonInputMode {
        self.sprint_mode
    }

    pub fn set_sprint_mode(&mut self, mode: ButtonInputMode) {
        self.sprint_mode = mode;
        self.sprint_lock = false;
    }

    /// Apply this frame's intents. Returns the state that was requested, if any.
    pub fn process(
        &mut self,
        intents: PoseIntents,
        grounded: bool,
        constraints: &Constraints,
        traverser: &mut Traverser,
        registry: &StateRegistry,
        events: &mut EventQueue,
    ) -> Option<PoseState> {
        let state = traverser.state();

        let request = self
            .sprint_request(intents.sprint, state, grounded, constraints)
            .or_else(|| toggle_request(intents.crouch, constraints.crouch(), PoseState::Crouching, state))
            .or_else(|| toggle_request(intents.prone, constraints.prone(), PoseState::Proning, state))?;

        traverser.go_to(request, registry, events);
        Some(request)
    }

    fn sprint_request(
        &mut self,
        held: bool,
        state: PoseState,
        grounded: bool,
        constraints: &Constraints,
    ) -> Option<PoseState> {
        let sprinting = state == PoseState::Sprinting;

        match self.sprint_mode {
            ButtonInputMode::Hold => {
                if held && constraints.sprint() {
                    (!sprinting && grounded).then_some(PoseState::Sprinting)
                } else {
                    sprinting.then_some(PoseState::Standing)
                }
            }
            ButtonInputMode::Toggle => {
                if !held {
                    self.sprint_lock = false;
                } else if !self.sprint_lock {
                    self.sprint_lock = true;
                    if sprinting {
                        return Some(PoseState::Standing);
                    }
                    if constraints.sprint() {
                        return Some(PoseState::Sprinting);
                    }
                }

                (sprinting && !constraints.sprint()).then_some(PoseState::Standing)
            }
        }
    }
}

/// Press to enter `target`, press again to stand up.
///
/// `allowed` only gates entering; leaving is always possible.
fn toggle_request(pressed: bool, allowed: bool, target: PoseState, state: PoseState) -> Option<PoseState> {
    if !pressed {
        return None;
    }
    if state == target {
        Some(PoseState::Standing)
    } else {
        allowed.then_some(target)
    }
}
