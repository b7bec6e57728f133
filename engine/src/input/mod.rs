//! Input Module
//!
//! The controller reads one snapshot of player intent at the top of every
//! step through [`ControllerInput`]. How the snapshot is produced (keyboard,
//! gamepad, network replay, AI) is up to the host.
//!
//! # Example
//!
//! ```rust,ignore
//! use vantage_engine::input::{KeyCode, KeyboardInput};
//!
//! let mut keyboard = KeyboardInput::new();
//! keyboard.handle_key(KeyCode::W, true);
//! keyboard.handle_key(KeyCode::Space, true);
//!
//! let frame = keyboard.next_frame();
//! assert!(frame.jump);
//! // Still held, but no longer a fresh press
//! assert!(!keyboard.next_frame().jump);
//! ```

pub mod keyboard;

pub use keyboard::{KeyCode, KeyboardInput};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Player intent for one step.
///
/// `crouch`, `prone` and `jump` are presses (true on the frame the button
/// went down). `sprint` is the held level.
pub trait ControllerInput {
    /// x = strafe (right positive), y = walk (forward positive), each in `[-1, 1]`
    fn movement_axis(&self) -> Vec2;
    /// Look delta: x = yaw, y = pitch (up positive)
    fn look_axis(&self) -> Vec2;
    fn sprint(&self) -> bool;
    fn crouch(&self) -> bool;
    fn prone(&self) -> bool;
    fn jump(&self) -> bool;
    /// -1 lean left, 1 lean right, 0 upright
    fn lean(&self) -> f32;
}

/// Plain-data input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFrame {
    pub movement: Vec2,
    pub look: Vec2,
    pub sprint: bool,
    pub crouch: bool,
    pub prone: bool,
    pub jump: bool,
    pub lean: f32,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Walk along the local axes (x strafe, y forward).
    pub fn moving(x: f32, y: f32) -> Self {
        Self {
            movement: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_sprint(mut self) -> Self {
        self.sprint = true;
        self
    }

    pub fn with_crouch(mut self) -> Self {
        self.crouch = true;
        self
    }

    pub fn with_prone(mut self) -> Self {
        self.prone = true;
        self
    }

    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    pub fn with_look(mut self, x: f32, y: f32) -> Self {
        self.look = Vec2::new(x, y);
        self
    }
}

impl ControllerInput for InputFrame {
    fn movement_axis(&self) -> Vec2 {
        self.movement
    }

    fn look_axis(&self) -> Vec2 {
        self.look
    }

    fn sprint(&self) -> bool {
        self.sprint
    }

    fn crouch(&self) -> bool {
        self.crouch
    }

    fn prone(&self) -> bool {
        self.prone
    }

    fn jump(&self) -> bool {
        self.jump
    }

    fn lean(&self) -> f32 {
        self.lean
    }
}
