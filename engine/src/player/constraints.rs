//! What the player is currently allowed to do.

use serde::{Deserialize, Serialize};

/// Ability toggles, each gated by the master `control` switch.
///
/// Turning `control` off freezes every ability without losing the individual
/// settings, e.g. during cutscenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    control: bool,
    movement: bool,
    jump: bool,
    jump_from_air: bool,
    sprint: bool,
    crouch: bool,
    prone: bool,
    look: bool,
    lean: bool,
    head_bob: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            control: true,
            movement: true,
            jump: true,
            jump_from_air: false,
            sprint: true,
            crouch: true,
            prone: true,
            look: true,
            lean: true,
            head_bob: true,
        }
    }
}

impl Constraints {
    /// Everything allowed except jumping from the air.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control(&self) -> bool {
        self.control
    }

    pub fn set_control(&mut self, value: bool) {
        self.control = value;
    }

    pub fn movement(&self) -> bool {
        self.control && self.movement
    }

    pub fn set_movement(&mut self, value: bool) {
        self.movement = value;
    }

    pub fn jump(&self) -> bool {
        self.control && self.jump
    }

    pub fn set_jump(&mut self, value: bool) {
        self.jump = value;
    }

    /// First jump may start while already airborne.
    pub fn jump_from_air(&self) -> bool {
        self.control && self.jump_from_air
    }

    pub fn set_jump_from_air(&mut self, value: bool) {
        self.jump_from_air = value;
    }

    pub fn sprint(&self) -> bool {
        self.control && self.sprint
    }

    pub fn set_sprint(&mut self, value: bool) {
        self.sprint = value;
    }

    pub fn crouch(&self) -> bool {
        self.control && self.crouch
    }

    pub fn set_crouch(&mut self, value: bool) {
        self.crouch = value;
    }

    pub fn prone(&self) -> bool {
        self.control && self.prone
    }

    pub fn set_prone(&mut self, value: bool) {
        self.prone = value;
    }

    pub fn look(&self) -> bool {
        self.control && self.look
    }

    pub fn set_look(&mut self, value: bool) {
        self.look = value;
    }

    pub fn lean(&self) -> bool {
        self.control && self.lean
    }

    pub fn set_lean(&mut self, value: bool) {
        self.lean = value;
    }

    pub fn head_bob(&self) -> bool {
        self.control && self.head_bob
    }

    pub fn set_head_bob(&mut self, value: bool) {
        self.head_bob = value;
    }
}
