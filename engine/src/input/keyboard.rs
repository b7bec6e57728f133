//! Keyboard Input Module
//!
//! Turns key press/release events into [`InputFrame`] snapshots.
//! Decoupled from any windowing system: hosts map their key events to
//! [`KeyCode`].

use glam::Vec2;

use super::InputFrame;

/// Keys the controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    Q,
    E,
    C,
    Z,
    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Which keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKeys {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    lean_left: bool,
    lean_right: bool,
    sprint: bool,
    crouch: bool,
    prone: bool,
    jump: bool,
}

/// Keyboard and mouse-delta state producing one [`InputFrame`] per step.
///
/// Crouch (C / Ctrl), prone (Z) and jump (Space) are reported as presses:
/// true only in the first frame after the key went down.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    held: HeldKeys,
    last_frame: HeldKeys,
    look: Vec2,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update state for a key press or release.
    ///
    /// Returns `true` if the key was handled.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let slot = match key {
            KeyCode::W => &mut self.held.forward,
            KeyCode::S => &mut self.held.backward,
            KeyCode::A => &mut self.held.left,
            KeyCode::D => &mut self.held.right,
            KeyCode::Q => &mut self.held.lean_left,
            KeyCode::E => &mut self.held.lean_right,
            KeyCode::C | KeyCode::ControlLeft | KeyCode::ControlRight => &mut self.held.crouch,
            KeyCode::Z => &mut self.held.prone,
            KeyCode::Space => &mut self.held.jump,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => &mut self.held.sprint,
            KeyCode::Unknown => return false,
        };
        *slot = pressed;
        true
    }

    /// Accumulate a mouse movement delta (already scaled to look units).
    pub fn add_look(&mut self, dx: f32, dy: f32) {
        self.look += Vec2::new(dx, dy);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for this step. Clears the look delta and press edges.
    pub fn next_frame(&mut self) -> InputFrame {
        let held = self.held;
        let pressed = |now: bool, before: bool| now && !before;

        let axis = |pos: bool, neg: bool| (pos as i32 - neg as i32) as f32;
        let frame = InputFrame {
            movement: Vec2::new(
                axis(held.right, held.left),
                axis(held.forward, held.backward),
            ),
            look: self.look,
            sprint: held.sprint,
            crouch: pressed(held.crouch, self.last_frame.crouch),
            prone: pressed(held.prone, self.last_frame.prone),
            jump: pressed(held.jump, self.last_frame.jump),
            lean: axis(held.lean_right, held.lean_left),
        };

        self.last_frame = held;
        self.look = Vec2::ZERO;
        frame
    }
}
