//! Player Module
//!
//! The character controller and its stages.
//!
//! # Components
//!
//! - [`FirstPersonController`] - Runs the per-frame pipeline and owns all state
//! - [`Traverser`] - Pose blending with the overhead veto
//!   - [`StateRegistry`] maps each [`PoseState`] to its [`PoseStateData`]
//! - [`StatesModule`] - Sprint/crouch/prone requests from input
//! - [`JumpController`] - Jump count, decaying power, platform push-down
//! - [`VelocitySolver`] - Ground and air velocity
//! - [`LookController`] - Body yaw and camera pitch
//! - [`FootstepTimer`] - Footstep cues while walking
//! - [`Constraints`] - What the player may currently do

pub mod constraints;
pub mod controller;
pub mod footsteps;
pub mod jump;
pub mod look;
pub mod movement;
pub mod pose;
pub mod states;
pub mod traverser;

pub use constraints::Constraints;
pub use controller::{FirstPersonController, FrameOutput, MAX_STEP};
pub use footsteps::{FootstepConfig, FootstepCue, FootstepTimer};
pub use jump::{JumpConfig, JumpController, JumpPhase};
pub use look::{LookConfig, LookController};
pub use movement::{MovementConfig, MovementFrame, MovementMode, SpeedData, VelocitySolver};
pub use pose::{PoseState, PoseStateData, StateRegistry};
pub use states::{ButtonInputMode, PoseIntents, StatesModule};
pub use traverser::{CameraMounts, OverheadCheck, Traverser, TraverserConfig};
