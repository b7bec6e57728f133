//! Vantage Engine Library
//!
//! A first-person character controller driven by a rigid body. The library
//! does not own a physics engine or a renderer: each frame it reads input,
//! queries the world through [`physics::PhysicsWorld`], and hands back the
//! velocity, collider envelope and camera mounts for the host to apply.
//!
//! # Modules
//!
//! - [`player`] - The controller and its pipeline stages (pose, jump, velocity, look)
//! - [`probe`] - Ground and roof shape casts, landing records
//! - [`physics`] - The world seam, the character body, and a reference scene
//! - [`smoothing`] - Bounded and rate-limited scalar values
//! - [`input`] - Per-frame input and a keyboard adapter
//! - [`events`] - Event queue drained by the host after each step
//! - [`config`] - JSON configuration of every tunable
//!
//! # Example
//!
//! ```ignore
//! use vantage_engine::{FirstPersonController, InputFrame, SceneWorld};
//! use vantage_engine::physics::{ColliderDesc, Shape};
//!
//! let mut world = SceneWorld::new();
//! world.add_collider(ColliderDesc::new(Shape::floor(0.0)));
//!
//! let mut controller = FirstPersonController::default();
//! let dt = 1.0 / 60.0;
//!
//! let output = controller.step(dt, &InputFrame::moving(0.0, 1.0), &mut world);
//! let gravity = controller.gravity();
//! controller.body_mut().integrate(dt, gravity);
//!
//! for event in controller.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod physics;
pub mod player;
pub mod probe;
pub mod smoothing;

pub use config::ControllerConfig;
pub use error::{ConfigError, ControllerError};
pub use events::{ControllerEvent, EventQueue};
pub use input::{ControllerInput, InputFrame, KeyCode, KeyboardInput};
pub use physics::{CharacterBody, PhysicsWorld, SceneWorld};
pub use player::{FirstPersonController, FrameOutput, PoseState, PoseStateData};
