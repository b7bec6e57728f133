//! Probe Module
//!
//! Directional sphere casts from the character body. One algorithm, two
//! uses: the ground probe looks down from the feet, the roof probe looks up
//! from the top of the collider.
//!
//! # Components
//!
//! - [`CollisionProbe`] - The shared cast with its near-field range filter
//! - [`GroundProbe`] - Grounded state, slope, directional slope, landings
//! - [`RoofProbe`] - Overhead obstruction checks
//! - [`LandingRecord`] - Where a flight started, fell from and ended

pub mod cast;
pub mod ground;
pub mod landing;
pub mod roof;

pub use cast::{AttachedBody, CollisionProbe, ProbeConfig, ProbeDirection, ProbeFrame, ProbeResult};
pub use ground::{GroundProbe, GroundProbeConfig};
pub use landing::LandingRecord;
pub use roof::RoofProbe;
