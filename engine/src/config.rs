//! Controller configuration
//!
//! Every tunable of the controller in one serde document. Missing fields fall
//! back to their defaults, so a config file only needs to list what it
//! changes:
//!
//! ```json
//! {
//!     "sprint_mode": "Toggle",
//!     "jump": { "max_count": 2 },
//!     "states": { "crouching": { "state": "Crouching", "height": 1.1, "radius": 0.35, "speed": 1.5 } }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ControllerError, check_range, check_rate};
use crate::player::constraints::Constraints;
use crate::player::footsteps::FootstepConfig;
use crate::player::jump::JumpConfig;
use crate::player::look::LookConfig;
use crate::player::movement::MovementConfig;
use crate::player::pose::{PoseState, StateRegistry};
use crate::player::states::ButtonInputMode;
use crate::player::traverser::TraverserConfig;
use crate::probe::{GroundProbeConfig, ProbeConfig};

/// Standard gravity (m/s²)
pub const DEFAULT_GRAVITY: f32 = 9.81;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub states: StateRegistry,
    pub initial_state: PoseState,
    pub sprint_mode: ButtonInputMode,
    pub traverser: TraverserConfig,
    pub movement: MovementConfig,
    pub jump: JumpConfig,
    pub ground: GroundProbeConfig,
    pub roof: ProbeConfig,
    pub look: LookConfig,
    pub footsteps: FootstepConfig,
    pub constraints: Constraints,
    /// Magnitude of world gravity along -Y (m/s²)
    pub gravity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            states: StateRegistry::default(),
            initial_state: PoseState::Standing,
            sprint_mode: ButtonInputMode::Hold,
            traverser: TraverserConfig::default(),
            movement: MovementConfig::default(),
            jump: JumpConfig::default(),
            ground: GroundProbeConfig::default(),
            roof: ProbeConfig::default(),
            look: LookConfig::default(),
            footsteps: FootstepConfig::default(),
            constraints: Constraints::default(),
            gravity: DEFAULT_GRAVITY,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ControllerError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        self.states.validate()?;
        self.states.try_get(self.initial_state)?;

        check_rate("traverser.blend_rate", self.traverser.blend_rate)?;
        check_range("traverser.pivot_scale", self.traverser.pivot_scale, 0.0, 1.0)?;

        check_rate("movement.walk_smoothing", self.movement.walk_smoothing)?;
        check_rate("movement.strafe_smoothing", self.movement.strafe_smoothing)?;
        check_rate("movement.gravity_multiplier", self.movement.gravity_multiplier)?;
        check_range("movement.air_control", self.movement.air_control, 0.0, 1.0)?;
        check_rate("movement.air_deceleration", self.movement.air_deceleration)?;

        check_rate("jump.power_max", self.jump.power_max)?;
        check_rate("jump.power_decay", self.jump.power_decay)?;
        check_rate("jump.push_down", self.jump.push_down)?;

        validate_probe(&self.ground.probe)?;
        check_range("ground.max_slope", self.ground.max_slope, 0.0, 90.0)?;
        check_rate("ground.min_fall_distance", self.ground.min_fall_distance)?;
        validate_probe(&self.roof)?;

        check_rate("look.sensitivity", self.look.sensitivity)?;
        check_rate("look.smoothing", self.look.smoothing)?;
        check_range("look.range_up", self.look.range_up, 0.0, 90.0)?;
        check_range("look.range_down", self.look.range_down, 0.0, 90.0)?;

        for state in PoseState::ALL {
            check_rate("footsteps", self.footsteps.interval(state))?;
        }

        check_rate("gravity", self.gravity)?;
        Ok(())
    }
}

fn validate_probe(probe: &ProbeConfig) -> Result<(), ConfigError> {
    check_rate("probe.check_range", probe.check_range)?;
    check_rate("probe.start_offset", probe.start_offset)?;
    check_range("probe.radius_scale", probe.radius_scale, 0.0, 1.0)
}
