//! Pose states and their collider/speed data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ControllerError};
use crate::smoothing::lerp;

/// Discrete body posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PoseState {
    #[default]
    #[serde(alias = "Walking")]
    Standing,
    Sprinting,
    Crouching,
    Proning,
    /// Game-defined posture whose data can be replaced at runtime
    Custom,
}

impl PoseState {
    pub const ALL: [PoseState; 5] = [
        PoseState::Standing,
        PoseState::Sprinting,
        PoseState::Crouching,
        PoseState::Proning,
        PoseState::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PoseState::Standing => "Standing",
            PoseState::Sprinting => "Sprinting",
            PoseState::Crouching => "Crouching",
            PoseState::Proning => "Proning",
            PoseState::Custom => "Custom",
        }
    }
}

impl fmt::Display for PoseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Collider envelope and target speed of a posture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseStateData {
    pub state: PoseState,
    /// Collider height (m)
    pub height: f32,
    /// Collider radius (m)
    pub radius: f32,
    /// Target movement speed (m/s)
    pub speed: f32,
}

impl PoseStateData {
    pub const fn new(state: PoseState, height: f32, radius: f32, speed: f32) -> Self {
        Self {
            state,
            height,
            radius,
            speed,
        }
    }

    /// Component-wise interpolation. The result carries `to.state`.
    pub fn lerp(&self, to: &PoseStateData, t: f32) -> PoseStateData {
        PoseStateData {
            state: to.state,
            height: lerp(self.height, to.height, t),
            radius: lerp(self.radius, to.radius, t),
            speed: lerp(self.speed, to.speed, t),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidPose {
                    state: self.state,
                    field,
                    value,
                })
            }
        };
        positive("height", self.height)?;
        positive("radius", self.radius)?;
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::InvalidPose {
                state: self.state,
                field: "speed",
                value: self.speed,
            });
        }
        Ok(())
    }
}

pub const STANDING: PoseStateData = PoseStateData::new(PoseState::Standing, 1.8, 0.35, 3.5);
pub const SPRINTING: PoseStateData = PoseStateData::new(PoseState::Sprinting, 1.8, 0.35, 7.0);
pub const CROUCHING: PoseStateData = PoseStateData::new(PoseState::Crouching, 1.0, 0.35, 1.0);
pub const PRONING: PoseStateData = PoseStateData::new(PoseState::Proning, 0.4, 0.2, 0.5);

/// Maps each [`PoseState`] to its data. Custom starts undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateRegistry {
    pub standing: PoseStateData,
    pub sprinting: PoseStateData,
    pub crouching: PoseStateData,
    pub proning: PoseStateData,
    pub custom: Option<PoseStateData>,
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self {
            standing: STANDING,
            sprinting: SPRINTING,
            crouching: CROUCHING,
            proning: PRONING,
            custom: None,
        }
    }
}

impl StateRegistry {
    /// Data for `state`.
    ///
    /// # Panics
    ///
    /// If `state` has no data registered. Only [`PoseState::Custom`] can be
    /// undefined; requesting it before [`StateRegistry::set_custom`] is a bug
    /// in the caller.
    pub fn get(&self, state: PoseState) -> PoseStateData {
        match self.try_get(state) {
            Ok(data) => data,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_get(&self, state: PoseState) -> Result<PoseStateData, ControllerError> {
        let data = match state {
            PoseState::Standing => Some(self.standing),
            PoseState::Sprinting => Some(self.sprinting),
            PoseState::Crouching => Some(self.crouching),
            PoseState::Proning => Some(self.proning),
            PoseState::Custom => self.custom,
        };
        // The slot decides the state, whatever the stored tag says
        data.map(|d| PoseStateData { state, ..d })
            .ok_or(ControllerError::UndefinedState(state))
    }

    pub fn is_defined(&self, state: PoseState) -> bool {
        self.try_get(state).is_ok()
    }

    /// Replace the data of `data.state`.
    pub fn set(&mut self, data: PoseStateData) {
        match data.state {
            PoseState::Standing => self.standing = data,
            PoseState::Sprinting => self.sprinting = data,
            PoseState::Crouching => self.crouching = data,
            PoseState::Proning => self.proning = data,
            PoseState::Custom => self.custom = Some(data),
        }
    }

    pub fn set_custom(&mut self, height: f32, radius: f32, speed: f32) {
        self.custom = Some(PoseStateData::new(PoseState::Custom, height, radius, speed));
    }

    pub fn clear_custom(&mut self) {
        self.custom = None;
    }

    /// Every defined entry.
    pub fn iter(&self) -> impl Iterator<Item = PoseStateData> + '_ {
        PoseState::ALL.into_iter().filter_map(|s| self.try_get(s).ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.iter().try_for_each(|data| data.validate())
    }
}
