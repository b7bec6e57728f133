//! Error types

use thiserror::Error;

use crate::player::pose::PoseState;

/// Rejected controller configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{state} pose has invalid {field}: {value} (must be finite and positive)")]
    InvalidPose {
        state: PoseState,
        field: &'static str,
        value: f32,
    },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} = {value} must be a finite, non-negative rate")]
    NegativeRate { field: &'static str, value: f32 },
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("no pose data registered for state {0}")]
    UndefinedState(PoseState),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = ControllerError> = std::result::Result<T, E>;

pub(crate) fn check_rate(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeRate { field, value })
    }
}

pub(crate) fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}
