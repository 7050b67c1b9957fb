use thiserror::Error;

use crate::resolver::preset::Label;

/// Errors raised while building a resolver from configuration and presets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("preset {label}: radius must be finite and positive, got {radius}")]
    InvalidRadius { label: Label, radius: f64 },

    #[error("preset {label}: invalid angle weights {weights:?}")]
    InvalidAngleWeights { label: Label, weights: [f64; 3] },

    #[error("preset {label}: canonical triangle is degenerate")]
    DegeneratePreset { label: Label },

    #[error("duplicate preset label {0}")]
    DuplicateLabel(Label),

    #[error("invalid circumradius range [{min}, {max}]")]
    InvalidCircumradiusRange { min: f64, max: f64 },

    #[error("{name} must be finite and positive, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("analyze cycle frame interval must be at least 1")]
    ZeroCycleInterval,

    #[error("min points must be at least 1")]
    ZeroMinPoints,
}
