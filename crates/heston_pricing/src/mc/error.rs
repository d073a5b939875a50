//! Error types for the Monte Carlo engine.

use heston_models::params::HestonError;
use thiserror::Error;

/// Configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Path count outside `[1, MAX_PATHS]`.
    #[error("invalid path count {0}: must be in [1, {max}]", max = super::MAX_PATHS)]
    InvalidPathCount(usize),

    /// Step count outside `[1, MAX_STEPS]`.
    #[error("invalid step count {0}: must be in [1, {max}]", max = super::MAX_STEPS)]
    InvalidStepCount(usize),

    /// A required builder field was not set.
    #[error("missing configuration field: {0}")]
    MissingField(&'static str),
}

/// Failures from a simulation call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum McError {
    /// The simulation configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Model, market or contract inputs failed validation; raised before
    /// any paths are generated.
    #[error(transparent)]
    InvalidInput(#[from] HestonError),
}
