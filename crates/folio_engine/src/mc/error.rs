//! Error types for the path engine.
//!
//! - [`ConfigError`]: invalid simulation configuration, raised at build time
//! - [`SimulationError`]: any failure of [`simulate`](super::simulate)

use std::fmt;

use folio_models::ParameterError;
use thiserror::Error;

use super::config::{MAX_PATHS, MAX_STEPS};

/// Configuration error for the path engine.
///
/// These errors occur during construction when invalid parameters are
/// provided, before any simulation work is done.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Path count outside valid range [1, MAX_PATHS].
    InvalidPathCount(usize),
    /// Step count outside valid range [1, MAX_STEPS].
    InvalidStepCount(usize),
    /// Time increment not strictly positive and finite.
    InvalidTimeStep(f64),
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPathCount(count) => {
                write!(
                    f,
                    "Invalid path count {}: must be in range [1, {}]",
                    count, MAX_PATHS
                )
            }
            Self::InvalidStepCount(count) => {
                write!(
                    f,
                    "Invalid step count {}: must be in range [1, {}]",
                    count, MAX_STEPS
                )
            }
            Self::InvalidTimeStep(dt) => {
                write!(f, "Invalid time step {}: must be positive and finite", dt)
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure of a path simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Invalid simulation configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid drift, volatility or correlation input.
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    /// Initial price vector does not have one price per asset.
    #[error("Initial price vector has {got} entries, expected {expected}")]
    InitialPriceLength {
        /// Number of assets
        expected: usize,
        /// Provided length
        got: usize,
    },

    /// Initial price not strictly positive and finite.
    #[error("Initial price for asset {index} must be positive and finite, got {value}")]
    InvalidInitialPrice {
        /// Asset index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Flat buffer does not match the declared ensemble shape.
    #[error("Ensemble buffer has {got} values, expected {expected}")]
    ShapeMismatch {
        /// Expected number of values
        expected: usize,
        /// Provided number of values
        got: usize,
    },

    /// Ensemble dimensions are degenerate (no time points or no assets).
    #[error("Invalid ensemble dimension '{name}': {value}")]
    InvalidDimension {
        /// Dimension name
        name: &'static str,
        /// Offending value
        value: usize,
    },
}
