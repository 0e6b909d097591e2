//! Risk error types.
//!
//! Structured error types for valuation, risk metrics and orchestration
//! using `thiserror` for derivation.

use folio_core::types::StatisticsError;
use folio_engine::mc::SimulationError;
use folio_models::WeightsError;
use thiserror::Error;

/// Errors raised by valuation and risk metrics.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskError {
    /// Ensemble holds no paths.
    #[error("Ensemble is empty")]
    EmptyEnsemble,

    /// Tail level outside [0, 1].
    #[error("Invalid tail level {0}: must be in [0, 1]")]
    InvalidLevel(f64),

    /// Path starts at a value that cannot be used as a return base.
    #[error("Path {path} has non-positive initial value {value}")]
    NonPositiveInitialValue {
        /// Path index
        path: usize,
        /// Initial value
        value: f64,
    },

    /// Price that cannot be compounded through.
    #[error("Non-positive price {value} at path {path}, step {step}, asset {asset}")]
    NonPositivePrice {
        /// Path index
        path: usize,
        /// Time index
        step: usize,
        /// Asset index
        asset: usize,
        /// Offending price
        value: f64,
    },

    /// Rebalance interval of zero steps.
    #[error("Invalid rebalance step {0}: must be at least 1")]
    InvalidRebalanceStep(usize),

    /// Weight vector length differs from the number of assets.
    #[error("Expected {expected} weights, got {got}")]
    DimensionMismatch {
        /// Number of assets
        expected: usize,
        /// Number of weights supplied
        got: usize,
    },

    /// Value buffer does not match the declared ensemble shape.
    #[error("Value buffer has {got} entries, expected {expected}")]
    ShapeMismatch {
        /// Expected length
        expected: usize,
        /// Provided length
        got: usize,
    },

    /// Weights cannot be normalised.
    #[error(transparent)]
    Weights(#[from] WeightsError),

    /// Sample statistic failure.
    #[error(transparent)]
    Statistics(#[from] StatisticsError),
}

/// Errors raised by a full simulation run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RunError {
    /// Path simulation failed.
    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    /// Valuation or risk metrics failed.
    #[error("Risk calculation failed: {0}")]
    Risk(#[from] RiskError),

    /// Weights rejected before simulation.
    #[error("Invalid weights: {0}")]
    Weights(#[from] WeightsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RiskError::EmptyEnsemble.to_string(), "Ensemble is empty");
        assert_eq!(
            RiskError::InvalidRebalanceStep(0).to_string(),
            "Invalid rebalance step 0: must be at least 1"
        );
        assert_eq!(
            RiskError::DimensionMismatch {
                expected: 3,
                got: 2
            }
            .to_string(),
            "Expected 3 weights, got 2"
        );
    }

    #[test]
    fn test_run_error_wraps_sources() {
        let err: RunError = RiskError::EmptyEnsemble.into();
        assert_eq!(err.to_string(), "Risk calculation failed: Ensemble is empty");

        let err: RunError = WeightsError::ZeroSum.into();
        assert!(err.to_string().starts_with("Invalid weights"));
    }
}
