//! Error types for model inputs.

use folio_core::types::{CorrelationError, StatisticsError};
use thiserror::Error;

/// Invalid asset parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// No assets were supplied.
    #[error("At least one asset is required")]
    NoAssets,

    /// A per-asset vector does not have one entry per asset.
    #[error("Length mismatch for {name}: expected {expected}, got {got}")]
    LengthMismatch {
        /// Name of the offending input
        name: &'static str,
        /// Number of assets
        expected: usize,
        /// Provided length
        got: usize,
    },

    /// A volatility is negative.
    #[error("Volatility for asset {index} is negative: {value}")]
    NegativeVolatility {
        /// Asset index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// A drift or volatility is NaN or infinite.
    #[error("Non-finite {name} for asset {index}")]
    NonFinite {
        /// Name of the offending input
        name: &'static str,
        /// Asset index
        index: usize,
    },

    /// The correlation matrix is invalid or cannot be factorised.
    #[error(transparent)]
    Correlation(#[from] CorrelationError),
}

/// Invalid portfolio weights.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightsError {
    /// The weight vector is empty.
    #[error("Weight vector is empty")]
    Empty,

    /// A weight is NaN or infinite.
    #[error("Weight at index {index} is not finite")]
    NonFinite {
        /// Index of the offending weight
        index: usize,
    },

    /// Weights sum exactly to zero, or to a non-finite value.
    #[error("Weights sum to zero and cannot be normalised")]
    ZeroSum,
}

/// Errors from historical parameter estimation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimationError {
    /// Fewer observations than the estimator needs.
    #[error("Insufficient observations: got {got}, need at least {need}")]
    InsufficientObservations {
        /// Observations provided
        got: usize,
        /// Observations required
        need: usize,
    },

    /// An observation row has the wrong number of assets.
    #[error("Observation {row} has {got} values, expected {expected}")]
    RaggedObservations {
        /// Row index
        row: usize,
        /// Expected number of assets
        expected: usize,
        /// Provided number of values
        got: usize,
    },

    /// A price is not strictly positive, so no return can be formed.
    #[error("Price at row {row}, asset {asset} is not positive: {value}")]
    NonPositivePrice {
        /// Row index
        row: usize,
        /// Asset index
        asset: usize,
        /// Offending value
        value: f64,
    },

    /// An asset has constant returns, so its correlation is undefined.
    #[error("Asset {asset} has zero return variance")]
    ZeroVariance {
        /// Asset index
        asset: usize,
    },

    /// Underlying statistics failure.
    #[error(transparent)]
    Statistics(#[from] StatisticsError),

    /// Estimated parameters failed validation.
    #[error(transparent)]
    Parameters(#[from] ParameterError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::LengthMismatch {
            name: "sigma",
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "Length mismatch for sigma: expected 3, got 2");
    }

    #[test]
    fn test_correlation_error_is_transparent() {
        let err: ParameterError = CorrelationError::NotPositiveDefinite { index: 1 }.into();
        assert!(err.to_string().contains("not positive definite"));
    }
}
