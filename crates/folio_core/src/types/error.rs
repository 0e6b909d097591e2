//! Error types for structured error handling.
//!
//! This module provides:
//! - `CorrelationError`: Errors from correlation matrix validation and factorisation
//! - `StatisticsError`: Errors from order statistics and sample moments

use thiserror::Error;

/// Correlation matrix errors.
///
/// Raised when a correlation matrix cannot be used to correlate random
/// draws. None of these are coerced into a "nearest valid" matrix.
///
/// # Examples
/// ```
/// use folio_core::types::CorrelationError;
///
/// let err = CorrelationError::NotSymmetric { i: 0, j: 1 };
/// assert_eq!(format!("{}", err), "Correlation matrix is not symmetric at (0, 1)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorrelationError {
    /// Matrix is not positive definite (Cholesky pivot at `index` is not positive).
    #[error("Correlation matrix is not positive definite (pivot {index})")]
    NotPositiveDefinite {
        /// Row at which factorisation failed
        index: usize,
    },

    /// Flat buffer length does not match `dim * dim`.
    #[error("Invalid matrix dimensions: expected {expected} elements, got {got}")]
    InvalidDimensions {
        /// Expected element count
        expected: usize,
        /// Provided element count
        got: usize,
    },

    /// Diagonal element differs from 1.0.
    #[error("Diagonal element at index {index} is {value}, expected 1.0")]
    InvalidDiagonal {
        /// Diagonal index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Matrix is not symmetric.
    #[error("Correlation matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
    },

    /// Off-diagonal value outside [-1, 1] or not finite.
    #[error("Correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
        /// Offending value
        value: f64,
    },

    /// A row of a nested matrix has the wrong length.
    #[error("Row {row} has {got} columns, expected {expected}")]
    RaggedRow {
        /// Row index
        row: usize,
        /// Expected column count
        expected: usize,
        /// Provided column count
        got: usize,
    },
}

/// Statistics errors.
///
/// # Examples
/// ```
/// use folio_core::types::StatisticsError;
///
/// let err = StatisticsError::InvalidQuantile(1.5);
/// assert!(format!("{}", err).contains("1.5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatisticsError {
    /// The sample has no observations.
    #[error("Sample is empty")]
    EmptySample,

    /// The sample has fewer observations than the statistic requires.
    #[error("Insufficient observations: got {got}, need at least {need}")]
    InsufficientData {
        /// Observations provided
        got: usize,
        /// Observations required
        need: usize,
    },

    /// Quantile outside [0, 1].
    #[error("Quantile {0} outside [0, 1]")]
    InvalidQuantile(f64),

    /// Paired samples have different lengths.
    #[error("Sample length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first sample
        left: usize,
        /// Length of the second sample
        right: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_error_display() {
        let err = CorrelationError::NotPositiveDefinite { index: 2 };
        assert!(err.to_string().contains("not positive definite"));

        let err = CorrelationError::InvalidDimensions {
            expected: 4,
            got: 3,
        };
        assert!(err.to_string().contains("expected 4 elements, got 3"));
    }

    #[test]
    fn test_statistics_error_display() {
        assert_eq!(StatisticsError::EmptySample.to_string(), "Sample is empty");
        let err = StatisticsError::LengthMismatch { left: 3, right: 4 };
        assert!(err.to_string().contains("3 vs 4"));
    }
}
