//! Loader error types.

use std::path::PathBuf;

use folio_models::EstimationError;
use thiserror::Error;

/// Errors raised while loading a price history.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// File could not be opened or read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row has no price columns.
    #[error("Header must contain a date column followed by at least one ticker")]
    EmptyHeader,

    /// Date cell could not be parsed.
    #[error("Invalid date '{value}' on line {line}")]
    InvalidDate {
        /// 1-based line number
        line: u64,
        /// Cell contents
        value: String,
    },

    /// Requested ticker is not a column of the file.
    #[error("Ticker '{0}' not found in price history")]
    MissingTicker(String),

    /// Number of dates differs from the number of price rows.
    #[error("History has {dates} dates but {rows} price rows")]
    LengthMismatch {
        /// Number of dates
        dates: usize,
        /// Number of price rows
        rows: usize,
    },

    /// Price row length differs from the ticker count.
    #[error("Price row {row} has {got} values, expected {expected}")]
    RaggedRow {
        /// Row index
        row: usize,
        /// Number of tickers
        expected: usize,
        /// Row length
        got: usize,
    },

    /// Fewer complete rows than required.
    #[error("Price history has {got} complete rows, need at least {need}")]
    InsufficientRows {
        /// Rows kept
        got: usize,
        /// Rows required
        need: usize,
    },

    /// Parameter estimation from the history failed.
    #[error("Estimation failed: {0}")]
    Estimation(#[from] EstimationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            LoaderError::MissingTicker("SPY".to_string()).to_string(),
            "Ticker 'SPY' not found in price history"
        );
        assert_eq!(
            LoaderError::InsufficientRows { got: 1, need: 3 }.to_string(),
            "Price history has 1 complete rows, need at least 3"
        );
    }
}
