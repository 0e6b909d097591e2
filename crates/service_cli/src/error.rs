//! CLI error types

use adapter_loader::LoaderError;
use folio_risk::RunError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Merged settings rejected by the path engine
    #[error("Invalid simulation configuration: {0}")]
    Engine(#[from] folio_engine::mc::ConfigError),

    /// Price history could not be loaded
    #[error("Price history error: {0}")]
    Loader(#[from] LoaderError),

    /// Simulation or risk computation failed
    #[error("Simulation failed: {0}")]
    Run(#[from] RunError),

    /// Invalid command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
