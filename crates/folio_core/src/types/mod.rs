//! Shared types for the foundation layer.
//!
//! This module provides:
//! - `error`: Structured error types for correlation and statistics operations
//!
//! # Re-exports
//!
//! [`CorrelationError`] and [`StatisticsError`] are re-exported at module level.

pub mod error;

pub use error::{CorrelationError, StatisticsError};
