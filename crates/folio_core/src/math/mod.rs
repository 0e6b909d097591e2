//! Mathematical building blocks.
//!
//! - [`correlation`]: correlation matrix validation and Cholesky factorisation
//! - [`statistics`]: interpolated percentiles, sample moments, Pearson correlation

pub mod correlation;
pub mod statistics;

pub use correlation::{CholeskyFactor, CorrelationMatrix};
