//! # folio_core: Numerical Foundation for the Folio Risk Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! folio_core is the bottom layer of the workspace and provides:
//! - Correlation matrices and their Cholesky factors (`math::correlation`)
//! - Order statistics and sample moments (`math::statistics`)
//! - Generic floating-point trait re-export (`traits::Float`)
//! - Error types: `CorrelationError`, `StatisticsError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other folio_* crates, with minimal external
//! dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use folio_core::math::correlation::CorrelationMatrix;
//! use folio_core::math::statistics::percentile;
//!
//! let corr = CorrelationMatrix::new(&[1.0_f64, 0.5, 0.5, 1.0], 2).unwrap();
//! let factor = corr.cholesky().unwrap();
//! let w = factor.transform(&[1.0, 1.0]);
//! assert!((w[0] - 1.0).abs() < 1e-12);
//!
//! let p = percentile(&[-0.2, -0.1, 0.0, 0.1, 0.2], 0.2).unwrap();
//! assert!((p + 0.12).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
