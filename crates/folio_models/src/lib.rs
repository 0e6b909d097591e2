//! # Folio Models (L2: Business Logic)
//!
//! Model inputs for the correlated Monte Carlo portfolio engine.
//!
//! This crate provides:
//! - [`AssetParameters`]: validated drift, volatility and correlation per asset
//! - [`MarketScenario`]: named market regimes adjusting drift and volatility
//! - [`PortfolioWeights`]: target weights and their normalisation
//! - [`estimation`]: annualised sample mean/volatility and correlation from history
//!
//! ## Example
//!
//! ```
//! use folio_models::{AssetParameters, MarketScenario, PortfolioWeights};
//!
//! let params = AssetParameters::from_rows(
//!     vec![0.07, 0.10],
//!     vec![0.15, 0.30],
//!     &[vec![1.0, 0.4], vec![0.4, 1.0]],
//! )
//! .unwrap();
//!
//! let stressed = MarketScenario::from_name("BEAR").apply(&params);
//! assert!((stressed.mu()[0] - (0.07 - 0.15)).abs() < 1e-12);
//!
//! let weights = PortfolioWeights::new(vec![3.0, 1.0]).unwrap();
//! assert_eq!(weights.normalized().unwrap().as_slice(), &[0.75, 0.25]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod estimation;
pub mod params;
pub mod scenarios;
pub mod weights;

pub use error::{EstimationError, ParameterError, WeightsError};
pub use params::AssetParameters;
pub use scenarios::{adjust, MarketScenario};
pub use weights::{normalize_weights, PortfolioWeights};
