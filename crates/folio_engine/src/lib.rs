//! # folio_engine: Correlated Monte Carlo Path Engine (Layer 3)
//!
//! Simulates ensembles of correlated multi-asset price paths under
//! Geometric Brownian Motion.
//!
//! ## Modules
//!
//! - [`rng`]: seeded random number generation with per-path substreams
//! - [`mc`]: simulation configuration, workspace buffers, path generation and
//!   the [`PathEnsemble`](mc::PathEnsemble) container
//!
//! ## Reproducibility
//!
//! Every path draws from its own substream derived from the run seed and the
//! path index. Paths are simulated in rayon batches, but because no path
//! shares a generator with another, the output is bit-identical for any
//! batch size or thread count.
//!
//! ## Example
//!
//! ```rust
//! use folio_engine::mc::{simulate, SimulationConfig};
//! use folio_models::AssetParameters;
//!
//! let params = AssetParameters::from_rows(
//!     vec![0.05, 0.08],
//!     vec![0.2, 0.3],
//!     &[vec![1.0, 0.5], vec![0.5, 1.0]],
//! )
//! .unwrap();
//!
//! let config = SimulationConfig::builder()
//!     .n_paths(100)
//!     .n_steps(252)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let paths = simulate(&params, &[100.0, 50.0], &config).unwrap();
//! assert_eq!(paths.shape(), (100, 253, 2));
//! assert_eq!(paths.price(0, 0, 1), 50.0);
//! ```

#![warn(missing_docs)]

pub mod mc;
pub mod rng;
