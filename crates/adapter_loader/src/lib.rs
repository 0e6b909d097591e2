//! # adapter_loader (Adapter Layer)
//!
//! Reads daily price histories from CSV files and turns them into model
//! inputs for the simulation engine.
//!
//! ## Example
//!
//! ```
//! use adapter_loader::{LoadOptions, PriceHistory};
//!
//! let csv = "Date,SPY,AGG\n\
//!            2024-01-02,470.0,97.0\n\
//!            2024-01-03,468.0,97.4\n\
//!            2024-01-04,466.5,97.1\n\
//!            2024-01-05,467.9,96.9\n";
//!
//! let history = PriceHistory::from_reader(csv.as_bytes(), &LoadOptions::default()).unwrap();
//! assert_eq!(history.tickers(), &["SPY", "AGG"]);
//! assert_eq!(history.last_prices(), Some(&[467.9, 96.9][..]));
//!
//! let params = history.estimate_parameters().unwrap();
//! assert_eq!(params.n_assets(), 2);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod history;

pub use error::LoaderError;
pub use history::{LoadOptions, PriceHistory, MIN_ROWS};
