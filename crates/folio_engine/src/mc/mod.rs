//! Correlated GBM path simulation.
//!
//! # Architecture
//!
//! ```text
//! simulate()
//! ├── SimulationConfig  (paths, steps, dt, seed, batching)
//! ├── AssetParameters   (drift, volatility, Cholesky factor)
//! ├── PathWorkspace     (per-batch scratch buffers)
//! ├── SimRng            (one substream per path)
//! └── PathEnsemble      (P x (T + 1) x N prices)
//! ```
//!
//! # Discretisation
//!
//! Each step draws `N` independent standard normals `z`, correlates them
//! with the lower Cholesky factor `shock = L z` and advances the cumulative
//! log price
//!
//! ```text
//! log_acc_i += (mu_i - 0.5 sigma_i^2) dt + sigma_i sqrt(dt) shock_i
//! S_i(t) = S_i(0) exp(log_acc_i)
//! ```
//!
//! The scheme is exact for GBM; there is no discretisation bias.

mod config;
mod ensemble;
mod error;
mod paths;
mod workspace;

pub use config::{
    SimulationConfig, SimulationConfigBuilder, DEFAULT_BATCH_SIZE, DEFAULT_DT, MAX_PATHS,
    MAX_STEPS,
};
pub use ensemble::PathEnsemble;
pub use error::{ConfigError, SimulationError};
pub use paths::{simulate, simulate_gbm};
pub use workspace::PathWorkspace;
