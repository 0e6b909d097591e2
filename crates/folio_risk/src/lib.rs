//! # folio_risk (L4: Application)
//!
//! Portfolio valuation, risk metrics and end-to-end simulation runs.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             folio_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  valuation/    - static and rebalanced  │
//! │  analytics/    - goal, VaR, CVaR, DD    │
//! │  report/       - RiskReport             │
//! │  orchestrator/ - run, compare           │
//! │  parallel/     - Rayon utilities        │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            folio_engine (L3)            │
//! │  Correlated GBM path simulation         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use folio_engine::mc::SimulationConfig;
//! use folio_models::{AssetParameters, MarketScenario, PortfolioWeights};
//! use folio_risk::{run_simulation, SimulationRequest};
//!
//! let params = AssetParameters::from_rows(
//!     vec![0.07, 0.04],
//!     vec![0.18, 0.08],
//!     &[vec![1.0, 0.2], vec![0.2, 1.0]],
//! )
//! .unwrap();
//! let config = SimulationConfig::builder()
//!     .n_paths(500)
//!     .n_steps(252)
//!     .seed(1)
//!     .build()
//!     .unwrap();
//!
//! let request = SimulationRequest::new(params, vec![400.0, 95.0], config)
//!     .with_weights(PortfolioWeights::new(vec![0.6, 0.4]).unwrap())
//!     .with_scenario(MarketScenario::Bear);
//!
//! let result = run_simulation(&request).unwrap();
//! assert!(result.report.conditional_value_at_risk <= result.report.value_at_risk);
//! ```

#![warn(missing_docs)]

pub mod analytics;
pub mod error;
pub mod orchestrator;
pub mod parallel;
pub mod report;
pub mod valuation;

pub use analytics::{
    compute_drawdown, compute_returns, conditional_value_at_risk, probability_of_goal,
    total_returns, value_at_risk,
};
pub use error::{RiskError, RunError};
pub use orchestrator::{
    compare_scenarios, run_simulation, ScenarioSummary, SimulationRequest, SimulationResult,
};
pub use parallel::ParallelConfig;
pub use report::RiskReport;
pub use valuation::{
    get_portfolio_values, get_portfolio_values_with, rebalance_portfolio,
    rebalance_portfolio_with, PortfolioValueEnsemble,
};
