//! CLI command implementations
//!
//! Each submodule implements a specific CLI command; both commands share
//! the history loading and request assembly below.

pub mod compare;
pub mod output;
pub mod simulate;

use std::path::PathBuf;

use adapter_loader::{LoadOptions, PriceHistory};
use chrono::NaiveDate;
use folio_engine::mc::SimulationConfig;
use folio_models::{MarketScenario, PortfolioWeights};
use folio_risk::{RunError, SimulationRequest};
use tracing::info;

use crate::config::FolioConfig;
use crate::{CliError, Result};

/// Portfolio inputs shared by every command
#[derive(Debug, Clone, Default)]
pub struct PortfolioInputs {
    /// CSV price history
    pub history: PathBuf,
    /// Subset of history columns to hold
    pub tickers: Option<Vec<String>>,
    /// Target weights, one per ticker; equal weights when absent
    pub weights: Option<Vec<f64>>,
    /// First history date used for estimation
    pub start: Option<NaiveDate>,
    /// Last history date used for estimation
    pub end: Option<NaiveDate>,
}

/// Loads the history and builds the simulation request it implies
pub fn prepare(
    inputs: &PortfolioInputs,
    config: &FolioConfig,
) -> Result<(PriceHistory, SimulationRequest)> {
    if !inputs.history.exists() {
        return Err(CliError::FileNotFound(inputs.history.display().to_string()));
    }

    let mut options = LoadOptions::default().with_range(inputs.start, inputs.end);
    if let Some(tickers) = &inputs.tickers {
        options = options.with_tickers(tickers.iter().cloned());
    }

    let history = PriceHistory::load_csv(&inputs.history, &options)?;
    info!(
        rows = history.len(),
        tickers = ?history.tickers(),
        "Loaded price history"
    );

    let params = history.estimate_parameters()?;
    let s0 = history
        .last_prices()
        .ok_or_else(|| CliError::InvalidArgument("price history is empty".to_string()))?
        .to_vec();

    let n_assets = history.tickers().len();
    if let Some(weights) = &inputs.weights {
        if weights.len() != n_assets {
            return Err(CliError::InvalidArgument(format!(
                "{} weights given for {} tickers",
                weights.len(),
                n_assets
            )));
        }
    }

    let sim_config = SimulationConfig::builder()
        .n_paths(config.paths)
        .n_steps(config.steps)
        .dt(config.dt)
        .batch_size(config.batch_size)
        .maybe_seed(config.seed)
        .build()?;

    let mut request = SimulationRequest::new(params, s0, sim_config)
        .with_scenario(MarketScenario::from_name(&config.scenario))
        .with_rebalance_step(config.rebalance)
        .with_target(config.target)
        .with_level(config.level);
    if let Some(weights) = &inputs.weights {
        let weights = PortfolioWeights::new(weights.clone()).map_err(RunError::from)?;
        request = request.with_weights(weights);
    }

    Ok((history, request))
}
