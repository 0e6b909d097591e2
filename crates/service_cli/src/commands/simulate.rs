//! Simulate command implementation
//!
//! Estimates parameters from a price history, runs one rebalanced
//! simulation and prints its risk report.

use std::path::Path;

use folio_risk::{run_simulation, RunError};
use tracing::info;

use super::output::{self, RunSummary};
use super::{prepare, PortfolioInputs};
use crate::config::FolioConfig;
use crate::Result;

/// Run the simulate command
pub fn run(inputs: &PortfolioInputs, config: &FolioConfig, export_dir: Option<&Path>) -> Result<()> {
    info!("Running portfolio simulation...");
    info!("  History: {}", inputs.history.display());
    info!("  Scenario: {}", config.scenario);

    let (history, request) = prepare(inputs, config)?;
    let result = run_simulation(&request)?;

    let weights = request.weights.normalized().map_err(RunError::from)?;
    let summary = RunSummary::new(
        history.tickers(),
        weights.as_slice(),
        request.rebalance_step,
        &result,
    );
    println!("{}", output::render_run(&summary, config.format)?);

    if let Some(dir) = export_dir {
        let (prices, values) = output::export_samples(
            dir,
            history.tickers(),
            &result.paths,
            &result.portfolio_values,
            config.samples,
        )?;
        info!("  Wrote {}", prices.display());
        info!("  Wrote {}", values.display());
    }

    info!("Simulation complete");
    Ok(())
}
