//! Compare command implementation
//!
//! Runs the same portfolio under every market regime on shared random
//! draws and prints the reports side by side.

use folio_models::MarketScenario;
use folio_risk::compare_scenarios;
use tracing::info;

use super::output;
use super::{prepare, PortfolioInputs};
use crate::config::FolioConfig;
use crate::Result;

/// Run the compare command
pub fn run(inputs: &PortfolioInputs, config: &FolioConfig) -> Result<()> {
    info!("Comparing market scenarios...");
    info!("  History: {}", inputs.history.display());

    let (_, request) = prepare(inputs, config)?;
    let summaries = compare_scenarios(&request, &MarketScenario::all())?;
    println!("{}", output::render_comparison(&summaries, config.format)?);

    info!("Comparison complete");
    Ok(())
}
