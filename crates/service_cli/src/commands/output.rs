//! Report rendering and CSV export

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use folio_engine::mc::PathEnsemble;
use folio_models::MarketScenario;
use folio_risk::{PortfolioValueEnsemble, RiskReport, ScenarioSummary, SimulationResult};
use serde::Serialize;
use tracing::info;

use crate::config::OutputFormat;
use crate::Result;

/// File name of the exported price paths
pub const PRICE_PATHS_FILE: &str = "price_paths.csv";

/// File name of the exported portfolio value paths
pub const PORTFOLIO_PATHS_FILE: &str = "portfolio_paths.csv";

/// Outcome of a single `simulate` run as printed
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub tickers: &'a [String],
    pub weights: &'a [f64],
    pub scenario: MarketScenario,
    pub seed: Option<u64>,
    pub drift: &'a [f64],
    pub volatility: &'a [f64],
    pub rebalance_step: usize,
    pub report: &'a RiskReport,
}

impl<'a> RunSummary<'a> {
    /// Summary of `result` for the given tickers and weights
    pub fn new(
        tickers: &'a [String],
        weights: &'a [f64],
        rebalance_step: usize,
        result: &'a SimulationResult,
    ) -> Self {
        Self {
            tickers,
            weights,
            scenario: result.scenario,
            seed: result.seed(),
            drift: result.params.mu(),
            volatility: result.params.sigma(),
            rebalance_step,
            report: &result.report,
        }
    }
}

/// Renders a single run in the requested format
pub fn render_run(summary: &RunSummary<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Table => Ok(run_table(summary)),
    }
}

/// Renders a scenario comparison in the requested format
pub fn render_comparison(summaries: &[ScenarioSummary], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summaries)?),
        OutputFormat::Table => Ok(comparison_table(summaries)),
    }
}

fn run_table(summary: &RunSummary<'_>) -> String {
    let report = summary.report;
    let mut out = String::new();

    let seed = summary
        .seed
        .map_or_else(|| "-".to_string(), |seed| seed.to_string());
    let _ = writeln!(out, "Scenario: {}  Seed: {}", summary.scenario, seed);
    let _ = writeln!(
        out,
        "Paths: {}  Steps: {}  Rebalance every {} steps",
        report.n_paths, report.n_steps, summary.rebalance_step
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "{:<10} {:>10} {:>10} {:>10}",
        "Ticker", "Weight", "Drift", "Vol"
    );
    let _ = writeln!(out, "{}", "-".repeat(43));
    for (i, ticker) in summary.tickers.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<10} {:>10.4} {:>10.4} {:>10.4}",
            ticker, summary.weights[i], summary.drift[i], summary.volatility[i]
        );
    }
    let _ = writeln!(out);

    let rows = [
        (
            format!("P(terminal > {})", report.target),
            format!("{:.2}%", report.probability_of_goal * 100.0),
        ),
        (
            format!("VaR {:.0}%", report.level * 100.0),
            format!("{:.2}%", report.value_at_risk * 100.0),
        ),
        (
            format!("CVaR {:.0}%", report.level * 100.0),
            format!("{:.2}%", report.conditional_value_at_risk * 100.0),
        ),
        (
            "Mean terminal value".to_string(),
            format!("{:.4}", report.mean_terminal_value),
        ),
        (
            "Median terminal value".to_string(),
            format!("{:.4}", report.median_terminal_value),
        ),
        (
            "Mean max drawdown".to_string(),
            format!("{:.2}%", report.mean_max_drawdown * 100.0),
        ),
        (
            "Worst max drawdown".to_string(),
            format!("{:.2}%", report.worst_max_drawdown * 100.0),
        ),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{:<24} {:>18}", label, value);
    }
    out
}

fn comparison_table(summaries: &[ScenarioSummary]) -> String {
    let mut out = String::new();

    if let Some(first) = summaries.first() {
        let _ = writeln!(
            out,
            "Seed: {}  Paths: {}  Steps: {}  Target: {}  Level: {}",
            first.seed,
            first.report.n_paths,
            first.report.n_steps,
            first.report.target,
            first.report.level
        );
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Scenario", "P(goal)", "VaR", "CVaR", "Mean", "Worst DD"
    );
    let _ = writeln!(out, "{}", "-".repeat(65));
    for summary in summaries {
        let report = &summary.report;
        let _ = writeln!(
            out,
            "{:<10} {:>9.2}% {:>9.2}% {:>9.2}% {:>10.4} {:>9.2}%",
            summary.scenario.name(),
            report.probability_of_goal * 100.0,
            report.value_at_risk * 100.0,
            report.conditional_value_at_risk * 100.0,
            report.mean_terminal_value,
            report.worst_max_drawdown * 100.0
        );
    }
    out
}

/// Writes the first `samples` paths of prices and portfolio values to `dir`
///
/// Returns the paths of the two files written.
pub fn export_samples(
    dir: &Path,
    tickers: &[String],
    paths: &PathEnsemble,
    portfolio_values: &PortfolioValueEnsemble,
    samples: usize,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;
    let n = samples.min(paths.n_paths());

    let price_file = dir.join(PRICE_PATHS_FILE);
    let mut writer = csv::Writer::from_path(&price_file)?;
    let mut header = vec!["path".to_string(), "step".to_string()];
    header.extend(tickers.iter().cloned());
    writer.write_record(&header)?;
    for p in 0..n {
        for t in 0..paths.n_times() {
            let mut record = vec![p.to_string(), t.to_string()];
            record.extend(paths.time_slice(p, t).iter().map(f64::to_string));
            writer.write_record(&record)?;
        }
    }
    writer.flush()?;

    let value_file = dir.join(PORTFOLIO_PATHS_FILE);
    let mut writer = csv::Writer::from_path(&value_file)?;
    writer.write_record(["path", "step", "value"])?;
    for p in 0..n {
        for (t, value) in portfolio_values.path(p).iter().enumerate() {
            writer.write_record([p.to_string(), t.to_string(), value.to_string()])?;
        }
    }
    writer.flush()?;

    info!(
        samples = n,
        dir = %dir.display(),
        "Exported sample paths"
    );
    Ok((price_file, value_file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_engine::mc::SimulationConfig;
    use folio_models::AssetParameters;
    use folio_risk::{compare_scenarios, run_simulation, SimulationRequest};

    fn request() -> SimulationRequest {
        let params = AssetParameters::from_rows(
            vec![0.07, 0.03],
            vec![0.2, 0.06],
            &[vec![1.0, 0.1], vec![0.1, 1.0]],
        )
        .unwrap();
        let config = SimulationConfig::builder()
            .n_paths(20)
            .n_steps(10)
            .seed(11)
            .build()
            .unwrap();
        SimulationRequest::new(params, vec![100.0, 50.0], config)
    }

    fn tickers() -> Vec<String> {
        vec!["EQ".to_string(), "BOND".to_string()]
    }

    #[test]
    fn test_render_run_table() {
        let request = request();
        let result = run_simulation(&request).unwrap();
        let tickers = tickers();
        let summary = RunSummary::new(&tickers, request.weights.as_slice(), 21, &result);

        let table = render_run(&summary, OutputFormat::Table).unwrap();
        assert!(table.contains("Scenario: normal  Seed: 11"));
        assert!(table.contains("BOND"));
        assert!(table.contains("VaR 5%"));
        assert!(table.contains("Worst max drawdown"));
    }

    #[test]
    fn test_render_run_json() {
        let request = request();
        let result = run_simulation(&request).unwrap();
        let tickers = tickers();
        let summary = RunSummary::new(&tickers, request.weights.as_slice(), 21, &result);

        let json = render_run(&summary, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 11);
        assert_eq!(value["scenario"], "normal");
        assert_eq!(value["tickers"][1], "BOND");
        assert_eq!(value["report"]["n_paths"], 20);
    }

    #[test]
    fn test_render_comparison() {
        let summaries = compare_scenarios(&request(), &MarketScenario::all()).unwrap();

        let table = render_comparison(&summaries, OutputFormat::Table).unwrap();
        for name in ["normal", "bull", "bear", "volatile"] {
            assert!(table.contains(name));
        }
        assert!(table.starts_with("Seed: 11"));

        let json = render_comparison(&summaries, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
        assert_eq!(value[2]["scenario"], "bear");
    }

    #[test]
    fn test_export_samples() {
        let result = run_simulation(&request()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export");

        let (price_file, value_file) = export_samples(
            &out,
            &tickers(),
            &result.paths,
            &result.portfolio_values,
            3,
        )
        .unwrap();

        let prices = fs::read_to_string(price_file).unwrap();
        let mut lines = prices.lines();
        assert_eq!(lines.next(), Some("path,step,EQ,BOND"));
        assert_eq!(lines.next(), Some("0,0,100,50"));
        // 3 paths of 11 time points
        assert_eq!(prices.lines().count(), 1 + 3 * 11);

        let values = fs::read_to_string(value_file).unwrap();
        let mut lines = values.lines();
        assert_eq!(lines.next(), Some("path,step,value"));
        assert_eq!(lines.next(), Some("0,0,1"));
        assert_eq!(values.lines().count(), 1 + 3 * 11);
    }

    #[test]
    fn test_export_caps_samples_at_path_count() {
        let result = run_simulation(&request()).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let (_, value_file) = export_samples(
            dir.path(),
            &tickers(),
            &result.paths,
            &result.portfolio_values,
            500,
        )
        .unwrap();

        let values = fs::read_to_string(value_file).unwrap();
        assert_eq!(values.lines().count(), 1 + 20 * 11);
    }
}
