//! End-to-end simulation runs.
//!
//! [`run_simulation`] validates a [`SimulationRequest`], applies the market
//! scenario, simulates paths, values the rebalanced portfolio and computes
//! the [`RiskReport`]. [`compare_scenarios`] repeats that for several
//! regimes on identical random draws.

use folio_engine::mc::{simulate, PathEnsemble, SimulationConfig};
use folio_engine::rng::SimRng;
use folio_models::{AssetParameters, MarketScenario, PortfolioWeights};
use tracing::info;

use crate::error::{RiskError, RunError};
use crate::parallel::ParallelConfig;
use crate::report::RiskReport;
use crate::valuation::{rebalance_portfolio_with, PortfolioValueEnsemble};

/// Default rebalance interval in steps (about one trading month).
pub const DEFAULT_REBALANCE_STEP: usize = 21;

/// Default terminal wealth target for a unit initial investment.
pub const DEFAULT_TARGET: f64 = 1.2;

/// Default VaR / CVaR tail level.
pub const DEFAULT_LEVEL: f64 = 0.05;

/// Everything needed for one simulation run.
#[derive(Clone, Debug)]
pub struct SimulationRequest {
    /// Historical or assumed asset parameters, before scenario adjustment.
    pub params: AssetParameters,
    /// Initial price of every asset.
    pub s0: Vec<f64>,
    /// Target weights, normalised before use.
    pub weights: PortfolioWeights,
    /// Market regime applied to `params`.
    pub scenario: MarketScenario,
    /// Path engine configuration.
    pub config: SimulationConfig,
    /// Steps between rebalances.
    pub rebalance_step: usize,
    /// Terminal value threshold for the goal probability.
    pub target: f64,
    /// Tail level for VaR and CVaR.
    pub level: f64,
    /// Parallelism for valuation.
    pub parallel: ParallelConfig,
}

impl SimulationRequest {
    /// Request with equal weights, the normal regime and default risk settings.
    pub fn new(params: AssetParameters, s0: Vec<f64>, config: SimulationConfig) -> Self {
        let n = params.n_assets();
        Self {
            params,
            s0,
            weights: PortfolioWeights::equal(n),
            scenario: MarketScenario::Normal,
            config,
            rebalance_step: DEFAULT_REBALANCE_STEP,
            target: DEFAULT_TARGET,
            level: DEFAULT_LEVEL,
            parallel: ParallelConfig::default(),
        }
    }

    /// Sets the target weights.
    pub fn with_weights(mut self, weights: PortfolioWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the market regime.
    pub fn with_scenario(mut self, scenario: MarketScenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Sets the rebalance interval.
    pub fn with_rebalance_step(mut self, rebalance_step: usize) -> Self {
        self.rebalance_step = rebalance_step;
        self
    }

    /// Sets the goal target.
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = target;
        self
    }

    /// Sets the tail level.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Sets the valuation parallelism.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks every input that would otherwise fail mid-run.
    ///
    /// # Errors
    ///
    /// Invalid engine configuration, zero-sum weights, a weight count that
    /// differs from the asset count, a zero rebalance interval or a tail
    /// level outside [0, 1].
    pub fn validate(&self) -> Result<(), RunError> {
        self.config
            .validate()
            .map_err(folio_engine::mc::SimulationError::from)?;
        if self.weights.len() != self.params.n_assets() {
            return Err(RiskError::DimensionMismatch {
                expected: self.params.n_assets(),
                got: self.weights.len(),
            }
            .into());
        }
        self.weights.normalized()?;
        if self.rebalance_step == 0 {
            return Err(RiskError::InvalidRebalanceStep(self.rebalance_step).into());
        }
        if !(0.0..=1.0).contains(&self.level) {
            return Err(RiskError::InvalidLevel(self.level).into());
        }
        Ok(())
    }
}

/// Output of one run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Regime the run used.
    pub scenario: MarketScenario,
    /// Scenario-adjusted parameters that drove the simulation.
    pub params: AssetParameters,
    /// Simulated prices.
    pub paths: PathEnsemble,
    /// Rebalanced portfolio values, starting at 1.0.
    pub portfolio_values: PortfolioValueEnsemble,
    /// Risk metrics of `portfolio_values`.
    pub report: RiskReport,
}

impl SimulationResult {
    /// Seed that produced the paths.
    pub fn seed(&self) -> Option<u64> {
        self.paths.seed()
    }
}

/// Runs one simulation end to end.
///
/// # Errors
///
/// Validation failures are reported before any simulation work.
pub fn run_simulation(request: &SimulationRequest) -> Result<SimulationResult, RunError> {
    request.validate()?;

    let params = request.scenario.apply(&request.params);
    info!(
        scenario = %request.scenario,
        n_assets = params.n_assets(),
        rebalance_step = request.rebalance_step,
        "starting simulation run"
    );

    let paths = simulate(&params, &request.s0, &request.config)?;
    let portfolio_values = rebalance_portfolio_with(
        &paths,
        request.weights.as_slice(),
        request.rebalance_step,
        &request.parallel,
    )?;
    let report = RiskReport::compute(&portfolio_values, request.target, request.level)?;

    info!(
        scenario = %request.scenario,
        probability_of_goal = report.probability_of_goal,
        value_at_risk = report.value_at_risk,
        mean_terminal_value = report.mean_terminal_value,
        "simulation run complete"
    );

    Ok(SimulationResult {
        scenario: request.scenario,
        params,
        paths,
        portfolio_values,
        report,
    })
}

/// Per-regime outcome of [`compare_scenarios`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSummary {
    /// Regime.
    pub scenario: MarketScenario,
    /// Regime description.
    pub description: String,
    /// Seed shared by every regime in the comparison.
    pub seed: u64,
    /// Risk metrics under the regime.
    pub report: RiskReport,
}

/// Runs `request` once per regime on the same random draws.
///
/// If the request has no seed, one is drawn and shared so that regimes
/// differ only by their parameter adjustment.
pub fn compare_scenarios(
    request: &SimulationRequest,
    scenarios: &[MarketScenario],
) -> Result<Vec<ScenarioSummary>, RunError> {
    request.validate()?;

    let seed = match request.config.seed() {
        Some(seed) => seed,
        None => {
            let (_, seed) = SimRng::from_entropy();
            info!(seed, "no seed configured, drew one shared by all scenarios");
            seed
        }
    };
    let config = request.config.with_seed(seed);

    scenarios
        .iter()
        .map(|&scenario| {
            let run = SimulationRequest {
                scenario,
                config: config.clone(),
                ..request.clone()
            };
            let result = run_simulation(&run)?;
            Ok(ScenarioSummary {
                scenario,
                description: scenario.description().to_string(),
                seed,
                report: result.report,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SimulationRequest {
        let params = AssetParameters::from_rows(
            vec![0.08, 0.05],
            vec![0.2, 0.1],
            &[vec![1.0, 0.3], vec![0.3, 1.0]],
        )
        .unwrap();
        let config = SimulationConfig::builder()
            .n_paths(200)
            .n_steps(63)
            .seed(7)
            .build()
            .unwrap();
        SimulationRequest::new(params, vec![100.0, 50.0], config)
    }

    fn weights(raw: Vec<f64>) -> PortfolioWeights {
        PortfolioWeights::new(raw).unwrap()
    }

    #[test]
    fn test_default_weights_are_equal() {
        let request = request();
        assert_eq!(request.weights, PortfolioWeights::equal(2));
        assert_eq!(request.weights.as_slice(), &[0.5, 0.5]);
    }

    #[test]
    fn test_run_simulation_shapes() {
        let result = run_simulation(&request()).unwrap();
        assert_eq!(result.paths.shape(), (200, 64, 2));
        assert_eq!(result.portfolio_values.shape(), (200, 64));
        assert_eq!(result.report.n_paths, 200);
        assert_eq!(result.seed(), Some(7));
        for p in 0..200 {
            assert_eq!(result.portfolio_values.initial(p), 1.0);
        }
    }

    #[test]
    fn test_validation_happens_first() {
        assert!(matches!(
            run_simulation(&request().with_weights(weights(vec![1.0, -1.0]))),
            Err(RunError::Weights(_))
        ));
        assert!(matches!(
            run_simulation(&request().with_weights(weights(vec![1.0]))),
            Err(RunError::Risk(RiskError::DimensionMismatch { .. }))
        ));
        assert!(matches!(
            run_simulation(&request().with_rebalance_step(0)),
            Err(RunError::Risk(RiskError::InvalidRebalanceStep(0)))
        ));
        assert!(matches!(
            run_simulation(&request().with_level(-0.1)),
            Err(RunError::Risk(RiskError::InvalidLevel(_)))
        ));
    }

    #[test]
    fn test_scenario_adjusts_parameters() {
        let result = run_simulation(&request().with_scenario(MarketScenario::Volatile)).unwrap();
        assert_eq!(result.scenario, MarketScenario::Volatile);
        assert_eq!(result.params.sigma(), &[0.4, 0.2]);
    }

    #[test]
    fn test_compare_scenarios_one_summary_each() {
        let summaries = compare_scenarios(&request(), &MarketScenario::all()).unwrap();
        assert_eq!(summaries.len(), 4);
        assert!(summaries.iter().all(|s| s.seed == 7));
        assert_eq!(summaries[0].scenario, MarketScenario::Normal);
    }
}
