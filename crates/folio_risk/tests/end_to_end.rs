//! Simulation through valuation and risk metrics.

use approx::assert_relative_eq;
use folio_engine::mc::{simulate, SimulationConfig};
use folio_models::{AssetParameters, MarketScenario, PortfolioWeights};
use folio_risk::{
    compare_scenarios, get_portfolio_values, rebalance_portfolio_with, run_simulation,
    ParallelConfig, RiskReport, SimulationRequest,
};

fn params() -> AssetParameters {
    AssetParameters::from_rows(
        vec![0.09, 0.06, 0.03],
        vec![0.25, 0.15, 0.05],
        &[
            vec![1.0, 0.6, -0.1],
            vec![0.6, 1.0, 0.0],
            vec![-0.1, 0.0, 1.0],
        ],
    )
    .unwrap()
}

fn config(n_paths: usize, seed: u64) -> SimulationConfig {
    SimulationConfig::builder()
        .n_paths(n_paths)
        .n_steps(252)
        .seed(seed)
        .build()
        .unwrap()
}

#[test]
fn test_deterministic_portfolio_growth() {
    let params = AssetParameters::uncorrelated(vec![0.05, 0.10], vec![0.0, 0.0]).unwrap();
    let request = SimulationRequest::new(params, vec![10.0, 20.0], config(50, 1))
        .with_weights(PortfolioWeights::new(vec![1.0, 1.0]).unwrap())
        .with_rebalance_step(300);

    let result = run_simulation(&request).unwrap();
    let expected = 0.5 * 0.05_f64.exp() + 0.5 * 0.10_f64.exp();
    for p in 0..50 {
        assert_relative_eq!(result.portfolio_values.terminal(p), expected, max_relative = 1e-10);
    }
    assert_eq!(result.report.probability_of_goal, 0.0);
    assert_relative_eq!(result.report.value_at_risk, expected - 1.0, max_relative = 1e-9);
    assert_eq!(result.report.worst_max_drawdown, 0.0);
}

#[test]
fn test_unit_weight_rebalanced_matches_static_when_never_rebalanced() {
    let paths = simulate(&params(), &[100.0, 50.0, 10.0], &config(300, 3)).unwrap();

    // Shares bought with one unit split by weight at t0.
    let weights = [0.5, 0.3, 0.2];
    let shares: Vec<f64> = weights
        .iter()
        .zip([100.0, 50.0, 10.0])
        .map(|(w, s0)| w / s0)
        .collect();

    let held = rebalance_portfolio_with(&paths, &weights, 10_000, &ParallelConfig::default())
        .unwrap();
    let static_pv = get_portfolio_values(&paths, &shares).unwrap();

    for (a, b) in held.as_slice().iter().zip(static_pv.as_slice()) {
        assert_relative_eq!(a, b, max_relative = 1e-10);
    }
}

#[test]
fn test_parallel_valuation_matches_sequential() {
    let paths = simulate(&params(), &[100.0, 50.0, 10.0], &config(500, 8)).unwrap();
    let weights = [0.4, 0.4, 0.2];

    let parallel = rebalance_portfolio_with(&paths, &weights, 21, &ParallelConfig::new(16, 1))
        .unwrap();
    let sequential =
        rebalance_portfolio_with(&paths, &weights, 21, &ParallelConfig::sequential()).unwrap();

    assert_eq!(parallel, sequential);
}

#[test]
fn test_bear_scenario_is_worse_than_bull() {
    let request = SimulationRequest::new(params(), vec![100.0, 50.0, 10.0], config(2000, 21))
        .with_weights(PortfolioWeights::new(vec![0.5, 0.3, 0.2]).unwrap());

    let summaries =
        compare_scenarios(&request, &[MarketScenario::Bull, MarketScenario::Bear]).unwrap();
    let bull = &summaries[0].report;
    let bear = &summaries[1].report;

    assert!(bear.mean_terminal_value < bull.mean_terminal_value);
    assert!(bear.value_at_risk < bull.value_at_risk);
    assert!(bear.worst_max_drawdown <= bull.worst_max_drawdown);
}

#[test]
fn test_unknown_scenario_behaves_as_normal() {
    let base = SimulationRequest::new(params(), vec![100.0, 50.0, 10.0], config(200, 4));
    let normal = run_simulation(&base.clone().with_scenario(MarketScenario::Normal)).unwrap();
    let unknown = run_simulation(&base.with_scenario("sideways".into())).unwrap();

    assert_eq!(normal.portfolio_values, unknown.portfolio_values);
    assert_eq!(normal.report, unknown.report);
}

#[test]
fn test_report_matches_individual_metrics() {
    let request = SimulationRequest::new(params(), vec![100.0, 50.0, 10.0], config(400, 5))
        .with_target(1.1)
        .with_level(0.1);
    let result = run_simulation(&request).unwrap();
    let report = RiskReport::compute(&result.portfolio_values, 1.1, 0.1).unwrap();

    assert_eq!(report, result.report);
    assert!(report.conditional_value_at_risk <= report.value_at_risk);
    assert!(report.max_drawdowns.iter().all(|d| *d <= 0.0));
    assert!((0.0..=1.0).contains(&report.probability_of_goal));
}
