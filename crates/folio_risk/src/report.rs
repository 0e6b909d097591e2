//! Aggregated risk report.

use folio_core::math::statistics::{mean, percentile};

use crate::analytics::{
    compute_drawdown, conditional_value_at_risk, probability_of_goal, value_at_risk,
};
use crate::error::RiskError;
use crate::valuation::PortfolioValueEnsemble;

/// Risk and return summary of one portfolio value ensemble.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskReport {
    /// Number of paths summarised.
    pub n_paths: usize,
    /// Number of steps after t0.
    pub n_steps: usize,
    /// Terminal value threshold used for the goal probability.
    pub target: f64,
    /// Tail level used for VaR and CVaR.
    pub level: f64,
    /// Fraction of paths ending at or above `target`.
    pub probability_of_goal: f64,
    /// `level` quantile of whole-horizon returns.
    pub value_at_risk: f64,
    /// Mean return at or below `value_at_risk`.
    pub conditional_value_at_risk: f64,
    /// Mean terminal value.
    pub mean_terminal_value: f64,
    /// Median terminal value.
    pub median_terminal_value: f64,
    /// Mean of per-path maximum drawdowns.
    pub mean_max_drawdown: f64,
    /// Most severe per-path maximum drawdown.
    pub worst_max_drawdown: f64,
    /// Maximum drawdown of every path.
    pub max_drawdowns: Vec<f64>,
}

impl RiskReport {
    /// Computes every metric for `pv`.
    ///
    /// # Errors
    ///
    /// Any error of the underlying metrics, e.g. `EmptyEnsemble` or
    /// `InvalidLevel`.
    pub fn compute(pv: &PortfolioValueEnsemble, target: f64, level: f64) -> Result<Self, RiskError> {
        let terminals = pv.terminal_values();
        let max_drawdowns = compute_drawdown(pv)?;

        Ok(Self {
            n_paths: pv.n_paths(),
            n_steps: pv.n_steps(),
            target,
            level,
            probability_of_goal: probability_of_goal(pv, target)?,
            value_at_risk: value_at_risk(pv, level)?,
            conditional_value_at_risk: conditional_value_at_risk(pv, level)?,
            mean_terminal_value: mean(&terminals)?,
            median_terminal_value: percentile(&terminals, 0.5)?,
            mean_max_drawdown: mean(&max_drawdowns)?,
            worst_max_drawdown: max_drawdowns.iter().copied().fold(0.0, f64::min),
            max_drawdowns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_report_fields() {
        let pv = PortfolioValueEnsemble::from_rows(&[
            vec![1.0, 1.1, 0.8],
            vec![1.0, 0.95, 0.9],
            vec![1.0, 1.0, 1.0],
            vec![1.0, 1.2, 1.1],
            vec![1.0, 1.05, 1.2],
        ])
        .unwrap();

        let report = RiskReport::compute(&pv, 1.05, 0.2).unwrap();
        assert_eq!(report.n_paths, 5);
        assert_eq!(report.n_steps, 2);
        assert_relative_eq!(report.probability_of_goal, 0.4);
        assert_relative_eq!(report.value_at_risk, -0.12, epsilon = 1e-12);
        assert_relative_eq!(report.conditional_value_at_risk, -0.2, epsilon = 1e-12);
        assert_relative_eq!(report.mean_terminal_value, 1.0, epsilon = 1e-12);
        assert_relative_eq!(report.median_terminal_value, 1.0, epsilon = 1e-12);
        assert_eq!(report.max_drawdowns.len(), 5);
        assert_relative_eq!(report.worst_max_drawdown, 0.8 / 1.1 - 1.0, epsilon = 1e-12);
        assert!(report.mean_max_drawdown <= 0.0);
    }

    #[test]
    fn test_report_rejects_empty() {
        let pv = PortfolioValueEnsemble::new(vec![], 0, 2).unwrap();
        assert_eq!(
            RiskReport::compute(&pv, 1.0, 0.05),
            Err(RiskError::EmptyEnsemble)
        );
    }
}
