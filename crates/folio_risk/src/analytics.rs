//! Risk metrics over a portfolio value ensemble.
//!
//! All metrics are read-only. Returns are simple returns; losses are
//! negative numbers. Tail statistics use linear interpolation between order
//! statistics (`h = (n - 1) * level`).

use folio_core::math::statistics::{mean, percentile};

use crate::error::RiskError;
use crate::valuation::PortfolioValueEnsemble;

fn non_empty(pv: &PortfolioValueEnsemble) -> Result<(), RiskError> {
    if pv.is_empty() {
        Err(RiskError::EmptyEnsemble)
    } else {
        Ok(())
    }
}

fn check_level(level: f64) -> Result<(), RiskError> {
    if (0.0..=1.0).contains(&level) {
        Ok(())
    } else {
        Err(RiskError::InvalidLevel(level))
    }
}

/// Fraction of paths whose terminal value is at least `target`.
///
/// ```rust
/// use folio_risk::{probability_of_goal, PortfolioValueEnsemble};
///
/// let pv = PortfolioValueEnsemble::from_rows(&[
///     vec![100.0, 130.0],
///     vec![100.0, 110.0],
///     vec![100.0, 90.0],
/// ])
/// .unwrap();
/// assert_eq!(probability_of_goal(&pv, 100.0).unwrap(), 2.0 / 3.0);
/// ```
pub fn probability_of_goal(pv: &PortfolioValueEnsemble, target: f64) -> Result<f64, RiskError> {
    non_empty(pv)?;
    let hits = pv.paths().filter(|p| p[p.len() - 1] >= target).count();
    Ok(hits as f64 / pv.n_paths() as f64)
}

/// Whole-horizon return `final / initial - 1` of every path.
///
/// # Errors
///
/// `EmptyEnsemble`, or `NonPositiveInitialValue` for the first path whose
/// initial value is zero, negative or non-finite.
pub fn total_returns(pv: &PortfolioValueEnsemble) -> Result<Vec<f64>, RiskError> {
    non_empty(pv)?;
    pv.paths()
        .enumerate()
        .map(|(path, values)| {
            let initial = values[0];
            if !(initial > 0.0 && initial.is_finite()) {
                return Err(RiskError::NonPositiveInitialValue {
                    path,
                    value: initial,
                });
            }
            Ok(values[values.len() - 1] / initial - 1.0)
        })
        .collect()
}

/// Value at Risk: the `level` quantile of whole-horizon returns.
///
/// A 5% VaR is `value_at_risk(pv, 0.05)`; the result is a return, so a
/// loss shows up as a negative number.
///
/// # Errors
///
/// `InvalidLevel` outside [0, 1], plus the errors of [`total_returns`].
pub fn value_at_risk(pv: &PortfolioValueEnsemble, level: f64) -> Result<f64, RiskError> {
    check_level(level)?;
    let returns = total_returns(pv)?;
    Ok(percentile(&returns, level)?)
}

/// Conditional VaR: mean of the returns at or below the VaR cutoff.
///
/// Uses the same return definition and cutoff as [`value_at_risk`].
pub fn conditional_value_at_risk(
    pv: &PortfolioValueEnsemble,
    level: f64,
) -> Result<f64, RiskError> {
    check_level(level)?;
    let returns = total_returns(pv)?;
    let cutoff = percentile(&returns, level)?;
    let tail: Vec<f64> = returns.into_iter().filter(|r| *r <= cutoff).collect();
    Ok(mean(&tail)?)
}

/// Maximum drawdown of every path: `min_t (v(t) - peak(t)) / peak(t)`.
///
/// `peak(t)` is the running maximum up to and including `t`, so every
/// drawdown is at most zero. Points where the running peak is not positive
/// contribute zero.
///
/// ```rust
/// use folio_risk::{compute_drawdown, PortfolioValueEnsemble};
///
/// let pv = PortfolioValueEnsemble::from_rows(&[vec![100.0, 120.0, 90.0, 130.0]]).unwrap();
/// assert_eq!(compute_drawdown(&pv).unwrap(), vec![-0.25]);
/// ```
pub fn compute_drawdown(pv: &PortfolioValueEnsemble) -> Result<Vec<f64>, RiskError> {
    non_empty(pv)?;
    Ok(pv.paths().map(path_drawdown).collect())
}

fn path_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &v in values {
        peak = peak.max(v);
        if peak > 0.0 {
            worst = worst.min((v - peak) / peak);
        }
    }
    worst
}

/// Step-over-step returns `v(t) / v(t - 1) - 1`, shape `(n_paths, n_steps)`.
///
/// Follows IEEE arithmetic: a zero value produces an infinite or NaN return
/// at the following step.
pub fn compute_returns(pv: &PortfolioValueEnsemble) -> Result<Vec<Vec<f64>>, RiskError> {
    non_empty(pv)?;
    Ok(pv
        .paths()
        .map(|values| values.windows(2).map(|w| w[1] / w[0] - 1.0).collect())
        .collect())
}
