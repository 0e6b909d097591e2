//! Portfolio valuation over simulated price paths.
//!
//! Two valuation models:
//!
//! - **Static**: `value(t) = sum_i w_i * price_i(t)` with weights used as
//!   given (share counts, in effect).
//! - **Rebalanced**: a unit of wealth split by normalised weights at t0,
//!   each sleeve compounding with its asset, and the total redistributed to
//!   target weights every `rebalance_step` steps.
//!
//! Both run per path on the rayon pool; the time recurrence within a path is
//! sequential.

use folio_engine::mc::PathEnsemble;
use folio_models::normalize_weights;
use tracing::debug;

use crate::error::RiskError;
use crate::parallel::{map_rows_into, ParallelConfig};

/// Portfolio values of shape `(n_paths, n_steps + 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PortfolioValueEnsemble {
    data: Vec<f64>,
    n_paths: usize,
    n_times: usize,
}

impl PortfolioValueEnsemble {
    /// Wraps a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `n_times` is zero or
    /// `data.len() != n_paths * n_times`.
    pub fn new(data: Vec<f64>, n_paths: usize, n_times: usize) -> Result<Self, RiskError> {
        if n_times == 0 || data.len() != n_paths * n_times {
            return Err(RiskError::ShapeMismatch {
                expected: n_paths * n_times.max(1),
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            n_paths,
            n_times,
        })
    }

    /// Builds an ensemble from one row of values per path.
    ///
    /// ```rust
    /// use folio_risk::PortfolioValueEnsemble;
    ///
    /// let pv = PortfolioValueEnsemble::from_rows(&[vec![1.0, 1.1], vec![1.0, 0.9]]).unwrap();
    /// assert_eq!(pv.shape(), (2, 2));
    /// assert_eq!(pv.terminal(1), 0.9);
    /// ```
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, RiskError> {
        let n_times = rows.first().map(Vec::len).unwrap_or(1);
        let mut data = Vec::with_capacity(rows.len() * n_times);
        for row in rows {
            if row.len() != n_times {
                return Err(RiskError::ShapeMismatch {
                    expected: n_times,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::new(data, rows.len(), n_times)
    }

    /// `(n_paths, n_steps + 1)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_paths, self.n_times)
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time points, including t0.
    #[inline]
    pub fn n_times(&self) -> usize {
        self.n_times
    }

    /// Number of steps after t0.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_times - 1
    }

    /// Whether the ensemble holds no paths.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_paths == 0
    }

    /// Value of path `path` at time `t`.
    #[inline]
    pub fn value(&self, path: usize, t: usize) -> f64 {
        self.data[path * self.n_times + t]
    }

    /// Value series of one path.
    #[inline]
    pub fn path(&self, path: usize) -> &[f64] {
        &self.data[path * self.n_times..(path + 1) * self.n_times]
    }

    /// Iterator over per-path value series.
    pub fn paths(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.n_times)
    }

    /// Initial value of one path.
    #[inline]
    pub fn initial(&self, path: usize) -> f64 {
        self.value(path, 0)
    }

    /// Terminal value of one path.
    #[inline]
    pub fn terminal(&self, path: usize) -> f64 {
        self.value(path, self.n_times - 1)
    }

    /// Terminal value of every path.
    pub fn terminal_values(&self) -> Vec<f64> {
        self.paths().map(|p| p[p.len() - 1]).collect()
    }

    /// Flat row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

fn check_weights(paths: &PathEnsemble, weights: &[f64]) -> Result<(), RiskError> {
    if weights.len() != paths.n_assets() {
        return Err(RiskError::DimensionMismatch {
            expected: paths.n_assets(),
            got: weights.len(),
        });
    }
    Ok(())
}

/// Static weighted-sum valuation with the default parallel configuration.
///
/// See [`get_portfolio_values_with`].
pub fn get_portfolio_values(
    paths: &PathEnsemble,
    weights: &[f64],
) -> Result<PortfolioValueEnsemble, RiskError> {
    get_portfolio_values_with(paths, weights, &ParallelConfig::default())
}

/// Static weighted-sum valuation: `value(t) = sum_i w_i * price_i(t)`.
///
/// Weights are used as given, so all-zero weights give an all-zero
/// ensemble.
///
/// # Errors
///
/// `DimensionMismatch` if `weights.len()` differs from the asset count.
pub fn get_portfolio_values_with(
    paths: &PathEnsemble,
    weights: &[f64],
    config: &ParallelConfig,
) -> Result<PortfolioValueEnsemble, RiskError> {
    check_weights(paths, weights)?;
    let (n_paths, n_times, n_assets) = paths.shape();

    let mut data = vec![0.0; n_paths * n_times];
    map_rows_into(
        paths.as_slice(),
        n_times * n_assets,
        &mut data,
        n_times,
        config,
        |_, path, values| {
            for (value, prices) in values.iter_mut().zip(path.chunks_exact(n_assets)) {
                *value = prices.iter().zip(weights).map(|(p, w)| p * w).sum();
            }
        },
    );

    PortfolioValueEnsemble::new(data, n_paths, n_times)
}

/// Rebalanced valuation with the default parallel configuration.
///
/// See [`rebalance_portfolio_with`].
pub fn rebalance_portfolio(
    paths: &PathEnsemble,
    weights: &[f64],
    rebalance_step: usize,
) -> Result<PortfolioValueEnsemble, RiskError> {
    rebalance_portfolio_with(paths, weights, rebalance_step, &ParallelConfig::default())
}

/// Periodically rebalanced portfolio value, starting from 1.0.
///
/// At t0 one unit of wealth is split by the normalised weights. Each step
/// every dollar sleeve grows by its asset's price ratio `p(t) / p(t - 1)`;
/// when `t % rebalance_step == 0` the total is redistributed to target
/// weights. The recorded value is the total after the step.
///
/// A `rebalance_step` of at least the number of steps means buy-and-hold.
///
/// # Errors
///
/// - `InvalidRebalanceStep` if `rebalance_step == 0`
/// - `DimensionMismatch` if `weights.len()` differs from the asset count
/// - `Weights` if the weights sum to zero
/// - `NonPositivePrice` if any price is zero, negative or non-finite
///
/// ```rust
/// use folio_engine::mc::PathEnsemble;
/// use folio_risk::rebalance_portfolio;
///
/// let paths = PathEnsemble::from_nested(&[vec![
///     vec![100.0, 100.0],
///     vec![120.0, 100.0],
/// ]])
/// .unwrap();
/// let pv = rebalance_portfolio(&paths, &[1.0, 1.0], 21).unwrap();
/// assert_eq!(pv.initial(0), 1.0);
/// assert!((pv.terminal(0) - 1.1).abs() < 1e-12);
/// ```
pub fn rebalance_portfolio_with(
    paths: &PathEnsemble,
    weights: &[f64],
    rebalance_step: usize,
    config: &ParallelConfig,
) -> Result<PortfolioValueEnsemble, RiskError> {
    if rebalance_step == 0 {
        return Err(RiskError::InvalidRebalanceStep(rebalance_step));
    }
    check_weights(paths, weights)?;
    let target = normalize_weights(weights)?;

    let (n_paths, n_times, n_assets) = paths.shape();
    if let Some(pos) = paths
        .as_slice()
        .iter()
        .position(|p| !(*p > 0.0 && p.is_finite()))
    {
        return Err(RiskError::NonPositivePrice {
            path: pos / (n_times * n_assets),
            step: (pos / n_assets) % n_times,
            asset: pos % n_assets,
            value: paths.as_slice()[pos],
        });
    }

    debug!(n_paths, n_times, rebalance_step, "rebalanced valuation");

    let mut data = vec![0.0; n_paths * n_times];
    map_rows_into(
        paths.as_slice(),
        n_times * n_assets,
        &mut data,
        n_times,
        config,
        |_, path, values| rebalance_path(path, n_assets, &target, rebalance_step, values),
    );

    PortfolioValueEnsemble::new(data, n_paths, n_times)
}

/// Sequential rebalancing recurrence for one path.
fn rebalance_path(
    path: &[f64],
    n_assets: usize,
    target: &[f64],
    rebalance_step: usize,
    values: &mut [f64],
) {
    let mut dollars = target.to_vec();
    values[0] = 1.0;

    let mut rows = path.chunks_exact(n_assets);
    let Some(mut prev) = rows.next() else {
        return;
    };

    for (t, curr) in rows.enumerate().map(|(i, row)| (i + 1, row)) {
        for ((d, c), p) in dollars.iter_mut().zip(curr).zip(prev) {
            *d *= c / p;
        }
        let total: f64 = dollars.iter().sum();
        if t % rebalance_step == 0 {
            for (d, w) in dollars.iter_mut().zip(target) {
                *d = total * w;
            }
        }
        values[t] = total;
        prev = curr;
    }
}
