//! Parameter estimation from price history.
//!
//! Only simple sample statistics are used:
//! - daily simple returns `p(t) / p(t-1) - 1`
//! - `mu = mean(daily returns) * periods_per_year`
//! - `sigma = sample_std(daily returns) * sqrt(periods_per_year)`
//! - Pearson correlation of daily returns
//!
//! Observations are rows; each row holds one value per asset.

use folio_core::math::statistics::{mean, pearson_correlation, sample_std};
use folio_core::math::CorrelationMatrix;

use crate::error::EstimationError;
use crate::params::AssetParameters;

/// Trading days per year used to annualise daily statistics.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

fn check_rectangular(rows: &[Vec<f64>]) -> Result<usize, EstimationError> {
    let n_assets = rows.first().map(Vec::len).unwrap_or(0);
    for (row, values) in rows.iter().enumerate() {
        if values.len() != n_assets {
            return Err(EstimationError::RaggedObservations {
                row,
                expected: n_assets,
                got: values.len(),
            });
        }
    }
    Ok(n_assets)
}

fn column(rows: &[Vec<f64>], asset: usize) -> Vec<f64> {
    rows.iter().map(|r| r[asset]).collect()
}

/// Simple returns between consecutive price rows.
///
/// # Errors
///
/// `InsufficientObservations` for fewer than two price rows,
/// `NonPositivePrice` if a price is zero, negative or NaN.
pub fn simple_returns(prices: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, EstimationError> {
    if prices.len() < 2 {
        return Err(EstimationError::InsufficientObservations {
            got: prices.len(),
            need: 2,
        });
    }
    check_rectangular(prices)?;

    for (row, values) in prices.iter().enumerate() {
        for (asset, &value) in values.iter().enumerate() {
            if !(value > 0.0 && value.is_finite()) {
                return Err(EstimationError::NonPositivePrice { row, asset, value });
            }
        }
    }

    Ok(prices
        .windows(2)
        .map(|w| {
            w[1].iter()
                .zip(w[0].iter())
                .map(|(curr, prev)| curr / prev - 1.0)
                .collect()
        })
        .collect())
}

/// Annualised drift and volatility per asset.
pub fn estimate_mu_sigma(
    returns: &[Vec<f64>],
    periods_per_year: f64,
) -> Result<(Vec<f64>, Vec<f64>), EstimationError> {
    if returns.len() < 2 {
        return Err(EstimationError::InsufficientObservations {
            got: returns.len(),
            need: 2,
        });
    }
    let n_assets = check_rectangular(returns)?;

    let mut mu = Vec::with_capacity(n_assets);
    let mut sigma = Vec::with_capacity(n_assets);
    for asset in 0..n_assets {
        let series = column(returns, asset);
        mu.push(mean(&series)? * periods_per_year);
        sigma.push(sample_std(&series)? * periods_per_year.sqrt());
    }

    Ok((mu, sigma))
}

/// Pearson correlation matrix of the return columns.
///
/// # Errors
///
/// `ZeroVariance` if an asset's returns are constant.
pub fn estimate_correlation(
    returns: &[Vec<f64>],
) -> Result<CorrelationMatrix<f64>, EstimationError> {
    if returns.len() < 2 {
        return Err(EstimationError::InsufficientObservations {
            got: returns.len(),
            need: 2,
        });
    }
    let n = check_rectangular(returns)?;
    let columns: Vec<Vec<f64>> = (0..n).map(|asset| column(returns, asset)).collect();

    for (asset, series) in columns.iter().enumerate() {
        if sample_std(series)? == 0.0 {
            return Err(EstimationError::ZeroVariance { asset });
        }
    }

    let mut data = vec![0.0; n * n];
    for i in 0..n {
        data[i * n + i] = 1.0;
        for j in (i + 1)..n {
            let rho = pearson_correlation(&columns[i], &columns[j])?.clamp(-1.0, 1.0);
            data[i * n + j] = rho;
            data[j * n + i] = rho;
        }
    }

    CorrelationMatrix::new(&data, n).map_err(|e| EstimationError::Parameters(e.into()))
}

/// Full parameter set estimated from a price history.
///
/// # Errors
///
/// Any estimation error, or `Parameters` if the estimated correlation
/// matrix is not positive definite (e.g. perfectly collinear assets).
pub fn estimate_parameters(
    prices: &[Vec<f64>],
    periods_per_year: f64,
) -> Result<AssetParameters, EstimationError> {
    let returns = simple_returns(prices)?;
    let (mu, sigma) = estimate_mu_sigma(&returns, periods_per_year)?;
    let correlation = estimate_correlation(&returns)?;
    Ok(AssetParameters::new(mu, sigma, correlation)?)
}
