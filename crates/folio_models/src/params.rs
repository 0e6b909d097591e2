//! Per-asset model parameters.
//!
//! Each asset follows Geometric Brownian Motion
//!
//! ```text
//! dS_i = mu_i * S_i * dt + sigma_i * S_i * dW_i,   corr(dW_i, dW_j) = rho_ij
//! ```
//!
//! with annualised drift `mu`, annualised volatility `sigma` and a
//! correlation matrix `rho`. The Cholesky factor of `rho` is computed once
//! at construction so that an invalid matrix fails before any simulation.

use folio_core::math::{CholeskyFactor, CorrelationMatrix};

use crate::error::ParameterError;

/// Validated drift, volatility and correlation for `N` assets.
///
/// Invariant: `mu.len() == sigma.len() == correlation.dim() == N >= 1`,
/// every volatility is finite and non-negative, and the correlation matrix
/// is symmetric positive definite.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetParameters {
    mu: Vec<f64>,
    sigma: Vec<f64>,
    correlation: CorrelationMatrix<f64>,
    cholesky: CholeskyFactor<f64>,
}

impl AssetParameters {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// - `NoAssets` if `mu` is empty
    /// - `LengthMismatch` if `sigma` or the correlation dimension differs from `mu`
    /// - `NonFinite` / `NegativeVolatility` for bad drift or volatility entries
    /// - `Correlation` if the matrix is not positive definite
    pub fn new(
        mu: Vec<f64>,
        sigma: Vec<f64>,
        correlation: CorrelationMatrix<f64>,
    ) -> Result<Self, ParameterError> {
        let n = mu.len();
        if n == 0 {
            return Err(ParameterError::NoAssets);
        }
        if sigma.len() != n {
            return Err(ParameterError::LengthMismatch {
                name: "sigma",
                expected: n,
                got: sigma.len(),
            });
        }
        if correlation.dim() != n {
            return Err(ParameterError::LengthMismatch {
                name: "correlation",
                expected: n,
                got: correlation.dim(),
            });
        }

        for (index, m) in mu.iter().enumerate() {
            if !m.is_finite() {
                return Err(ParameterError::NonFinite { name: "mu", index });
            }
        }
        for (index, &s) in sigma.iter().enumerate() {
            if !s.is_finite() {
                return Err(ParameterError::NonFinite {
                    name: "sigma",
                    index,
                });
            }
            if s < 0.0 {
                return Err(ParameterError::NegativeVolatility { index, value: s });
            }
        }

        let cholesky = correlation.cholesky()?;

        Ok(Self {
            mu,
            sigma,
            correlation,
            cholesky,
        })
    }

    /// Create parameters from a nested correlation matrix.
    pub fn from_rows(
        mu: Vec<f64>,
        sigma: Vec<f64>,
        correlation: &[Vec<f64>],
    ) -> Result<Self, ParameterError> {
        let correlation = CorrelationMatrix::from_rows(correlation)?;
        Self::new(mu, sigma, correlation)
    }

    /// Create parameters for independent assets.
    pub fn uncorrelated(mu: Vec<f64>, sigma: Vec<f64>) -> Result<Self, ParameterError> {
        let n = mu.len();
        Self::new(mu, sigma, CorrelationMatrix::identity(n))
    }

    /// Number of assets.
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.mu.len()
    }

    /// Annualised drifts.
    #[inline]
    pub fn mu(&self) -> &[f64] {
        &self.mu
    }

    /// Annualised volatilities.
    #[inline]
    pub fn sigma(&self) -> &[f64] {
        &self.sigma
    }

    /// Correlation matrix.
    #[inline]
    pub fn correlation(&self) -> &CorrelationMatrix<f64> {
        &self.correlation
    }

    /// Lower triangular Cholesky factor of the correlation matrix.
    #[inline]
    pub fn cholesky(&self) -> &CholeskyFactor<f64> {
        &self.cholesky
    }

    /// Per-step log drift `(mu - 0.5 * sigma^2) * dt` for every asset.
    pub fn log_drift(&self, dt: f64) -> Vec<f64> {
        self.mu
            .iter()
            .zip(self.sigma.iter())
            .map(|(m, s)| (m - 0.5 * s * s) * dt)
            .collect()
    }

    /// Per-step diffusion scale `sigma * sqrt(dt)` for every asset.
    pub fn diffusion_scale(&self, dt: f64) -> Vec<f64> {
        let sqrt_dt = dt.sqrt();
        self.sigma.iter().map(|s| s * sqrt_dt).collect()
    }

    /// Copy with shifted drifts and scaled volatilities, correlation unchanged.
    ///
    /// `vol_multiplier` must be finite and non-negative; the scenario table
    /// only ever passes such constants, so the factorisation is reused.
    pub(crate) fn shifted(&self, drift_shift: f64, vol_multiplier: f64) -> Self {
        debug_assert!(vol_multiplier.is_finite() && vol_multiplier >= 0.0);
        Self {
            mu: self.mu.iter().map(|m| m + drift_shift).collect(),
            sigma: self.sigma.iter().map(|s| s * vol_multiplier).collect(),
            correlation: self.correlation.clone(),
            cholesky: self.cholesky.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use folio_core::types::CorrelationError;

    #[test]
    fn test_valid_parameters() {
        let params = AssetParameters::from_rows(
            vec![0.05, 0.08],
            vec![0.2, 0.3],
            &[vec![1.0, 0.5], vec![0.5, 1.0]],
        )
        .unwrap();

        assert_eq!(params.n_assets(), 2);
        assert_eq!(params.mu(), &[0.05, 0.08]);
        assert_relative_eq!(params.cholesky().get(1, 1), 0.75_f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_length_mismatch() {
        let result = AssetParameters::uncorrelated(vec![0.05, 0.08], vec![0.2]);
        assert_eq!(
            result,
            Err(ParameterError::LengthMismatch {
                name: "sigma",
                expected: 2,
                got: 1
            })
        );

        let result = AssetParameters::new(
            vec![0.05, 0.08],
            vec![0.2, 0.2],
            CorrelationMatrix::identity(3),
        );
        assert!(matches!(
            result,
            Err(ParameterError::LengthMismatch {
                name: "correlation",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        assert!(matches!(
            AssetParameters::uncorrelated(vec![0.05], vec![-0.1]),
            Err(ParameterError::NegativeVolatility { index: 0, .. })
        ));
        assert_eq!(
            AssetParameters::uncorrelated(vec![f64::NAN], vec![0.1]),
            Err(ParameterError::NonFinite { name: "mu", index: 0 })
        );
        assert_eq!(
            AssetParameters::uncorrelated(vec![], vec![]),
            Err(ParameterError::NoAssets)
        );
    }

    #[test]
    fn test_rejects_non_positive_definite() {
        let result = AssetParameters::from_rows(
            vec![0.0, 0.0],
            vec![0.1, 0.1],
            &[vec![1.0, 1.0], vec![1.0, 1.0]],
        );
        assert_eq!(
            result,
            Err(ParameterError::Correlation(
                CorrelationError::NotPositiveDefinite { index: 1 }
            ))
        );
    }

    #[test]
    fn test_zero_volatility_allowed() {
        let params = AssetParameters::uncorrelated(vec![0.1], vec![0.0]).unwrap();
        assert_eq!(params.diffusion_scale(1.0 / 252.0), vec![0.0]);
        assert_relative_eq!(params.log_drift(0.5)[0], 0.05);
    }
}
