//! Portfolio target weights.
//!
//! Weights may be supplied unnormalised (e.g. `[2, 2, 2]`) and are scaled to
//! sum to one before any rebalanced valuation. Short positions (negative
//! weights) are accepted as long as the total is non-zero.

use crate::error::WeightsError;

/// Divide every weight by the sum of weights.
///
/// # Errors
///
/// `ZeroSum` if the weights sum to zero (or to a non-finite value), `Empty`
/// for an empty slice.
///
/// ```
/// use folio_models::normalize_weights;
///
/// let w = normalize_weights(&[2.0, 2.0, 2.0]).unwrap();
/// assert!(w.iter().all(|x| (x - 1.0 / 3.0).abs() < 1e-15));
/// ```
pub fn normalize_weights(weights: &[f64]) -> Result<Vec<f64>, WeightsError> {
    if weights.is_empty() {
        return Err(WeightsError::Empty);
    }
    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || sum == 0.0 {
        return Err(WeightsError::ZeroSum);
    }
    Ok(weights.iter().map(|w| w / sum).collect())
}

/// Target portfolio weights, one per asset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioWeights(Vec<f64>);

impl PortfolioWeights {
    /// Wrap raw weights.
    ///
    /// # Errors
    ///
    /// `Empty` for no weights, `NonFinite` for NaN or infinite entries.
    /// A zero sum is accepted here and only rejected on normalisation.
    pub fn new(weights: Vec<f64>) -> Result<Self, WeightsError> {
        if weights.is_empty() {
            return Err(WeightsError::Empty);
        }
        if let Some(index) = weights.iter().position(|w| !w.is_finite()) {
            return Err(WeightsError::NonFinite { index });
        }
        Ok(Self(weights))
    }

    /// Equal weights `1/n` for `n` assets; empty for `n = 0`.
    pub fn equal(n: usize) -> Self {
        Self(vec![1.0 / n as f64; n])
    }

    /// Number of weights.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True only for `equal(0)`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw weights.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sum of raw weights.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Weights scaled to sum to one.
    pub fn normalized(&self) -> Result<Self, WeightsError> {
        normalize_weights(&self.0).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_weights() {
        let w = normalize_weights(&[2.0, 2.0, 2.0]).unwrap();
        for x in w {
            assert_relative_eq!(x, 1.0 / 3.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_normalize_with_short_position() {
        let w = normalize_weights(&[1.5, -0.5]).unwrap();
        assert_eq!(w, vec![1.5, -0.5]);
    }

    #[test]
    fn test_zero_sum_is_error() {
        assert_eq!(normalize_weights(&[0.0, 0.0]), Err(WeightsError::ZeroSum));
        assert_eq!(normalize_weights(&[1.0, -1.0]), Err(WeightsError::ZeroSum));
        assert_eq!(normalize_weights(&[]), Err(WeightsError::Empty));
    }

    #[test]
    fn test_tiny_nonzero_sum_normalises() {
        let w = normalize_weights(&[1e-13, 1e-13]).unwrap();
        assert_eq!(w, vec![0.5, 0.5]);
    }

    #[test]
    fn test_non_finite_sum_is_error() {
        assert_eq!(
            normalize_weights(&[f64::MAX, f64::MAX]),
            Err(WeightsError::ZeroSum)
        );
    }

    #[test]
    fn test_portfolio_weights() {
        let w = PortfolioWeights::new(vec![0.2, 0.3, 0.5]).unwrap();
        assert_eq!(w.len(), 3);
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-15);

        let zeros = PortfolioWeights::new(vec![0.0; 4]).unwrap();
        assert_eq!(zeros.normalized(), Err(WeightsError::ZeroSum));

        assert_eq!(
            PortfolioWeights::new(vec![0.5, f64::INFINITY]),
            Err(WeightsError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn test_equal_weights() {
        let w = PortfolioWeights::equal(4);
        assert_eq!(w.as_slice(), &[0.25; 4]);

        let none = PortfolioWeights::equal(0);
        assert!(none.is_empty());
        assert_eq!(none.normalized(), Err(WeightsError::Empty));
    }

    proptest! {
        #[test]
        fn prop_normalised_weights_sum_to_one(
            weights in proptest::collection::vec(0.001f64..100.0, 1..12),
        ) {
            let w = normalize_weights(&weights).unwrap();
            let sum: f64 = w.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-12);
            prop_assert!(w.iter().all(|x| *x > 0.0));
        }

        #[test]
        fn prop_normalisation_is_scale_invariant(
            weights in proptest::collection::vec(0.01f64..10.0, 1..8),
            scale in 0.1f64..1000.0,
        ) {
            let scaled: Vec<f64> = weights.iter().map(|w| w * scale).collect();
            let a = normalize_weights(&weights).unwrap();
            let b = normalize_weights(&scaled).unwrap();
            for (x, y) in a.iter().zip(&b) {
                prop_assert!((x - y).abs() < 1e-12);
            }
        }
    }
}
