//! Order statistics and sample moments.
//!
//! Percentiles use linear interpolation between order statistics: for a
//! sorted sample `x[0..n]` and quantile `q`, the rank is `h = (n - 1) * q`
//! and the result is `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.

use crate::types::StatisticsError;

fn check_quantile(q: f64) -> Result<(), StatisticsError> {
    if (0.0..=1.0).contains(&q) {
        Ok(())
    } else {
        Err(StatisticsError::InvalidQuantile(q))
    }
}

/// Percentile of an already sorted sample, linearly interpolated.
///
/// # Errors
///
/// `EmptySample` for an empty slice, `InvalidQuantile` if `q` is outside [0, 1].
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Result<f64, StatisticsError> {
    check_quantile(q)?;
    let n = sorted.len();
    if n == 0 {
        return Err(StatisticsError::EmptySample);
    }

    let h = (n - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;

    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Percentile of an unsorted sample.
///
/// Sorts a copy with `f64::total_cmp`; the input is left untouched.
///
/// ```
/// use folio_core::math::statistics::percentile;
///
/// let median = percentile(&[3.0, 1.0, 2.0], 0.5).unwrap();
/// assert_eq!(median, 2.0);
/// ```
pub fn percentile(values: &[f64], q: f64) -> Result<f64, StatisticsError> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, q)
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64, StatisticsError> {
    if values.is_empty() {
        return Err(StatisticsError::EmptySample);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation with Bessel's correction (`n - 1` denominator).
pub fn sample_std(values: &[f64]) -> Result<f64, StatisticsError> {
    if values.len() < 2 {
        return Err(StatisticsError::InsufficientData {
            got: values.len(),
            need: 2,
        });
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    Ok((ss / (values.len() - 1) as f64).sqrt())
}

/// Pearson correlation coefficient of two paired samples.
///
/// Returns `NaN` if either sample has zero variance, matching the usual
/// convention for an undefined correlation.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64, StatisticsError> {
    if x.len() != y.len() {
        return Err(StatisticsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(StatisticsError::InsufficientData {
            got: x.len(),
            need: 2,
        });
    }

    let mx = mean(x)?;
    let my = mean(y)?;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    Ok(sxy / (sxx * syy).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentile_linear_interpolation() {
        let returns = [-0.20, -0.10, 0.0, 0.10, 0.20];
        assert_relative_eq!(percentile(&returns, 0.20).unwrap(), -0.12, epsilon = 1e-12);
        assert_relative_eq!(percentile(&returns, 0.0).unwrap(), -0.20, epsilon = 1e-12);
        assert_relative_eq!(percentile(&returns, 1.0).unwrap(), 0.20, epsilon = 1e-12);
        assert_relative_eq!(percentile(&returns, 0.5).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let values = [0.2, -0.2, 0.1, 0.0, -0.1];
        assert_relative_eq!(percentile(&values, 0.2).unwrap(), -0.12, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[4.2], 0.05).unwrap(), 4.2);
    }

    #[test]
    fn test_percentile_errors() {
        assert_eq!(percentile(&[], 0.5), Err(StatisticsError::EmptySample));
        assert_eq!(
            percentile(&[1.0], -0.1),
            Err(StatisticsError::InvalidQuantile(-0.1))
        );
        assert_eq!(
            percentile(&[1.0], 1.1),
            Err(StatisticsError::InvalidQuantile(1.1))
        );
    }

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values).unwrap(), 5.0);
        // Sample variance: 32 / 7
        assert_relative_eq!(sample_std(&values).unwrap(), (32.0_f64 / 7.0).sqrt());
        assert!(sample_std(&[1.0]).is_err());
        assert_eq!(mean(&[]), Err(StatisticsError::EmptySample));
    }

    #[test]
    fn test_pearson_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let z = [8.0, 6.0, 4.0, 2.0];
        assert_relative_eq!(pearson_correlation(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson_correlation(&x, &z).unwrap(), -1.0, epsilon = 1e-12);
        assert!(pearson_correlation(&x, &y[..3]).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn test_percentile_within_sample_range(
                values in prop::collection::vec(-1.0e6_f64..1.0e6, 1..64),
                q in 0.0_f64..=1.0,
            ) {
                let p = percentile(&values, q).unwrap();
                let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(p >= lo - 1e-9 && p <= hi + 1e-9);
            }

            #[test]
            fn test_percentile_monotone_in_quantile(
                values in prop::collection::vec(-1.0e3_f64..1.0e3, 2..64),
                a in 0.0_f64..=1.0,
                b in 0.0_f64..=1.0,
            ) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(percentile(&values, lo).unwrap() <= percentile(&values, hi).unwrap() + 1e-9);
            }
        }
    }
}
