//! Integration tests for module exports.
//!
//! Verifies that the public modules and types are reachable via absolute paths.

#[test]
fn test_math_module_exports() {
    use folio_core::math::statistics::{mean, pearson_correlation, percentile, sample_std};
    use folio_core::math::{CholeskyFactor, CorrelationMatrix};

    let corr: CorrelationMatrix<f64> = CorrelationMatrix::identity(2);
    let factor: CholeskyFactor<f64> = corr.cholesky().unwrap();
    assert_eq!(factor.dim(), 2);

    let sample = [1.0, 2.0, 3.0];
    assert_eq!(mean(&sample).unwrap(), 2.0);
    assert_eq!(percentile(&sample, 0.5).unwrap(), 2.0);
    assert!(sample_std(&sample).unwrap() > 0.0);
    assert!(pearson_correlation(&sample, &sample).unwrap() > 0.999);
}

#[test]
fn test_types_module_exports() {
    use folio_core::types::error::{CorrelationError, StatisticsError};

    let err: Box<dyn std::error::Error> = Box::new(CorrelationError::NotPositiveDefinite { index: 0 });
    assert!(err.to_string().contains("positive definite"));

    let err: Box<dyn std::error::Error> = Box::new(StatisticsError::EmptySample);
    assert_eq!(err.to_string(), "Sample is empty");
}

#[test]
fn test_float_trait_export() {
    use folio_core::traits::Float;

    fn half<T: Float>(x: T) -> T {
        x / (T::one() + T::one())
    }
    assert_eq!(half(3.0_f64), 1.5);
}
