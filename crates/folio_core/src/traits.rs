//! Core numeric traits.

/// Generic floating-point trait for numeric computations.
///
/// The linear-algebra layer is written against this trait so that it works
/// for both `f64` and `f32`. The simulation engine itself always runs in
/// `f64` to keep compounding error negligible over hundreds of steps.
///
/// # Examples
/// ```
/// use folio_core::traits::Float;
///
/// fn log_drift<T: Float>(mu: T, sigma: T, dt: T) -> T {
///     let half = T::from(0.5).unwrap();
///     (mu - half * sigma * sigma) * dt
/// }
///
/// let drift: f64 = log_drift(0.1, 0.2, 1.0);
/// assert!((drift - 0.08).abs() < 1e-12);
/// ```
pub use num_traits::Float;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_trait_with_f64() {
        fn generic_exp<T: Float>(x: T) -> T {
            x.exp()
        }

        assert_eq!(generic_exp(0.0_f64), 1.0);
    }
}
