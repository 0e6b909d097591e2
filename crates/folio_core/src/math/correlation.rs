//! Correlation matrices and Cholesky factorisation.
//!
//! Given `n` independent standard normal random variables `Z = [Z1, ..., Zn]`,
//! correlated normals `W = [W1, ..., Wn]` are obtained as
//!
//! ```text
//! W = L * Z
//! ```
//!
//! where `L` is the lower triangular Cholesky factor of the correlation
//! matrix `C = L * L^T`.
//!
//! ## Usage
//!
//! ```
//! use folio_core::math::correlation::CorrelationMatrix;
//!
//! let corr = CorrelationMatrix::new(&[
//!     1.0_f64, 0.5,
//!     0.5, 1.0,
//! ], 2).unwrap();
//!
//! let cholesky = corr.cholesky().unwrap();
//! let w = cholesky.transform(&[0.5_f64, 0.8]);
//! assert_eq!(w.len(), 2);
//! ```

use crate::traits::Float;
use crate::types::CorrelationError;

/// Tolerance used for the unit-diagonal and symmetry checks.
pub const CORRELATION_TOLERANCE: f64 = 1e-10;

/// Correlation matrix with validation and Cholesky decomposition.
///
/// A correlation matrix must satisfy:
/// - Square and symmetric
/// - Diagonal elements equal to 1.0
/// - Off-diagonal elements in [-1, 1]
/// - Positive definite (checked by [`cholesky`](Self::cholesky))
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix<T: Float> {
    /// Matrix elements in row-major order
    data: Vec<T>,
    /// Matrix dimension (n x n)
    dim: usize,
}

impl<T: Float> CorrelationMatrix<T> {
    /// Create a new correlation matrix from a flat row-major slice.
    ///
    /// # Errors
    ///
    /// - `InvalidDimensions` if `data.len() != dim * dim`
    /// - `InvalidDiagonal` if a diagonal element differs from 1.0
    /// - `NotSymmetric` if `C[i][j] != C[j][i]`
    /// - `OutOfRange` if an off-diagonal element is outside [-1, 1] or not finite
    pub fn new(data: &[T], dim: usize) -> Result<Self, CorrelationError> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(CorrelationError::InvalidDimensions {
                expected,
                got: data.len(),
            });
        }

        let one = T::one();
        let epsilon = T::from(CORRELATION_TOLERANCE).unwrap_or_else(T::zero);

        for i in 0..dim {
            let diag = data[i * dim + i];
            if !((diag - one).abs() <= epsilon) {
                return Err(CorrelationError::InvalidDiagonal {
                    index: i,
                    value: diag.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];

                if !val_ij.is_finite() || val_ij < -one || val_ij > one {
                    return Err(CorrelationError::OutOfRange {
                        i,
                        j,
                        value: val_ij.to_f64().unwrap_or(f64::NAN),
                    });
                }
                if !((val_ij - val_ji).abs() <= epsilon) {
                    return Err(CorrelationError::NotSymmetric { i, j });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Create a correlation matrix from nested rows.
    ///
    /// # Errors
    ///
    /// `RaggedRow` if any row length differs from the row count, otherwise
    /// the same errors as [`new`](Self::new).
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, CorrelationError> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != dim {
                return Err(CorrelationError::RaggedRow {
                    row,
                    expected: dim,
                    got: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Self::new(&data, dim)
    }

    /// Create an identity correlation matrix (no correlation).
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![T::zero(); dim * dim];
        for i in 0..dim {
            data[i * dim + i] = T::one();
        }
        Self { data, dim }
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.dim + j]
    }

    /// Row-major elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Compute the Cholesky decomposition (lower triangular L with C = L * L^T).
    ///
    /// # Errors
    ///
    /// `NotPositiveDefinite` if a pivot is not strictly positive. Singular
    /// (merely semi-definite) matrices are rejected as well.
    pub fn cholesky(&self) -> Result<CholeskyFactor<T>, CorrelationError> {
        let n = self.dim;
        let mut lower = vec![T::zero(); n * n];

        for i in 0..n {
            for j in 0..=i {
                let mut sum = T::zero();

                if j == i {
                    for k in 0..j {
                        let l_jk = lower[j * n + k];
                        sum = sum + l_jk * l_jk;
                    }
                    let diag = self.get(j, j) - sum;
                    if !(diag > T::zero()) {
                        return Err(CorrelationError::NotPositiveDefinite { index: j });
                    }
                    lower[j * n + j] = diag.sqrt();
                } else {
                    for k in 0..j {
                        sum = sum + lower[i * n + k] * lower[j * n + k];
                    }
                    lower[i * n + j] = (self.get(i, j) - sum) / lower[j * n + j];
                }
            }
        }

        Ok(CholeskyFactor { data: lower, dim: n })
    }
}

/// Lower triangular Cholesky factor of a correlation matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct CholeskyFactor<T: Float> {
    /// Lower triangular matrix elements (row-major)
    data: Vec<T>,
    /// Matrix dimension
    dim: usize,
}

impl<T: Float> CholeskyFactor<T> {
    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j); zero above the diagonal.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        if j > i {
            T::zero()
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// Transform independent standard normals into correlated normals.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() < self.dim()`.
    pub fn transform(&self, z: &[T]) -> Vec<T> {
        let mut w = vec![T::zero(); self.dim];
        self.transform_into(z, &mut w);
        w
    }

    /// Allocation-free `out = L * z`.
    ///
    /// Only the lower triangle is visited, so an identity factor maps `z`
    /// through unchanged and a zero shock stays exactly zero.
    ///
    /// # Panics
    ///
    /// Panics if `z` or `out` is shorter than `self.dim()`.
    #[inline]
    pub fn transform_into(&self, z: &[T], out: &mut [T]) {
        assert!(
            z.len() >= self.dim && out.len() >= self.dim,
            "Input length {} / output length {} less than matrix dimension {}",
            z.len(),
            out.len(),
            self.dim
        );

        let n = self.dim;
        for i in 0..n {
            let row = &self.data[i * n..i * n + i + 1];
            let mut sum = T::zero();
            for (l_ij, z_j) in row.iter().zip(z.iter()) {
                sum = sum + *l_ij * *z_j;
            }
            out[i] = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_cholesky_is_identity() {
        let factor = CorrelationMatrix::<f64>::identity(3).cholesky().unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(factor.get(i, j), expected);
            }
        }
    }

    #[test]
    fn test_two_by_two_factor() {
        let rho = 0.8;
        let corr = CorrelationMatrix::new(&[1.0, rho, rho, 1.0], 2).unwrap();
        let l = corr.cholesky().unwrap();

        assert_relative_eq!(l.get(0, 0), 1.0, epsilon = 1e-15);
        assert_relative_eq!(l.get(1, 0), rho, epsilon = 1e-15);
        assert_relative_eq!(l.get(1, 1), (1.0 - rho * rho).sqrt(), epsilon = 1e-15);
        assert_eq!(l.get(0, 1), 0.0);
    }

    #[test]
    fn test_factor_reconstructs_matrix() {
        let data = [1.0, 0.3, -0.2, 0.3, 1.0, 0.5, -0.2, 0.5, 1.0];
        let corr = CorrelationMatrix::new(&data, 3).unwrap();
        let l = corr.cholesky().unwrap();

        for i in 0..3 {
            for j in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += l.get(i, k) * l.get(j, k);
                }
                assert_relative_eq!(sum, corr.get(i, j), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_rejects_non_symmetric() {
        let result = CorrelationMatrix::new(&[1.0, 0.5, 0.4, 1.0], 2);
        assert_eq!(result, Err(CorrelationError::NotSymmetric { i: 0, j: 1 }));
    }

    #[test]
    fn test_rejects_bad_diagonal() {
        let result = CorrelationMatrix::new(&[2.0, 0.0, 0.0, 1.0], 2);
        assert!(matches!(
            result,
            Err(CorrelationError::InvalidDiagonal { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let result = CorrelationMatrix::new(&[1.0, 1.5, 1.5, 1.0], 2);
        assert!(matches!(result, Err(CorrelationError::OutOfRange { .. })));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let result = CorrelationMatrix::new(&[1.0, 0.0, 0.0], 2);
        assert_eq!(
            result,
            Err(CorrelationError::InvalidDimensions {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_not_positive_definite() {
        // Pairwise valid but jointly inconsistent correlations.
        let data = [1.0, 0.9, -0.9, 0.9, 1.0, 0.9, -0.9, 0.9, 1.0];
        let corr = CorrelationMatrix::new(&data, 3).unwrap();
        assert!(matches!(
            corr.cholesky(),
            Err(CorrelationError::NotPositiveDefinite { .. })
        ));
    }

    #[test]
    fn test_singular_matrix_rejected() {
        let corr = CorrelationMatrix::new(&[1.0, 1.0, 1.0, 1.0], 2).unwrap();
        assert_eq!(
            corr.cholesky(),
            Err(CorrelationError::NotPositiveDefinite { index: 1 })
        );
    }

    #[test]
    fn test_from_rows() {
        let corr = CorrelationMatrix::from_rows(&[vec![1.0, 0.2], vec![0.2, 1.0]]).unwrap();
        assert_eq!(corr.dim(), 2);
        assert_eq!(corr.get(1, 0), 0.2);

        let ragged = CorrelationMatrix::from_rows(&[vec![1.0, 0.2], vec![0.2]]);
        assert!(matches!(ragged, Err(CorrelationError::RaggedRow { row: 1, .. })));
    }

    #[test]
    fn test_transform_into_matches_transform() {
        let corr = CorrelationMatrix::new(&[1.0, 0.6, 0.6, 1.0], 2).unwrap();
        let l = corr.cholesky().unwrap();
        let z = [0.7, -1.1];
        let mut out = [0.0; 2];
        l.transform_into(&z, &mut out);
        assert_eq!(out.to_vec(), l.transform(&z));
        assert_relative_eq!(out[0], 0.7, epsilon = 1e-15);
        assert_relative_eq!(out[1], 0.6 * 0.7 + 0.8 * -1.1, epsilon = 1e-12);
    }
}
