//! Simulated price paths.
//!
//! [`PathEnsemble`] stores prices for `P` paths, `T + 1` time points and
//! `N` assets in one contiguous row-major buffer:
//!
//! ```text
//! data[(path * (T + 1) + t) * N + asset]
//! ```
//!
//! Time index 0 holds the initial prices.

use super::error::SimulationError;

/// Price paths of shape `(n_paths, n_steps + 1, n_assets)`.
#[derive(Clone, Debug, PartialEq)]
pub struct PathEnsemble {
    data: Vec<f64>,
    n_paths: usize,
    n_times: usize,
    n_assets: usize,
    seed: Option<u64>,
}

impl PathEnsemble {
    /// Wraps a flat buffer.
    ///
    /// `n_times` counts the initial point, so a simulation of `T` steps has
    /// `n_times = T + 1`. `n_paths` may be zero.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if `n_times` or `n_assets` is zero,
    /// `ShapeMismatch` if `data.len() != n_paths * n_times * n_assets`.
    pub fn new(
        data: Vec<f64>,
        n_paths: usize,
        n_times: usize,
        n_assets: usize,
    ) -> Result<Self, SimulationError> {
        if n_times == 0 {
            return Err(SimulationError::InvalidDimension {
                name: "n_times",
                value: n_times,
            });
        }
        if n_assets == 0 {
            return Err(SimulationError::InvalidDimension {
                name: "n_assets",
                value: n_assets,
            });
        }
        let expected = n_paths * n_times * n_assets;
        if data.len() != expected {
            return Err(SimulationError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            n_paths,
            n_times,
            n_assets,
            seed: None,
        })
    }

    /// Builds an ensemble from `paths[p][t][i]`.
    ///
    /// Mostly useful for hand-written fixtures.
    ///
    /// ```rust
    /// use folio_engine::mc::PathEnsemble;
    ///
    /// let paths = PathEnsemble::from_nested(&[vec![
    ///     vec![100.0, 50.0],
    ///     vec![110.0, 55.0],
    /// ]])
    /// .unwrap();
    /// assert_eq!(paths.shape(), (1, 2, 2));
    /// assert_eq!(paths.price(0, 1, 1), 55.0);
    /// ```
    pub fn from_nested(paths: &[Vec<Vec<f64>>]) -> Result<Self, SimulationError> {
        let n_paths = paths.len();
        let n_times = paths.first().map(Vec::len).unwrap_or(1);
        let n_assets = paths
            .first()
            .and_then(|p| p.first())
            .map(Vec::len)
            .unwrap_or(1);

        let mut data = Vec::with_capacity(n_paths * n_times * n_assets);
        for path in paths {
            if path.len() != n_times {
                return Err(SimulationError::ShapeMismatch {
                    expected: n_times * n_assets,
                    got: path.iter().map(Vec::len).sum(),
                });
            }
            for row in path {
                if row.len() != n_assets {
                    return Err(SimulationError::ShapeMismatch {
                        expected: n_assets,
                        got: row.len(),
                    });
                }
                data.extend_from_slice(row);
            }
        }

        Self::new(data, n_paths, n_times, n_assets)
    }

    pub(crate) fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// `(n_paths, n_steps + 1, n_assets)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_paths, self.n_times, self.n_assets)
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of simulated steps, excluding the initial point.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_times - 1
    }

    /// Number of time points, including the initial point.
    #[inline]
    pub fn n_times(&self) -> usize {
        self.n_times
    }

    /// Number of assets.
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Whether the ensemble holds no paths.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_paths == 0
    }

    /// Seed that produced the ensemble, if it was simulated.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Price of `asset` at time `t` on path `path`.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of range.
    #[inline]
    pub fn price(&self, path: usize, t: usize, asset: usize) -> f64 {
        assert!(path < self.n_paths && t < self.n_times && asset < self.n_assets);
        self.data[(path * self.n_times + t) * self.n_assets + asset]
    }

    /// All prices of one path, row-major `(n_times, n_assets)`.
    #[inline]
    pub fn path(&self, path: usize) -> &[f64] {
        let stride = self.n_times * self.n_assets;
        &self.data[path * stride..(path + 1) * stride]
    }

    /// Prices of every asset at time `t` on one path.
    #[inline]
    pub fn time_slice(&self, path: usize, t: usize) -> &[f64] {
        let start = (path * self.n_times + t) * self.n_assets;
        &self.data[start..start + self.n_assets]
    }

    /// Iterator over paths, each a row-major `(n_times, n_assets)` slice.
    pub fn paths(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.n_times * self.n_assets)
    }

    /// Initial prices (time 0 of the first path).
    pub fn initial_prices(&self) -> Option<&[f64]> {
        (self.n_paths > 0).then(|| self.time_slice(0, 0))
    }

    /// Terminal prices of every asset on one path.
    #[inline]
    pub fn terminal_prices(&self, path: usize) -> &[f64] {
        self.time_slice(path, self.n_times - 1)
    }

    /// Underlying flat buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
