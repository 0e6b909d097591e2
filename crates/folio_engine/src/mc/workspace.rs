//! Scratch buffers for the per-step inner loop.
//!
//! One [`PathWorkspace`] is allocated per rayon batch and reused for every
//! path and step in that batch, so the inner loop never touches the heap.

/// Per-batch scratch space sized to the number of assets.
///
/// # Examples
///
/// ```rust
/// use folio_engine::mc::PathWorkspace;
///
/// let mut workspace = PathWorkspace::new(3);
/// assert_eq!(workspace.n_assets(), 3);
/// workspace.buffers_mut().2[0] = 0.5;
/// workspace.reset_path();
/// assert!(workspace.log_acc().iter().all(|x| *x == 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct PathWorkspace {
    /// Independent standard normals for the current step.
    normals: Vec<f64>,
    /// Correlated shocks `L z` for the current step.
    shocks: Vec<f64>,
    /// Cumulative log return of the current path.
    log_acc: Vec<f64>,
}

impl PathWorkspace {
    /// Creates a zeroed workspace for `n_assets` assets.
    pub fn new(n_assets: usize) -> Self {
        Self {
            normals: vec![0.0; n_assets],
            shocks: vec![0.0; n_assets],
            log_acc: vec![0.0; n_assets],
        }
    }

    /// Number of assets the buffers are sized for.
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.log_acc.len()
    }

    /// Clears the log accumulator before starting a new path.
    #[inline]
    pub fn reset_path(&mut self) {
        self.log_acc.fill(0.0);
    }

    /// Cumulative log returns of the current path.
    #[inline]
    pub fn log_acc(&self) -> &[f64] {
        &self.log_acc
    }

    /// Splits the workspace into its three buffers.
    ///
    /// Returns `(normals, shocks, log_acc)`.
    #[inline]
    pub fn buffers_mut(&mut self) -> (&mut [f64], &mut [f64], &mut [f64]) {
        (&mut self.normals, &mut self.shocks, &mut self.log_acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_sizes() {
        let mut ws = PathWorkspace::new(4);
        let (normals, shocks, log_acc) = ws.buffers_mut();
        assert_eq!(normals.len(), 4);
        assert_eq!(shocks.len(), 4);
        assert_eq!(log_acc.len(), 4);
        assert_eq!(ws.n_assets(), 4);
    }

    #[test]
    fn test_reset_path_clears_accumulator() {
        let mut ws = PathWorkspace::new(2);
        {
            let (_, _, log_acc) = ws.buffers_mut();
            log_acc[0] = 0.5;
            log_acc[1] = -0.25;
        }
        ws.reset_path();
        assert_eq!(ws.log_acc(), &[0.0, 0.0]);
    }
}
