//! Correlated GBM path generation.
//!
//! Paths are written in row-major order:
//! `data[(path * (n_steps + 1) + t) * n_assets + asset]`, where `t = 0`
//! holds the initial prices.
//!
//! Work is split into batches of `batch_size` paths. Each batch owns one
//! [`PathWorkspace`] and each path owns one RNG substream keyed by its
//! global index, so batching never changes the numbers produced.

use folio_core::math::CholeskyFactor;
use folio_models::AssetParameters;
use rayon::prelude::*;
use tracing::{debug, info};

use super::config::SimulationConfig;
use super::ensemble::PathEnsemble;
use super::error::SimulationError;
use super::workspace::PathWorkspace;
use crate::rng::SimRng;

/// Per-step coefficients shared by every path.
struct StepCoefficients<'a> {
    s0: &'a [f64],
    drift: Vec<f64>,
    scale: Vec<f64>,
    cholesky: &'a CholeskyFactor<f64>,
}

fn check_initial_prices(params: &AssetParameters, s0: &[f64]) -> Result<(), SimulationError> {
    if s0.len() != params.n_assets() {
        return Err(SimulationError::InitialPriceLength {
            expected: params.n_assets(),
            got: s0.len(),
        });
    }
    for (index, &value) in s0.iter().enumerate() {
        if !(value > 0.0 && value.is_finite()) {
            return Err(SimulationError::InvalidInitialPrice { index, value });
        }
    }
    Ok(())
}

/// Fills one path buffer of `(n_steps + 1) * n_assets` prices.
#[inline]
fn simulate_path(
    path: &mut [f64],
    coeffs: &StepCoefficients<'_>,
    rng: &mut SimRng,
    workspace: &mut PathWorkspace,
) {
    let n = coeffs.s0.len();
    workspace.reset_path();
    let (normals, shocks, log_acc) = workspace.buffers_mut();

    let mut rows = path.chunks_exact_mut(n);
    if let Some(first) = rows.next() {
        first.copy_from_slice(coeffs.s0);
    }

    for row in rows {
        rng.fill_normal(normals);
        coeffs.cholesky.transform_into(normals, shocks);
        for i in 0..n {
            log_acc[i] += coeffs.drift[i] + coeffs.scale[i] * shocks[i];
            row[i] = coeffs.s0[i] * log_acc[i].exp();
        }
    }
}

/// Simulates one batch of consecutive paths starting at `first_path`.
fn run_batch(
    chunk: &mut [f64],
    first_path: usize,
    path_len: usize,
    seed: u64,
    coeffs: &StepCoefficients<'_>,
) {
    let mut workspace = PathWorkspace::new(coeffs.s0.len());
    for (offset, path) in chunk.chunks_exact_mut(path_len).enumerate() {
        let mut rng = SimRng::for_stream(seed, (first_path + offset) as u64);
        simulate_path(path, coeffs, &mut rng, &mut workspace);
    }
}

/// Simulates correlated GBM price paths.
///
/// Returns an ensemble of shape `(n_paths, n_steps + 1, n_assets)` whose
/// first time slice equals `s0` on every path.
///
/// When the configuration carries no seed, one is drawn from OS entropy
/// and logged; it is also available from [`PathEnsemble::seed`].
///
/// # Errors
///
/// - `Config` if the configuration fails validation
/// - `InitialPriceLength` if `s0.len() != params.n_assets()`
/// - `InvalidInitialPrice` for a zero, negative or non-finite initial price
pub fn simulate(
    params: &AssetParameters,
    s0: &[f64],
    config: &SimulationConfig,
) -> Result<PathEnsemble, SimulationError> {
    config.validate()?;
    check_initial_prices(params, s0)?;

    let seed = match config.seed() {
        Some(seed) => seed,
        None => {
            let (_, seed) = SimRng::from_entropy();
            info!(seed, "no seed configured, drew one from OS entropy");
            seed
        }
    };

    let n_assets = params.n_assets();
    let n_paths = config.n_paths();
    let n_times = config.n_steps() + 1;
    let path_len = n_times * n_assets;
    let batch_size = config.batch_size();

    info!(
        n_paths,
        n_steps = config.n_steps(),
        n_assets,
        dt = config.dt(),
        seed,
        "simulating correlated GBM paths"
    );

    let coeffs = StepCoefficients {
        s0,
        drift: params.log_drift(config.dt()),
        scale: params.diffusion_scale(config.dt()),
        cholesky: params.cholesky(),
    };

    let mut data = vec![0.0; n_paths * path_len];

    let n_batches = n_paths.div_ceil(batch_size);
    if config.parallel() && n_batches > 1 {
        debug!(n_batches, batch_size, "running path batches on rayon pool");
        data.par_chunks_mut(batch_size * path_len)
            .enumerate()
            .for_each(|(batch_idx, chunk)| {
                run_batch(chunk, batch_idx * batch_size, path_len, seed, &coeffs)
            });
    } else {
        debug!(n_batches, batch_size, "running path batches sequentially");
        data.chunks_mut(batch_size * path_len)
            .enumerate()
            .for_each(|(batch_idx, chunk)| {
                run_batch(chunk, batch_idx * batch_size, path_len, seed, &coeffs)
            });
    }

    Ok(PathEnsemble::new(data, n_paths, n_times, n_assets)?.with_seed(seed))
}

/// Flat-argument form of [`simulate`].
///
/// Validates `mu`, `sigma` and `correlation` into [`AssetParameters`] and
/// builds a [`SimulationConfig`] with default batching.
///
/// ```rust
/// use folio_engine::mc::simulate_gbm;
///
/// let paths = simulate_gbm(
///     &[0.05, 0.03],
///     &[0.0, 0.0],
///     &[vec![1.0, 0.0], vec![0.0, 1.0]],
///     &[100.0, 10.0],
///     10,
///     4,
///     1.0 / 252.0,
///     Some(1),
/// )
/// .unwrap();
/// assert_eq!(paths.shape(), (4, 11, 2));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn simulate_gbm(
    mu: &[f64],
    sigma: &[f64],
    correlation: &[Vec<f64>],
    s0: &[f64],
    n_steps: usize,
    n_paths: usize,
    dt: f64,
    seed: Option<u64>,
) -> Result<PathEnsemble, SimulationError> {
    let params = AssetParameters::from_rows(mu.to_vec(), sigma.to_vec(), correlation)?;
    let config = SimulationConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .dt(dt)
        .maybe_seed(seed)
        .build()?;
    simulate(&params, s0, &config)
}
