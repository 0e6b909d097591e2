//! Rayon-based parallelisation over the path dimension.
//!
//! Every helper here maps independent rows of a flat row-major buffer.
//! Rows never read each other, so parallel and sequential execution give
//! identical results.

use rayon::prelude::*;

/// Batch size for parallel processing.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Rows per rayon task.
    pub batch_size: usize,
    /// Minimum rows before using parallelism.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: 100,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that never spawns rayon tasks.
    pub fn sequential() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns whether to use parallel processing for the given row count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Writes one output row per input row.
///
/// `input` is split into rows of `in_len` values and `output` into rows of
/// `out_len` values; `f` receives the row index, the input row and the
/// output row to fill.
pub fn map_rows_into<F>(
    input: &[f64],
    in_len: usize,
    output: &mut [f64],
    out_len: usize,
    config: &ParallelConfig,
    f: F,
) where
    F: Fn(usize, &[f64], &mut [f64]) + Sync + Send,
{
    debug_assert_eq!(input.len() / in_len.max(1), output.len() / out_len.max(1));
    let n_rows = output.len() / out_len.max(1);
    let batch = config.batch_size.max(1);

    if config.should_parallelize(n_rows) {
        output
            .par_chunks_mut(out_len * batch)
            .zip(input.par_chunks(in_len * batch))
            .enumerate()
            .for_each(|(b, (out_batch, in_batch))| {
                for (offset, (out_row, in_row)) in out_batch
                    .chunks_exact_mut(out_len)
                    .zip(in_batch.chunks_exact(in_len))
                    .enumerate()
                {
                    f(b * batch + offset, in_row, out_row);
                }
            });
    } else {
        for (row, (out_row, in_row)) in output
            .chunks_exact_mut(out_len)
            .zip(input.chunks_exact(in_len))
            .enumerate()
        {
            f(row, in_row, out_row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.parallel_threshold, 100);
        assert_eq!(ParallelConfig::new(0, 5).batch_size, 1);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::default();
        assert!(!config.should_parallelize(50));
        assert!(config.should_parallelize(100));
        assert!(!ParallelConfig::sequential().should_parallelize(1_000_000));
    }

    #[test]
    fn test_map_rows_into_matches_sequential() {
        let input: Vec<f64> = (0..3000).map(f64::from).collect();
        let row_sum = |_: usize, row: &[f64], out: &mut [f64]| {
            out[0] = row.iter().sum();
            out[1] = row[0];
        };

        let mut parallel = vec![0.0; 2 * 1000];
        map_rows_into(&input, 3, &mut parallel, 2, &ParallelConfig::new(7, 1), row_sum);

        let mut sequential = vec![0.0; 2 * 1000];
        map_rows_into(&input, 3, &mut sequential, 2, &ParallelConfig::sequential(), row_sum);

        assert_eq!(parallel, sequential);
        assert_eq!(parallel[2 * 999], 2997.0 + 2998.0 + 2999.0);
    }
}
