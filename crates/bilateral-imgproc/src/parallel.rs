use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid.
    #[error("row stride must be > 0, got {0}")]
    InvalidRowStride(usize),

    /// The buffer is not a whole number of rows.
    #[error("buffer length {0} is not a multiple of the row stride {1}")]
    SizeMismatch(usize, usize),
}

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Minimum number of pixels before the default strategy goes parallel.
    pub const PARALLEL_THRESHOLD: usize = 64 * 64;

    /// Whether this strategy should fan out work for an image of `num_pixels`.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::ParallelRows => num_pixels >= Self::PARALLEL_THRESHOLD,
            ExecutionStrategy::Fixed(_) => true,
        }
    }
}

/// Run `op` on every row of `dst` according to `strategy`.
///
/// `dst` is split into rows of `row_stride` elements and `op` receives the row index together
/// with the mutable row. Rows never alias, so `op` only needs shared access to its inputs.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `dst` - The destination buffer, a whole number of rows.
/// * `row_stride` - Number of elements per row (width * channels).
/// * `op` - The operation to perform on each `(row index, row)` pair.
///
/// # Example
///
/// ```
/// use bilateral_imgproc::parallel::{execute_rows, ExecutionStrategy};
///
/// let mut dst = vec![0usize; 6];
/// execute_rows(ExecutionStrategy::Serial, &mut dst, 3, |r, row| {
///     row.iter_mut().for_each(|v| *v = r);
/// })
/// .unwrap();
/// assert_eq!(dst, vec![0, 0, 0, 1, 1, 1]);
/// ```
pub fn execute_rows<T, F>(
    strategy: ExecutionStrategy,
    dst: &mut [T],
    row_stride: usize,
    op: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if row_stride == 0 {
        return Err(ParallelError::InvalidRowStride(row_stride));
    }
    if dst.len() % row_stride != 0 {
        return Err(ParallelError::SizeMismatch(dst.len(), row_stride));
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(r, row)| op(r, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(r, row)| op(r, row));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each(|(r, row)| op(r, row));
            });
        }
    }

    Ok(())
}
