use crate::config::ParallelConfig;
use crate::constants::DEFAULT_TASKS_PER_WORKER;
use crate::error::{FilterError, Result};
use crate::signal_processing::convolution::{check_operands, order_operands, output_at};
use crate::signal_processing::{Convolver, Sample};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::panic::{self, AssertUnwindSafe};

/// Convolution kernel that spreads output indices over an owned rayon pool
///
/// Produces exactly the samples `convolve` would: the output is cut into
/// contiguous chunks, every index is computed by one task with the same
/// ramp/steady logic, and `convolve` returns only after every chunk is done.
///
/// The pool is sized once, reused for every call and released on drop.
pub struct ParallelConvolver {
    pool: ThreadPool,
    tasks_per_worker: usize,
}

impl ParallelConvolver {
    /// Create a convolver backed by `workers` threads
    ///
    /// # Errors
    /// Returns `FilterError::InvalidParameter` if `workers` is zero
    pub fn new(workers: usize) -> Result<Self> {
        Self::with_tasks_per_worker(workers, DEFAULT_TASKS_PER_WORKER)
    }

    /// Create a convolver from the parallel section of the configuration
    pub fn with_config(config: &ParallelConfig) -> Result<Self> {
        Self::with_tasks_per_worker(config.workers, config.tasks_per_worker)
    }

    /// Create a convolver that splits each call into `tasks_per_worker` chunks per worker
    ///
    /// # Errors
    /// Returns `FilterError::InvalidParameter` if either count is zero, or
    /// `FilterError::WorkerPool` if the threads cannot be started
    pub fn with_tasks_per_worker(workers: usize, tasks_per_worker: usize) -> Result<Self> {
        if workers == 0 {
            return Err(FilterError::InvalidParameter(
                "parallel convolution needs at least one worker".into(),
            ));
        }
        if tasks_per_worker == 0 {
            return Err(FilterError::InvalidParameter(
                "tasks per worker must be at least 1".into(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("firstream-worker-{}", i))
            .build()
            .map_err(|e| FilterError::WorkerPool(format!("start {} workers: {}", workers, e)))?;

        log::debug!("Convolution pool started with {} workers", workers);

        Ok(Self {
            pool,
            tasks_per_worker,
        })
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Full linear convolution of `a` and `b`
    ///
    /// # Errors
    /// Returns `FilterError::InvalidInput` if either operand is empty, or
    /// `FilterError::WorkerPool` if a task panicked. The pool stays usable
    /// after a panicking call.
    pub fn convolve<T: Sample>(&self, a: &[T], b: &[T]) -> Result<Vec<T>> {
        check_operands(a.len(), b.len())?;
        let (long, short) = order_operands(a, b);
        let out_len = long.len() + short.len() - 1;
        let chunk_len = self.chunk_len(out_len);

        let mut output = vec![T::zero(); out_len];
        let computed = panic::catch_unwind(AssertUnwindSafe(|| {
            self.pool.install(|| {
                output
                    .par_chunks_mut(chunk_len)
                    .enumerate()
                    .for_each(|(chunk, out)| {
                        let start = chunk * chunk_len;
                        for (offset, sample) in out.iter_mut().enumerate() {
                            *sample = output_at(long, short, start + offset);
                        }
                    });
            })
        }));

        if computed.is_err() {
            log::warn!(
                "Convolution task panicked ({}x{} samples)",
                long.len(),
                short.len()
            );
            return Err(FilterError::WorkerPool(
                "convolution task panicked".into(),
            ));
        }

        log::trace!(
            "Pooled convolution of {}x{} samples in {} chunks",
            long.len(),
            short.len(),
            out_len.div_ceil(chunk_len)
        );

        Ok(output)
    }

    /// Length of each contiguous chunk so `0..out_len` is cut into at most
    /// `workers × tasks_per_worker` non-empty pieces
    fn chunk_len(&self, out_len: usize) -> usize {
        let task_count = (self.workers() * self.tasks_per_worker).clamp(1, out_len.max(1));
        out_len.div_ceil(task_count).max(1)
    }
}

impl<T: Sample> Convolver<T> for ParallelConvolver {
    fn convolve(&self, a: &[T], b: &[T]) -> Result<Vec<T>> {
        ParallelConvolver::convolve(self, a, b)
    }
}
