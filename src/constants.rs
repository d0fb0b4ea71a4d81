//! Numeric constants for filter design and parallel scheduling
//!
//! These constants define thresholds and defaults used by the designer and
//! the pooled convolution kernel.

/// Smallest absolute tap sum accepted when normalizing a design to unity DC gain.
pub const MIN_DC_GAIN: f64 = 1e-12;

/// Default number of tasks queued per worker for one pooled convolution.
pub const DEFAULT_TASKS_PER_WORKER: usize = 4;

/// Worker count used when the host parallelism cannot be queried.
pub const FALLBACK_WORKER_COUNT: usize = 4;

/// Default processing block size in samples.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;
