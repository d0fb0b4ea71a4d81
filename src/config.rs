//! Configuration for the firstream filter engine.
//!
//! Every section has sensible defaults; a TOML file only needs the values it
//! overrides:
//!
//! ```toml
//! [design]
//! method = "hann"
//! taps = 101
//! bandwidth = 0.1
//!
//! [stream]
//! block_size = 512
//!
//! [parallel]
//! enabled = true
//! workers = 4
//! ```

use crate::constants::{DEFAULT_BLOCK_SIZE, DEFAULT_TASKS_PER_WORKER, FALLBACK_WORKER_COUNT};
use crate::error::{FilterError, Result};
use crate::signal_processing::{DesignMethod, DesignRequest, design};
use serde::Deserialize;
use std::thread;

/// Top-level configuration
///
/// # Example
/// ```
/// use firstream::config::FirstreamConfig;
///
/// let config = FirstreamConfig::from_toml_str("[stream]\nblock_size = 256").unwrap();
/// assert_eq!(config.stream.block_size, 256);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirstreamConfig {
    /// Filter design parameters
    pub design: DesignConfig,
    /// Block processing parameters
    pub stream: StreamConfig,
    /// Pooled convolution parameters
    pub parallel: ParallelConfig,
}

/// Filter design parameters as written in a configuration file
///
/// Tap counts are signed so that negative values in a file are reported as
/// invalid parameters rather than as parse errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignConfig {
    /// Design method
    pub method: DesignMethod,
    /// Number of numerator taps
    pub taps: i64,
    /// Number of denominator taps (only 0 is supported)
    pub denominator_taps: i64,
    /// Normalized bandwidth, 0.5 = half the sample rate
    pub bandwidth: f64,
}

/// Block processing parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamConfig {
    /// Samples handed to the filter per call
    pub block_size: usize,
}

/// Pooled convolution parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Use the pooled kernel instead of the sequential one
    pub enabled: bool,
    /// Number of worker threads
    pub workers: usize,
    /// Tasks queued per worker for each convolution
    pub tasks_per_worker: usize,
}

impl FirstreamConfig {
    /// Parse a TOML document, filling unspecified values with defaults
    ///
    /// # Errors
    /// Returns `FilterError::Config` if the document is malformed or has unknown keys
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FilterError::Config(e.to_string()))
    }

    /// Check every section before any filter or pool is built
    ///
    /// The design section is validated by running the design once.
    pub fn validate(&self) -> Result<()> {
        design(&DesignRequest::try_from(&self.design)?)?;
        if self.stream.block_size == 0 {
            return Err(FilterError::InvalidParameter(
                "block size must be at least 1".into(),
            ));
        }
        if self.parallel.enabled && self.parallel.workers == 0 {
            return Err(FilterError::InvalidParameter(
                "parallel convolution needs at least one worker".into(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<&DesignConfig> for DesignRequest {
    type Error = FilterError;

    fn try_from(config: &DesignConfig) -> Result<Self> {
        let count = |value: i64, name: &str| {
            usize::try_from(value).map_err(|_| {
                FilterError::InvalidParameter(format!("{} must not be negative, got {}", name, value))
            })
        };

        Ok(DesignRequest {
            method: config.method,
            numerator_taps: count(config.taps, "taps")?,
            denominator_taps: count(config.denominator_taps, "denominator_taps")?,
            bandwidth: config.bandwidth,
        })
    }
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            method: DesignMethod::Hamming,
            taps: 63,
            denominator_taps: 0,
            bandwidth: 0.25,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            workers: thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(FALLBACK_WORKER_COUNT),
            tasks_per_worker: DEFAULT_TASKS_PER_WORKER,
        }
    }
}
