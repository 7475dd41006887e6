//! Configuration options for the equity simulator.
//!
//! This module provides the configuration struct that controls how equity
//! is computed: the exact/sampled crossover, the Monte Carlo trial count,
//! batching, threading and seeding.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of Monte Carlo trials.
pub const DEFAULT_TRIALS: u64 = 10_000;

/// Default upper bound on completions for exhaustive enumeration.
pub const DEFAULT_EXHAUSTIVE_LIMIT: u64 = 250_000;

/// Default number of Monte Carlo trials per batch.
pub const DEFAULT_BATCH_SIZE: u64 = 1_000;

/// How the simulator chooses between exact and sampled equity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSelection {
    /// Enumerate when the completion count is within `exhaustive_limit`,
    /// sample otherwise.
    #[default]
    Auto,
    /// Always enumerate, however many completions there are.
    Exhaustive,
    /// Always sample.
    MonteCarlo,
}

/// Configuration for the equity simulator.
///
/// # Example
/// ```
/// use plo_equity::equity::EquityConfig;
///
/// let config = EquityConfig::default().with_trials(20_000).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// Number of Monte Carlo trials.
    pub trials: u64,

    /// Enumerate exactly when there are at most this many completions
    /// (runout plus every opponent's hole cards).
    pub exhaustive_limit: u64,

    /// Trials per batch. Batches are the unit of parallel work and the
    /// granularity at which cancellation is observed.
    pub batch_size: u64,

    /// Number of worker threads.
    ///
    /// Set to `None` to use the global rayon pool (all available cores).
    pub num_threads: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// If set, sampling is fully reproducible regardless of thread count.
    /// If `None`, the base seed is drawn from the caller's RNG.
    pub seed: Option<u64>,

    /// Exact/sampled selection policy.
    pub mode: ModeSelection,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
            num_threads: None,
            seed: None,
            mode: ModeSelection::Auto,
        }
    }
}

impl EquityConfig {
    /// Create a new EquityConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the Monte Carlo trial count.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Builder method: set the exhaustive enumeration bound.
    pub fn with_exhaustive_limit(mut self, limit: u64) -> Self {
        self.exhaustive_limit = limit;
        self
    }

    /// Builder method: set trials per batch.
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the mode selection policy.
    pub fn with_mode(mut self, mode: ModeSelection) -> Self {
        self.mode = mode;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.num_threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        Ok(())
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
