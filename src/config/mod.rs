//! Configuration management module
//!
//! Handles loading, saving, and validation of the benchmark suite
//! configuration.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::{
    SumBenchError, Result, APP_NAME, CONFIG_FILE, DEFAULT_RANDOM_MAX, DEFAULT_SEQUENCE_LEN,
    DEFAULT_THREAD_COUNTS,
};

/// Largest input length accepted by the driver
pub const MAX_SEQUENCE_LEN: usize = 1 << 31;
/// Largest thread count accepted for a single parallel run
pub const MAX_THREADS: usize = 256;

/// How the driver builds the CPU input sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputKind {
    /// The integers `1..=len`
    Consecutive,
    /// Independent uniform integers in `[0, max)`
    Random {
        /// Exclusive upper bound
        max: u32,
    },
}

impl InputKind {
    /// Get a human-readable description of the input
    pub fn description(&self) -> String {
        match self {
            InputKind::Consecutive => "consecutive integers".to_string(),
            InputKind::Random { max } => format!("random integers in [0, {})", max),
        }
    }
}

/// Benchmark suite configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of elements in the CPU input sequence
    pub sequence_len: usize,
    /// Thread counts for the parallel runs, in execution order
    pub thread_counts: Vec<usize>,
    /// Whether to run the single-threaded baseline first
    pub include_serial: bool,
    /// Whether every parallel sum must equal the serial sum
    pub verify: bool,
    /// Input size for the GPU strategy; `None` skips it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu_size: Option<usize>,
    /// Seed for random input; `None` seeds from entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Input sequence construction
    pub input: InputKind,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sequence_len: DEFAULT_SEQUENCE_LEN,
            thread_counts: DEFAULT_THREAD_COUNTS.to_vec(),
            include_serial: true,
            verify: false,
            gpu_size: None,
            seed: None,
            input: InputKind::Consecutive,
        }
    }
}

impl BenchConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.sequence_len == 0 {
            return Err(SumBenchError::InvalidArgument(
                "Sequence length must be greater than 0".to_string()
            ));
        }

        if self.sequence_len > MAX_SEQUENCE_LEN {
            return Err(SumBenchError::InvalidArgument(
                format!("Sequence too long: {} elements (max: {})",
                    self.sequence_len, MAX_SEQUENCE_LEN)
            ));
        }

        for &threads in &self.thread_counts {
            if threads == 0 {
                return Err(SumBenchError::InvalidArgument(
                    "Thread count must be greater than 0".to_string()
                ));
            }
            if threads > MAX_THREADS {
                return Err(SumBenchError::InvalidArgument(
                    format!("Too many threads: {} (max: {})", threads, MAX_THREADS)
                ));
            }
        }

        if !self.include_serial && self.thread_counts.is_empty() && self.gpu_size.is_none() {
            return Err(SumBenchError::ConfigError(
                "No strategies selected".to_string()
            ));
        }

        if self.verify && !self.include_serial {
            return Err(SumBenchError::ConfigError(
                "Verification needs the serial baseline".to_string()
            ));
        }

        if let InputKind::Random { max } = self.input {
            if max == 0 {
                return Err(SumBenchError::ConfigError(
                    "Random input upper bound must be greater than 0".to_string()
                ));
            }
        }

        if self.gpu_size == Some(0) {
            return Err(SumBenchError::InvalidArgument(
                "GPU input size must be greater than 0".to_string()
            ));
        }

        Ok(())
    }

    /// Set the input length
    pub fn with_sequence_len(mut self, len: usize) -> Self {
        self.sequence_len = len;
        self
    }

    /// Set the thread counts for the parallel runs
    pub fn with_thread_counts(mut self, counts: Vec<usize>) -> Self {
        self.thread_counts = counts;
        self
    }

    /// Enable or disable the serial baseline
    pub fn with_serial(mut self, include: bool) -> Self {
        self.include_serial = include;
        self
    }

    /// Enable or disable result verification
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Set the GPU input size
    pub fn with_gpu_size(mut self, size: Option<usize>) -> Self {
        self.gpu_size = size;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the input kind
    pub fn with_input(mut self, input: InputKind) -> Self {
        self.input = input;
        self
    }

    /// Random input in `[0, 1000)`, as in the OpenMP-style harness
    pub fn random_input() -> Self {
        Self {
            input: InputKind::Random { max: DEFAULT_RANDOM_MAX },
            ..Self::default()
        }
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load and validate configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SumBenchError::ConfigError(
                format!("Failed to read config file {}: {}", path.display(), e)
            ))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| SumBenchError::ConfigError(
                format!("Failed to parse config file {}: {}", path.display(), e)
            ))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate and write configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SumBenchError::ConfigError(
                    format!("Failed to create config directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content)
            .map_err(|e| SumBenchError::ConfigError(
                format!("Failed to write config file {}: {}", path.display(), e)
            ))?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/sumbench/sumbench.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SumBenchError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
