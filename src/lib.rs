//! SUMBENCH - Summation strategy micro-benchmark
//!
//! Compares a single-threaded reduction, a partitioned multi-threaded
//! reduction and an accelerator-backed reduction over the same input size.

use std::fmt;

// Public re-exports
pub mod bench;
pub mod config;
pub mod gpu;
pub mod models;
pub mod reduce;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum SumBenchError {
    /// A count or length outside its allowed range
    InvalidArgument(String),
    /// One or more reduction workers failed
    WorkerFailure(String),
    /// Accelerator unavailable, out of memory or failed to synchronize
    DeviceFailure(String),
    /// A strategy produced a sum that disagrees with the serial baseline
    ResultMismatch(String),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// I/O operation failed
    IoError(std::io::Error),
    /// Report serialization error
    OutputError(String),
}

impl fmt::Display for SumBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SumBenchError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            SumBenchError::WorkerFailure(msg) => write!(f, "Worker failure: {}", msg),
            SumBenchError::DeviceFailure(msg) => write!(f, "Device failure: {}", msg),
            SumBenchError::ResultMismatch(msg) => write!(f, "Result mismatch: {}", msg),
            SumBenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SumBenchError::IoError(err) => write!(f, "I/O error: {}", err),
            SumBenchError::OutputError(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for SumBenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SumBenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SumBenchError {
    fn from(err: std::io::Error) -> Self {
        SumBenchError::IoError(err)
    }
}

impl From<serde_json::Error> for SumBenchError {
    fn from(err: serde_json::Error) -> Self {
        SumBenchError::OutputError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for SumBenchError {
    fn from(err: toml::de::Error) -> Self {
        SumBenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for SumBenchError {
    fn from(err: toml::ser::Error) -> Self {
        SumBenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for SUMBENCH operations
pub type Result<T> = std::result::Result<T, SumBenchError>;

/// Error reporting helpers for the command-line front end
pub mod error {
    use super::SumBenchError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &SumBenchError) -> String {
        match error {
            SumBenchError::InvalidArgument(msg) => {
                format!("Invalid argument: {}. Thread counts and sizes must be at least 1.", msg)
            }
            SumBenchError::WorkerFailure(msg) => {
                format!(
                    "Reduction failed: {}. Try a wider element type or a smaller input.",
                    msg
                )
            }
            SumBenchError::DeviceFailure(msg) => {
                format!("GPU reduction failed: {}. Drop --gpu-size to run CPU strategies only.", msg)
            }
            SumBenchError::ResultMismatch(msg) => {
                format!("Results do not match: {}", msg)
            }
            SumBenchError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            _ => error.to_string(),
        }
    }

    /// Process exit code for an error, distinct per failure class
    pub fn exit_code(error: &SumBenchError) -> i32 {
        match error {
            SumBenchError::InvalidArgument(_) | SumBenchError::ConfigError(_) => 2,
            SumBenchError::ResultMismatch(_) => 3,
            SumBenchError::DeviceFailure(_) => 4,
            _ => 1,
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "sumbench";
pub const CONFIG_FILE: &str = "sumbench.toml";
pub const DEFAULT_SEQUENCE_LEN: usize = 100_000_000;
pub const DEFAULT_THREAD_COUNTS: [usize; 3] = [2, 4, 8];
pub const DEFAULT_RANDOM_MAX: u32 = 1000;
