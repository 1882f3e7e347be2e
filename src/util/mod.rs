//! Utility functions module
//!
//! Contains helper functions for formatting counts, sizes and durations.

pub mod units;

// Re-export commonly used functions
pub use units::{
    format_bytes, format_count,
    format_seconds, format_millis,
    format_speedup,
};
