//! Data models module
//!
//! Contains per-strategy benchmark results and the suite report.

pub mod result;

// Re-export commonly used types
pub use result::{
    BenchmarkResult,
    ClockSource,
    HostInfo,
    SumValue,
    SuiteReport,
};
