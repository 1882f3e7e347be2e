//! Benchmark driver module
//!
//! Input construction, the strategy abstraction shared by CPU and GPU
//! reductions, and the suite driver that runs them.

pub mod driver;
pub mod input;
pub mod strategy;

// Re-export commonly used types
pub use driver::{run_suite, BenchmarkDriver};
pub use input::build_input;
pub use strategy::{ParallelStrategy, ReductionStrategy, SerialStrategy, SERIAL_LABEL};
