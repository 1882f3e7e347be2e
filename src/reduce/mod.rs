//! Reduction core
//!
//! Partitioning, per-partition summation, the serial and parallel engines,
//! and the timer that wraps them.

pub mod element;
pub mod parallel;
pub mod partition;
pub mod reducer;
pub mod serial;
pub mod timer;

// Re-export commonly used types
pub use element::{summation_error_bound, sums_agree, Element};
pub use parallel::{ParallelEngine, ParallelReduction, WorkerSlot};
pub use partition::{partition, partition_ranges, Partition};
pub use reducer::{reduce, ReduceFault};
pub use serial::SerialEngine;
pub use timer::{measure, Stopwatch};
