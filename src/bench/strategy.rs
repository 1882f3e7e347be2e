//! Interchangeable summation strategies
//!
//! Every strategy yields a [`BenchmarkResult`]: a sum and an elapsed time.
//! CPU strategies share the driver's input and time the engine call with
//! the host timer. The GPU strategy lives in [`crate::gpu`].

use std::sync::Arc;
use crate::models::BenchmarkResult;
use crate::reduce::{measure, Element, ParallelEngine, SerialEngine};
use crate::Result;

/// Label of the single-threaded baseline
pub const SERIAL_LABEL: &str = "Serial";

/// A way of computing the benchmark sum
pub trait ReductionStrategy: Send + Sync {
    /// Human-readable strategy identifier
    fn label(&self) -> String;

    /// Run the reduction once and time it
    fn run(&self) -> Result<BenchmarkResult>;
}

/// Single-threaded baseline over a shared input
pub struct SerialStrategy<T> {
    input: Arc<[T]>,
    engine: SerialEngine,
}

impl<T: Element> SerialStrategy<T> {
    pub fn new(input: Arc<[T]>) -> Self {
        Self {
            input,
            engine: SerialEngine::new(),
        }
    }
}

impl<T: Element> ReductionStrategy for SerialStrategy<T> {
    fn label(&self) -> String {
        SERIAL_LABEL.to_string()
    }

    fn run(&self) -> Result<BenchmarkResult> {
        let (sum, elapsed) = measure(|| self.engine.run(&self.input[..]));
        Ok(BenchmarkResult::host(self.label(), sum?.to_sum_value(), elapsed))
    }
}

/// Partitioned multi-threaded reduction over a shared input
pub struct ParallelStrategy<T> {
    input: Arc<[T]>,
    engine: ParallelEngine,
}

impl<T: Element> ParallelStrategy<T> {
    /// Create a strategy running `num_threads` partitions
    pub fn new(input: Arc<[T]>, num_threads: usize) -> Result<Self> {
        Ok(Self {
            input,
            engine: ParallelEngine::new(num_threads)?,
        })
    }
}

impl<T: Element> ReductionStrategy for ParallelStrategy<T> {
    fn label(&self) -> String {
        format!("{} Threads", self.engine.num_threads())
    }

    fn run(&self) -> Result<BenchmarkResult> {
        let (sum, elapsed) = measure(|| self.engine.run(&self.input[..]));
        Ok(BenchmarkResult::host(self.label(), sum?.to_sum_value(), elapsed))
    }
}
