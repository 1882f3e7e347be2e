//! Single-threaded baseline engine

use tracing::debug;
use crate::{SumBenchError, Result};
use super::element::Element;
use super::reducer::reduce;

/// Sums the whole sequence as one partition on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialEngine;

impl SerialEngine {
    pub fn new() -> Self {
        Self
    }

    /// Sum `sequence` without any concurrency
    pub fn run<T: Element>(&self, sequence: &[T]) -> Result<T> {
        debug!(len = sequence.len(), "serial reduction");
        reduce(sequence).map_err(|fault| {
            SumBenchError::WorkerFailure(format!("serial reduction failed: {}", fault))
        })
    }
}
