//! Partitioned multi-threaded reduction engine
//!
//! Splits the sequence with the partitioner, spawns one scoped OS thread per
//! partition, waits for all of them, then combines the partial sums in
//! partition order. Every worker is handed a `&mut` to its own result slot,
//! so no two workers can write the same slot and no lock is needed.

use std::thread;
use tracing::{debug, warn};
use crate::{SumBenchError, Result};
use super::element::Element;
use super::partition::partition;
use super::reducer::{reduce, ReduceFault};

/// Outcome recorded by one worker in its slot
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerSlot<T> {
    /// Never written: the worker panicked or could not be spawned
    Pending,
    /// Partial sum of the worker's partition
    Done(T),
    /// The reduction itself failed
    Faulted(ReduceFault),
}

impl<T> WorkerSlot<T> {
    /// Check if the worker completed successfully
    pub fn is_done(&self) -> bool {
        matches!(self, WorkerSlot::Done(_))
    }
}

/// Sum plus the per-partition partials that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelReduction<T> {
    /// Combined sum of all partials
    pub total: T,
    /// One partial per partition, in partition order (trailing remainder last)
    pub partials: Vec<T>,
}

/// Multi-threaded engine with a fixed number of partitions
#[derive(Debug, Clone, Copy)]
pub struct ParallelEngine {
    num_threads: usize,
}

impl ParallelEngine {
    /// Create an engine that splits work into `num_threads` partitions
    pub fn new(num_threads: usize) -> Result<Self> {
        if num_threads == 0 {
            return Err(SumBenchError::InvalidArgument(
                "Thread count must be greater than 0".to_string()
            ));
        }
        Ok(Self { num_threads })
    }

    /// Configured partition count (excluding the trailing remainder)
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Sum `sequence` across worker threads
    pub fn run<T: Element>(&self, sequence: &[T]) -> Result<T> {
        self.run_detailed(sequence).map(|reduction| reduction.total)
    }

    /// Sum `sequence` and keep the partial sum of every partition
    pub fn run_detailed<T: Element>(&self, sequence: &[T]) -> Result<ParallelReduction<T>> {
        let partitions = partition(sequence, self.num_threads)?;
        debug!(
            len = sequence.len(),
            partitions = partitions.len(),
            chunk = partitions[0].len(),
            "parallel reduction"
        );

        let mut slots: Vec<WorkerSlot<T>> = vec![WorkerSlot::Pending; partitions.len()];

        thread::scope(|scope| {
            let handles: Vec<_> = slots
                .iter_mut()
                .zip(&partitions)
                .map(|(slot, part)| {
                    let data = part.data;
                    thread::Builder::new()
                        .name(format!("reduce-{}", part.index))
                        .spawn_scoped(scope, move || {
                            *slot = match reduce(data) {
                                Ok(sum) => WorkerSlot::Done(sum),
                                Err(fault) => WorkerSlot::Faulted(fault),
                            };
                        })
                })
                .collect();

            // Join explicitly so a panicking worker leaves its slot Pending
            // instead of unwinding out of the scope.
            for (index, handle) in handles.into_iter().enumerate() {
                match handle {
                    Ok(handle) => {
                        if handle.join().is_err() {
                            warn!(partition = index, "reduction worker panicked");
                        }
                    }
                    Err(e) => warn!(partition = index, error = %e, "failed to spawn reduction worker"),
                }
            }
        });

        Self::combine(slots)
    }

    /// Combine worker slots in partition order, failing if any slot is not `Done`
    fn combine<T: Element>(slots: Vec<WorkerSlot<T>>) -> Result<ParallelReduction<T>> {
        let mut partials = Vec::with_capacity(slots.len());
        let mut failures = Vec::new();

        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                WorkerSlot::Done(sum) => partials.push(sum),
                WorkerSlot::Faulted(fault) => failures.push(format!("partition {}: {}", index, fault)),
                WorkerSlot::Pending => failures.push(format!("partition {}: worker did not complete", index)),
            }
        }

        if !failures.is_empty() {
            return Err(SumBenchError::WorkerFailure(format!(
                "{} of {} workers failed ({})",
                failures.len(),
                failures.len() + partials.len(),
                failures.join("; ")
            )));
        }

        let mut total = T::ZERO;
        for (index, &partial) in partials.iter().enumerate() {
            total = total.accumulate(partial).ok_or_else(|| {
                SumBenchError::WorkerFailure(format!(
                    "combining partial results overflowed at partition {}",
                    index
                ))
            })?;
        }

        Ok(ParallelReduction { total, partials })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SumValue;
    use crate::reduce::serial::SerialEngine;
    use std::fmt;

    /// Integer element whose addition panics when it meets 13
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Unlucky(u32);

    impl fmt::Display for Unlucky {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl Element for Unlucky {
        const ZERO: Self = Unlucky(0);
        const EPSILON: f64 = 0.0;

        fn accumulate(self, rhs: Self) -> Option<Self> {
            if rhs.0 == 13 {
                panic!("unlucky element");
            }
            self.0.checked_add(rhs.0).map(Unlucky)
        }

        fn is_exact() -> bool {
            true
        }

        fn to_sum_value(self) -> SumValue {
            SumValue::Unsigned(self.0 as u64)
        }

        fn magnitude(self) -> f64 {
            self.0 as f64
        }
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(ParallelEngine::new(0), Err(SumBenchError::InvalidArgument(_))));
    }

    #[test]
    fn test_seven_elements_two_threads() {
        let seq = [1i64, 2, 3, 4, 5, 6, 7];
        let reduction = ParallelEngine::new(2).unwrap().run_detailed(&seq).unwrap();

        assert_eq!(reduction.partials, vec![6, 15, 7]);
        assert_eq!(reduction.total, 28);
        assert_eq!(reduction.total, SerialEngine::new().run(&seq).unwrap());
    }

    #[test]
    fn test_ten_elements_ten_threads() {
        let seq: Vec<i64> = (1..=10).collect();
        let reduction = ParallelEngine::new(10).unwrap().run_detailed(&seq).unwrap();

        assert_eq!(reduction.partials.len(), 11);
        assert_eq!(reduction.partials[10], 0);
        assert_eq!(reduction.total, 55);
    }

    #[test]
    fn test_empty_sequence_sums_to_zero() {
        let seq: Vec<i64> = Vec::new();
        let reduction = ParallelEngine::new(4).unwrap().run_detailed(&seq).unwrap();

        assert_eq!(reduction.total, 0);
        assert!(reduction.partials.iter().all(|&p| p == 0));
    }

    #[test]
    fn test_more_threads_than_elements() {
        let seq = [5u32, 6, 7];
        assert_eq!(ParallelEngine::new(8).unwrap().run(&seq).unwrap(), 18);
    }

    #[test]
    fn test_worker_overflow_aggregated() {
        // Both full partitions overflow on their own
        let seq = [i32::MAX, 1, i32::MAX, 1];
        let err = ParallelEngine::new(2).unwrap().run(&seq).unwrap_err();

        match err {
            SumBenchError::WorkerFailure(msg) => {
                assert!(msg.contains("2 of 3 workers failed"), "{}", msg);
                assert!(msg.contains("partition 0"));
                assert!(msg.contains("partition 1"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_combine_overflow_is_failure() {
        // Each partial fits, their total does not
        let seq = [i32::MAX, i32::MAX];
        let err = ParallelEngine::new(2).unwrap().run(&seq).unwrap_err();
        assert!(matches!(err, SumBenchError::WorkerFailure(_)));
    }

    #[test]
    fn test_combine_pending_slot_is_failure() {
        let slots = vec![WorkerSlot::Done(1i64), WorkerSlot::Pending, WorkerSlot::Done(2)];
        let err = ParallelEngine::combine(slots).unwrap_err();
        match err {
            SumBenchError::WorkerFailure(msg) => assert!(msg.contains("did not complete")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_panicking_worker_reported_once() {
        let seq = [Unlucky(1), Unlucky(13), Unlucky(2), Unlucky(3)];
        let err = ParallelEngine::new(2).unwrap().run(&seq).unwrap_err();

        match err {
            SumBenchError::WorkerFailure(msg) => {
                assert!(msg.starts_with("1 of 3 workers failed"), "{}", msg);
                assert!(msg.contains("partition 0: worker did not complete"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let healthy = [Unlucky(1), Unlucky(2), Unlucky(3), Unlucky(4)];
        assert_eq!(ParallelEngine::new(2).unwrap().run(&healthy).unwrap(), Unlucky(10));
    }

    #[test]
    fn test_repeated_runs_identical() {
        let seq: Vec<f64> = (0..10_000).map(|i| (i as f64) * 0.001).collect();
        let engine = ParallelEngine::new(4).unwrap();
        let first = engine.run(&seq).unwrap();
        for _ in 0..5 {
            assert_eq!(engine.run(&seq).unwrap(), first);
        }
    }

    #[test]
    fn test_worker_slot_status() {
        assert!(WorkerSlot::Done(3u64).is_done());
        assert!(!WorkerSlot::<u64>::Pending.is_done());
        assert!(!WorkerSlot::<u64>::Faulted(ReduceFault::Overflow { offset: 0 }).is_done());
    }
}
