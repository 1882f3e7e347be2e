//! Property tests for partitioning and serial/parallel equivalence

use proptest::prelude::*;
use sumbench::reduce::{partition, sums_agree, ParallelEngine, SerialEngine};
use sumbench::SumBenchError;

// ── Properties ───────────────────────────────────────────────────────────────

proptest! {
    /// Concatenating the partitions in order reproduces the sequence.
    #[test]
    fn partitions_cover_sequence_exactly(
        seq in prop::collection::vec(any::<i32>(), 0..200),
        extra in 0usize..=5,
        pick in any::<prop::sample::Index>(),
    ) {
        let max_parts = seq.len() + extra;
        let num_parts = 1 + pick.index(max_parts.max(1));
        let parts = partition(&seq, num_parts).unwrap();

        prop_assert_eq!(parts.len(), num_parts + 1);

        let mut next = 0;
        let mut joined = Vec::with_capacity(seq.len());
        for p in &parts {
            prop_assert_eq!(p.range.start, next);
            next = p.range.end;
            joined.extend_from_slice(p.data);
        }
        prop_assert_eq!(next, seq.len());
        prop_assert_eq!(joined, seq);
    }

    /// Only the trailing partition may differ in size from the others.
    #[test]
    fn leading_partitions_have_equal_size(len in 0usize..500, num_parts in 1usize..40) {
        let seq: Vec<u32> = (0..len as u32).collect();
        let parts = partition(&seq, num_parts).unwrap();
        let chunk = len / num_parts;

        prop_assert!(parts[..num_parts].iter().all(|p| p.len() == chunk));
        prop_assert_eq!(parts[num_parts].len(), len % num_parts);
    }

    /// Integer sums are identical for any thread count.
    #[test]
    fn parallel_matches_serial_for_integers(
        seq in prop::collection::vec(-1_000_000i64..1_000_000, 0..2000),
        threads in 1usize..32,
    ) {
        let serial = SerialEngine::new().run(&seq).unwrap();
        let parallel = ParallelEngine::new(threads).unwrap().run(&seq).unwrap();
        prop_assert_eq!(parallel, serial);
    }

    /// Float sums agree within rounding for any thread count.
    #[test]
    fn parallel_matches_serial_for_floats(
        seq in prop::collection::vec(-1.0e6f64..1.0e6, 0..10_000),
        threads in 1usize..32,
    ) {
        let serial = SerialEngine::new().run(&seq).unwrap();
        let parallel = ParallelEngine::new(threads).unwrap().run(&seq).unwrap();
        prop_assert!(sums_agree(parallel, serial, &seq), "{} vs {}", parallel, serial);
    }

    /// Single precision drifts much further apart and must still agree.
    #[test]
    fn parallel_matches_serial_for_f32(
        value in 0.01f32..10.0,
        len in 0usize..200_000,
        threads in 1usize..32,
    ) {
        let seq = vec![value; len];
        let serial = SerialEngine::new().run(&seq).unwrap();
        let parallel = ParallelEngine::new(threads).unwrap().run(&seq).unwrap();
        prop_assert!(sums_agree(parallel, serial, &seq), "{} vs {}", parallel, serial);
    }

    /// More parts than elements still yields the full sum.
    #[test]
    fn excess_partitions_contribute_zero(
        seq in prop::collection::vec(0u64..1000, 0..16),
        extra in 1usize..10,
    ) {
        let threads = seq.len() + extra;
        let expected: u64 = seq.iter().sum();
        let reduction = ParallelEngine::new(threads).unwrap().run_detailed(&seq).unwrap();

        prop_assert_eq!(reduction.total, expected);
        prop_assert!(reduction.partials[..threads].iter().all(|&p| p == 0));
    }
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn seven_elements_two_parts() {
    let seq = [1i64, 2, 3, 4, 5, 6, 7];
    let parts = partition(&seq, 2).unwrap();
    let contents: Vec<&[i64]> = parts.iter().map(|p| p.data).collect();

    assert_eq!(contents, vec![&[1, 2, 3][..], &[4, 5, 6][..], &[7][..]]);
    assert_eq!(ParallelEngine::new(2).unwrap().run(&seq).unwrap(), 28);
    assert_eq!(SerialEngine::new().run(&seq).unwrap(), 28);
}

#[test]
fn ten_elements_ten_parts() {
    let seq: Vec<i64> = (1..=10).collect();
    let parts = partition(&seq, 10).unwrap();

    assert_eq!(parts.len(), 11);
    assert!(parts[..10].iter().all(|p| p.len() == 1));
    assert!(parts[10].is_empty());
    assert_eq!(ParallelEngine::new(10).unwrap().run(&seq).unwrap(), 55);
}

#[test]
fn empty_sequence_four_parts() {
    let seq: Vec<i64> = Vec::new();
    let parts = partition(&seq, 4).unwrap();

    assert!(parts.iter().all(|p| p.is_empty()));
    assert_eq!(ParallelEngine::new(4).unwrap().run(&seq).unwrap(), 0);
}

#[test]
fn zero_parts_is_invalid_argument() {
    let seq = [1i64, 2, 3];
    assert!(matches!(partition(&seq, 0), Err(SumBenchError::InvalidArgument(_))));
    assert!(matches!(ParallelEngine::new(0), Err(SumBenchError::InvalidArgument(_))));
}

#[test]
fn repeated_runs_are_identical() {
    let seq: Vec<f32> = (0..50_000).map(|i| (i % 97) as f32 * 0.01).collect();
    let engine = ParallelEngine::new(8).unwrap();
    let first = engine.run(&seq).unwrap();
    let serial_first = SerialEngine::new().run(&seq).unwrap();

    for _ in 0..3 {
        assert_eq!(engine.run(&seq).unwrap(), first);
        assert_eq!(SerialEngine::new().run(&seq).unwrap(), serial_first);
    }
}

#[test]
fn million_f32_values_agree_across_thread_counts() {
    let seq = vec![0.1f32; 1_000_000];
    let serial = SerialEngine::new().run(&seq).unwrap();

    for threads in [2, 4, 8, 16] {
        let parallel = ParallelEngine::new(threads).unwrap().run(&seq).unwrap();
        assert!(sums_agree(parallel, serial, &seq), "{} threads: {} vs {}", threads, parallel, serial);
    }
}

#[test]
fn large_consecutive_sum_matches_closed_form() {
    let n = 1_000_000i64;
    let seq: Vec<i64> = (1..=n).collect();
    let expected = n * (n + 1) / 2;

    for threads in [1, 2, 3, 4, 7, 8, 16] {
        assert_eq!(ParallelEngine::new(threads).unwrap().run(&seq).unwrap(), expected);
    }
}
