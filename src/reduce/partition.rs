//! Contiguous partitioning of a sequence
//!
//! A sequence of length `L` split into `n` parts yields `n` chunks of
//! `L / n` elements followed by one trailing chunk holding the remainder.
//! The trailing chunk is always present, even when empty, so a split always
//! produces `n + 1` partitions.

use std::ops::Range;
use crate::{SumBenchError, Result};

/// A half-open view `[start, end)` into the sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a, T> {
    /// Position of this partition in the split
    pub index: usize,
    /// Index range into the original sequence
    pub range: Range<usize>,
    /// The elements covered by `range`
    pub data: &'a [T],
}

impl<'a, T> Partition<'a, T> {
    /// Number of elements in the partition
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the partition covers no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Compute the partition ranges for a sequence of `len` elements
pub fn partition_ranges(len: usize, num_parts: usize) -> Result<Vec<Range<usize>>> {
    if num_parts == 0 {
        return Err(SumBenchError::InvalidArgument(
            "Partition count must be greater than 0".to_string()
        ));
    }

    let chunk = len / num_parts;
    let mut ranges: Vec<Range<usize>> = (0..num_parts)
        .map(|i| i * chunk..(i + 1) * chunk)
        .collect();
    ranges.push(num_parts * chunk..len);

    Ok(ranges)
}

/// Split `sequence` into `num_parts` contiguous partitions plus a trailing remainder
pub fn partition<T>(sequence: &[T], num_parts: usize) -> Result<Vec<Partition<'_, T>>> {
    let ranges = partition_ranges(sequence.len(), num_parts)?;

    Ok(ranges
        .into_iter()
        .enumerate()
        .map(|(index, range)| Partition {
            index,
            data: &sequence[range.clone()],
            range,
        })
        .collect())
}
