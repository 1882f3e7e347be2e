//! Benchmark input construction
//!
//! Builds the CPU input sequence outside of any timed region.

use std::sync::Arc;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::debug;
use crate::config::{BenchConfig, InputKind};
use crate::{SumBenchError, Result};

/// Build the input sequence described by `config`
pub fn build_input(config: &BenchConfig) -> Result<Arc<[i64]>> {
    let len = config.sequence_len;
    if len == 0 {
        return Err(SumBenchError::InvalidArgument(
            "Sequence length must be greater than 0".to_string()
        ));
    }

    debug!(len, input = %config.input.description(), "building input");

    let values = match config.input {
        InputKind::Consecutive => consecutive(len),
        InputKind::Random { max } => random_integers(len, max, config.seed),
    };

    Ok(values.into())
}

/// The integers `1..=len`
pub fn consecutive(len: usize) -> Vec<i64> {
    (1..=len as i64).collect()
}

/// `len` uniform integers in `[0, max)`, reproducible when `seed` is given
pub fn random_integers(len: usize, max: u32, seed: Option<u64>) -> Vec<i64> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let max = max.max(1);
    (0..len).map(|_| rng.gen_range(0..max) as i64).collect()
}
