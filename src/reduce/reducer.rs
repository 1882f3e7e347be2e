//! Sequential summation of a single partition

use std::fmt;
use super::element::Element;

/// Why a reduction could not produce a sum
#[derive(Debug, Clone, PartialEq)]
pub enum ReduceFault {
    /// Integer addition overflowed at the given offset into the slice
    Overflow { offset: usize },
    /// A float element or the running sum became non-finite at the given offset
    NonFinite { offset: usize },
}

impl fmt::Display for ReduceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReduceFault::Overflow { offset } => {
                write!(f, "arithmetic overflow at element {}", offset)
            }
            ReduceFault::NonFinite { offset } => {
                write!(f, "non-finite value at element {}", offset)
            }
        }
    }
}

/// Sum `values` in element order.
///
/// An empty slice sums to zero.
pub fn reduce<T: Element>(values: &[T]) -> Result<T, ReduceFault> {
    let mut acc = T::ZERO;
    for (offset, &value) in values.iter().enumerate() {
        acc = match acc.accumulate(value) {
            Some(next) => next,
            None if T::is_exact() => return Err(ReduceFault::Overflow { offset }),
            None => return Err(ReduceFault::NonFinite { offset }),
        };
    }
    Ok(acc)
}
