//! Numeric element types accepted by the reduction engines

use crate::models::SumValue;
use std::fmt::{Debug, Display};

/// A value that can be summed by the reducer.
///
/// `accumulate` returns `None` when the addition leaves the representable
/// range of the type: integer overflow, or a non-finite float.
pub trait Element: Copy + Send + Sync + Debug + Display + PartialEq + 'static {
    /// Additive identity
    const ZERO: Self;

    /// Machine epsilon of the type; zero for integers
    const EPSILON: f64;

    /// Checked addition
    fn accumulate(self, rhs: Self) -> Option<Self>;

    /// Whether results of this type compare exactly across strategies
    fn is_exact() -> bool;

    /// Widen into the report representation
    fn to_sum_value(self) -> SumValue;

    /// Absolute value widened to `f64`
    fn magnitude(self) -> f64;
}

macro_rules! signed_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const ZERO: Self = 0;
            const EPSILON: f64 = 0.0;

            fn accumulate(self, rhs: Self) -> Option<Self> {
                self.checked_add(rhs)
            }

            fn is_exact() -> bool {
                true
            }

            fn to_sum_value(self) -> SumValue {
                SumValue::Signed(self as i64)
            }

            fn magnitude(self) -> f64 {
                (self as f64).abs()
            }
        }
    )*};
}

macro_rules! unsigned_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const ZERO: Self = 0;
            const EPSILON: f64 = 0.0;

            fn accumulate(self, rhs: Self) -> Option<Self> {
                self.checked_add(rhs)
            }

            fn is_exact() -> bool {
                true
            }

            fn to_sum_value(self) -> SumValue {
                SumValue::Unsigned(self as u64)
            }

            fn magnitude(self) -> f64 {
                self as f64
            }
        }
    )*};
}

macro_rules! float_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const ZERO: Self = 0.0;
            const EPSILON: f64 = <$t>::EPSILON as f64;

            fn accumulate(self, rhs: Self) -> Option<Self> {
                let sum = self + rhs;
                sum.is_finite().then_some(sum)
            }

            fn is_exact() -> bool {
                false
            }

            fn to_sum_value(self) -> SumValue {
                SumValue::Float(self as f64)
            }

            fn magnitude(self) -> f64 {
                (self as f64).abs()
            }
        }
    )*};
}

signed_element!(i32, i64);
unsigned_element!(u32, u64);
float_element!(f32, f64);

/// Largest difference two summation orders of `sequence` can produce.
///
/// Any order of the `n - 1` additions lands within `γ(n-1) · Σ|x|` of the
/// exact sum, with `γ(k) = k·u / (1 - k·u)` and unit roundoff `u = ε/2`, so
/// two orders differ by at most twice that. Zero for integer types, infinite
/// once `k·u` reaches 1 and no finite bound holds.
pub fn summation_error_bound<T: Element>(sequence: &[T]) -> f64 {
    if T::is_exact() || sequence.len() < 2 {
        return 0.0;
    }

    let ku = (sequence.len() - 1) as f64 * (T::EPSILON / 2.0);
    if ku >= 1.0 {
        return f64::INFINITY;
    }

    let magnitude: f64 = sequence.iter().map(|x| x.magnitude()).sum();
    2.0 * ku / (1.0 - ku) * magnitude
}

/// Compare two sums of `sequence` computed by different strategies.
///
/// Integers must match exactly; floats within [`summation_error_bound`].
pub fn sums_agree<T: Element>(a: T, b: T, sequence: &[T]) -> bool {
    a.to_sum_value()
        .agrees_with(&b.to_sum_value(), summation_error_bound(sequence))
}
