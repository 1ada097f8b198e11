//! Integer helpers for combining periods.

use crate::error::{PulseNetError, Result};

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple, or `None` on overflow.
pub fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Least common multiple of every value (1 for an empty input).
pub fn lcm_all(values: impl IntoIterator<Item = u64>) -> Result<u64> {
    values
        .into_iter()
        .try_fold(1u64, |acc, v| lcm(acc, v).ok_or(PulseNetError::PeriodOverflow))
}
