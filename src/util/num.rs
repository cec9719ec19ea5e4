use crate::{error::RuntimeError, interpreter::evaluator::EvalResult};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the value exceeds `MAX_SAFE_U64_INT` in
/// absolute value.
///
/// ## Example
/// ```
/// use linecalc::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, 1).unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, 1).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64_checked(value: i64, line: usize) -> EvalResult<f64> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(RuntimeError::Overflow { line });
    }
    Ok(value as f64)
}

/// Converts an `f64` to `i64` when the value is finite, integral and inside
/// the exactly representable range.
///
/// Returns `None` for fractional, non-finite or out-of-range values; callers
/// keep those as reals.
///
/// ## Example
/// ```
/// use linecalc::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(4.0), Some(4));
/// assert_eq!(f64_to_i64_exact(1.5), None);
/// assert_eq!(f64_to_i64_exact(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_i64_exact(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value.abs() > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    Some(value as i64)
}
