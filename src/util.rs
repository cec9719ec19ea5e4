/// Numeric conversion helpers.
///
/// Safe conversions between `i64` and `f64` that never lose data silently.
/// Values that cannot be represented exactly are reported instead of rounded.
pub mod num;
