/// Numeric helpers.
///
/// Lossy and checked conversions between `i64` and `f64`, floored division
/// and remainder, and the display format for floats. Every numeric rule that
/// is not tied to a single operator lives here so the binary operators, the
/// casts and the display code agree with each other.
pub mod num;
