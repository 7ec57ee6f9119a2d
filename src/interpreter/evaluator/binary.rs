/// Arithmetic, concatenation and the logical operators.
///
/// # Responsibilities
/// - Promotes mixed Integer and Float operands to Float.
/// - Keeps Integer results exact, failing on overflow.
/// - Rejects zero divisors before looking at operand types.
pub mod arithmetic;

/// Relational and equality operators.
pub mod comparison;

/// Operand evaluation and operator dispatch.
pub mod core;
