/// Array construction, indexing and element assignment.
pub mod array;

/// Binary operator evaluation.
///
/// Implements arithmetic with the language's numeric promotion, string
/// concatenation, logical operators and comparisons.
pub mod binary;

/// Core evaluation logic and context management.
///
/// Contains the interpreter context, the run protocol and expression dispatch.
pub mod core;

/// Subroutine calls.
///
/// Handles user-defined calls, the native library and the properties of
/// strings, arrays and files.
pub mod function;

/// `while`, `do ... until` and `for` loops.
pub mod loops;

/// The global and local symbol tables.
pub mod scope;

/// Statement execution: assignments, declarations, branches and returns.
pub mod statement;

/// Prefix `-`, `+` and `NOT`.
pub mod unary;

/// Value checks shared by the other evaluator modules.
pub mod utils;
