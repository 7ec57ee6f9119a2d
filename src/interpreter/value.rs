/// Fixed-length arrays.
///
/// Defines [`array::ArrayValue`], whose slots start unassigned when declared by
/// size and whose element type is fixed by the first assignment.
pub mod array;
/// The runtime value enum.
///
/// Defines [`core::Value`], its type names for diagnostics, and how each kind
/// is displayed by `print`.
pub mod core;
/// File handles.
///
/// A handle reads a snapshot of a backing store line by line and appends
/// through to it.
pub mod file;
/// Subroutine values: user definitions and the native library.
pub mod subroutine;
