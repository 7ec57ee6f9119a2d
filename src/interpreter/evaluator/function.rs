/// Conversions behind `str`, `int`, `float`, `real` and `bool`.
///
/// Each cast is a pure function of one value.
pub mod cast;
/// Call evaluation.
///
/// # Responsibilities
/// - Declares the native subroutine table with its arities.
/// - Binds the natives into fresh global scopes.
/// - Runs user subroutines in their own local scope, enforcing the call
///   depth limit and restoring the caller's scope on every exit.
pub mod core;
/// `open` and `newFile`, and the methods of file handles.
pub mod file;
/// `print`, `input`, `random`, `ASC` and `CHR`.
pub mod native;
/// `.length`, `.upper` and `.lower`, and the string methods `.substring`,
/// `.left` and `.right`.
pub mod property;
