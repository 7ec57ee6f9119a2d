//! # ocr-erl
//!
//! ocr-erl is an interpreter for a small imperative teaching language. It runs
//! programs with variables, constants, arrays, branches, loops, procedures,
//! functions and text files, writing everything a program prints to a
//! transcript.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{evaluator::core::Context, host::BufferedHost},
};

/// Defines the structure of parsed programs.
///
/// This module declares the statement and expression trees the parser builds
/// and the evaluator walks.
///
/// # Responsibilities
/// - Defines statement and expression types for every language construct.
/// - Records the source position of each node for error reporting.
/// - Shares subroutine definitions between the tree and the values bound from
///   them.
pub mod ast;
/// Runtime limits of an interpreter context.
///
/// Holds the call depth ceiling and the cooperative yield interval, with the
/// language's own limits as defaults.
pub mod config;
/// Provides unified error types for translation and execution.
///
/// This module defines every error a run can end with, and renders them as the
/// diagnostic block shown in a transcript.
///
/// # Responsibilities
/// - Defines lexical and syntax errors raised before execution.
/// - Defines evaluation, identifier, type and abort errors raised while
///   running.
/// - Attaches a line and column to each located error.
pub mod error;
/// Orchestrates program execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, file storage and the host services into a complete
/// runtime.
///
/// # Responsibilities
/// - Coordinates the lexer, parser and evaluator.
/// - Provides the interpreter context that runs whole programs.
/// - Defines the host boundary for output, input and randomness.
pub mod interpreter;
/// Numeric helpers shared across the interpreter.
///
/// # Responsibilities
/// - Converts between `i64` and `f64` without silent data loss.
/// - Provides floored division and remainder.
/// - Formats floats the way programs display them.
pub mod util;

/// Runs a program against an in-memory host and returns what it printed.
///
/// Input requests fail, as the host has no queued input. The returned lines
/// do not include the exit markers.
///
/// # Errors
/// Returns the first translation or runtime error.
///
/// # Examples
/// ```
/// use ocr_erl::get_result;
///
/// let source = "function double(n)\n    return n * 2\nendfunction\nprint(double(3))";
/// assert_eq!(get_result(source).unwrap(), ["6"]);
///
/// // `y` was never assigned.
/// assert!(get_result("x = y + 1").is_err());
/// ```
pub fn get_result(source: &str) -> Result<Vec<String>, Error> {
    let mut context = Context::new(BufferedHost::new());
    context.execute(source)?;
    Ok(context.into_host().into_lines())
}
