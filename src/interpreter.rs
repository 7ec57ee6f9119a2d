/// The evaluator module executes statements and computes values.
///
/// The evaluator walks the syntax tree one top-level statement at a time,
/// applies the language's promotion and type rules, manages the two-tier
/// scope and the call stack, and talks to the host for output, input and
/// randomness.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements, including loops and
///   subroutine calls.
/// - Enforces the recursion ceiling and polls the run flag so a program can be
///   cancelled mid-loop.
/// - Reports runtime errors with the position of the failing node.
pub mod evaluator;
/// Services the interpreter consumes from its environment.
///
/// Declares the [`host::Host`] trait (transcript output, blocking input,
/// randomness, cooperative pauses), the shared [`host::RunFlag`], and two
/// hosts: one for terminals and one that buffers everything in memory.
pub mod host;
/// The lexer module tokenizes source code one line at a time.
///
/// # Responsibilities
/// - Converts each source line into tokens carrying their line and column.
/// - Drops blank and comment-only lines.
/// - Reports malformed numbers, unknown properties, unclosed strings and stray
///   characters as lexical errors.
pub mod lexer;
/// The parser module builds statement trees from token lines.
///
/// Statements are produced lazily, one top-level statement at a time; block
/// statements pull lines until their closing keyword.
pub mod parser;
/// Named backing stores for the file natives.
///
/// Files live in memory for the lifetime of the interpreter context. Hosts
/// import and manage them; programs open, create and append to them.
pub mod storage;
/// The value module defines the runtime data types.
///
/// # Responsibilities
/// - Defines the `Value` enum and its type names.
/// - Implements the display rules used by `print`.
/// - Provides arrays, subroutine values and file handles.
pub mod value;
