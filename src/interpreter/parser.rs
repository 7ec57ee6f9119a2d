/// Expression precedence levels from `AND`/`OR` down to exponentiation.
///
/// Each level parses the next tighter one and then folds any operators of its
/// own set from left to right. Comparisons are the exception: at most one is
/// allowed per expression.
pub mod binary;
/// Multi-line block statements.
///
/// Parses `if`, `switch`, `while`, `do`, `for` and subroutine definitions,
/// pulling lines until the matching closing keyword starts a line.
pub mod block;
/// The parser state and its statement iterator.
///
/// Holds the token lines, the cursor, and the parse-time flags that make
/// `return` legal only inside functions and forbid nested definitions.
pub mod core;
/// Single-line statements: assignments, array declarations, `return`, and the
/// dispatch that chooses a statement form from its first token.
pub mod statement;
/// Prefix signs, postfix chains and atoms.
pub mod unary;
/// Token expectations, delimited lists and assignment look-ahead shared by the
/// other parser modules.
pub mod utils;
