/// Translation errors.
///
/// Raised by the lexer and the parser before any statement executes: unknown
/// characters, unterminated strings, malformed numbers, and statements that do
/// not follow the grammar.
pub mod parse_error;
/// Execution errors.
///
/// Raised by the evaluator: failed operations, undeclared or constant
/// identifiers, type mismatches, and cancellation by the host.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// A location in the program source.
///
/// `line` is the 0-based index of the raw source line (blank lines included),
/// `column` the 0-based character offset within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line:   usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Any error that ends a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::Parse(error) => Some(error.position()),
            Self::Runtime(error) => error.position(),
        }
    }

    /// Formats the error as the diagnostic block shown in a transcript.
    ///
    /// The block names the 1-based line, the error kind and description,
    /// repeats the offending source line and points at the column with a
    /// caret.
    ///
    /// # Example
    /// ```
    /// use ocr_erl::error::{Error, Position, RuntimeError};
    ///
    /// let source = "x = 1\ny = x / 0";
    /// let error = Error::from(RuntimeError::evaluation("Cannot divide by zero",
    ///                                                  Position::new(1, 6)));
    ///
    /// assert_eq!(error.render(source),
    ///            "🚨 ERROR @line 2\nEvaluation Error: Cannot divide by zero\ny = x / 0\n      ^");
    /// ```
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let Some(position) = self.position() else {
            return format!("🚨 {self}");
        };
        let text = source.lines().nth(position.line).unwrap_or_default();
        format!("🚨 ERROR @line {}\n{self}\n{text}\n{}^",
                position.line + 1,
                " ".repeat(position.column))
    }
}
