use thiserror::Error;

use crate::error::Position;

/// Errors raised while executing statements.
///
/// Output produced before the error stays in the transcript; execution stops
/// at the first error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An operation that cannot be carried out on otherwise valid values, such
    /// as division by zero or an out-of-range index.
    #[error("Evaluation Error: {description}")]
    Evaluation {
        /// Details about the failure.
        description: String,
        /// The expression that failed.
        position:    Position,
    },
    /// A name that was never bound, or a constant that was bound twice.
    #[error("Identifier Error: '{name}' {description}")]
    Identifier {
        /// The offending identifier.
        name:        String,
        /// What went wrong with it.
        description: String,
        /// Where the identifier appears.
        position:    Position,
    },
    /// A value of the wrong type for an operation.
    #[error("Type Error: {description}")]
    Type {
        /// Details about the type mismatch.
        description: String,
        /// The expression with the wrong type.
        position:    Position,
    },
    /// The host asked the program to stop.
    #[error("Program aborted by user")]
    Abort,
}

impl RuntimeError {
    pub fn evaluation(description: impl Into<String>, position: Position) -> Self {
        Self::Evaluation { description: description.into(),
                           position }
    }

    pub fn identifier(name: impl Into<String>,
                      description: impl Into<String>,
                      position: Position)
                      -> Self {
        Self::Identifier { name: name.into(),
                           description: description.into(),
                           position }
    }

    pub fn type_mismatch(description: impl Into<String>, position: Position) -> Self {
        Self::Type { description: description.into(),
                     position }
    }

    /// Where the error happened. `Abort` has no location.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        match self {
            Self::Evaluation { position, .. }
            | Self::Identifier { position, .. }
            | Self::Type { position, .. } => Some(*position),
            Self::Abort => None,
        }
    }

    #[must_use]
    pub const fn is_abort(&self) -> bool {
        matches!(self, Self::Abort)
    }
}
