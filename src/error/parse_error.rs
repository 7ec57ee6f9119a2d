use thiserror::Error;

use crate::error::Position;

/// Errors raised while turning source text into statements.
///
/// Both kinds stop translation of the whole program: no statement runs when
/// either is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Characters that do not form a valid token.
    #[error("Lexical Error: {description}")]
    Lexical {
        /// What was wrong with the characters.
        description: String,
        /// Where the offending characters start.
        position:    Position,
    },
    /// Tokens that do not form a valid statement.
    #[error("Invalid Syntax: {description}")]
    Syntax {
        /// What the parser expected instead.
        description: String,
        /// The offending token.
        position:    Position,
    },
}

impl ParseError {
    pub fn lexical(description: impl Into<String>, position: Position) -> Self {
        Self::Lexical { description: description.into(),
                        position }
    }

    pub fn syntax(description: impl Into<String>, position: Position) -> Self {
        Self::Syntax { description: description.into(),
                       position }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Lexical { position, .. } | Self::Syntax { position, .. } => *position,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Lexical { description, .. } | Self::Syntax { description, .. } => description,
        }
    }
}
