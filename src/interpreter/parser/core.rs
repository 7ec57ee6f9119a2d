use tracing::debug;

use crate::{
    ast::{Expr, Statement},
    config::{STACK_GROW_SIZE, STACK_RED_ZONE},
    error::{ParseError, Position},
    interpreter::lexer::{Spanned, Token, tokenize},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser over a program's token lines.
///
/// The parser hands out one top-level statement at a time through
/// [`Parser::next_statement`] or its [`Iterator`] implementation. A simple
/// statement occupies one line; block statements consume lines up to and
/// including their closing keyword.
///
/// # Example
/// ```
/// use ocr_erl::{ast::Statement, interpreter::parser::core::Parser};
///
/// let mut parser = Parser::from_source("x = 1\nwhile x < 3\n  x = x + 1\nendwhile").unwrap();
/// assert!(matches!(parser.next_statement(), Ok(Some(Statement::Assignment { .. }))));
/// assert!(matches!(parser.next_statement(), Ok(Some(Statement::While { .. }))));
/// assert!(matches!(parser.next_statement(), Ok(None)));
/// ```
pub struct Parser {
    lines:                Vec<Vec<Spanned>>,
    line:                 usize,
    cursor:               usize,
    /// Set while parsing a `function` body; `return` is legal only then.
    pub(super) in_function:   bool,
    /// Set while parsing any subroutine body; definitions cannot nest.
    pub(super) in_subroutine: bool,
}

impl Parser {
    #[must_use]
    pub const fn new(lines: Vec<Vec<Spanned>>) -> Self {
        Self { lines,
               line: 0,
               cursor: 0,
               in_function: false,
               in_subroutine: false }
    }

    pub fn from_source(source: &str) -> ParseResult<Self> {
        Ok(Self::new(tokenize(source)?))
    }

    /// Parses the next top-level statement, or returns `None` once every line
    /// has been consumed.
    pub fn next_statement(&mut self) -> ParseResult<Option<Statement>> {
        if !self.has_line() {
            return Ok(None);
        }
        let statement = self.parse_statement()?;
        self.next_line();
        Ok(Some(statement))
    }

    /// Parses a full expression, starting at the lowest precedence level.
    ///
    /// Grammar: `expression := logical`
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_logical())
    }

    pub(super) fn has_line(&self) -> bool {
        self.line < self.lines.len()
    }

    pub(super) fn next_line(&mut self) {
        self.line += 1;
        self.cursor = 0;
    }

    pub(super) fn peek(&self) -> Option<&Token> {
        self.peek_spanned().map(|spanned| &spanned.token)
    }

    pub(super) fn peek_spanned(&self) -> Option<&Spanned> {
        self.lines.get(self.line)?.get(self.cursor)
    }

    /// Tokens from the cursor to the end of the current line.
    pub(super) fn remaining(&self) -> &[Spanned] {
        self.lines
            .get(self.line)
            .and_then(|tokens| tokens.get(self.cursor..))
            .unwrap_or_default()
    }

    pub(super) fn bump(&mut self) -> Option<Spanned> {
        let spanned = self.peek_spanned()?.clone();
        self.cursor += 1;
        Some(spanned)
    }

    pub(super) fn at_line_end(&self) -> bool {
        self.peek_spanned().is_none()
    }

    /// The position errors are reported at: the current token, or the last
    /// token of the line once the line is exhausted.
    pub(super) fn here(&self) -> Position {
        if let Some(spanned) = self.peek_spanned() {
            return spanned.position;
        }
        self.lines
            .get(self.line)
            .and_then(|tokens| tokens.last())
            .or_else(|| self.lines.last().and_then(|tokens| tokens.last()))
            .map_or_else(Position::default, |spanned| spanned.position)
    }

    pub(super) fn error(&self, description: impl Into<String>) -> ParseError {
        ParseError::syntax(description, self.here())
    }
}

impl Iterator for Parser {
    type Item = ParseResult<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_statement() {
            Ok(statement) => statement.map(Ok),
            Err(error) => {
                self.line = self.lines.len();
                Some(Err(error))
            },
        }
    }
}

/// Lexes and parses a whole program.
///
/// Translation is all-or-nothing: the first lexical or syntax error is
/// returned and no statements are produced.
///
/// # Example
/// ```
/// use ocr_erl::interpreter::parser::core::parse_program;
///
/// assert_eq!(parse_program("print(1)\nprint(2)").unwrap().len(), 2);
/// assert!(parse_program("print(1").is_err());
/// ```
pub fn parse_program(source: &str) -> ParseResult<Vec<Statement>> {
    let program = Parser::from_source(source)?.collect::<ParseResult<Vec<_>>>()?;
    debug!(statements = program.len(), "parsed program");
    Ok(program)
}
