use crate::{
    ast::{BinaryOperator, Expr},
    error::{ParseError, Position},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

/// The bracket pairs that enclose comma-separated lists.
#[derive(Clone, Copy)]
pub(in crate::interpreter::parser) enum Delimiter {
    Paren,
    Bracket,
}

impl Delimiter {
    const fn opening(self) -> &'static str {
        match self {
            Self::Paren => "(",
            Self::Bracket => "[",
        }
    }

    const fn closing(self) -> &'static str {
        match self {
            Self::Paren => ")",
            Self::Bracket => "]",
        }
    }

    const fn closes(self, token: &Token) -> bool {
        matches!((self, token),
                 (Self::Paren, Token::RParen) | (Self::Bracket, Token::RBracket))
    }
}

/// Maps a token to the binary operator it spells, if any.
pub(in crate::interpreter::parser) const fn token_to_binary_operator(token: &Token)
                                                                    -> Option<BinaryOperator> {
    let op = match token {
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Subtract,
        Token::Star => BinaryOperator::Multiply,
        Token::Slash => BinaryOperator::Divide,
        Token::Caret => BinaryOperator::Power,
        Token::Mod => BinaryOperator::Modulo,
        Token::Div => BinaryOperator::Quotient,
        Token::And => BinaryOperator::And,
        Token::Or => BinaryOperator::Or,
        Token::EqualEqual => BinaryOperator::Equal,
        Token::BangEqual => BinaryOperator::NotEqual,
        Token::Less => BinaryOperator::Less,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::Greater => BinaryOperator::Greater,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        _ => return None,
    };
    Some(op)
}

/// Tokens that cannot begin a value: every binary operator except the signs,
/// and the assignment `=`.
pub(in crate::interpreter::parser) const fn starts_without_value(token: &Token) -> bool {
    matches!(token, Token::Equals)
    || (token_to_binary_operator(token).is_some() && !matches!(token, Token::Plus | Token::Minus))
}

impl Parser {
    /// Consumes `expected` or fails with `description` at the current token.
    pub(in crate::interpreter::parser) fn expect(&mut self,
                                                 expected: &Token,
                                                 description: &str)
                                                 -> ParseResult<Position> {
        match self.peek_spanned() {
            Some(spanned) if &spanned.token == expected => {
                let position = spanned.position;
                self.bump();
                Ok(position)
            },
            _ => Err(self.error(description)),
        }
    }

    pub(in crate::interpreter::parser) fn expect_identifier(&mut self,
                                                            description: &str)
                                                            -> ParseResult<(String, Position)> {
        match self.peek_spanned() {
            Some(spanned) => {
                if let Token::Identifier(name) = &spanned.token {
                    let found = (name.clone(), spanned.position);
                    self.bump();
                    Ok(found)
                } else {
                    Err(self.error(description))
                }
            },
            None => Err(self.error(description)),
        }
    }

    /// Fails with `description` if any token is left on the current line.
    pub(in crate::interpreter::parser) fn expect_line_end(&self,
                                                          description: &str)
                                                          -> ParseResult<()> {
        if self.at_line_end() { Ok(()) } else { Err(self.error(description)) }
    }

    /// Fails with "Incomplete input" if the line ends before an operand.
    pub(in crate::interpreter::parser) fn expect_operand(&self) -> ParseResult<()> {
        if self.at_line_end() { Err(self.error("Incomplete input")) } else { Ok(()) }
    }

    /// Parses a comma-separated list of expressions after its opening
    /// delimiter has been consumed, up to and including the closing one.
    ///
    /// Grammar (simplified): `list := (expression ("," expression)*)? closing`
    pub(in crate::interpreter::parser) fn parse_comma_separated(&mut self,
                                                                delimiter: Delimiter,
                                                                opened_at: Position)
                                                                -> ParseResult<Vec<Expr>> {
        let mut items = Vec::new();
        if self.peek().is_some_and(|token| delimiter.closes(token)) {
            self.bump();
            return Ok(items);
        }

        loop {
            if self.at_line_end() {
                return Err(ParseError::syntax(format!("'{}' was never closed",
                                                      delimiter.opening()),
                                              opened_at));
            }
            items.push(self.parse_expression()?);

            match self.bump() {
                Some(spanned) if spanned.token == Token::Comma => {
                    if self.at_line_end()
                       || self.peek().is_some_and(|token| delimiter.closes(token))
                    {
                        return Err(self.error("Expected next value to follow ','"));
                    }
                },
                Some(spanned) if delimiter.closes(&spanned.token) => break,
                Some(spanned) => {
                    return Err(ParseError::syntax(format!("Expected ',' or '{}'",
                                                          delimiter.closing()),
                                                  spanned.position));
                },
                None => {
                    return Err(ParseError::syntax(format!("'{}' was never closed",
                                                          delimiter.opening()),
                                                  opened_at));
                },
            }
        }

        Ok(items)
    }

    /// Looks ahead for `name =` or `name[...]... =` without consuming tokens.
    pub(in crate::interpreter::parser) fn is_assignment_ahead(&self) -> bool {
        let tokens = self.remaining();
        if !matches!(tokens.first().map(|spanned| &spanned.token), Some(Token::Identifier(_))) {
            return false;
        }

        let mut index = 1;
        let mut depth = 0_usize;
        while let Some(spanned) = tokens.get(index) {
            match spanned.token {
                Token::LBracket => depth += 1,
                Token::RBracket if depth > 0 => depth -= 1,
                Token::Equals if depth == 0 => return true,
                _ if depth == 0 => return false,
                _ => {},
            }
            index += 1;
        }
        false
    }
}
