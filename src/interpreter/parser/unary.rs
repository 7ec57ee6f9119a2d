use crate::{
    ast::{Expr, Literal, UnaryOperator},
    error::{ParseError, Position},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            utils::Delimiter,
        },
    },
};

impl Parser {
    /// Parses prefix signs, which bind tighter than `^`: `-2 ^ 2` is `4`.
    ///
    /// Grammar: `unary := ("+" | "-") unary | postfix`
    pub(in crate::interpreter::parser) fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOperator::Negate,
            Some(Token::Plus) => UnaryOperator::Plus,
            _ => return self.parse_postfix(),
        };
        let position = self.here();
        self.bump();
        self.expect_operand()?;

        let operand = self.parse_unary()?;
        Ok(Expr::Unary { op,
                         operand: Box::new(operand),
                         position })
    }

    /// Parses an atom followed by any chain of calls, indexes and property
    /// accesses, applied left to right.
    ///
    /// Grammar: `postfix := primary ("(" args ")" | "[" args "]" | property)*`
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            let Some((token, position)) =
                self.peek_spanned()
                    .map(|spanned| (spanned.token.clone(), spanned.position))
            else {
                break;
            };
            expr = match token {
                Token::LParen => {
                    self.bump();
                    let arguments = self.parse_comma_separated(Delimiter::Paren, position)?;
                    Expr::Call { callee: Box::new(expr),
                                 arguments,
                                 position }
                },
                Token::LBracket => {
                    self.bump();
                    let indices = self.parse_comma_separated(Delimiter::Bracket, position)?;
                    if indices.is_empty() {
                        return Err(ParseError::syntax("Expected index value inside '[]'",
                                                      position));
                    }
                    Expr::Index { target: Box::new(expr),
                                  indices,
                                  position }
                },
                Token::Property(property) => {
                    self.bump();
                    Expr::Property { target: Box::new(expr),
                                     property,
                                     position }
                },
                _ => break,
            };
        }

        Ok(expr)
    }

    /// Grammar: `primary := literal | identifier | "(" expression ")"`
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let Some(spanned) = self.bump() else {
            return Err(self.error("Incomplete input"));
        };
        let position = spanned.position;

        let literal = match spanned.token {
            Token::Integer(value) => Literal::Integer(value),
            Token::Float(value) => Literal::Float(value),
            Token::Boolean(value) => Literal::Boolean(value),
            Token::Str(value) => Literal::String(value),
            Token::Identifier(name) => return Ok(Expr::Identifier { name, position }),
            Token::LParen => return self.parse_parenthesised(position),
            _ => return Err(ParseError::syntax("Expected value", position)),
        };

        Ok(Expr::Literal { value: literal,
                           position })
    }

    /// Parses the inside of `( ... )` after the opening parenthesis.
    fn parse_parenthesised(&mut self, opened_at: Position) -> ParseResult<Expr> {
        if self.peek() == Some(&Token::RParen) {
            return Err(ParseError::syntax("'()' was empty", opened_at));
        }
        if self.at_line_end() {
            return Err(ParseError::syntax("'(' was never closed", opened_at));
        }

        let expr = self.parse_expression()?;
        if self.peek() == Some(&Token::RParen) {
            self.bump();
            Ok(expr)
        } else {
            Err(ParseError::syntax("'(' was never closed", opened_at))
        }
    }
}
