use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            utils::{starts_without_value, token_to_binary_operator},
        },
    },
};

impl Parser {
    /// Parses a chain of `AND`/`OR`, which share the lowest precedence and
    /// associate to the left.
    ///
    /// Grammar: `logical := not (("AND" | "OR") not)*`
    pub(in crate::interpreter::parser) fn parse_logical(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_not, |op| {
                matches!(op, BinaryOperator::And | BinaryOperator::Or)
            })
    }

    /// Parses any number of prefix `NOT`s in front of a comparison.
    ///
    /// Grammar: `not := "NOT" not | comparison`
    fn parse_not(&mut self) -> ParseResult<Expr> {
        if let Some(spanned) = self.peek_spanned()
           && spanned.token == Token::Not
        {
            let position = spanned.position;
            self.bump();
            self.expect_operand()?;
            let operand = self.parse_not()?;
            return Ok(Expr::Unary { op: UnaryOperator::Not,
                                    operand: Box::new(operand),
                                    position });
        }
        self.parse_comparison()
    }

    /// Parses at most one comparison. Comparisons do not chain: a second
    /// comparator is left for the caller, which rejects it.
    ///
    /// Grammar: `comparison := additive (comparator additive)?`
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        if self.peek().is_some_and(starts_without_value) {
            return Err(self.error("Expected value"));
        }

        let left = self.parse_additive()?;

        if let Some(spanned) = self.peek_spanned()
           && let Some(op) = token_to_binary_operator(&spanned.token)
           && op.is_comparison()
        {
            let position = spanned.position;
            self.bump();
            self.expect_operand()?;
            let right = self.parse_additive()?;
            return Ok(Expr::Binary { left: Box::new(left),
                                     op,
                                     right: Box::new(right),
                                     position });
        }

        Ok(left)
    }

    /// Parses `+` and `-` chains.
    ///
    /// A number or name directly after the chain means an operator is missing
    /// between two values, as in `x = 1 2`.
    ///
    /// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_left_associative(Self::parse_multiplicative, |op| {
                           matches!(op, BinaryOperator::Add | BinaryOperator::Subtract)
                       })?;

        if matches!(self.peek(),
                    Some(Token::Integer(_) | Token::Float(_) | Token::Identifier(_)))
        {
            return Err(self.error("Expected operator"));
        }
        Ok(expr)
    }

    /// Grammar: `multiplicative := power (("*" | "/" | "MOD" | "DIV") power)*`
    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_power, |op| {
                matches!(op,
                         BinaryOperator::Multiply
                         | BinaryOperator::Divide
                         | BinaryOperator::Modulo
                         | BinaryOperator::Quotient)
            })
    }

    /// Exponentiation associates to the left like every other level, so
    /// `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2`.
    ///
    /// Grammar: `power := unary ("^" unary)*`
    fn parse_power(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(Self::parse_unary, |op| op == BinaryOperator::Power)
    }

    /// Parses one precedence level: an operand from `next`, then every
    /// following operator accepted by `accepts` with its right operand.
    fn parse_left_associative(&mut self,
                              next: fn(&mut Self) -> ParseResult<Expr>,
                              accepts: fn(BinaryOperator) -> bool)
                              -> ParseResult<Expr> {
        let mut left = next(self)?;

        while let Some(spanned) = self.peek_spanned()
              && let Some(op) = token_to_binary_operator(&spanned.token)
              && accepts(op)
        {
            let position = spanned.position;
            self.bump();
            if self.at_line_end() {
                return Err(ParseError::syntax("Incomplete input", position));
            }
            let right = next(self)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  position };
        }

        Ok(left)
    }
}
