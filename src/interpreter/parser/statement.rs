use crate::{
    ast::{ArrayElement, ArrayInit, ArrayLiteral, AssignTarget, Modifier, Statement},
    config::{STACK_GROW_SIZE, STACK_RED_ZONE},
    error::{ParseError, Position},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            utils::{Delimiter, starts_without_value},
        },
    },
};

impl Parser {
    /// Parses one statement starting at the beginning of the current line.
    ///
    /// Block statements consume their body and closing line; every statement
    /// leaves the cursor on the last line it used, with nothing left on it.
    pub(in crate::interpreter::parser) fn parse_statement(&mut self) -> ParseResult<Statement> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Statement> {
        let Some(first) = self.peek().cloned() else {
            return Err(self.error("Expected statement"));
        };

        let statement = match first {
            Token::While => self.parse_while()?,
            Token::Do => self.parse_do_until()?,
            Token::For => self.parse_for()?,
            Token::Procedure | Token::Function => self.parse_subroutine()?,
            Token::Return => self.parse_return()?,
            Token::If => self.parse_if()?,
            Token::Switch => self.parse_switch()?,
            Token::Const | Token::Global => self.parse_assignment()?,
            Token::Array => self.parse_array_declaration()?,
            Token::ElseIf | Token::Else | Token::EndIf => {
                return Err(self.error("Needs to follow 'if' statement"));
            },
            Token::Case | Token::Default | Token::EndSwitch => {
                return Err(self.error("Needs to follow 'switch' statement"));
            },
            Token::EndWhile => return Err(self.error("Needs to follow 'while' statement")),
            Token::Until => return Err(self.error("Needs to follow 'do' statement")),
            Token::Next => return Err(self.error("Needs to follow 'for' statement")),
            Token::EndProcedure => {
                return Err(self.error("Needs to follow 'procedure' statement"));
            },
            Token::EndFunction => return Err(self.error("Needs to follow 'function' statement")),
            ref token if starts_without_value(token) => return Err(self.error("Expected value")),
            Token::Identifier(_) if self.is_assignment_ahead() => self.parse_assignment()?,
            _ => Statement::Expression { expr: self.parse_expression()? },
        };

        self.expect_line_end("Expected operator")?;
        Ok(statement)
    }

    /// Parses `[const|global] name[indices]... = expression`.
    fn parse_assignment(&mut self) -> ParseResult<Statement> {
        let modifier = match self.peek() {
            Some(Token::Const) => Some(Modifier::Const),
            Some(Token::Global) => Some(Modifier::Global),
            _ => None,
        };
        if modifier.is_some() {
            self.bump();
        }

        let (name, position) = self.expect_identifier("Expected identifier")?;

        let mut indices = Vec::new();
        while let Some(spanned) = self.peek_spanned()
              && spanned.token == Token::LBracket
        {
            let opened_at = spanned.position;
            self.bump();
            let group = self.parse_comma_separated(Delimiter::Bracket, opened_at)?;
            if group.is_empty() {
                return Err(ParseError::syntax("Expected index value inside '[]'", opened_at));
            }
            indices.extend(group);
        }
        if modifier == Some(Modifier::Const) && !indices.is_empty() {
            return Err(ParseError::syntax("Array elements cannot be declared 'const'",
                                          position));
        }

        let equals = self.expect(&Token::Equals, "Expected '=' to follow identifier")?;
        self.expect_operand()?;
        let value = self.parse_expression()?;

        Ok(Statement::Assignment { target: AssignTarget { name,
                                                          modifier,
                                                          indices,
                                                          position },
                                   value,
                                   position: equals })
    }

    /// Parses `array name[d1, d2, ...]` or `array name = [...]`.
    fn parse_array_declaration(&mut self) -> ParseResult<Statement> {
        let position = self.here();
        self.bump();
        let (name, _) = self.expect_identifier("Expected identifier to follow 'array'")?;

        let init = match self.bump() {
            Some(spanned) if spanned.token == Token::LBracket => {
                let dimensions = self.parse_comma_separated(Delimiter::Bracket, spanned.position)?;
                if dimensions.is_empty() {
                    return Err(ParseError::syntax("Expected array length inside '[]'",
                                                  spanned.position));
                }
                ArrayInit::Dimensions(dimensions)
            },
            Some(spanned) if spanned.token == Token::Equals => {
                let opened_at = self.expect(&Token::LBracket, "Expected '[' to begin array values")?;
                ArrayInit::Literal(self.parse_array_literal(opened_at)?)
            },
            Some(spanned) => {
                return Err(ParseError::syntax("Expected '[' or '=' to follow array name",
                                              spanned.position));
            },
            None => return Err(self.error("Expected '[' or '=' to follow array name")),
        };

        Ok(Statement::ArrayDeclaration { name, init, position })
    }

    /// Parses the elements of an array literal after its `[`. A `[` in element
    /// position opens a nested sub-array.
    fn parse_array_literal(&mut self, opened_at: Position) -> ParseResult<ArrayLiteral> {
        if self.peek() == Some(&Token::RBracket) {
            return Err(ParseError::syntax("Cannot create arrays with length 0", opened_at));
        }

        let mut elements = Vec::new();
        loop {
            if self.at_line_end() {
                return Err(ParseError::syntax("'[' was never closed", opened_at));
            }
            let element = if let Some(spanned) = self.peek_spanned()
                             && spanned.token == Token::LBracket
            {
                let nested_at = spanned.position;
                self.bump();
                ArrayElement::Nested(self.parse_array_literal(nested_at)?)
            } else {
                ArrayElement::Item(self.parse_expression()?)
            };
            elements.push(element);

            match self.bump() {
                Some(spanned) if spanned.token == Token::Comma => {
                    if self.at_line_end() || self.peek() == Some(&Token::RBracket) {
                        return Err(self.error("Expected next value to follow ','"));
                    }
                },
                Some(spanned) if spanned.token == Token::RBracket => break,
                Some(spanned) => {
                    return Err(ParseError::syntax("Expected ',' or ']'", spanned.position));
                },
                None => return Err(ParseError::syntax("'[' was never closed", opened_at)),
            }
        }

        Ok(ArrayLiteral { elements,
                          position: opened_at })
    }

    /// Parses `return [expression]`, legal only inside a function body.
    fn parse_return(&mut self) -> ParseResult<Statement> {
        if !self.in_function {
            return Err(self.error("Can only use 'return' within functions"));
        }
        let position = self.here();
        self.bump();

        let value = if self.at_line_end() { None } else { Some(self.parse_expression()?) };
        Ok(Statement::Return { value, position })
    }
}
