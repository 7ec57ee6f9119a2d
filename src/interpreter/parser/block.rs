use std::rc::Rc;

use crate::{
    ast::{Branch, Case, ForLoop, Statement, SubroutineDef, SubroutineKind},
    error::{ParseError, Position},
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser {
    /// Parses statements on the lines after the current one until a line that
    /// starts with one of `closers`, leaving the cursor on that line.
    ///
    /// Reaching the end of the program first is an error reported at
    /// `opened_at` with the `missing` description.
    fn parse_body(&mut self,
                  closers: &[Token],
                  missing: &str,
                  opened_at: Position)
                  -> ParseResult<Vec<Statement>> {
        let mut body = Vec::new();
        loop {
            self.next_line();
            let Some(first) = self.peek() else {
                return Err(ParseError::syntax(missing, opened_at));
            };
            if closers.contains(first) {
                return Ok(body);
            }
            body.push(self.parse_statement()?);
        }
    }

    /// Consumes a closing keyword and checks that it stands alone on its line.
    fn close_block(&mut self, keyword: &str) -> ParseResult<()> {
        self.bump();
        self.expect_line_end(&format!("Expected nothing to follow '{keyword}'"))
    }

    /// ```text
    /// while condition
    ///     ...
    /// endwhile
    /// ```
    pub(in crate::interpreter::parser) fn parse_while(&mut self) -> ParseResult<Statement> {
        let position = self.here();
        self.bump();
        self.expect_operand()?;
        let condition = self.parse_expression()?;
        self.expect_line_end("Expected nothing to follow loop condition")?;

        let body = self.parse_body(&[Token::EndWhile], "Expected 'endwhile' to close loop", position)?;
        self.close_block("endwhile")?;

        Ok(Statement::While { condition,
                              body,
                              position })
    }

    /// ```text
    /// do
    ///     ...
    /// until condition
    /// ```
    pub(in crate::interpreter::parser) fn parse_do_until(&mut self) -> ParseResult<Statement> {
        let position = self.here();
        self.bump();
        self.expect_line_end("Expected nothing to follow 'do'")?;

        let body = self.parse_body(&[Token::Until], "Expected 'until' to close loop", position)?;
        self.bump();
        self.expect_operand()?;
        let condition = self.parse_expression()?;
        self.expect_line_end("Expected nothing to follow loop condition")?;

        Ok(Statement::DoUntil { body,
                                condition,
                                position })
    }

    /// ```text
    /// for i = start to end [step amount]
    ///     ...
    /// next i
    /// ```
    pub(in crate::interpreter::parser) fn parse_for(&mut self) -> ParseResult<Statement> {
        let opened_at = self.here();
        self.bump();
        let (variable, position) = self.expect_identifier("Expected identifier to follow 'for'")?;
        self.expect(&Token::Equals, "Expected '=' to follow loop variable")?;
        self.expect_operand()?;
        let start = self.parse_expression()?;
        self.expect(&Token::To, "Expected 'to' to follow starting value")?;
        self.expect_operand()?;
        let end = self.parse_expression()?;
        let step = if self.peek() == Some(&Token::Step) {
            self.bump();
            self.expect_operand()?;
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_line_end("Expected nothing to follow loop bounds")?;

        let closer = format!("Expected 'next {variable}' to close loop");
        let body = self.parse_body(&[Token::Next], &closer, opened_at)?;
        self.bump();
        match self.bump() {
            Some(spanned) if spanned.token == Token::Identifier(variable.clone()) => {},
            Some(spanned) => return Err(ParseError::syntax(closer, spanned.position)),
            None => return Err(self.error(closer)),
        }
        self.expect_line_end(&format!("Expected nothing to follow 'next {variable}'"))?;

        Ok(Statement::For(Box::new(ForLoop { variable,
                                             start,
                                             end,
                                             step,
                                             body,
                                             position })))
    }

    /// ```text
    /// procedure name(a, b)        function name(a, b)
    ///     ...                         ...
    /// endprocedure                    return a + b
    ///                             endfunction
    /// ```
    pub(in crate::interpreter::parser) fn parse_subroutine(&mut self) -> ParseResult<Statement> {
        if self.in_subroutine {
            return Err(self.error("Cannot define a subroutine inside another subroutine"));
        }
        let (kind, tag, closer) = if self.peek() == Some(&Token::Function) {
            (SubroutineKind::Function, "function", Token::EndFunction)
        } else {
            (SubroutineKind::Procedure, "procedure", Token::EndProcedure)
        };
        let position = self.here();
        self.bump();

        let (name, _) = self.expect_identifier("Expected subroutine name")?;
        let parameters = self.parse_parameters()?;
        self.expect_line_end("Expected nothing to follow parameters")?;

        self.in_subroutine = true;
        self.in_function = kind == SubroutineKind::Function;
        let body = self.parse_body(&[closer],
                                   &format!("Expected 'end{tag}' to close {tag}"),
                                   position);
        self.in_subroutine = false;
        self.in_function = false;
        let body = body?;
        self.close_block(&format!("end{tag}"))?;

        Ok(Statement::Subroutine(Rc::new(SubroutineDef { name,
                                                         kind,
                                                         parameters,
                                                         body,
                                                         position })))
    }

    /// Parses `(a, b, ...)` after a subroutine name.
    fn parse_parameters(&mut self) -> ParseResult<Vec<String>> {
        let opened_at = self.expect(&Token::LParen, "Expected '(' to follow subroutine name")?;
        let mut parameters: Vec<String> = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.bump();
            return Ok(parameters);
        }

        loop {
            let (name, position) = self.expect_identifier("Expected parameter name")?;
            if parameters.contains(&name) {
                return Err(ParseError::syntax(format!("Parameter '{name}' is already defined"),
                                              position));
            }
            parameters.push(name);

            match self.bump() {
                Some(spanned) if spanned.token == Token::Comma => {},
                Some(spanned) if spanned.token == Token::RParen => return Ok(parameters),
                Some(spanned) => {
                    return Err(ParseError::syntax("Expected ',' or ')'", spanned.position));
                },
                None => return Err(ParseError::syntax("'(' was never closed", opened_at)),
            }
        }
    }

    /// ```text
    /// if condition then
    /// elseif condition then
    /// else
    /// endif
    /// ```
    pub(in crate::interpreter::parser) fn parse_if(&mut self) -> ParseResult<Statement> {
        const MISSING: &str = "Expected 'endif' to close if statement";
        let position = self.here();
        let mut branches = Vec::new();
        let mut otherwise = None;

        self.bump();
        loop {
            self.expect_operand()?;
            let condition = self.parse_expression()?;
            self.expect(&Token::Then, "Expected 'then' to follow condition")?;
            self.expect_line_end("Expected nothing to follow 'then'")?;

            let body = self.parse_body(&[Token::ElseIf, Token::Else, Token::EndIf],
                                       MISSING,
                                       position)?;
            branches.push(Branch { condition, body });

            match self.peek() {
                Some(Token::ElseIf) => {
                    self.bump();
                },
                Some(Token::Else) => {
                    self.close_block("else")?;
                    otherwise = Some(self.parse_body(&[Token::EndIf], MISSING, position)?);
                    break;
                },
                _ => break,
            }
        }
        self.close_block("endif")?;

        Ok(Statement::If { branches,
                           otherwise,
                           position })
    }

    /// ```text
    /// switch value:
    ///     case 1:
    ///     default:
    /// endswitch
    /// ```
    pub(in crate::interpreter::parser) fn parse_switch(&mut self) -> ParseResult<Statement> {
        const MISSING: &str = "Expected 'endswitch' to close switch statement";
        let position = self.here();
        self.bump();
        self.expect_operand()?;
        let subject = self.parse_expression()?;
        self.expect(&Token::Colon, "Expected ':' to follow switch value")?;
        self.expect_line_end("Expected nothing to follow ':'")?;

        self.next_line();
        match self.peek() {
            Some(Token::Case) => {},
            Some(_) => return Err(self.error("Expected 'case' to follow switch statement")),
            None => return Err(ParseError::syntax(MISSING, position)),
        }

        let mut cases = Vec::new();
        let mut default = None;
        loop {
            match self.peek() {
                Some(Token::Case) => {
                    self.bump();
                    self.expect_operand()?;
                    let value = self.parse_expression()?;
                    self.expect(&Token::Colon, "Expected ':' to follow case value")?;
                    self.expect_line_end("Expected nothing to follow ':'")?;
                    let body = self.parse_body(&[Token::Case, Token::Default, Token::EndSwitch],
                                               MISSING,
                                               position)?;
                    cases.push(Case { value, body });
                },
                Some(Token::Default) => {
                    self.bump();
                    self.expect(&Token::Colon, "Expected ':' to follow 'default'")?;
                    self.expect_line_end("Expected nothing to follow ':'")?;
                    default = Some(self.parse_body(&[Token::EndSwitch], MISSING, position)?);
                },
                _ => break,
            }
        }
        self.close_block("endswitch")?;

        Ok(Statement::Switch { subject,
                               cases,
                               default,
                               position })
    }
}
