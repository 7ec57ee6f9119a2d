use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::{AssignTarget, Branch, Case, Expr, Statement},
    config::{STACK_GROW_SIZE, STACK_RED_ZONE},
    error::{Position, RuntimeError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        host::Host,
        value::{core::Value, subroutine::Subroutine},
    },
};

/// How a statement finished.
#[derive(Debug, Clone, Copy)]
pub enum Flow<'a> {
    /// Carry on with the next statement.
    Normal,
    /// A `return` was reached. The expression is evaluated once the enclosing
    /// call is reached, in the callee's scope.
    Return(Option<&'a Expr>),
}

impl<H: Host> Context<H> {
    /// Executes a single statement.
    ///
    /// `if` and `switch` pick a body and run it in the current scope; loops
    /// run their bodies until their condition says stop. A `return` anywhere
    /// inside stops every enclosing body and comes back as [`Flow::Return`].
    pub fn execute_statement<'a>(&mut self, statement: &'a Statement) -> EvalResult<Flow<'a>> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.execute_inner(statement))
    }

    fn execute_inner<'a>(&mut self, statement: &'a Statement) -> EvalResult<Flow<'a>> {
        self.check_running()?;
        trace!(line = statement.position().line + 1, depth = self.call_depth, "execute");

        match statement {
            Statement::Expression { expr } => {
                self.eval(expr)?;
            },
            Statement::Assignment { target,
                                    value,
                                    position, } => self.assign(target, value, *position)?,
            Statement::ArrayDeclaration { name,
                                          init,
                                          position, } => self.declare_array(name, init, *position)?,
            Statement::If { branches,
                            otherwise,
                            .. } => {
                if let Some(body) = self.select_if(branches, otherwise.as_deref())? {
                    return self.execute_block(body);
                }
            },
            Statement::Switch { subject,
                                cases,
                                default,
                                .. } => {
                if let Some(body) = self.select_switch(subject, cases, default.as_deref())? {
                    return self.execute_block(body);
                }
            },
            Statement::While { condition, body, .. } => return self.execute_while(condition, body),
            Statement::DoUntil { body, condition, .. } => {
                return self.execute_do_until(body, condition);
            },
            Statement::For(for_loop) => return self.execute_for(for_loop),
            Statement::Subroutine(def) => {
                let value = Value::Subroutine(Subroutine::User(Rc::clone(def)));
                self.scope
                    .assign(&def.name, value, None)
                    .map_err(|error| error.at(&def.name, def.position))?;
            },
            Statement::Return { value, .. } => return Ok(Flow::Return(value.as_ref())),
        }

        Ok(Flow::Normal)
    }

    /// Executes statements in order, stopping early at a `return`.
    pub fn execute_block<'a>(&mut self, body: &'a [Statement]) -> EvalResult<Flow<'a>> {
        for statement in body {
            if let flow @ Flow::Return(_) = self.execute_statement(statement)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Binds a name, or stores into an array element when the target has
    /// indices. The value is evaluated first.
    fn assign(&mut self,
              target: &AssignTarget,
              value: &Expr,
              position: Position)
              -> EvalResult<()> {
        let value = self.eval_value(value)?;
        if target.indices.is_empty() {
            return self.scope
                       .assign(&target.name, value, target.modifier)
                       .map_err(|error| error.at(&target.name, target.position));
        }
        self.assign_element(target, value, position)
    }

    /// Evaluates each condition in order and returns the body of the first
    /// that holds, falling back to the `else` body.
    fn select_if<'a>(&mut self,
                     branches: &'a [Branch],
                     otherwise: Option<&'a [Statement]>)
                     -> EvalResult<Option<&'a [Statement]>> {
        for branch in branches {
            if self.eval_condition(&branch.condition)? {
                return Ok(Some(&branch.body));
            }
        }
        Ok(otherwise)
    }

    /// Returns the body of the first case whose value has the subject's type
    /// and equals it, falling back to the `default` body.
    fn select_switch<'a>(&mut self,
                         subject: &Expr,
                         cases: &'a [Case],
                         default: Option<&'a [Statement]>)
                         -> EvalResult<Option<&'a [Statement]>> {
        let subject = self.eval_value(subject)?;
        for case in cases {
            let value = self.eval_value(&case.value)?;
            if value.type_name() == subject.type_name() && value == subject {
                return Ok(Some(&case.body));
            }
        }
        Ok(default)
    }

    /// Evaluates a branch or loop condition, which must be a Boolean.
    pub(super) fn eval_condition(&mut self, condition: &Expr) -> EvalResult<bool> {
        match self.eval_value(condition)? {
            Value::Boolean(value) => Ok(value),
            other => Err(RuntimeError::type_mismatch(format!("Condition must be type Boolean, not {}",
                                                             other.type_name()),
                                                     condition.position())),
        }
    }
}
