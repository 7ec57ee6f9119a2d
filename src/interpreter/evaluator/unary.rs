use crate::{
    ast::{Expr, UnaryOperator},
    error::{Position, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::overflow,
        },
        host::Host,
        value::core::Value,
    },
};

impl<H: Host> Context<H> {
    pub(super) fn eval_unary(&mut self,
                             op: UnaryOperator,
                             operand: &Expr,
                             position: Position)
                             -> EvalResult<Value> {
        let value = self.eval_value(operand)?;
        apply_unary(op, value, position)
    }
}

/// Applies a prefix operator.
///
/// ```
/// use ocr_erl::{
///     ast::UnaryOperator,
///     error::Position,
///     interpreter::{evaluator::unary::apply_unary, value::core::Value},
/// };
///
/// let at = Position::default();
/// assert_eq!(apply_unary(UnaryOperator::Negate, Value::Integer(4), at).unwrap(),
///            Value::Integer(-4));
/// assert_eq!(apply_unary(UnaryOperator::Not, Value::Boolean(true), at).unwrap(),
///            Value::Boolean(false));
/// assert!(apply_unary(UnaryOperator::Negate, Value::from("4"), at).is_err());
/// ```
pub fn apply_unary(op: UnaryOperator, value: Value, position: Position) -> EvalResult<Value> {
    match (op, value) {
        (UnaryOperator::Negate, Value::Integer(n)) => {
            n.checked_neg().map(Value::Integer).ok_or_else(|| overflow(position))
        },
        (UnaryOperator::Negate, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOperator::Plus, value @ (Value::Integer(_) | Value::Float(_))) => Ok(value),
        (UnaryOperator::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (UnaryOperator::Negate, other) => {
            Err(RuntimeError::type_mismatch(format!("Cannot negate type {}", other.type_name()),
                                            position))
        },
        (UnaryOperator::Plus, other) => {
            Err(RuntimeError::type_mismatch(format!("Cannot use unary '+' on type {}",
                                                    other.type_name()),
                                            position))
        },
        (UnaryOperator::Not, other) => {
            Err(RuntimeError::type_mismatch(format!("Cannot use NOT on type {}, expected Boolean",
                                                    other.type_name()),
                                            position))
        },
    }
}
