use crate::{
    ast::{BinaryOperator, Expr},
    error::Position,
    interpreter::{
        evaluator::{
            binary::{arithmetic, comparison},
            core::{Context, EvalResult},
        },
        host::Host,
        value::core::Value,
    },
};

impl<H: Host> Context<H> {
    /// Evaluates both operands, left first, then applies the operator.
    ///
    /// `AND` and `OR` do not short-circuit: the right operand is always
    /// evaluated.
    pub(in crate::interpreter::evaluator) fn eval_binary(&mut self,
                                                         left: &Expr,
                                                         op: BinaryOperator,
                                                         right: &Expr,
                                                         position: Position)
                                                         -> EvalResult<Value> {
        let left = self.eval_value(left)?;
        let right = self.eval_value(right)?;
        apply_binary(op, left, right, position)
    }
}

/// Applies a binary operator to two values.
///
/// Errors are reported at `position`, the operator's location.
///
/// # Example
/// ```
/// use ocr_erl::{
///     ast::BinaryOperator,
///     error::Position,
///     interpreter::{evaluator::binary::core::apply_binary, value::core::Value},
/// };
///
/// let at = Position::default();
/// let sum = apply_binary(BinaryOperator::Add, Value::Integer(3), Value::Float(0.5), at);
/// assert_eq!(sum.unwrap(), Value::Float(3.5));
///
/// let joined = apply_binary(BinaryOperator::Add, Value::from("ab"), Value::from("cd"), at);
/// assert_eq!(joined.unwrap(), Value::from("abcd"));
///
/// assert!(apply_binary(BinaryOperator::Quotient, Value::Integer(1), Value::Integer(0), at).is_err());
/// ```
pub fn apply_binary(op: BinaryOperator,
                    left: Value,
                    right: Value,
                    position: Position)
                    -> EvalResult<Value> {
    use BinaryOperator::{
        Add, And, Divide, Equal, Greater, GreaterEqual, Less, LessEqual, Modulo, Multiply,
        NotEqual, Or, Power, Quotient, Subtract,
    };

    match op {
        Add => arithmetic::add(left, right, position),
        Subtract => arithmetic::subtract(&left, &right, position),
        Multiply => arithmetic::multiply(&left, &right, position),
        Divide => arithmetic::divide(&left, &right, position),
        Power => arithmetic::power(&left, &right, position),
        Modulo => arithmetic::modulo(&left, &right, position),
        Quotient => arithmetic::quotient(&left, &right, position),
        And | Or => arithmetic::logical(op, &left, &right, position),
        Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
            comparison::compare(op, &left, &right, position)
        },
    }
}
