use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::{Position, RuntimeError},
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a relational or equality operator.
///
/// Integers, Floats and Strings support every comparator; an Integer compared
/// with a Float is compared numerically. Booleans support only `==` and `!=`.
/// Any other pairing is a type error.
///
/// ```
/// use ocr_erl::{
///     ast::BinaryOperator,
///     error::Position,
///     interpreter::{evaluator::binary::comparison::compare, value::core::Value},
/// };
///
/// let at = Position::default();
/// let less = compare(BinaryOperator::Less, &Value::Integer(2), &Value::Float(2.5), at);
/// assert_eq!(less.unwrap(), Value::Boolean(true));
///
/// let equal = compare(BinaryOperator::Equal, &Value::from("a"), &Value::from("a"), at);
/// assert_eq!(equal.unwrap(), Value::Boolean(true));
///
/// assert!(compare(BinaryOperator::Less, &Value::Boolean(true), &Value::Boolean(false), at).is_err());
/// ```
pub fn compare(op: BinaryOperator,
               left: &Value,
               right: &Value,
               position: Position)
               -> EvalResult<Value> {
    let ordering = match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => {
            if !matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual) {
                return Err(RuntimeError::type_mismatch(format!("Cannot compare two Booleans with comparator '{}', only '==' or '!='",
                                                               op.symbol()),
                                                       position));
            }
            Some(a.cmp(b))
        },
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => {
                return Err(RuntimeError::type_mismatch(format!("Cannot compare type {} against {}",
                                                               right.type_name(),
                                                               left.type_name()),
                                                       position));
            },
        },
    };

    let holds = match op {
        BinaryOperator::Equal => ordering == Some(Ordering::Equal),
        BinaryOperator::NotEqual => ordering != Some(Ordering::Equal),
        BinaryOperator::Less => ordering == Some(Ordering::Less),
        BinaryOperator::LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOperator::Greater => ordering == Some(Ordering::Greater),
        BinaryOperator::GreaterEqual => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        },
        _ => {
            return Err(RuntimeError::evaluation(format!("'{}' is not a comparator", op.symbol()),
                                                position));
        },
    };
    Ok(Value::Boolean(holds))
}
