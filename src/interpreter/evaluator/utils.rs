use crate::{
    error::{Position, RuntimeError},
    interpreter::value::core::Value,
};

/// The error for an integer result outside the 64-bit range.
pub(crate) fn overflow(position: Position) -> RuntimeError {
    RuntimeError::evaluation("Integer overflow", position)
}

/// Extracts an Integer argument, naming the argument in the type error.
pub(crate) fn integer_argument(value: &Value,
                               name: &str,
                               position: Position)
                               -> Result<i64, RuntimeError> {
    match value {
        Value::Integer(integer) => Ok(*integer),
        other => Err(RuntimeError::type_mismatch(format!("{name} must be type Integer, not {}",
                                                         other.type_name()),
                                                 position)),
    }
}

/// Turns a language index into a slot of a collection of `length` items.
///
/// ```
/// use ocr_erl::{
///     error::Position,
///     interpreter::{evaluator::utils::checked_index, value::core::Value},
/// };
///
/// let at = Position::default();
/// assert_eq!(checked_index(&Value::Integer(2), 3, at).unwrap(), 2);
/// assert!(checked_index(&Value::Integer(3), 3, at).is_err());
/// assert!(checked_index(&Value::Integer(-1), 3, at).is_err());
/// assert!(checked_index(&Value::Float(1.0), 3, at).is_err());
/// ```
pub fn checked_index(index: &Value,
                     length: usize,
                     position: Position)
                     -> Result<usize, RuntimeError> {
    let Value::Integer(index) = index else {
        return Err(RuntimeError::type_mismatch("Integer value required as index", position));
    };
    usize::try_from(*index).ok().filter(|&slot| slot < length).ok_or_else(|| {
        let last = i128::try_from(length).unwrap_or(i128::MAX) - 1;
        RuntimeError::evaluation(format!("Array index not in range from 0 to {last}"), position)
    })
}
