use crate::{
    error::{Position, RuntimeError},
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{int_to_float, integral_to_i64},
};

/// Values that have no conversion at all.
fn uncastable(value: &Value, target: &str, position: Position) -> RuntimeError {
    RuntimeError::type_mismatch(format!("Cannot cast type {} to type {target}", value.type_name()),
                                position)
}

/// A String whose text does not convert.
fn unparsable(text: &str, target: &str, position: Position) -> RuntimeError {
    RuntimeError::type_mismatch(format!("Cannot cast {text} to type {target}"), position)
}

/// `str(v)`: the displayed form of a number, Boolean or String.
///
/// ```
/// use ocr_erl::{
///     error::Position,
///     interpreter::{evaluator::function::cast::to_string, value::core::Value},
/// };
///
/// let at = Position::default();
/// assert_eq!(to_string(&Value::Integer(42), at).unwrap(), Value::from("42"));
/// assert_eq!(to_string(&Value::Float(2.0), at).unwrap(), Value::from("2.0"));
/// ```
pub fn to_string(value: &Value, position: Position) -> EvalResult<Value> {
    match value {
        Value::Integer(_) | Value::Float(_) | Value::Boolean(_) | Value::String(_) => {
            Ok(Value::String(value.to_string()))
        },
        _ => Err(uncastable(value, "String", position)),
    }
}

/// `int(v)`. Floats are floored; Strings must hold a whole number written
/// without a `.`.
///
/// ```
/// use ocr_erl::{
///     error::Position,
///     interpreter::{evaluator::function::cast::to_integer, value::core::Value},
/// };
///
/// let at = Position::default();
/// assert_eq!(to_integer(&Value::from(" -17 "), at).unwrap(), Value::Integer(-17));
/// assert_eq!(to_integer(&Value::Float(-2.5), at).unwrap(), Value::Integer(-3));
/// assert_eq!(to_integer(&Value::Boolean(true), at).unwrap(), Value::Integer(1));
/// assert!(to_integer(&Value::from("4.2"), at).is_err());
/// ```
pub fn to_integer(value: &Value, position: Position) -> EvalResult<Value> {
    match value {
        Value::Integer(integer) => Ok(Value::Integer(*integer)),
        Value::Float(float) => integral_to_i64(float.floor()).map(Value::Integer)
                                                            .ok_or_else(|| {
                                                                unparsable(&value.to_string(),
                                                                           "Integer",
                                                                           position)
                                                            }),
        Value::Boolean(boolean) => Ok(Value::Integer(i64::from(*boolean))),
        Value::String(text) => parse_integer(text).map(Value::Integer)
                                                  .ok_or_else(|| unparsable(text, "Integer", position)),
        _ => Err(uncastable(value, "Integer", position)),
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('.') {
        return None;
    }
    trimmed.parse::<i64>()
           .ok()
           .or_else(|| trimmed.parse::<f64>().ok().and_then(integral_to_i64))
}

/// `float(v)` and `real(v)`.
///
/// ```
/// use ocr_erl::{
///     error::Position,
///     interpreter::{evaluator::function::cast::to_float, value::core::Value},
/// };
///
/// let at = Position::default();
/// assert_eq!(to_float(&Value::Integer(3), at).unwrap(), Value::Float(3.0));
/// assert_eq!(to_float(&Value::from("0.25"), at).unwrap(), Value::Float(0.25));
/// assert!(to_float(&Value::from("many"), at).is_err());
/// ```
pub fn to_float(value: &Value, position: Position) -> EvalResult<Value> {
    match value {
        Value::Integer(integer) => Ok(Value::Float(int_to_float(*integer))),
        Value::Float(float) => Ok(Value::Float(*float)),
        Value::Boolean(boolean) => Ok(Value::Float(if *boolean { 1.0 } else { 0.0 })),
        Value::String(text) => text.trim()
                                   .parse::<f64>()
                                   .ok()
                                   .filter(|float| float.is_finite())
                                   .map(Value::Float)
                                   .ok_or_else(|| unparsable(text, "Float", position)),
        _ => Err(uncastable(value, "Float", position)),
    }
}

/// `bool(v)`. Numbers are true when non-zero; Strings must be exactly
/// `True` or `False`.
///
/// ```
/// use ocr_erl::{
///     error::Position,
///     interpreter::{evaluator::function::cast::to_boolean, value::core::Value},
/// };
///
/// let at = Position::default();
/// assert_eq!(to_boolean(&Value::from("False"), at).unwrap(), Value::Boolean(false));
/// assert_eq!(to_boolean(&Value::Float(0.5), at).unwrap(), Value::Boolean(true));
/// assert!(to_boolean(&Value::from("true"), at).is_err());
/// ```
pub fn to_boolean(value: &Value, position: Position) -> EvalResult<Value> {
    match value {
        Value::Integer(integer) => Ok(Value::Boolean(*integer != 0)),
        Value::Float(float) => Ok(Value::Boolean(*float != 0.0)),
        Value::Boolean(boolean) => Ok(Value::Boolean(*boolean)),
        Value::String(text) => match text.as_str() {
            "True" => Ok(Value::Boolean(true)),
            "False" => Ok(Value::Boolean(false)),
            _ => Err(unparsable(text, "Boolean", position)),
        },
        _ => Err(uncastable(value, "Boolean", position)),
    }
}
