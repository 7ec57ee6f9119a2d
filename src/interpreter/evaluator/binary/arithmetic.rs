use crate::{
    ast::BinaryOperator,
    error::{Position, RuntimeError},
    interpreter::{
        evaluator::{core::EvalResult, utils::overflow},
        value::core::Value,
    },
    util::num::{floor_div, floor_mod, floor_mod_f64, int_to_float, integral_to_i64},
};

/// A pair of numeric operands after promotion.
enum Numbers {
    Integers(i64, i64),
    Floats(f64, f64),
}

/// Promotes two operands to a common numeric type, or `None` if either is
/// not a number.
fn numbers(left: &Value, right: &Value) -> Option<Numbers> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(Numbers::Integers(*a, *b)),
        _ => Some(Numbers::Floats(left.as_f64()?, right.as_f64()?)),
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Integer(value) => *value == 0,
        Value::Float(value) => *value == 0.0,
        _ => false,
    }
}

/// An Integer when `result` is whole, otherwise a Float.
fn integral_or_float(result: f64, position: Position) -> EvalResult<Value> {
    if result.is_finite() && result.fract() == 0.0 {
        integral_to_i64(result).map(Value::Integer).ok_or_else(|| overflow(position))
    } else {
        Ok(Value::Float(result))
    }
}

fn numeric_mismatch(description: String, position: Position) -> RuntimeError {
    RuntimeError::type_mismatch(format!("{description}, expected Integers or Floats"), position)
}

/// `+`: numeric addition or String concatenation.
pub fn add(left: Value, right: Value, position: Position) -> EvalResult<Value> {
    match (left, right) {
        (Value::String(mut a), Value::String(b)) => {
            a.push_str(&b);
            Ok(Value::String(a))
        },
        (Value::String(_), right) => {
            Err(RuntimeError::type_mismatch(format!("Cannot concatenate type {} with String, expected String",
                                                    right.type_name()),
                                            position))
        },
        (left, right) => match numbers(&left, &right) {
            Some(Numbers::Integers(a, b)) => {
                a.checked_add(b).map(Value::Integer).ok_or_else(|| overflow(position))
            },
            Some(Numbers::Floats(a, b)) => Ok(Value::Float(a + b)),
            None if left.is_numeric() => {
                Err(RuntimeError::type_mismatch(format!("Cannot add type {} to {}, expected Integer or Float",
                                                        right.type_name(),
                                                        left.type_name()),
                                                position))
            },
            None => Err(RuntimeError::type_mismatch(format!("Cannot combine types {} and {}",
                                                            left.type_name(),
                                                            right.type_name()),
                                                    position)),
        },
    }
}

pub fn subtract(left: &Value, right: &Value, position: Position) -> EvalResult<Value> {
    match numbers(left, right) {
        Some(Numbers::Integers(a, b)) => {
            a.checked_sub(b).map(Value::Integer).ok_or_else(|| overflow(position))
        },
        Some(Numbers::Floats(a, b)) => Ok(Value::Float(a - b)),
        None => Err(numeric_mismatch(format!("Cannot subtract type {} from {}",
                                             right.type_name(),
                                             left.type_name()),
                                     position)),
    }
}

pub fn multiply(left: &Value, right: &Value, position: Position) -> EvalResult<Value> {
    match numbers(left, right) {
        Some(Numbers::Integers(a, b)) => {
            a.checked_mul(b).map(Value::Integer).ok_or_else(|| overflow(position))
        },
        Some(Numbers::Floats(a, b)) => Ok(Value::Float(a * b)),
        None => Err(numeric_mismatch(format!("Cannot multiply type {} with {}",
                                             left.type_name(),
                                             right.type_name()),
                                     position)),
    }
}

/// `/`. Two Integers give an Integer when the quotient is whole.
///
/// ```
/// use ocr_erl::{
///     error::Position,
///     interpreter::{evaluator::binary::arithmetic::divide, value::core::Value},
/// };
///
/// let at = Position::default();
/// assert_eq!(divide(&Value::Integer(6), &Value::Integer(3), at).unwrap(), Value::Integer(2));
/// assert_eq!(divide(&Value::Integer(7), &Value::Integer(2), at).unwrap(), Value::Float(3.5));
/// assert_eq!(divide(&Value::Float(6.0), &Value::Integer(3), at).unwrap(), Value::Float(2.0));
/// ```
pub fn divide(left: &Value, right: &Value, position: Position) -> EvalResult<Value> {
    if is_zero(right) {
        return Err(RuntimeError::evaluation("Cannot divide by zero", position));
    }
    match numbers(left, right) {
        Some(Numbers::Integers(a, b)) => match a.checked_rem(b) {
            Some(0) => a.checked_div(b).map(Value::Integer).ok_or_else(|| overflow(position)),
            _ => integral_or_float(int_to_float(a) / int_to_float(b), position),
        },
        Some(Numbers::Floats(a, b)) => Ok(Value::Float(a / b)),
        None => Err(numeric_mismatch(format!("Cannot divide type {} by {}",
                                             left.type_name(),
                                             right.type_name()),
                                     position)),
    }
}

/// `^`. An Integer raised to a non-negative Integer stays exact.
pub fn power(left: &Value, right: &Value, position: Position) -> EvalResult<Value> {
    let result = match numbers(left, right) {
        Some(Numbers::Integers(base, exponent)) => {
            if let Ok(exponent) = u32::try_from(exponent) {
                return base.checked_pow(exponent)
                           .map(Value::Integer)
                           .ok_or_else(|| overflow(position));
            }
            int_to_float(base).powf(int_to_float(exponent))
        },
        Some(Numbers::Floats(base, exponent)) => base.powf(exponent),
        None => {
            return Err(numeric_mismatch(format!("Cannot raise type {} to the power of {}",
                                                left.type_name(),
                                                right.type_name()),
                                        position));
        },
    };

    if result.is_nan() {
        return Err(RuntimeError::evaluation("Cannot raise a negative number to this power",
                                            position));
    }
    match (left, right) {
        (Value::Integer(_), Value::Integer(_)) => integral_or_float(result, position),
        _ => Ok(Value::Float(result)),
    }
}

/// `MOD`, floored: the result takes the sign of the divisor.
pub fn modulo(left: &Value, right: &Value, position: Position) -> EvalResult<Value> {
    if is_zero(right) {
        return Err(RuntimeError::evaluation("Cannot take modulo by zero", position));
    }
    match numbers(left, right) {
        Some(Numbers::Integers(a, b)) => {
            floor_mod(a, b).map(Value::Integer).ok_or_else(|| overflow(position))
        },
        Some(Numbers::Floats(a, b)) => Ok(Value::Float(floor_mod_f64(a, b))),
        None => Err(numeric_mismatch(format!("Cannot take modulus of type {} modulo {}",
                                             left.type_name(),
                                             right.type_name()),
                                     position)),
    }
}

/// `DIV`, floored.
pub fn quotient(left: &Value, right: &Value, position: Position) -> EvalResult<Value> {
    if is_zero(right) {
        return Err(RuntimeError::evaluation("Cannot do quotient division by zero", position));
    }
    match numbers(left, right) {
        Some(Numbers::Integers(a, b)) => {
            floor_div(a, b).map(Value::Integer).ok_or_else(|| overflow(position))
        },
        Some(Numbers::Floats(a, b)) => Ok(Value::Float((a / b).floor())),
        None => Err(numeric_mismatch(format!("Cannot take the quotient of type {} and {}",
                                             left.type_name(),
                                             right.type_name()),
                                     position)),
    }
}

/// `AND` and `OR` over two Booleans.
pub fn logical(op: BinaryOperator,
               left: &Value,
               right: &Value,
               position: Position)
               -> EvalResult<Value> {
    match (left, right) {
        (Value::Boolean(a), Value::Boolean(b)) => {
            Ok(Value::Boolean(if op == BinaryOperator::And { *a && *b } else { *a || *b }))
        },
        _ => Err(RuntimeError::type_mismatch(format!("Cannot use {} on type {} with {}, expected Booleans",
                                                     op.symbol(),
                                                     right.type_name(),
                                                     left.type_name()),
                                             position)),
    }
}
