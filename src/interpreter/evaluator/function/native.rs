use crate::{
    error::{Position, RuntimeError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        host::Host,
        value::core::Value,
    },
};

impl<H: Host> Context<H> {
    /// `print(v, ...)`: writes the values, separated by spaces, as one
    /// transcript line.
    pub(super) fn print(&mut self, arguments: &[Value], position: Position) -> EvalResult<Value> {
        let mut output = Vec::with_capacity(arguments.len());
        for value in arguments {
            if let Value::File(_) = value {
                return Err(RuntimeError::evaluation("Cannot print value of type File", position));
            }
            output.push(value.to_string());
        }
        self.host.print_line(&output.join(" "));
        self.host.pause();
        Ok(Value::EmptyReturn)
    }

    /// `input([prompt])`: waits for a line from the host.
    pub(super) fn input(&mut self, arguments: &[Value], position: Position) -> EvalResult<Value> {
        let prompt = match arguments.first() {
            None => "",
            Some(Value::String(prompt)) => prompt.as_str(),
            Some(other) => {
                return Err(RuntimeError::type_mismatch(format!("Can only output type String, not {}",
                                                               other.type_name()),
                                                       position));
            },
        };
        let line = self.host.read_line(prompt, &self.running).ok_or(RuntimeError::Abort)?;
        self.check_running()?;
        Ok(Value::String(line))
    }

    /// `random(min, max)`: an Integer in `min..=max`, or a Float in
    /// `min..max`.
    pub(super) fn random(&mut self, arguments: &[Value], position: Position) -> EvalResult<Value> {
        let misordered =
            || RuntimeError::evaluation("random expects the minimum to be no greater than the maximum",
                                        position);
        match (&arguments[0], &arguments[1]) {
            (Value::Integer(min), Value::Integer(max)) => {
                if min > max {
                    return Err(misordered());
                }
                Ok(Value::Integer(self.host.random_integer(*min, *max)))
            },
            (Value::Float(min), Value::Float(max)) => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(RuntimeError::evaluation("random expects finite bounds", position));
                }
                if min > max {
                    return Err(misordered());
                }
                Ok(Value::Float(self.host.random_float(*min, *max)))
            },
            (min, max) => {
                Err(RuntimeError::type_mismatch(format!("Cannot use random on type {} with {}, expected two Integers or two Floats",
                                                        min.type_name(),
                                                        max.type_name()),
                                                position))
            },
        }
    }
}

/// `ASC(ch)`: the code point of a one-character String.
///
/// ```
/// use ocr_erl::{
///     error::Position,
///     interpreter::{evaluator::function::native::asc, value::core::Value},
/// };
///
/// let at = Position::default();
/// assert_eq!(asc(&Value::from("A"), at).unwrap(), Value::Integer(65));
/// assert!(asc(&Value::from("AB"), at).is_err());
/// ```
pub fn asc(value: &Value, position: Position) -> EvalResult<Value> {
    let Value::String(text) = value else {
        return Err(RuntimeError::type_mismatch(format!("Expected type String, not type {}",
                                                       value.type_name()),
                                               position));
    };
    let mut characters = text.chars();
    match (characters.next(), characters.next()) {
        (Some(character), None) => Ok(Value::Integer(i64::from(u32::from(character)))),
        _ => Err(RuntimeError::type_mismatch("Expected single character, as string of length 1",
                                             position)),
    }
}

/// `CHR(code)`: the one-character String for a code point.
///
/// ```
/// use ocr_erl::{
///     error::Position,
///     interpreter::{evaluator::function::native::chr, value::core::Value},
/// };
///
/// let at = Position::default();
/// assert_eq!(chr(&Value::Integer(97), at).unwrap(), Value::from("a"));
/// assert!(chr(&Value::Integer(-1), at).is_err());
/// ```
pub fn chr(value: &Value, position: Position) -> EvalResult<Value> {
    let Value::Integer(code) = value else {
        return Err(RuntimeError::type_mismatch(format!("Expected type Integer, not type {}",
                                                       value.type_name()),
                                               position));
    };
    u32::try_from(*code).ok()
                        .and_then(char::from_u32)
                        .map(|character| Value::String(character.to_string()))
                        .ok_or_else(|| {
                            RuntimeError::evaluation(format!("{code} is not a valid character code"),
                                                     position)
                        })
}
