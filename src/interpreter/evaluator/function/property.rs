use crate::{
    ast::{Expr, Property},
    error::{Position, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::integer_argument,
        },
        host::Host,
        value::core::Value,
    },
    util::num::length_to_i64,
};

impl<H: Host> Context<H> {
    /// Evaluates `target.property` written without `()`.
    pub(in crate::interpreter::evaluator) fn eval_property(&mut self,
                                                           target: &Expr,
                                                           property: Property,
                                                           position: Position)
                                                           -> EvalResult<Value> {
        if property.is_method() {
            return Err(RuntimeError::evaluation("This method should be called using '()'", position));
        }

        let value = self.eval_value(target)?;
        let type_name = value.type_name();
        let missing = || {
            RuntimeError::type_mismatch(format!("Type {type_name} has no property {}", property.name()),
                                        target.position())
        };
        match (property, value) {
            (Property::Length, Value::String(text)) => {
                Ok(Value::Integer(length_to_i64(text.chars().count())))
            },
            (Property::Length, Value::Array(array)) => {
                Ok(Value::Integer(length_to_i64(array.len())))
            },
            (Property::Upper, Value::String(text)) => Ok(Value::String(text.to_uppercase())),
            (Property::Lower, Value::String(text)) => Ok(Value::String(text.to_lowercase())),
            _ => Err(missing()),
        }
    }

    /// Evaluates `target.method(arguments)`.
    ///
    /// The target is evaluated and checked before the argument count, and
    /// the arguments are evaluated last.
    pub(super) fn call_property(&mut self,
                                target: &Expr,
                                property: Property,
                                arguments: &[Expr],
                                property_position: Position,
                                position: Position)
                                -> EvalResult<Value> {
        match property {
            Property::Length | Property::Upper | Property::Lower => {
                Err(RuntimeError::evaluation("This property should not be called and does not require '()'",
                                             position))
            },
            Property::Substring => self.substring(target, arguments, position),
            Property::Left | Property::Right => {
                self.left_or_right(target, property, arguments, position)
            },
            Property::ReadLine | Property::EndOfFile | Property::WriteLine | Property::Close => {
                self.file_method(target, property, arguments, property_position, position)
            },
        }
    }

    /// Checks the argument count of a method, then evaluates the arguments.
    pub(super) fn method_arguments(&mut self,
                                   name: &str,
                                   arguments: &[Expr],
                                   expected: usize,
                                   position: Position)
                                   -> EvalResult<Vec<Value>> {
        if arguments.len() != expected {
            let noun = if expected == 1 { "argument" } else { "arguments" };
            return Err(RuntimeError::evaluation(format!("{name} expected {expected} {noun}, {} given",
                                                        arguments.len()),
                                                position));
        }
        self.eval_arguments(arguments)
    }

    /// `.substring(index, length)`, counted in characters.
    fn substring(&mut self,
                 target: &Expr,
                 arguments: &[Expr],
                 position: Position)
                 -> EvalResult<Value> {
        let text = match self.eval_value(target)? {
            Value::String(text) => text,
            other => {
                return Err(RuntimeError::type_mismatch(format!("Type {} has no substring method",
                                                               other.type_name()),
                                                       target.position()));
            },
        };
        if text.is_empty() {
            return Err(RuntimeError::evaluation("Cannot take substring of an empty string",
                                                target.position()));
        }

        let values = self.method_arguments("Substring", arguments, 2, position)?;
        let index = integer_argument(&values[0], "Index argument", arguments[0].position())?;
        let length = integer_argument(&values[1], "length argument", arguments[1].position())?;

        let size = length_to_i64(text.chars().count());
        if index < 0 || index >= size {
            return Err(RuntimeError::evaluation(format!("Value of index must be in range of string, from 0 to {}",
                                                        size - 1),
                                                arguments[0].position()));
        }
        if length <= 0 {
            return Err(RuntimeError::evaluation("Length must be 1 or greater",
                                                arguments[1].position()));
        }
        if length > size - index {
            return Err(RuntimeError::evaluation(format!("Substring must be in range of string.\nFor position {index}, substring length must be between 1 and {}",
                                                        size - index),
                                                arguments[1].position()));
        }

        let skip = usize::try_from(index).unwrap_or_default();
        let take = usize::try_from(length).unwrap_or_default();
        Ok(Value::String(text.chars().skip(skip).take(take).collect()))
    }

    /// `.left(n)` and `.right(n)`: the first or last `n` characters.
    fn left_or_right(&mut self,
                     target: &Expr,
                     property: Property,
                     arguments: &[Expr],
                     position: Position)
                     -> EvalResult<Value> {
        let name = property.name();
        let text = match self.eval_value(target)? {
            Value::String(text) => text,
            other => {
                return Err(RuntimeError::type_mismatch(format!("Cannot use {name} on type {}",
                                                               other.type_name()),
                                                       target.position()));
            },
        };

        let values = self.method_arguments(name, arguments, 1, position)?;
        let length = integer_argument(&values[0], "Argument", arguments[0].position())?;

        let size = text.chars().count();
        if length > length_to_i64(size) {
            return Err(RuntimeError::evaluation("Length of new string must be less than or equal to the old string's length",
                                                arguments[0].position()));
        }
        let Some(take) = usize::try_from(length).ok().filter(|&take| take > 0) else {
            return Err(RuntimeError::evaluation("Length of new string must be 1 or greater",
                                                arguments[0].position()));
        };

        let slice = if property == Property::Left {
            text.chars().take(take).collect()
        } else {
            text.chars().skip(size - take).collect()
        };
        Ok(Value::String(slice))
    }
}
