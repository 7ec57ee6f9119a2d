use crate::{
    ast::{ArrayElement, ArrayInit, ArrayLiteral, AssignTarget, Expr},
    config::MAX_ARRAY_BYTES,
    error::{Position, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            scope::ScopeError,
            utils::checked_index,
        },
        host::Host,
        value::{array::ArrayValue, core::Value},
    },
};

/// An evaluated index with the position of its expression.
type Index = (Value, Position);

/// Slots, rows included, that fit in one declaration's memory budget.
const MAX_ARRAY_SLOTS: usize = MAX_ARRAY_BYTES / size_of::<Option<Value>>();

impl<H: Host> Context<H> {
    /// Executes `array name[...]` or `array name = [...]`, binding the new
    /// array in the current scope.
    pub(super) fn declare_array(&mut self,
                                name: &str,
                                init: &ArrayInit,
                                position: Position)
                                -> EvalResult<()> {
        let array = match init {
            ArrayInit::Dimensions(dimensions) => self.array_from_dimensions(dimensions)?,
            ArrayInit::Literal(literal) => self.array_from_literal(literal)?,
        };
        self.scope
            .assign(name, Value::Array(array), None)
            .map_err(|error| error.at(name, position))
    }

    fn array_from_dimensions(&mut self, dimensions: &[Expr]) -> EvalResult<ArrayValue> {
        let mut lengths = Vec::with_capacity(dimensions.len());
        let mut width: usize = 1;
        let mut slots: usize = 0;

        for expr in dimensions {
            let length = match self.eval_value(expr)? {
                Value::Integer(length) => length,
                other => {
                    return Err(RuntimeError::type_mismatch(format!("Array length must be of type Integer, not {}",
                                                                   other.type_name()),
                                                           expr.position()));
                },
            };
            let length = usize::try_from(length).map_err(|_| {
                             RuntimeError::evaluation("Array length cannot be negative",
                                                      expr.position())
                         })?;
            let too_large = || RuntimeError::evaluation("Array is too large", expr.position());
            width = width.checked_mul(length).ok_or_else(too_large)?;
            slots = slots.checked_add(width)
                         .filter(|&slots| slots <= MAX_ARRAY_SLOTS)
                         .ok_or_else(too_large)?;
            lengths.push(length);
        }

        Ok(ArrayValue::with_dimensions(&lengths))
    }

    /// Builds an array from a literal. Elements are evaluated left to right;
    /// all must have one type, and sub-arrays must share one length.
    fn array_from_literal(&mut self, literal: &ArrayLiteral) -> EvalResult<ArrayValue> {
        let mut values = Vec::with_capacity(literal.elements.len());
        let mut element_type = None;
        let mut row_length = None;

        for element in &literal.elements {
            let (value, position) = match element {
                ArrayElement::Nested(inner) => {
                    (Value::Array(self.array_from_literal(inner)?), inner.position)
                },
                ArrayElement::Item(expr) => (self.eval_value(expr)?, expr.position()),
            };

            match element_type {
                None => element_type = Some(value.type_name()),
                Some(expected) if expected != value.type_name() => {
                    return Err(RuntimeError::type_mismatch("Array can only be defined with a single data type",
                                                           position));
                },
                Some(_) => {},
            }
            if let Value::Array(row) = &value {
                match row_length {
                    None => row_length = Some(row.len()),
                    Some(expected) if expected != row.len() => {
                        return Err(RuntimeError::evaluation("All sub-arrays must be the same length",
                                                            position));
                    },
                    Some(_) => {},
                }
            }
            values.push(value);
        }

        Ok(ArrayValue::from_values(values))
    }

    fn eval_indices(&mut self, indices: &[Expr]) -> EvalResult<Vec<Index>> {
        indices.iter()
               .map(|expr| Ok((self.eval_value(expr)?, expr.position())))
               .collect()
    }

    /// Reads `target[i][j]...`.
    ///
    /// Fewer indices than dimensions give a copy of the sub-array. A variable
    /// is read in place rather than copied whole.
    pub(super) fn eval_index(&mut self,
                             target: &Expr,
                             indices: &[Expr],
                             position: Position)
                             -> EvalResult<Value> {
        if let Expr::Identifier { name,
                                  position: name_position, } = target
        {
            self.read_variable(name, *name_position)?;
            let indices = self.eval_indices(indices)?;
            let array = self.read_variable(name, *name_position)?;
            return element_at(array, &indices, position).cloned();
        }

        let array = self.eval_value(target)?;
        let indices = self.eval_indices(indices)?;
        element_at(&array, &indices, position).cloned()
    }

    /// Stores `value` at `name[i][j]...`, mutating the array binding found by
    /// the read rule. The value has already been evaluated.
    pub(super) fn assign_element(&mut self,
                                 target: &AssignTarget,
                                 value: Value,
                                 position: Position)
                                 -> EvalResult<()> {
        self.read_variable(&target.name, target.position)?;
        let indices = self.eval_indices(&target.indices)?;
        let root = self.scope
                       .lookup_mut(&target.name)
                       .ok_or_else(|| ScopeError::NotDeclared.at(&target.name, target.position))?;
        store_element(root, &indices, value, position)
    }
}

fn not_an_array(value: &Value, position: Position) -> RuntimeError {
    RuntimeError::type_mismatch(format!("Can only access value from type Array, not {}",
                                        value.type_name()),
                                position)
}

fn too_many_dimensions(position: Position) -> RuntimeError {
    RuntimeError::evaluation("Array does not have this many dimensions", position)
}

fn element_at<'v>(value: &'v Value,
                  indices: &[Index],
                  position: Position)
                  -> EvalResult<&'v Value> {
    let mut current = value;
    for (depth, (index, index_position)) in indices.iter().enumerate() {
        let array = match current {
            Value::Array(array) => array,
            other if depth == 0 => return Err(not_an_array(other, position)),
            _ => return Err(too_many_dimensions(*index_position)),
        };
        let slot = checked_index(index, array.len(), *index_position)?;
        current = match array.get(slot) {
            Some(Some(element)) => element,
            _ => {
                return Err(RuntimeError::evaluation("Array item has not been assigned a value",
                                                    *index_position));
            },
        };
    }
    Ok(current)
}

fn array_mut(value: &mut Value, depth: usize, position: Position) -> EvalResult<&mut ArrayValue> {
    match value {
        Value::Array(array) => Ok(array),
        other if depth == 0 => Err(not_an_array(other, position)),
        _ => Err(too_many_dimensions(position)),
    }
}

fn store_element(root: &mut Value,
                 indices: &[Index],
                 value: Value,
                 position: Position)
                 -> EvalResult<()> {
    let Some(((last, last_position), outer)) = indices.split_last() else {
        return Err(RuntimeError::evaluation("Expected index value", position));
    };

    let mut array = array_mut(root, 0, position)?;
    for (depth, (index, index_position)) in outer.iter().enumerate() {
        let slot = checked_index(index, array.len(), *index_position)?;
        array = match array.slot_mut(slot) {
            Some(Some(inner)) => array_mut(inner, depth + 1, *index_position)?,
            _ => return Err(too_many_dimensions(*index_position)),
        };
    }

    let slot = checked_index(last, array.len(), *last_position)?;
    let type_name = value.type_name();
    match array.element_type() {
        None => array.set_element_type(type_name),
        Some(expected) if expected != type_name => {
            return Err(RuntimeError::type_mismatch(format!("Cannot add item of type {type_name} to array of {expected}"),
                                                   position));
        },
        Some(_) => {},
    }
    if let Some(target) = array.slot_mut(slot) {
        *target = Some(value);
    }
    Ok(())
}
