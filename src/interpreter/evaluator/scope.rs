use std::collections::HashMap;

use thiserror::Error;

use crate::{
    ast::Modifier,
    error::{Position, RuntimeError},
    interpreter::value::core::Value,
};

/// Why a name could not be read or bound.
///
/// The messages complete an identifier error headline such as
/// `Identifier Error: 'x' was not declared`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("was not declared")]
    NotDeclared,
    #[error("is a constant and has already been defined")]
    ConstantRedefined,
}

impl ScopeError {
    /// Reports the failure as an identifier error against `name`.
    pub fn at(self, name: &str, position: Position) -> RuntimeError {
        RuntimeError::identifier(name, self.to_string(), position)
    }
}

#[derive(Debug, Clone)]
struct Symbol {
    value:    Value,
    /// Set by a `const` binding; cleared only by rebinding with `const`.
    constant: bool,
}

/// The bindings of one tier.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name).map(|symbol| &symbol.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.symbols.get_mut(name).map(|symbol| &mut symbol.value)
    }

    /// Binds `name` in this table.
    ///
    /// A `const` binding always succeeds and makes the name constant, so a
    /// constant can be declared again. A plain binding fails on a constant.
    pub fn set(&mut self, name: &str, value: Value, constant: bool) -> Result<(), ScopeError> {
        match self.symbols.get_mut(name) {
            Some(symbol) if constant => {
                symbol.value = value;
                symbol.constant = true;
            },
            Some(symbol) if symbol.constant => return Err(ScopeError::ConstantRedefined),
            Some(symbol) => symbol.value = value,
            None => {
                self.symbols.insert(name.to_string(), Symbol { value, constant });
            },
        }
        Ok(())
    }
}

/// The two scope tiers: the global table, and the local table of the
/// subroutine call in progress.
///
/// Reads look in the local table first and fall back to the global one.
/// There is no chain beyond these two: a subroutine sees its own locals and
/// the globals, never its caller's locals.
///
/// # Example
/// ```
/// use ocr_erl::{
///     ast::Modifier,
///     interpreter::{evaluator::scope::Scope, value::core::Value},
/// };
///
/// let mut scope = Scope::default();
/// scope.assign("x", Value::Integer(1), None).unwrap();
///
/// let caller = scope.enter_call();
/// assert_eq!(scope.lookup("x"), Some(&Value::Integer(1)));
/// scope.assign("x", Value::Integer(2), None).unwrap();
/// scope.assign("y", Value::Integer(3), Some(Modifier::Global)).unwrap();
/// scope.leave_call(caller);
///
/// assert_eq!(scope.lookup("x"), Some(&Value::Integer(1)));
/// assert_eq!(scope.lookup("y"), Some(&Value::Integer(3)));
/// ```
#[derive(Debug, Default)]
pub struct Scope {
    global: SymbolTable,
    local:  Option<SymbolTable>,
}

impl Scope {
    /// A scope whose global table holds `natives`.
    pub fn with_globals(natives: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        let mut global = SymbolTable::default();
        for (name, value) in natives {
            global.symbols.insert(name.to_string(), Symbol { value, constant: false });
        }
        Self { global, local: None }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.local.as_ref().and_then(|table| table.get(name)).or_else(|| self.global.get(name))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Value> {
        match self.local.as_mut().and_then(|table| table.get_mut(name)) {
            Some(value) => Some(value),
            None => self.global.get_mut(name),
        }
    }

    /// Binds `name` in the current tier, or in the global tier for `global`
    /// bindings.
    pub fn assign(&mut self,
                  name: &str,
                  value: Value,
                  modifier: Option<Modifier>)
                  -> Result<(), ScopeError> {
        let constant = modifier == Some(Modifier::Const);
        let table = match (&mut self.local, modifier) {
            (Some(local), None | Some(Modifier::Const)) => local,
            _ => &mut self.global,
        };
        table.set(name, value, constant)
    }

    /// Starts a fresh local table, returning the caller's for
    /// [`Scope::leave_call`].
    pub fn enter_call(&mut self) -> Option<SymbolTable> {
        self.local.replace(SymbolTable::default())
    }

    pub fn leave_call(&mut self, caller: Option<SymbolTable>) {
        self.local = caller;
    }
}
