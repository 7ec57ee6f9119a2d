use std::fmt;

use crate::{
    ast::Literal,
    interpreter::value::{array::ArrayValue, file::FileHandle, subroutine::Subroutine},
    util::num::{format_float, int_to_float},
};

/// Represents a runtime value in the interpreter.
///
/// Every expression evaluates to one of these. Arrays own their elements, so
/// assigning an array to another name copies it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// `True` or `False`. Produced by comparisons and logical operators, and
    /// required by every condition.
    Boolean(bool),
    /// A string of Unicode characters.
    String(String),
    /// A fixed-length array, possibly of arrays.
    Array(ArrayValue),
    /// A procedure, function or native subroutine.
    Subroutine(Subroutine),
    /// An open or closed handle over a stored file.
    File(FileHandle),
    /// What a call produces when the subroutine returns nothing. It can be
    /// discarded by an expression statement but never used as a value.
    EmptyReturn,
}

impl Value {
    /// The name used for this value's type in diagnostics.
    ///
    /// ```
    /// use ocr_erl::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(3).type_name(), "Integer");
    /// assert_eq!(Value::from("text").type_name(), "String");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "Integer",
            Self::Float(_) => "Float",
            Self::Boolean(_) => "Boolean",
            Self::String(_) => "String",
            Self::Array(_) => "Array",
            Self::Subroutine(_) => "Subroutine",
            Self::File(_) => "File",
            Self::EmptyReturn => "an empty Subroutine Return value",
        }
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Numeric value widened to `f64`, or `None` for non-numbers.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(int_to_float(*value)),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<ArrayValue> for Value {
    fn from(value: ArrayValue) -> Self {
        Self::Array(value)
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Integer(value) => Self::Integer(*value),
            Literal::Float(value) => Self::Float(*value),
            Literal::Boolean(value) => Self::Boolean(*value),
            Literal::String(value) => Self::String(value.clone()),
        }
    }
}

impl fmt::Display for Value {
    /// Formats the value the way `print` shows it.
    ///
    /// ```
    /// use ocr_erl::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Float(3.0).to_string(), "3.0");
    /// assert_eq!(Value::Boolean(false).to_string(), "False");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_float(*value)),
            Self::Boolean(true) => f.write_str("True"),
            Self::Boolean(false) => f.write_str("False"),
            Self::String(value) => f.write_str(value),
            Self::Array(array) => write!(f, "{array}"),
            Self::Subroutine(subroutine) => write!(f, "{subroutine}"),
            Self::File(_) => f.write_str("<file>"),
            Self::EmptyReturn => f.write_str("<no value>"),
        }
    }
}
