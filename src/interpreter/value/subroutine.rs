use std::{fmt, rc::Rc};

use crate::ast::SubroutineDef;

/// A callable value.
#[derive(Debug, Clone)]
pub enum Subroutine {
    /// A `procedure` or `function` defined in the program. The definition is
    /// shared with the syntax tree it came from.
    User(Rc<SubroutineDef>),
    /// One of the subroutines every program starts with.
    Native(Native),
}

/// The native subroutine library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Native {
    Print,
    Input,
    Random,
    Str,
    Int,
    Float,
    Real,
    Bool,
    Asc,
    Chr,
    Open,
    NewFile,
}

impl Native {
    /// The global name the subroutine is bound to.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Input => "input",
            Self::Random => "random",
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Real => "real",
            Self::Bool => "bool",
            Self::Asc => "ASC",
            Self::Chr => "CHR",
            Self::Open => "open",
            Self::NewFile => "newFile",
        }
    }
}

impl Subroutine {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::User(def) => &def.name,
            Self::Native(native) => native.name(),
        }
    }
}

impl PartialEq for Subroutine {
    /// User subroutines are equal only to the same definition.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::User(a), Self::User(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Subroutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(def) => write!(f, "<subroutine: {}>", def.name),
            Self::Native(native) => write!(f, "<native subroutine: {}>", native.name()),
        }
    }
}
