use std::rc::Rc;

use crate::error::Position;

/// A constant written directly in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A 64-bit signed integer literal such as `42`.
    Integer(i64),
    /// A floating-point literal such as `3.5`.
    Float(f64),
    /// `True` or `False`.
    Boolean(bool),
    /// A string delimited by `"` or `'`.
    String(String),
}

/// Properties reachable with `.name` after a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Length,
    Substring,
    Left,
    Right,
    Upper,
    Lower,
    ReadLine,
    EndOfFile,
    WriteLine,
    Close,
}

impl Property {
    /// Looks up a property by the name written after the `.`.
    ///
    /// ```
    /// use ocr_erl::ast::Property;
    ///
    /// assert_eq!(Property::from_name("readLine"), Some(Property::ReadLine));
    /// assert_eq!(Property::from_name("size"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let property = match name {
            "length" => Self::Length,
            "substring" => Self::Substring,
            "left" => Self::Left,
            "right" => Self::Right,
            "upper" => Self::Upper,
            "lower" => Self::Lower,
            "readLine" => Self::ReadLine,
            "endOfFile" => Self::EndOfFile,
            "writeLine" => Self::WriteLine,
            "close" => Self::Close,
            _ => return None,
        };
        Some(property)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Substring => "substring",
            Self::Left => "left",
            Self::Right => "right",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::ReadLine => "readLine",
            Self::EndOfFile => "endOfFile",
            Self::WriteLine => "writeLine",
            Self::Close => "close",
        }
    }

    /// Methods must be called with `()`; the other properties must not be.
    #[must_use]
    pub const fn is_method(self) -> bool {
        !matches!(self, Self::Length | Self::Upper | Self::Lower)
    }
}

/// Operators that combine two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `^`
    Power,
    /// `MOD`
    Modulo,
    /// `DIV`
    Quotient,
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
}

impl BinaryOperator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
            Self::Modulo => "MOD",
            Self::Quotient => "DIV",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::LessEqual
                 | Self::Greater
                 | Self::GreaterEqual)
    }
}

/// Operators applied to a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Prefix `-`.
    Negate,
    /// Prefix `+`.
    Plus,
    /// `NOT`.
    Not,
}

/// An expression node.
///
/// Every node records the position used when an error is reported against it:
/// the literal or identifier itself, the operator of a unary or binary
/// expression, and the opening `(`, `[` or `.` of a postfix expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal {
        value:    Literal,
        position: Position,
    },
    Identifier {
        name:     String,
        position: Position,
    },
    Unary {
        op:       UnaryOperator,
        operand:  Box<Self>,
        position: Position,
    },
    Binary {
        left:     Box<Self>,
        op:       BinaryOperator,
        right:    Box<Self>,
        position: Position,
    },
    /// `callee(arguments)`. The callee is usually an identifier, or a
    /// property for method calls such as `f.readLine()`.
    Call {
        callee:    Box<Self>,
        arguments: Vec<Self>,
        position:  Position,
    },
    /// `target[i, j]` or `target[i][j]`.
    Index {
        target:   Box<Self>,
        indices:  Vec<Self>,
        position: Position,
    },
    /// `target.name`.
    Property {
        target:   Box<Self>,
        property: Property,
        position: Position,
    },
}

impl Expr {
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Literal { position, .. }
            | Self::Identifier { position, .. }
            | Self::Unary { position, .. }
            | Self::Binary { position, .. }
            | Self::Call { position, .. }
            | Self::Index { position, .. }
            | Self::Property { position, .. } => *position,
        }
    }
}

/// The keyword written before an assigned name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `const x = ...`: the binding can be assigned once.
    Const,
    /// `global x = ...`: the binding goes to the global table.
    Global,
}

/// The left side of an assignment: a name and, for element assignment, the
/// flattened index chain (`a[1][2]` and `a[1, 2]` both give `[1, 2]`).
#[derive(Debug, Clone, PartialEq)]
pub struct AssignTarget {
    pub name:     String,
    pub modifier: Option<Modifier>,
    pub indices:  Vec<Expr>,
    pub position: Position,
}

/// One entry of an array literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    /// A bracketed sub-array, `[1, 2]` inside `[[1, 2], [3, 4]]`.
    Nested(ArrayLiteral),
    Item(Expr),
}

/// The bracketed contents of `array name = [...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<ArrayElement>,
    pub position: Position,
}

/// How an array declaration builds its value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayInit {
    /// `array name[d1, d2]`: every slot starts unassigned.
    Dimensions(Vec<Expr>),
    /// `array name = [...]`.
    Literal(ArrayLiteral),
}

/// An `if` or `elseif` condition with the body it guards.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Expr,
    pub body:      Vec<Statement>,
}

/// A `case value:` arm of a `switch`.
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub value: Expr,
    pub body:  Vec<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    /// Declared with `procedure`; cannot return a value.
    Procedure,
    /// Declared with `function`; may use `return`.
    Function,
}

/// A user-defined procedure or function.
#[derive(Debug, Clone, PartialEq)]
pub struct SubroutineDef {
    pub name:       String,
    pub kind:       SubroutineKind,
    pub parameters: Vec<String>,
    pub body:       Vec<Statement>,
    pub position:   Position,
}

/// `for variable = start to end [step step]` ... `next variable`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub variable: String,
    pub start:    Expr,
    pub end:      Expr,
    /// Absent when no `step` is given; the step is then 1.
    pub step:     Option<Expr>,
    pub body:     Vec<Statement>,
    /// Position of the loop variable.
    pub position: Position,
}

/// A statement node. Each top-level statement of a program is one tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its effect, such as a call.
    Expression {
        expr: Expr,
    },
    Assignment {
        target:   AssignTarget,
        value:    Expr,
        /// Position of the `=`.
        position: Position,
    },
    ArrayDeclaration {
        name:     String,
        init:     ArrayInit,
        position: Position,
    },
    If {
        branches:  Vec<Branch>,
        otherwise: Option<Vec<Self>>,
        position:  Position,
    },
    Switch {
        subject:  Expr,
        cases:    Vec<Case>,
        default:  Option<Vec<Self>>,
        position: Position,
    },
    While {
        condition: Expr,
        body:      Vec<Self>,
        position:  Position,
    },
    DoUntil {
        body:      Vec<Self>,
        condition: Expr,
        position:  Position,
    },
    For(Box<ForLoop>),
    /// Definitions are shared with the subroutine values bound from them.
    Subroutine(Rc<SubroutineDef>),
    Return {
        value:    Option<Expr>,
        position: Position,
    },
}

impl Statement {
    /// Where the statement starts, for tracing and diagnostics.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Expression { expr } => expr.position(),
            Self::Assignment { target, .. } => target.position,
            Self::For(for_loop) => for_loop.position,
            Self::Subroutine(def) => def.position,
            Self::ArrayDeclaration { position, .. }
            | Self::If { position, .. }
            | Self::Switch { position, .. }
            | Self::While { position, .. }
            | Self::DoUntil { position, .. }
            | Self::Return { position, .. } => *position,
        }
    }
}
