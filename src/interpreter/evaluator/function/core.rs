use tracing::trace;

use crate::{
    ast::{Expr, SubroutineDef, SubroutineKind},
    error::{Position, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{cast, native},
            statement::Flow,
        },
        host::Host,
        value::{
            core::Value,
            subroutine::{Native, Subroutine},
        },
    },
};

/// How many arguments a native subroutine accepts.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    AtLeast(usize),
    /// Either of two counts.
    Range(usize, usize),
}

impl Arity {
    const fn admits(self, count: usize) -> bool {
        match self {
            Self::Exact(expected) => count == expected,
            Self::AtLeast(minimum) => count >= minimum,
            Self::Range(low, high) => count >= low && count <= high,
        }
    }

    /// The expected count as written in arity errors.
    fn describe(self) -> String {
        match self {
            Self::Exact(1) => "1 argument".to_string(),
            Self::Exact(expected) => format!("{expected} arguments"),
            Self::AtLeast(minimum) => format!("{minimum} or more arguments"),
            Self::Range(low, high) => format!("{low} or {high} arguments"),
        }
    }
}

/// Expands one native handler call.
///
/// `method` handlers are context methods receiving every argument; `unary`
/// handlers are pure functions of the single argument.
macro_rules! native_call {
    (method, $context:expr, $call:path, $arguments:expr, $position:expr) => {
        $call($context, $arguments, $position)
    };
    (unary, $context:expr, $call:path, $arguments:expr, $position:expr) => {
        $call(&$arguments[0], $position)
    };
}

/// Declares the native subroutine library.
///
/// Each entry names a [`Native`], its arity and its handler. The macro
/// produces:
/// - `NATIVE_SUBROUTINES`, the natives in binding order,
/// - `arity_of`, the arity lookup,
/// - `Context::dispatch_native`, which runs a handler on checked arguments.
macro_rules! native_subroutines {
    (
        $(
            $native:ident => {
                arity: $arity:expr,
                $kind:ident: $call:path $(,)?
            }
        ),* $(,)?
    ) => {
        /// Every native subroutine, bound under its name in each program's
        /// global scope.
        pub const NATIVE_SUBROUTINES: &[Native] = &[
            $(Native::$native,)*
        ];

        const fn arity_of(native: Native) -> Arity {
            match native {
                $(Native::$native => $arity,)*
            }
        }

        impl<H: Host> Context<H> {
            fn dispatch_native(&mut self,
                               native: Native,
                               arguments: &[Value],
                               position: Position)
                               -> EvalResult<Value> {
                match native {
                    $(Native::$native => native_call!($kind, self, $call, arguments, position),)*
                }
            }
        }
    };
}

native_subroutines! {
    Print   => { arity: Arity::AtLeast(1),  method: Self::print },
    Input   => { arity: Arity::Range(0, 1), method: Self::input },
    Random  => { arity: Arity::Exact(2),    method: Self::random },
    Str     => { arity: Arity::Exact(1),    unary: cast::to_string },
    Int     => { arity: Arity::Exact(1),    unary: cast::to_integer },
    Float   => { arity: Arity::Exact(1),    unary: cast::to_float },
    Real    => { arity: Arity::Exact(1),    unary: cast::to_float },
    Bool    => { arity: Arity::Exact(1),    unary: cast::to_boolean },
    Asc     => { arity: Arity::Exact(1),    unary: native::asc },
    Chr     => { arity: Arity::Exact(1),    unary: native::chr },
    Open    => { arity: Arity::Exact(1),    method: Self::open },
    NewFile => { arity: Arity::Exact(1),    method: Self::new_file },
}

/// The initial global bindings: one subroutine value per native.
///
/// ```
/// use ocr_erl::interpreter::evaluator::function::core::native_globals;
///
/// let names: Vec<&str> = native_globals().map(|(name, _)| name).collect();
/// assert!(names.contains(&"print"));
/// assert!(names.contains(&"newFile"));
/// ```
pub fn native_globals() -> impl Iterator<Item = (&'static str, Value)> {
    NATIVE_SUBROUTINES.iter()
                      .map(|&native| (native.name(), Value::Subroutine(Subroutine::Native(native))))
}

impl<H: Host> Context<H> {
    /// Evaluates `callee(arguments)`.
    ///
    /// A property callee such as `name.substring(0, 2)` is a method call;
    /// anything else must evaluate to a subroutine.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       callee: &Expr,
                                                       arguments: &[Expr],
                                                       position: Position)
                                                       -> EvalResult<Value> {
        if let Expr::Property { target,
                                property,
                                position: property_position, } = callee
        {
            return self.call_property(target, *property, arguments, *property_position, position);
        }

        match self.eval_value(callee)? {
            Value::Subroutine(Subroutine::Native(native)) => {
                self.call_native(native, arguments, position)
            },
            Value::Subroutine(Subroutine::User(def)) => self.call_user(&def, arguments, position),
            other => Err(RuntimeError::type_mismatch(format!("Type {} cannot be called",
                                                             other.type_name()),
                                                     callee.position())),
        }
    }

    /// Checks the argument count, evaluates the arguments in order and runs
    /// the handler.
    fn call_native(&mut self,
                   native: Native,
                   arguments: &[Expr],
                   position: Position)
                   -> EvalResult<Value> {
        let arity = arity_of(native);
        if !arity.admits(arguments.len()) {
            return Err(RuntimeError::evaluation(format!("{} expected {}, {} given",
                                                        native.name(),
                                                        arity.describe(),
                                                        arguments.len()),
                                                position));
        }
        let values = self.eval_arguments(arguments)?;
        self.dispatch_native(native, &values, position)
    }

    pub(super) fn eval_arguments(&mut self, arguments: &[Expr]) -> EvalResult<Vec<Value>> {
        arguments.iter().map(|argument| self.eval_value(argument)).collect()
    }

    /// Calls a user subroutine.
    ///
    /// The depth limit and the argument count are checked before any argument
    /// is evaluated. Arguments are evaluated in the caller's scope; the body
    /// then runs against a fresh local table. The caller's table and the
    /// depth are restored whether the body succeeds or fails.
    fn call_user(&mut self,
                 def: &SubroutineDef,
                 arguments: &[Expr],
                 position: Position)
                 -> EvalResult<Value> {
        let limit = self.config.max_call_depth;
        if self.call_depth >= limit {
            return Err(RuntimeError::evaluation(format!("Call stack exceeded maximum size of {limit}"),
                                                position));
        }
        if arguments.len() != def.parameters.len() {
            return Err(RuntimeError::evaluation(format!("Subroutine expected {} arguments, {} given",
                                                        def.parameters.len(),
                                                        arguments.len()),
                                                position));
        }
        let values = self.eval_arguments(arguments)?;

        self.call_depth += 1;
        trace!(name = %def.name, depth = self.call_depth, "enter subroutine");
        let caller = self.scope.enter_call();

        let result = self.run_subroutine(def, values);

        self.scope.leave_call(caller);
        self.call_depth -= 1;
        trace!(name = %def.name, depth = self.call_depth, "leave subroutine");
        result
    }

    fn run_subroutine(&mut self, def: &SubroutineDef, values: Vec<Value>) -> EvalResult<Value> {
        for (parameter, value) in def.parameters.iter().zip(values) {
            self.scope
                .assign(parameter, value, None)
                .map_err(|error| error.at(parameter, def.position))?;
        }
        match self.execute_block(&def.body)? {
            Flow::Return(Some(expr)) if def.kind == SubroutineKind::Procedure => {
                Err(RuntimeError::evaluation("Can only use 'return' within functions",
                                             expr.position()))
            },
            Flow::Return(Some(expr)) => self.eval(expr),
            Flow::Return(None) | Flow::Normal => Ok(Value::EmptyReturn),
        }
    }
}
