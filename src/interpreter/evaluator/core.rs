use tracing::{debug, info};

use crate::{
    ast::Expr,
    config::{Config, STACK_GROW_SIZE, STACK_RED_ZONE},
    error::{Error, Position, RuntimeError},
    interpreter::{
        evaluator::{
            function::core::native_globals,
            scope::{Scope, ScopeError},
        },
        host::{Host, RunFlag},
        parser::core::parse_program,
        storage::FileStorage,
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Transcript line written when a program finishes without error.
pub const SUCCESS_MARKER: &str = "✅ Exited successfully";
/// Transcript line written after the diagnostic of a failed program.
pub const FAILURE_MARKER: &str = "❌ Exited with failure";

/// Stores the runtime evaluation context.
///
/// A context owns everything that outlives a single statement: the scope, the
/// file storage, the host, and the call depth. It can run any number of
/// programs one after another; each run starts from fresh globals, while files
/// persist between runs.
///
/// ## Usage
/// ```
/// use ocr_erl::interpreter::{evaluator::core::Context, host::BufferedHost};
///
/// let mut context = Context::new(BufferedHost::new());
/// assert_eq!(context.run("print(1 + 2 * 3)"), 0);
/// assert_eq!(context.host().lines(), ["7", "✅ Exited successfully"]);
/// ```
pub struct Context<H: Host> {
    pub(super) scope:      Scope,
    pub(super) files:      FileStorage,
    pub(super) host:       H,
    pub(super) running:    RunFlag,
    pub(super) config:     Config,
    pub(super) call_depth: usize,
}

impl<H: Host> Context<H> {
    /// Creates a context with the default limits.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, Config::default())
    }

    #[must_use]
    pub fn with_config(host: H, config: Config) -> Self {
        Self { scope: Scope::with_globals(native_globals()),
               files: FileStorage::default(),
               host,
               running: RunFlag::default(),
               config,
               call_depth: 0 }
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub const fn files(&self) -> &FileStorage {
        &self.files
    }

    pub const fn files_mut(&mut self) -> &mut FileStorage {
        &mut self.files
    }

    /// A handle on the running flag. Stopping it from another thread aborts
    /// the program at its next evaluation step.
    #[must_use]
    pub fn run_flag(&self) -> RunFlag {
        self.running.clone()
    }

    /// Runs a program and writes its outcome to the transcript.
    ///
    /// On success the transcript ends with [`SUCCESS_MARKER`]. On failure it
    /// ends with the rendered diagnostic, a blank line and
    /// [`FAILURE_MARKER`]. Returns the exit status, 0 or 1.
    pub fn run(&mut self, source: &str) -> i32 {
        let outcome = self.execute(source);
        self.running.stop();
        match outcome {
            Ok(()) => {
                self.host.print_line(SUCCESS_MARKER);
                0
            },
            Err(error) => {
                self.host.print_line(&error.render(source));
                self.host.print_line("");
                self.host.print_line(FAILURE_MARKER);
                1
            },
        }
    }

    /// Runs a program without writing any markers, returning the first error.
    ///
    /// The whole program is lexed and parsed before anything executes, so a
    /// translation error produces no output at all.
    pub fn execute(&mut self, source: &str) -> Result<(), Error> {
        self.running.start();
        self.scope = Scope::with_globals(native_globals());
        self.call_depth = 0;
        self.files.store_all();
        debug!(lines = source.lines().count(), "run started");

        let result = self.execute_program(source);
        match &result {
            Ok(()) => debug!("run finished"),
            Err(Error::Runtime(RuntimeError::Abort)) => info!("run aborted"),
            Err(error) => debug!(%error, "run failed"),
        }
        result
    }

    fn execute_program(&mut self, source: &str) -> Result<(), Error> {
        let program = parse_program(source)?;
        for statement in &program {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    /// Fails with [`RuntimeError::Abort`] once the run flag is cleared.
    pub(crate) fn check_running(&self) -> EvalResult<()> {
        if self.running.is_running() { Ok(()) } else { Err(RuntimeError::Abort) }
    }

    /// Evaluates an expression.
    ///
    /// The result may be [`Value::EmptyReturn`] when the expression is a call
    /// to a subroutine that returns nothing; use [`Context::eval_value`] where
    /// a usable value is required.
    ///
    /// The native stack grows on demand, so deep nesting ends at the call
    /// depth limit whatever the caller's thread size.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult<Value> {
        self.check_running()?;
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, position } => self.read_variable(name, *position).cloned(),
            Expr::Unary { op,
                          operand,
                          position, } => self.eval_unary(*op, operand, *position),
            Expr::Binary { left,
                           op,
                           right,
                           position, } => self.eval_binary(left, *op, right, *position),
            Expr::Call { callee,
                         arguments,
                         position, } => self.eval_call(callee, arguments, *position),
            Expr::Index { target,
                          indices,
                          position, } => self.eval_index(target, indices, *position),
            Expr::Property { target,
                             property,
                             position, } => self.eval_property(target, *property, *position),
        }
    }

    /// Evaluates an expression that must produce a usable value.
    pub fn eval_value(&mut self, expr: &Expr) -> EvalResult<Value> {
        match self.eval(expr)? {
            Value::EmptyReturn => {
                Err(RuntimeError::evaluation("Cannot use the result of a subroutine with no return value",
                                             expr.position()))
            },
            value => Ok(value),
        }
    }

    /// Reads a binding without copying it.
    pub(crate) fn read_variable(&self, name: &str, position: Position) -> EvalResult<&Value> {
        self.scope.lookup(name).ok_or_else(|| ScopeError::NotDeclared.at(name, position))
    }
}
