use std::{rc::Rc, thread};

use ocr_erl::{
    ast::{Expr, Literal, Statement, SubroutineDef, SubroutineKind},
    config::Config,
    error::{Error, Position},
    get_result,
    interpreter::{
        evaluator::core::{Context, FAILURE_MARKER, SUCCESS_MARKER},
        host::{BufferedHost, Host, RunFlag},
    },
};

fn output(source: &str) -> Vec<String> {
    get_result(source).unwrap_or_else(|e| panic!("Program failed: {e}\n{source}"))
}

fn assert_output(source: &str, expected: &[&str]) {
    assert_eq!(output(source), expected, "unexpected output for:\n{source}");
}

/// The headline of the error a program stops with, such as
/// `Evaluation Error: Cannot divide by zero`.
fn error_of(source: &str) -> String {
    match get_result(source) {
        Ok(lines) => panic!("Program succeeded but was expected to fail: {lines:?}\n{source}"),
        Err(e) => e.to_string(),
    }
}

fn assert_error(source: &str, expected: &str) {
    assert_eq!(error_of(source), expected, "unexpected error for:\n{source}");
}

#[test]
fn arithmetic_and_precedence() {
    assert_output("print(1 + 2 * 3)", &["7"]);
    assert_output("print((1 + 2) * 3)", &["9"]);
    assert_output("print(2 ^ 3 ^ 2)", &["64"]);
    assert_output("print(-2 ^ 2)", &["4"]);
    assert_output("print(10 - 4 - 3)", &["3"]);
}

#[test]
fn integer_operands_stay_integers() {
    assert_output("print(6 / 3)", &["2"]);
    assert_output("print(7 / 2)", &["3.5"]);
    assert_output("print(2 ^ 10)", &["1024"]);
    assert_output("print(2 ^ -1)", &["0.5"]);
    assert_output("print(3 + 4, 3 - 4, 3 * 4)", &["7 -1 12"]);
}

#[test]
fn integer_division_and_powers_follow_the_float_result() {
    // An odd dividend beyond 2^53 rounds to an even float, whose half is whole.
    assert_output("print(9007199254740993 / 2)", &["4503599627370496"]);
    assert_output("x = 9007199254740993 / 2\nprint(x MOD 2)", &["0"]);
    assert_output("print(1 ^ -3, -1 ^ -1)", &["1 -1"]);
    assert_output("print(4 ^ -1)", &["0.25"]);
    assert_output("print(2 ^ 0.5)", &["1.4142135623730951"]);
    assert_output("print(4 ^ 0.5, 2.0 ^ 2)", &["2.0 4.0"]);
}

#[test]
fn a_float_operand_makes_a_float() {
    assert_output("print(1 + 1.0)", &["2.0"]);
    assert_output("print(3 - 0.5)", &["2.5"]);
    assert_output("print(2 * 1.5)", &["3.0"]);
    assert_output("print(6.0 / 3)", &["2.0"]);
    assert_output("print(0.1 + 0.2)", &["0.30000000000000004"]);
}

#[test]
fn div_and_mod_are_floored() {
    for a in -9_i64..=9 {
        for b in [-4_i64, -3, -2, -1, 1, 2, 3, 4] {
            let quotient = a.div_euclid(b) - i64::from(b < 0 && a.rem_euclid(b) != 0);
            let remainder = a - b * quotient;
            let source = format!("a = {a}\nb = {b}\nprint(a DIV b)\nprint(a MOD b)");
            assert_eq!(output(&source),
                       [quotient.to_string(), remainder.to_string()],
                       "{a} DIV/MOD {b}");
        }
    }
    assert_output("print(7.5 MOD 2)", &["1.5"]);
    assert_output("print(-7.5 DIV 2)", &["-4.0"]);
}

#[test]
fn zero_divisors_are_evaluation_errors() {
    let cases = [("/", "Cannot divide by zero"),
                 ("MOD", "Cannot take modulo by zero"),
                 ("DIV", "Cannot do quotient division by zero")];
    for (op, description) in cases {
        for left in ["1", "1.5", "0"] {
            for right in ["0", "0.0"] {
                assert_error(&format!("x = {left} {op} {right}"),
                             &format!("Evaluation Error: {description}"));
            }
        }
    }
}

#[test]
fn integer_overflow_is_reported() {
    assert_error("x = 9223372036854775807\nprint(x + 1)",
                 "Evaluation Error: Integer overflow");
    assert_error("print(2 ^ 64)", "Evaluation Error: Integer overflow");
}

#[test]
fn operator_type_errors() {
    assert_error("x = \"a\" + 1",
                 "Type Error: Cannot concatenate type Integer with String, expected String");
    assert_error("x = 1 + \"a\"",
                 "Type Error: Cannot add type String to Integer, expected Integer or Float");
    assert_error("x = True + 1", "Type Error: Cannot combine types Boolean and Integer");
    assert_error("x = \"a\" - 1",
                 "Type Error: Cannot subtract type Integer from String, expected Integers or Floats");
    assert_error("x = -\"a\"", "Type Error: Cannot negate type String");
    assert_error("x = NOT 1", "Type Error: Cannot use NOT on type Integer, expected Boolean");
    assert_error("x = 1 AND True",
                 "Type Error: Cannot use AND on type Boolean with Integer, expected Booleans");
    assert_error("x = (-8) ^ 0.5",
                 "Evaluation Error: Cannot raise a negative number to this power");
}

#[test]
fn strings_concatenate() {
    assert_output("greeting = \"Hello, \" + 'world'\nprint(greeting)", &["Hello, world"]);
}

#[test]
fn comparisons_and_logic() {
    assert_output("print(1 < 2.5, \"b\" > \"a\", True == False, 3 != 3)",
                  &["True True False False"]);
    assert_output("print(2 == 2.0, 3 >= 3, 4 <= 3)", &["True True False"]);
    assert_output("print(True AND False, True OR False, NOT False)", &["False True True"]);
    assert_output("print(NOT 1 > 2 AND 2 > 1)", &["True"]);
    assert_error("x = True < False",
                 "Type Error: Cannot compare two Booleans with comparator '<', only '==' or '!='");
    assert_error("x = 1 == \"1\"", "Type Error: Cannot compare type String against Integer");
}

#[test]
fn undeclared_names_are_identifier_errors() {
    assert_error("print(y)", "Identifier Error: 'y' was not declared");
    assert_error("y[0] = 1", "Identifier Error: 'y' was not declared");
}

#[test]
fn constants_bind_once_until_redeclared() {
    assert_error("const x = 1\nx = 2",
                 "Identifier Error: 'x' is a constant and has already been defined");
    assert_output("const x = 1\nconst x = 2\nprint(x)", &["2"]);
    assert_error("const x = 1\nconst x = 2\nx = 3",
                 "Identifier Error: 'x' is a constant and has already been defined");
}

#[test]
fn natives_can_be_shadowed() {
    assert_output("str = 5\nprint(str + 1)", &["6"]);
}

#[test]
fn arrays_index_and_assign() {
    assert_output("array a[3]\na[0] = 5\nprint(a[0])", &["5"]);
    assert_output("array a = [1, 2, 3]\nprint(a, a.length)", &["[ 1, 2, 3 ] 3"]);
    assert_output("array names = [\"x\", \"y\"]\nprint(names)", &["[ \"x\", \"y\" ]"]);
    assert_output("array a[2]\na[1] = True\nprint(a)", &["[ <Empty>, True ]"]);
    assert_output("array g[2, 2]\ng[1, 0] = 4\ng[1][1] = 5\nprint(g[1], g[1, 1])",
                  &["[ 4, 5 ] 5"]);
    assert_output("array g = [[1, 2], [3, 4]]\nprint(g[1][0] + g[0, 1])", &["5"]);
}

#[test]
fn arrays_are_copied_on_assignment() {
    assert_output("array a = [1, 2]\nb = a\nb[0] = 9\nprint(a[0], b[0])", &["1 9"]);
    assert_output("array a = [1, 2]\nprocedure change(list)\n    list[0] = 7\nendprocedure\nchange(a)\nprint(a[0])",
                  &["1"]);
}

#[test]
fn array_errors() {
    assert_error("array a[3]\nprint(a[3])",
                 "Evaluation Error: Array index not in range from 0 to 2");
    assert_error("array a[3]\na[-1] = 1",
                 "Evaluation Error: Array index not in range from 0 to 2");
    assert_error("array a[2]\na[0] = \"x\"\na[1] = 1",
                 "Type Error: Cannot add item of type Integer to array of String");
    assert_error("array a[2]\nprint(a[1])",
                 "Evaluation Error: Array item has not been assigned a value");
    assert_error("array a = [1, 2]\nprint(a[0, 0])",
                 "Evaluation Error: Array does not have this many dimensions");
    assert_error("array a = [1, 2]\nprint(a[0.5])", "Type Error: Integer value required as index");
    assert_error("x = 4\nprint(x[0])", "Type Error: Can only access value from type Array, not Integer");
    assert_error("array a = [1, \"x\"]",
                 "Type Error: Array can only be defined with a single data type");
    assert_error("array a = [[1, 2], [3]]",
                 "Evaluation Error: All sub-arrays must be the same length");
    assert_error("array a[\"3\"]", "Type Error: Array length must be of type Integer, not String");
    assert_error("n = 0 - 2\narray a[n]", "Evaluation Error: Array length cannot be negative");
}

#[test]
fn array_declarations_have_a_memory_budget() {
    assert_error("array a[100000000]", "Evaluation Error: Array is too large");
    assert_error("array a[2048, 2048]", "Evaluation Error: Array is too large");
    assert_error("array a[4294967296, 4294967296, 4294967296]",
                 "Evaluation Error: Array is too large");
    assert_output("array a[0, 100000000]\nprint(a.length)", &["0"]);
    assert_output("array a[300, 300]\na[299, 299] = 1\nprint(a[299][299], a[0].length)",
                  &["1 300"]);
}

#[test]
fn for_loops_count_in_both_directions() {
    assert_output("for i = 1 to 5 step 2\n    print(i)\nnext i", &["1", "3", "5"]);
    assert_output("for i = 5 to 1 step -2\n    print(i)\nnext i", &["5", "3", "1"]);
    assert_output("total = 0\nfor i = 1 to 3\n    total = total + i\nnext i\nprint(total, i)",
                  &["6 3"]);
    assert_output("count = 0\nfor i = 1 to 3\n    i = 10\n    count = count + 1\nnext i\nprint(count)",
                  &["3"]);
}

#[test]
fn misaligned_for_loops_fail_before_running() {
    assert_error("for i = 1 to 5 step -1\n    print(i)\nnext i",
                 "Evaluation Error: Step value must align with bounds of for loop");
    assert_error("for i = 1 to 5 step 0\n    print(i)\nnext i",
                 "Evaluation Error: Step must have non-zero value");
    assert_error("for i = 1.5 to 5\n    print(i)\nnext i",
                 "Type Error: Starting value is not an Integer");

    let mut context = Context::new(BufferedHost::new());
    assert_eq!(context.run("for i = 1 to 5 step -1\n    print(i)\nnext i"), 1);
    assert!(context.host().lines()[0].starts_with("🚨 ERROR @line 1"));
}

#[test]
fn while_and_do_until() {
    assert_output("x = 0\nwhile x < 3\n    x = x + 1\nendwhile\nprint(x)", &["3"]);
    assert_output("x = 10\nwhile x < 3\n    x = x + 1\nendwhile\nprint(x)", &["10"]);
    assert_output("n = 0\ndo\n    n = n + 1\nuntil True\nprint(n)", &["1"]);
    assert_output("n = 0\ndo\n    n = n + 1\nuntil n == 4\nprint(n)", &["4"]);
    assert_error("while 1\nendwhile", "Type Error: Condition must be type Boolean, not Integer");
}

#[test]
fn do_until_runs_once_on_every_entry() {
    let source = "count = 0
procedure bump()
    do
        global count = count + 1
    until True
endprocedure
bump()
bump()
print(count)";
    assert_output(source, &["2"]);
}

#[test]
fn if_and_switch_pick_one_branch() {
    let source = "x = 5
if x < 3 then
    print(\"small\")
elseif x < 10 then
    print(\"medium\")
else
    print(\"large\")
endif";
    assert_output(source, &["medium"]);

    let source = "day = \"sat\"
switch day:
    case \"mon\":
        print(\"weekday\")
    case \"sat\":
        print(\"weekend\")
    default:
        print(\"unknown\")
endswitch";
    assert_output(source, &["weekend"]);

    let source = "switch 1:
    case 1.0:
        print(\"float\")
    default:
        print(\"other\")
endswitch";
    assert_output(source, &["other"]);
}

#[test]
fn functions_and_procedures() {
    assert_output("function double(n)\n    return n * 2\nendfunction\nprint(double(3))", &["6"]);

    let source = "function fact(n)
    if n <= 1 then
        return 1
    endif
    return n * fact(n - 1)
endfunction
print(fact(10))";
    assert_output(source, &["3628800"]);

    let source = "x = 1
procedure change()
    x = 2
    print(x)
endprocedure
change()
print(x)";
    assert_output(source, &["2", "1"]);

    let source = "procedure setup()
    global limit = 10
endprocedure
setup()
print(limit)";
    assert_output(source, &["10"]);
}

#[test]
fn subroutines_cannot_see_caller_locals() {
    let source = "procedure inner()
    print(secret)
endprocedure
procedure outer()
    secret = 1
    inner()
endprocedure
outer()";
    assert_error(source, "Identifier Error: 'secret' was not declared");
}

#[test]
fn only_functions_hand_back_a_returned_value() {
    let start = Position::new(0, 0);
    let returned = Expr::Literal { value:    Literal::Integer(1),
                                   position: Position::new(1, 11), };
    let call = Expr::Call { callee:    Box::new(Expr::Identifier { name:     "give".to_string(),
                                                                   position: start, }),
                            arguments: Vec::new(),
                            position:  Position::new(2, 4), };

    let mut outcomes = Vec::new();
    for kind in [SubroutineKind::Function, SubroutineKind::Procedure] {
        let def = SubroutineDef { name: "give".to_string(),
                                  kind,
                                  parameters: Vec::new(),
                                  body: vec![Statement::Return { value:    Some(returned.clone()),
                                                                 position: Position::new(1, 4), }],
                                  position: start };
        let mut context = Context::new(BufferedHost::new());
        context.run_flag().start();
        context.execute_statement(&Statement::Subroutine(Rc::new(def))).unwrap();
        outcomes.push(context.eval(&call).map(|value| value.to_string()).map_err(|e| e.to_string()));
    }

    assert_eq!(outcomes,
               [Ok("1".to_string()),
                Err("Evaluation Error: Can only use 'return' within functions".to_string())]);
}

#[test]
fn call_errors() {
    assert_error("function f(a)\n    return a\nendfunction\nprint(f(1, 2))",
                 "Evaluation Error: Subroutine expected 1 arguments, 2 given");
    assert_error("x = 3\nx()", "Type Error: Type Integer cannot be called");
    assert_error("procedure p()\n    x = 1\nendprocedure\ny = p()",
                 "Evaluation Error: Cannot use the result of a subroutine with no return value");
    assert_error("print()", "Evaluation Error: print expected 1 or more arguments, 0 given");
    assert_error("x = input(1, 2)", "Evaluation Error: input expected 0 or 1 arguments, 2 given");
    assert_error("x = str()", "Evaluation Error: str expected 1 argument, 0 given");
}

#[test]
fn runaway_recursion_hits_the_call_depth_ceiling() {
    let mut context = Context::new(BufferedHost::new());
    assert_eq!(context.run("procedure spin()\n    spin()\nendprocedure\nspin()"), 1);
    let failure = context.host().lines()[0].clone();
    assert!(failure.contains("Evaluation Error: Call stack exceeded maximum size of 1500"),
            "{failure}");

    assert_eq!(context.run("print(\"still here\")"), 0);
    let lines = context.host().lines();
    assert_eq!(lines[lines.len() - 2..], ["still here", SUCCESS_MARKER]);
}

#[test]
fn deep_recursion_survives_a_small_thread() {
    let source = "function depth(n)
    if n == 0 then
        return 0
    endif
    return 1 + depth(n - 1)
endfunction
print(depth(1400))";
    let handle = thread::Builder::new().stack_size(256 * 1024)
                                       .spawn(move || get_result(source))
                                       .unwrap();
    assert_eq!(handle.join().unwrap().unwrap(), ["1400"]);
}

#[test]
fn deeply_nested_expressions_parse_and_evaluate() {
    let source = format!("print({}1{})", "(".repeat(5000), ")".repeat(5000));
    assert_output(&source, &["1"]);
}

#[test]
fn call_depth_limit_is_configurable() {
    let config = Config::default().with_max_call_depth(5);
    let mut context = Context::with_config(BufferedHost::new(), config);
    let source = "function depth(n)\n    return depth(n + 1)\nendfunction\nprint(depth(0))";
    assert_eq!(context.run(source), 1);
    assert!(context.host().lines()[0].contains("Call stack exceeded maximum size of 5"));
}

#[test]
fn casts() {
    assert_output("print(str(int(\"42\")) == \"42\")", &["True"]);
    assert_output("print(int(str(42)) + 1)", &["43"]);
    assert_output("print(float(\"2\"), real(1), str(2.50), int(-2.5))", &["2.0 1.0 2.5 -3"]);
    assert_output("print(bool(\"True\"), bool(\"False\"), bool(0), int(True))",
                  &["True False False 1"]);
    assert_error("x = int(\"4.2\")", "Type Error: Cannot cast 4.2 to type Integer");
    assert_error("x = bool(\"yes\")", "Type Error: Cannot cast yes to type Boolean");
    assert_error("array a = [1]\nx = str(a)", "Type Error: Cannot cast type Array to type String");
}

#[test]
fn character_codes() {
    assert_output("print(ASC(\"A\"), CHR(98))", &["65 b"]);
    assert_error("x = ASC(\"AB\")",
                 "Type Error: Expected single character, as string of length 1");
    assert_error("x = CHR(\"b\")", "Type Error: Expected type Integer, not type String");
}

#[test]
fn string_properties() {
    assert_output("s = \"Hello\"\nprint(s.length, s.upper, s.lower)", &["5 HELLO hello"]);
    assert_output("s = \"Hello\"\nprint(s.substring(1, 3), s.left(2), s.right(3))",
                  &["ell He llo"]);
    assert_error("s = \"Hello\"\nx = s.substring(4, 2)",
                 "Evaluation Error: Substring must be in range of string.\nFor position 4, substring length must be between 1 and 1");
    assert_error("s = \"Hello\"\nx = s.substring(5, 1)",
                 "Evaluation Error: Value of index must be in range of string, from 0 to 4");
    assert_error("s = \"Hello\"\nx = s.left(6)",
                 "Evaluation Error: Length of new string must be less than or equal to the old string's length");
    assert_error("s = \"Hello\"\nx = s.right(0)",
                 "Evaluation Error: Length of new string must be 1 or greater");
    assert_error("s = \"Hello\"\nx = s.length()",
                 "Evaluation Error: This property should not be called and does not require '()'");
    assert_error("s = \"Hello\"\nx = s.left", "Evaluation Error: This method should be called using '()'");
    assert_error("x = 5\ny = x.upper", "Type Error: Type Integer has no property upper");
    assert_error("x = \"\"\ny = x.substring(0, 1)",
                 "Evaluation Error: Cannot take substring of an empty string");
    assert_error("s = \"Hello\"\nx = s.substring(\"1\", 2)",
                 "Type Error: Index argument must be type Integer, not String");
    assert_error("s = \"Hello\"\nx = s.substring(0, True)",
                 "Type Error: length argument must be type Integer, not Boolean");
    assert_error("s = \"Hello\"\nx = s.left(2.0)",
                 "Type Error: Argument must be type Integer, not Float");
}

#[test]
fn random_stays_in_bounds() {
    for _ in 0..20 {
        assert_output("r = random(1, 6)\nprint(r >= 1 AND r <= 6)", &["True"]);
        assert_output("r = random(0.5, 1.5)\nprint(r >= 0.5 AND r < 1.5)", &["True"]);
    }
    assert_output("print(random(3, 3))", &["3"]);
    assert_error("x = random(6, 1)",
                 "Evaluation Error: random expects the minimum to be no greater than the maximum");
    assert_error("x = random(1, 2.0)",
                 "Type Error: Cannot use random on type Integer with Float, expected two Integers or two Floats");
}

#[test]
fn seeded_hosts_repeat_their_draws() {
    let draws = |seed| {
        let mut context = Context::new(BufferedHost::new().with_seed(seed));
        context.run("for i = 1 to 5\n    print(random(1, 1000))\nnext i");
        context.into_host().into_lines()
    };
    assert_eq!(draws(7), draws(7));
}

#[test]
fn transcripts_end_with_a_marker() {
    let mut context = Context::new(BufferedHost::new());
    assert_eq!(context.run("print(1 + 2 * 3)"), 0);
    assert_eq!(context.host().lines(), ["7", SUCCESS_MARKER]);

    let mut context = Context::new(BufferedHost::new());
    assert_eq!(context.run("print(1)\nx = 5 / 0"), 1);
    assert_eq!(context.host().lines(),
               ["1",
                "🚨 ERROR @line 2\nEvaluation Error: Cannot divide by zero\nx = 5 / 0\n      ^",
                "",
                FAILURE_MARKER]);
}

#[test]
fn translation_errors_stop_everything() {
    let mut context = Context::new(BufferedHost::new());
    assert_eq!(context.run("print(1)\nprint(2"), 1);
    assert_eq!(context.host().lines(),
               ["🚨 ERROR @line 2\nInvalid Syntax: '(' was never closed\nprint(2\n     ^",
                "",
                FAILURE_MARKER]);
}

#[test]
fn input_reads_queued_lines() {
    let mut context = Context::new(BufferedHost::with_inputs(["3", "4"]));
    let source = "a = int(input(\"a: \"))\nb = int(input())\nprint(a * b)";
    assert_eq!(context.run(source), 0);
    assert_eq!(context.host().lines(), ["a: 3", "4", "12", SUCCESS_MARKER]);
    assert_eq!(context.host().prompts(), ["a: ", ""]);

    assert_error("x = input(5)", "Type Error: Can only output type String, not Integer");
}

#[test]
fn exhausted_input_aborts() {
    let mut context = Context::new(BufferedHost::new());
    assert_eq!(context.run("print(\"ready\")\nx = input(\"> \")\nprint(x)"), 1);
    assert_eq!(context.host().lines(),
               ["ready", "🚨 Program aborted by user", "", FAILURE_MARKER]);

    match get_result("x = input()") {
        Err(Error::Runtime(error)) => assert!(error.is_abort()),
        other => panic!("expected an abort, got {other:?}"),
    }
}

/// Stops the run after a fixed number of pauses.
struct StoppingHost {
    inner:  BufferedHost,
    flag:   Option<RunFlag>,
    pauses: usize,
}

impl Host for StoppingHost {
    fn print_line(&mut self, text: &str) {
        self.inner.print_line(text);
    }

    fn read_line(&mut self, prompt: &str, running: &RunFlag) -> Option<String> {
        self.inner.read_line(prompt, running)
    }

    fn random_integer(&mut self, min: i64, max: i64) -> i64 {
        self.inner.random_integer(min, max)
    }

    fn random_float(&mut self, min: f64, max: f64) -> f64 {
        self.inner.random_float(min, max)
    }

    fn pause(&mut self) {
        self.pauses += 1;
        if self.pauses == 3
           && let Some(flag) = &self.flag
        {
            flag.stop();
        }
    }
}

#[test]
fn stopping_the_run_flag_aborts_a_loop() {
    let host = StoppingHost { inner:  BufferedHost::new(),
                              flag:   None,
                              pauses: 0, };
    let config = Config::default().with_yield_interval(1);
    let mut context = Context::with_config(host, config);
    let flag = context.run_flag();
    context.host_mut().flag = Some(flag);

    assert_eq!(context.run("x = 0\nwhile True\n    x = x + 1\nendwhile"), 1);
    assert_eq!(context.host().pauses, 3);
    assert_eq!(context.host().inner.lines(),
               ["🚨 Program aborted by user", "", FAILURE_MARKER]);
}

#[test]
fn contexts_can_run_again_with_fresh_globals() {
    let mut context = Context::new(BufferedHost::new());
    assert_eq!(context.run("x = 1"), 0);
    assert_eq!(context.run("print(x)"), 1);
    assert!(context.host().lines()[1].contains("Identifier Error: 'x' was not declared"));
}
