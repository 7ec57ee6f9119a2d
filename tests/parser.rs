use ocr_erl::{
    ast::{
        ArrayElement, ArrayInit, BinaryOperator, Expr, Literal, Modifier, Statement,
        SubroutineKind, UnaryOperator,
    },
    error::Position,
    interpreter::parser::core::{Parser, parse_program},
};

fn parse(source: &str) -> Vec<Statement> {
    parse_program(source).unwrap_or_else(|e| panic!("Failed to parse:\n{source}\n{e}"))
}

fn single(source: &str) -> Statement {
    let mut program = parse(source);
    assert_eq!(program.len(), 1, "expected one statement from:\n{source}");
    program.remove(0)
}

fn expression(source: &str) -> Expr {
    match single(source) {
        Statement::Expression { expr } => expr,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn assert_syntax_error(source: &str, description: &str) {
    match parse_program(source) {
        Ok(program) => panic!("Expected a syntax error for:\n{source}\ngot {program:?}"),
        Err(error) => assert_eq!(error.to_string(),
                                 format!("Invalid Syntax: {description}"),
                                 "unexpected error for:\n{source}"),
    }
}

/// Renders an expression with explicit grouping.
fn grouped(expr: &Expr) -> String {
    match expr {
        Expr::Literal { value: Literal::Integer(value), .. } => value.to_string(),
        Expr::Literal { value, .. } => format!("{value:?}"),
        Expr::Identifier { name, .. } => name.clone(),
        Expr::Unary { op, operand, .. } => {
            let symbol = match op {
                UnaryOperator::Negate => "-",
                UnaryOperator::Plus => "+",
                UnaryOperator::Not => "NOT ",
            };
            format!("({symbol}{})", grouped(operand))
        },
        Expr::Binary { left, op, right, .. } => {
            format!("({} {} {})", grouped(left), op.symbol(), grouped(right))
        },
        Expr::Call { callee, arguments, .. } => {
            let arguments: Vec<String> = arguments.iter().map(grouped).collect();
            format!("{}({})", grouped(callee), arguments.join(", "))
        },
        Expr::Index { target, indices, .. } => {
            let indices: Vec<String> = indices.iter().map(grouped).collect();
            format!("{}[{}]", grouped(target), indices.join(", "))
        },
        Expr::Property { target, property, .. } => {
            format!("{}.{}", grouped(target), property.name())
        },
    }
}

fn shape(source: &str) -> String {
    match single(&format!("x = {source}")) {
        Statement::Assignment { value, .. } => grouped(&value),
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn precedence_climbs_from_logic_to_postfix() {
    assert_eq!(shape("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(shape("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(shape("2 ^ 3 ^ 2"), "((2 ^ 3) ^ 2)");
    assert_eq!(shape("-2 ^ 2"), "((-2) ^ 2)");
    assert_eq!(shape("a MOD b DIV c / d"), "(((a MOD b) DIV c) / d)");
    assert_eq!(shape("a + 1 < b * 2"), "((a + 1) < (b * 2))");
    assert_eq!(shape("NOT a == b AND c OR d"), "(((NOT (a == b)) AND c) OR d)");
    assert_eq!(shape("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn postfix_chains_apply_left_to_right() {
    assert_eq!(shape("f(1, g(2))[0]"), "f(1, g(2))[0]");
    assert_eq!(shape("name.substring(0, 2).upper"), "name.substring(0, 2).upper");
    assert_eq!(shape("grid[1][2]"), "grid[1][2]");
    assert_eq!(shape("now()"), "now()");
}

#[test]
fn operator_positions_are_recorded() {
    let expr = expression("print(1 + 2)");
    let Expr::Call { arguments, position, .. } = expr else {
        panic!("expected a call");
    };
    assert_eq!(position, Position::new(0, 5));
    let Expr::Binary { op, position, .. } = &arguments[0] else {
        panic!("expected a binary argument");
    };
    assert_eq!(*op, BinaryOperator::Add);
    assert_eq!(*position, Position::new(0, 8));
}

#[test]
fn assignments_keep_modifiers_and_flatten_indices() {
    let Statement::Assignment { target, .. } = single("const limit = 10") else {
        panic!("expected an assignment");
    };
    assert_eq!(target.name, "limit");
    assert_eq!(target.modifier, Some(Modifier::Const));

    let Statement::Assignment { target, .. } = single("global total = 0") else {
        panic!("expected an assignment");
    };
    assert_eq!(target.modifier, Some(Modifier::Global));

    let Statement::Assignment { target, .. } = single("grid[1][2] = 5") else {
        panic!("expected an assignment");
    };
    assert_eq!(target.indices.len(), 2);
    let Statement::Assignment { target: flat, .. } = single("grid[1, 2] = 5") else {
        panic!("expected an assignment");
    };
    assert_eq!(flat.indices.len(), 2);
}

#[test]
fn array_declarations() {
    let Statement::ArrayDeclaration { name, init, .. } = single("array board[3, 3]") else {
        panic!("expected an array declaration");
    };
    assert_eq!(name, "board");
    assert!(matches!(init, ArrayInit::Dimensions(dimensions) if dimensions.len() == 2));

    let Statement::ArrayDeclaration { init: ArrayInit::Literal(literal), .. } =
        single("array grid = [[1, 2], [3, 4]]")
    else {
        panic!("expected an array literal");
    };
    assert_eq!(literal.elements.len(), 2);
    assert!(literal.elements
                   .iter()
                   .all(|element| {
                       matches!(element, ArrayElement::Nested(row) if row.elements.len() == 2)
                   }));
}

#[test]
fn blocks_nest_across_lines() {
    let source = "for i = 1 to 10 step 2
    if i MOD 3 == 0 then
        print(i)
    elseif i == 1 then
    else
        while False
        endwhile
    endif
next i
print(\"done\")";
    let program = parse(source);
    assert_eq!(program.len(), 2);

    let Statement::For(for_loop) = &program[0] else {
        panic!("expected a for loop");
    };
    assert_eq!(for_loop.variable, "i");
    assert!(for_loop.step.is_some());
    let [Statement::If { branches, otherwise, .. }] = for_loop.body.as_slice() else {
        panic!("expected a single if statement");
    };
    assert_eq!(branches.len(), 2);
    assert!(branches[1].body.is_empty());
    assert!(matches!(otherwise.as_deref(), Some([Statement::While { .. }])));
}

#[test]
fn switch_collects_cases_and_default() {
    let source = "switch choice:
    case 1:
        print(\"one\")
    case 2:
    default:
        print(\"other\")
endswitch";
    let Statement::Switch { cases, default, .. } = single(source) else {
        panic!("expected a switch");
    };
    assert_eq!(cases.len(), 2);
    assert!(cases[1].body.is_empty());
    assert_eq!(default.map(|body| body.len()), Some(1));
}

#[test]
fn subroutines_record_their_kind_and_parameters() {
    let source = "function area(width, height)\n    return width * height\nendfunction";
    let Statement::Subroutine(def) = single(source) else {
        panic!("expected a subroutine");
    };
    assert_eq!(def.name, "area");
    assert_eq!(def.kind, SubroutineKind::Function);
    assert_eq!(def.parameters, ["width", "height"]);
    assert!(matches!(def.body.as_slice(), [Statement::Return { value: Some(_), .. }]));

    let Statement::Subroutine(def) = single("procedure greet()\nendprocedure") else {
        panic!("expected a subroutine");
    };
    assert_eq!(def.kind, SubroutineKind::Procedure);
    assert!(def.parameters.is_empty());
}

#[test]
fn do_until_takes_its_condition_from_the_closing_line() {
    let Statement::DoUntil { body, condition, .. } = single("do\n    n = n + 1\nuntil n > 3") else {
        panic!("expected a do-until loop");
    };
    assert_eq!(body.len(), 1);
    assert_eq!(grouped(&condition), "(n > 3)");
}

#[test]
fn parser_hands_out_statements_one_at_a_time() {
    let mut parser = Parser::from_source("a = 1\nprint(a)\nprint(").unwrap();
    assert!(matches!(parser.next(), Some(Ok(Statement::Assignment { .. }))));
    assert!(matches!(parser.next(), Some(Ok(Statement::Expression { .. }))));
    assert!(matches!(parser.next(), Some(Err(_))));
    assert!(parser.next().is_none());
}

#[test]
fn unclosed_blocks() {
    assert_syntax_error("while True\n    print(1)", "Expected 'endwhile' to close loop");
    assert_syntax_error("do\n    print(1)", "Expected 'until' to close loop");
    assert_syntax_error("for i = 1 to 3\n    print(i)", "Expected 'next i' to close loop");
    assert_syntax_error("for i = 1 to 3\nnext j", "Expected 'next i' to close loop");
    assert_syntax_error("function f()\n    return 1", "Expected 'endfunction' to close function");
    assert_syntax_error("procedure p()\n", "Expected 'endprocedure' to close procedure");
    assert_syntax_error("if True then\n    print(1)", "Expected 'endif' to close if statement");
    assert_syntax_error("switch 1:\n    case 1:", "Expected 'endswitch' to close switch statement");
    assert_syntax_error("switch 1:\n    print(1)\nendswitch",
                        "Expected 'case' to follow switch statement");
}

#[test]
fn closers_without_openers() {
    assert_syntax_error("endif", "Needs to follow 'if' statement");
    assert_syntax_error("else", "Needs to follow 'if' statement");
    assert_syntax_error("case 1:", "Needs to follow 'switch' statement");
    assert_syntax_error("endwhile", "Needs to follow 'while' statement");
    assert_syntax_error("until True", "Needs to follow 'do' statement");
    assert_syntax_error("next i", "Needs to follow 'for' statement");
    assert_syntax_error("endfunction", "Needs to follow 'function' statement");
    assert_syntax_error("endprocedure", "Needs to follow 'procedure' statement");
}

#[test]
fn malformed_expressions() {
    assert_syntax_error("x = 1 +", "Incomplete input");
    assert_syntax_error("x = 1 2", "Expected operator");
    assert_syntax_error("x = (1 + 2", "'(' was never closed");
    assert_syntax_error("x = ()", "'()' was empty");
    assert_syntax_error("x = * 2", "Expected value");
    assert_syntax_error("print(1,)", "Expected next value to follow ','");
    assert_syntax_error("x = a[]", "Expected index value inside '[]'");
}

#[test]
fn misplaced_statements() {
    assert_syntax_error("return 1", "Can only use 'return' within functions");
    assert_syntax_error("procedure p()\n    return 1\nendprocedure",
                        "Can only use 'return' within functions");
    assert_syntax_error("procedure outer()\n    procedure inner()\n    endprocedure\nendprocedure",
                        "Cannot define a subroutine inside another subroutine");
    assert_syntax_error("function f(a, a)\n    return a\nendfunction",
                        "Parameter 'a' is already defined");
    assert_syntax_error("array empty = []", "Cannot create arrays with length 0");
    assert_syntax_error("const a[0] = 1", "Array elements cannot be declared 'const'");
    assert_syntax_error("while True\nendwhile x", "Expected nothing to follow 'endwhile'");
}

#[test]
fn syntax_errors_point_at_their_line() {
    let error = parse_program("x = 1\n\nif x > 0 then\n    print(x)").unwrap_err();
    assert_eq!(error.position(), Position::new(2, 0));

    let error = parse_program("print(\"a\"\n").unwrap_err();
    assert_eq!(error.position(), Position::new(0, 5));
}
