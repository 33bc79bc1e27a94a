use siever::diagnostic::{CollectingReporter, Diagnostic};
use siever::interpreter::context::BufferedContext;
use siever::interpreter::Interpreter;
use siever::lexer::scan;
use siever::parser::Parser;
use siever::value::error::RuntimeErrorKind;
use siever::value::formatter::{BasicFormatter, ValueFormatter};
use siever::value::LoxValue;

fn check(input: &str, expected: &str, test_name: &str) {
    let mut reporter = CollectingReporter::new();
    let tokens = scan(input, &mut reporter);
    assert!(reporter.diagnostics().is_empty());
    let program = Parser::new(&tokens)
        .parse()
        .expect("Test program is valid.");

    let mut interpreter = Interpreter::new(BufferedContext::new());
    let result = interpreter.run(&program);
    let mut actual = interpreter.into_context().into_data();
    if let Err(ref error) = result {
        actual.push_str(&BasicFormatter.format_error(error));
    }

    assert_eq!(actual, expected, "Failed the test {test_name}");
}

#[test]
fn smoke_test() {
    check("print 1;", "1\n", "smoke");
}

#[test]
fn test_print() {
    check("print \"hi\";", "hi\n", "string");
    check("print 1 + 2.5;", "3.5\n", "arithmetic");
    check("print nil;", "nil\n", "nil");
    check("print 1 < 2 ? \"yes\" : \"no\";", "yes\n", "conditional");
    check("1 + 1;", "", "expression_statement_prints_nothing");
}

#[test]
fn test_variables() {
    check("var a = 1; print a;", "1\n", "declare_and_read");
    check("var a; print a;", "nil\n", "uninitialized_is_nil");
    check("var a = 1; a = a + 1; print a;", "2\n", "reassign");
    check("var a = 1; var a = 2; print a;", "2\n", "redeclare_global");
    check(
        "var a; var b; a = b = 7; print a; print b;",
        "7\n7\n",
        "chained_assignment",
    );
    check(
        "print x;",
        "Undefined variable 'x'.\n[line 1]",
        "undefined_read",
    );
    check(
        "x = 1;",
        "Undefined variable 'x'.\n[line 1]",
        "undefined_write",
    );
}

#[test]
fn test_blocks() {
    check(
        "var a = \"outer\"; { var a = \"inner\"; print a; } print a;",
        "inner\nouter\n",
        "shadowing",
    );
    check(
        "var a = 1; { a = 2; } print a;",
        "2\n",
        "assign_through_scope",
    );
    check(
        "{ var a = 1; } print a;",
        "Undefined variable 'a'.\n[line 1]",
        "scope_ends_with_block",
    );
    check(
        "var a = 1; { var b = a + 1; { print a + b; } }",
        "3\n",
        "nested_blocks",
    );
}

#[test]
fn test_if() {
    check("if (true) print 1;", "1\n", "taken");
    check("if (nil) print 1;", "", "not_taken");
    check("if (0) print 1; else print 2;", "1\n", "zero_is_truthy");
    check("if (false) print 1; else print 2;", "2\n", "else_taken");
    check(
        "if (false) print -\"x\"; else print 2;",
        "2\n",
        "untaken_branch_not_run",
    );
}

#[test]
fn test_runtime_error_stops_execution() {
    check(
        "print 1;\nprint -\"a\";\nprint 3;",
        "1\nOperand must be a number.\n[line 2]",
        "stops_at_first_error",
    );
    check(
        "print 1 / 0;",
        "Division by zero.\n[line 1]",
        "division_by_zero",
    );
}

#[test]
fn test_block_scope_is_popped_on_error() {
    let mut reporter = CollectingReporter::new();
    let tokens = scan("{ var a = 1; print -nil; }", &mut reporter);
    let program = Parser::new(&tokens).parse().expect("Valid program.");

    let mut interpreter = Interpreter::new(BufferedContext::new());
    let depth = interpreter.environment().depth();
    let error = interpreter.run(&program).expect_err("Negating nil fails.");
    assert!(matches!(error.kind, RuntimeErrorKind::NonNumeric(LoxValue::Nil)));
    assert_eq!(interpreter.environment().depth(), depth);
    assert!(interpreter.environment().access("a").is_none());
}

#[test]
fn test_run_reporting() {
    let mut reporter = CollectingReporter::new();
    let tokens = scan("print 1;\nprint 2 * \"b\";", &mut reporter);
    let program = Parser::new(&tokens).parse().expect("Valid program.");

    let mut interpreter = Interpreter::new(BufferedContext::new());
    assert!(!interpreter.run_reporting(&program, &mut reporter));
    assert_eq!(interpreter.context().data(), "1\n");
    assert!(reporter.had_runtime_error());
    assert!(!reporter.had_lexical_error());
    assert_eq!(
        reporter.into_diagnostics(),
        vec![Diagnostic::Runtime {
            line: 2,
            lexeme: "*".into(),
            message: "Operands must be a number.".into(),
        }]
    );
}

#[test]
fn test_interpret_expression() {
    let mut reporter = CollectingReporter::new();
    let tokens = scan("(1 + 2) * 4", &mut reporter);
    let expr = Parser::new(&tokens)
        .parse_expression()
        .expect("Valid expression.");

    let mut interpreter = Interpreter::new(BufferedContext::new());
    assert_eq!(
        interpreter.interpret(&expr, &mut reporter),
        Some(LoxValue::Number(12.0))
    );
    assert_eq!(interpreter.context().data(), "12\n");
    assert!(reporter.diagnostics().is_empty());
}

#[test]
fn test_interpret_reports_once() {
    let mut reporter = CollectingReporter::new();
    let tokens = scan("\"a\" + (1 < \"b\")", &mut reporter);
    let expr = Parser::new(&tokens)
        .parse_expression()
        .expect("Valid expression.");

    let mut interpreter = Interpreter::new(BufferedContext::new());
    assert_eq!(interpreter.interpret(&expr, &mut reporter), None);
    assert_eq!(interpreter.context().data(), "");

    let diagnostics = reporter.into_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].to_string(),
        "Operands must be a number.\n[line 1]"
    );
}

#[test]
fn test_state_persists_between_runs() {
    let mut interpreter = Interpreter::new(BufferedContext::new());
    for source in ["var counter = 1;", "counter = counter * 10;", "print counter;"] {
        let mut reporter = CollectingReporter::new();
        let tokens = scan(source, &mut reporter);
        let program = Parser::new(&tokens).parse().expect("Valid program.");
        interpreter.run(&program).expect("No runtime errors.");
    }
    assert_eq!(interpreter.environment().access("counter"), Some(&LoxValue::Number(10.0)));
    assert_eq!(interpreter.into_context().into_data(), "10\n");
}
