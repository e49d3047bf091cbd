use std::fs;

use lox::{Lox, capture, error::ParseError, get_result};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

const EXPECT_OUTPUT: &str = "// expect: ";
const EXPECT_RUNTIME_ERROR: &str = "// expect runtime error: ";
const EXPECT_ERROR: &str = "// error: ";

/// Runs every script under `tests/scripts` and checks it against the
/// expectations written in its comments.
#[test]
fn scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| {
                                                  e.path()
                                                   .extension()
                                                   .is_some_and(|ext| ext == "lox")
                                              })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;

        let expected_output = expectations(&source, EXPECT_OUTPUT).into_iter()
                                                                   .map(|line| line + "\n")
                                                                   .collect::<String>();
        let expected_runtime_error = expectations(&source, EXPECT_RUNTIME_ERROR);
        let expected_errors = expectations(&source, EXPECT_ERROR);

        let (output, diagnostics) = capture(&source);

        assert_eq!(output, expected_output, "output of {path:?}");
        assert_eq!(diagnostics.errors()
                              .iter()
                              .map(ToString::to_string)
                              .collect::<Vec<_>>(),
                   expected_errors,
                   "syntax errors of {path:?}");
        let runtime_error = diagnostics.runtime_error().map(ToString::to_string);
        assert_eq!(runtime_error.iter()
                                .filter_map(|message| message.lines().next())
                                .collect::<Vec<_>>(),
                   expected_runtime_error,
                   "runtime error of {path:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn expectations(source: &str, marker: &str) -> Vec<String> {
    source.lines()
          .filter_map(|line| line.find(marker).map(|at| line[at + marker.len()..].to_string()))
          .collect()
}

fn assert_output(src: &str, expected: &str) {
    match get_result(src) {
        Ok(output) => assert_eq!(output, expected),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_runtime_error(src: &str, expected: &str) {
    let (_, diagnostics) = capture(src);
    match diagnostics.runtime_error() {
        Some(error) => assert_eq!(error.to_string(), expected),
        None => panic!("Script succeeded but was expected to fail at runtime"),
    }
    assert_eq!(diagnostics.exit_code(), 70);
}

fn assert_syntax_errors(src: &str, expected: &[&str]) {
    let (output, diagnostics) = capture(src);
    assert_eq!(output, "", "nothing runs when the source has syntax errors");
    assert_eq!(diagnostics.errors()
                          .iter()
                          .map(ToString::to_string)
                          .collect::<Vec<_>>(),
               expected);
    assert_eq!(diagnostics.exit_code(), 65);
}

#[test]
fn arithmetic_matches_ieee_doubles() {
    assert_output("print 1 + 2 * 3 - 4 / 8;", &format!("{}\n", 1.0 + 2.0 * 3.0 - 4.0 / 8.0));
    assert_output("print 0.1 + 0.2;", &format!("{}\n", 0.1 + 0.2));
    assert_output("print 1 / 0; print -1 / 0;", "inf\n-inf\n");
    assert_output("print (0 / 0) == (0 / 0);", "false\n");
}

#[test]
fn numbers_print_in_shortest_form() {
    assert_output("print 3; print 2.5; print 10 / 4; print 1.0;", "3\n2.5\n2.5\n1\n");
}

#[test]
fn equality_across_kinds() {
    assert_output("print \"1\" == 1;", "false\n");
    assert_output("print nil == nil;", "true\n");
    assert_output("print 1 == 1.0;", "true\n");
    assert_output("print nil == false;", "false\n");
    assert_output("print \"a\" + \"b\" == \"ab\";", "true\n");
}

#[test]
fn logical_operators_short_circuit() {
    assert_output("var calls = 0; fun sideEffect() { calls = calls + 1; return true; } \
                   false and sideEffect(); true or sideEffect(); print calls;",
                  "0\n");
    assert_output("print nil or \"fallback\"; print 1 and 2; print false and 1;",
                  "fallback\n2\nfalse\n");
}

#[test]
fn block_locals_are_invisible_after_the_block() {
    assert_runtime_error("{ var inner = 1; } print inner;",
                         "Undefined variable 'inner'.\n[line 1]");
}

#[test]
fn assigning_an_undeclared_name_fails() {
    assert_runtime_error("\nundeclared = 1;", "Undefined variable 'undeclared'.\n[line 2]");
}

#[test]
fn closures_keep_independent_state() {
    assert_output("fun makeCounter() { var i = 0; fun count() { i = i + 1; return i; } return \
                   count; } var a = makeCounter(); var b = makeCounter(); print a(); print a(); \
                   print b();",
                  "1\n2\n1\n");
}

#[test]
fn for_loop_counts() {
    assert_output("for (var i = 0; i < 3; i = i + 1) print i;", "0\n1\n2\n");
}

#[test]
fn arity_mismatch_aborts_the_run() {
    let (output, diagnostics) = capture("fun f(a, b) { return a + b; }\nprint \"before\";\nf(1);\n\
                                         print \"after\";");

    assert_eq!(output, "before\n");
    assert_eq!(diagnostics.runtime_error().map(ToString::to_string),
               Some("Expected 2 arguments but got 1.\n[line 3]".to_string()));
}

#[test]
fn each_malformed_statement_gets_a_diagnostic() {
    assert_syntax_errors("print 1\nprint 2;\nvar = 3;\nprint 4;",
                         &["[line 2] Error at 'print': Expect ';' after value.",
                           "[line 3] Error at '=': Expect variable name."]);
}

#[test]
fn invalid_assignment_targets_are_reported() {
    assert_syntax_errors("var a = 1; var b = 2;\na + b = 3;\n(a) = 4;",
                         &["[line 2] Error at '=': Invalid assignment target.",
                           "[line 3] Error at '=': Invalid assignment target."]);
}

#[test]
fn unclosed_block_is_reported_at_end() {
    assert_syntax_errors("{ print 1;", &["[line 1] Error at end: Expect '}' after block."]);
}

#[test]
fn lexical_errors_come_before_syntax_errors() {
    let (_, diagnostics) = capture("print @;\n\"open");

    assert_eq!(diagnostics.errors(),
               [ParseError::UnexpectedCharacter { character: "@".into(),
                                                  line:      1, },
                ParseError::UnterminatedString { line: 2 },
                ParseError::UnexpectedToken { location: " at ';'".into(),
                                              message:  "Expect expression.".into(),
                                              line:     1, }]);
}

#[test]
fn unbounded_recursion_overflows_deterministically() {
    assert_runtime_error("fun forever(n) { return forever(n + 1); }\nforever(0);",
                         "Stack overflow.\n[line 1]");
}

#[test]
fn deep_but_bounded_recursion_succeeds() {
    assert_output("fun sum(n) { if (n == 0) return 0; return n + sum(n - 1); } print sum(1000);",
                  "500500\n");
}

#[test]
fn type_errors_name_the_operator() {
    assert_runtime_error("print -\"a\";", "Operand of '-' must be a number.\n[line 1]");
    assert_runtime_error("print 1 < \"2\";", "Operands of '<' must be numbers.\n[line 1]");
    assert_runtime_error("print 1 + nil;",
                         "Operands of '+' must be two numbers or two strings.\n[line 1]");
    assert_runtime_error("var s = \"s\"; s();", "Can only call functions.\n[line 1]");
}

#[test]
fn clock_is_a_native() {
    assert_output("print clock;", "<native fn>\n");
    assert_output("var t = clock(); print t > 0 and t == t;", "true\n");
}

#[test]
fn return_outside_a_function_is_a_syntax_error() {
    assert_syntax_errors("print 1; return;",
                         &["[line 1] Error at 'return': Can't return from top-level code."]);
}

#[test]
fn session_keeps_globals_between_runs() {
    let mut lox = Lox::new(Vec::<u8>::new());

    assert!(lox.run("var count = 1; fun bump() { count = count + 1; }").is_empty());
    assert!(lox.run("print missing;").had_runtime_error());
    assert!(lox.run("print (;").had_error());
    assert!(lox.run("bump(); print count;").is_empty());

    assert_eq!(String::from_utf8(lox.into_output()).unwrap(), "2\n");
}

#[test]
fn print_ast_writes_the_tree_first() {
    let mut lox = Lox::new(Vec::<u8>::new()).print_ast(true);

    assert!(lox.run("var a = 1 + 2; print a;").is_empty());
    assert_eq!(String::from_utf8(lox.into_output()).unwrap(),
               "(var a (+ 1 2))\n(print a)\n3\n");
}

const DEEP: usize = 10_000;

#[test]
fn deeply_nested_blocks_run() {
    let source = format!("{}print 1;{}", "{".repeat(DEEP), "}".repeat(DEEP));

    assert_output(&source, "1\n");
}

#[test]
fn long_negation_chains_run() {
    let source = format!("print {}true;", "!".repeat(DEEP));

    assert_output(&source, "true\n");
}

#[test]
fn deeply_nested_groupings_run() {
    let source = format!("print {}1{};", "(".repeat(DEEP), ")".repeat(DEEP));

    assert_output(&source, "1\n");
}

#[test]
fn long_operator_chains_run() {
    let source = format!("print {}1;", "1 + ".repeat(DEEP));
    assert_output(&source, &format!("{}\n", DEEP + 1));

    let source = format!("var a; {}1; print a;", "a = ".repeat(DEEP));
    assert_output(&source, "1\n");
}

#[test]
fn deep_scopes_still_see_globals() {
    let source = format!("var g = \"global\"; {}g = g + \"!\"; print g;{}",
                         "{".repeat(DEEP),
                         "}".repeat(DEEP));

    assert_output(&source, "global!\n");
}

#[test]
fn deeply_nested_source_with_errors_is_reported() {
    let source = format!("{}print ;", "{".repeat(DEEP));
    let (output, diagnostics) = capture(&source);

    assert_eq!(output, "");
    assert_eq!(diagnostics.exit_code(), 65);
    assert!(!diagnostics.errors().is_empty());
}
