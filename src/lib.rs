//! # lox
//!
//! lox is a tree-walking interpreter for a small dynamically typed scripting
//! language with C-like syntax. It supports numbers, strings, booleans and
//! `nil`, global and block-scoped variables, `if`/`while`/`for` control flow,
//! first-class functions with closures, and a `print` statement.
//!
//! Source code is scanned into tokens, parsed into a tree of statements and
//! executed directly. Every error found along the way is collected in a
//! [`Diagnostics`](error::Diagnostics) value instead of being printed.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{
    error::Diagnostics,
    interpreter::{evaluator::core::Interpreter, lexer::scan, parser::core::parse},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums and related types that
/// represent the syntactic structure of source code as a tree. The AST is built
/// by the parser and traversed by the evaluator. Every node renders in a
/// parenthesized prefix form through `Display`.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while scanning, parsing
/// or evaluating code, and the `Diagnostics` collector a run reports them to.
/// Each error carries its source line and renders in the user-facing format.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, scopes and value
/// representations to provide a complete runtime for source code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, environment
///   and value types.
/// - Provides entry points for scanning, parsing and evaluating user code.
pub mod interpreter;
/// General utilities shared by the parser and the evaluator.
pub mod util;

/// A running session: one interpreter whose global state persists across
/// calls to [`Lox::run`].
///
/// A script file is a single `run`; the REPL calls `run` once per line.
pub struct Lox<W: Write> {
    interpreter: Interpreter<W>,
    print_ast:   bool,
}

impl<W: Write> Lox<W> {
    /// Creates a session whose `print` output goes to `out`.
    pub fn new(out: W) -> Self {
        Self { interpreter: Interpreter::new(out),
               print_ast:   false, }
    }

    /// When enabled, each parsed program is written to the output in its
    /// prefix form before it runs.
    #[must_use]
    pub const fn print_ast(mut self, enabled: bool) -> Self {
        self.print_ast = enabled;
        self
    }

    /// Scans, parses and executes `source`.
    ///
    /// Nothing runs if scanning or parsing reported an error. Otherwise the
    /// statements run in order until the first runtime error. The returned
    /// diagnostics describe everything that went wrong in this run only.
    ///
    /// # Example
    /// ```
    /// use lox::Lox;
    ///
    /// let mut lox = Lox::new(Vec::<u8>::new());
    /// assert!(lox.run("var greeting = \"hi\";").is_empty());
    /// assert!(lox.run("print greeting;").is_empty());
    ///
    /// let diagnostics = lox.run("print missing;");
    /// assert_eq!(diagnostics.exit_code(), 70);
    /// assert_eq!(lox.output(), b"hi\n");
    /// ```
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn run(&mut self, source: &str) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan(source, &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        if diagnostics.had_error() {
            return diagnostics;
        }

        if self.print_ast {
            for statement in &program {
                if let Err(error) = writeln!(self.interpreter.output_mut(), "{statement}") {
                    tracing::warn!(%error, "failed to write the syntax tree");
                }
            }
        }

        if let Err(error) = self.interpreter.interpret(&program) {
            diagnostics.report_runtime(error);
        }
        diagnostics
    }

    /// Returns the output sink.
    pub const fn output(&self) -> &W {
        self.interpreter.output()
    }

    /// Returns the output sink mutably.
    pub const fn output_mut(&mut self) -> &mut W {
        self.interpreter.output_mut()
    }

    /// Consumes the session and returns its output sink.
    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }
}

/// Runs `source` in a fresh session and returns everything it printed along
/// with the diagnostics of the run.
///
/// Output printed before a runtime error is kept.
#[must_use]
pub fn capture(source: &str) -> (String, Diagnostics) {
    let mut lox = Lox::new(Vec::<u8>::new());
    let diagnostics = lox.run(source);
    let output = String::from_utf8_lossy(&lox.into_output()).into_owned();
    (output, diagnostics)
}

/// Returns the printed output of a program, or the diagnostics if anything
/// went wrong.
///
/// # Errors
/// Returns the run's `Diagnostics` if scanning, parsing or execution
/// reported an error.
///
/// # Examples
/// ```
/// use lox::get_result;
///
/// let output = get_result("var a = 2; print a * a;");
/// assert_eq!(output.unwrap(), "4\n");
///
/// // `x` is not defined.
/// let diagnostics = get_result("print x + 1;").unwrap_err();
/// assert_eq!(diagnostics.to_string(), "Undefined variable 'x'.\n[line 1]");
/// ```
pub fn get_result(source: &str) -> Result<String, Diagnostics> {
    let (output, diagnostics) = capture(source);
    if diagnostics.is_empty() {
        Ok(output)
    } else {
        Err(diagnostics)
    }
}
