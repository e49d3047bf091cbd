use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    ast::{Expr, Stmt},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        value::{
            Value,
            function::{Function, NATIVE_FUNCTIONS},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Maximum number of function calls that may be active at once.
pub const MAX_CALL_DEPTH: usize = 1024;

/// How a statement finished.
///
/// `return` is ordinary control flow, not an error: it travels outward
/// through blocks, branches and loops until the nearest call consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` statement was executed with this value.
    Return(Value),
}

/// Stores the runtime state of a program.
///
/// ## Usage
///
/// An `Interpreter` is created once and reused for every chunk of source, so
/// globals defined by one call to [`Interpreter::interpret`] stay visible to
/// the next. Everything `print` writes goes to the owned output sink `W`.
pub struct Interpreter<W: Write> {
    /// The innermost scope of the code currently executing. Between runs
    /// this is the global scope holding the natives and top-level
    /// declarations.
    pub(super) environment: Rc<RefCell<Environment>>,
    out:                    W,
    /// Number of function calls currently active.
    pub(super) depth:       usize,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter writing to `out`, with every native function
    /// defined in the global scope.
    pub fn new(out: W) -> Self {
        let mut globals = Environment::new();
        for native in NATIVE_FUNCTIONS {
            globals.define(native.name, Value::Native(*native));
        }

        Self { environment: Rc::new(RefCell::new(globals)),
               out,
               depth: 0 }
    }

    /// Executes a program, statement by statement.
    ///
    /// The first runtime error stops execution and is returned; output
    /// written before it stays in the sink. The interpreter is left in its
    /// global scope either way.
    ///
    /// # Example
    /// ```
    /// use lox::{
    ///     error::Diagnostics,
    ///     interpreter::{evaluator::core::Interpreter, lexer::scan, parser::core::parse},
    /// };
    ///
    /// let mut diagnostics = Diagnostics::new();
    /// let tokens = scan("var a = 1; print a + 2;", &mut diagnostics);
    /// let program = parse(&tokens, &mut diagnostics);
    ///
    /// let mut interpreter = Interpreter::new(Vec::<u8>::new());
    /// interpreter.interpret(&program).unwrap();
    ///
    /// assert_eq!(interpreter.output(), b"3\n");
    /// ```
    ///
    /// # Errors
    /// Returns the `RuntimeError` that aborted the program.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
    pub fn interpret(&mut self, statements: &[Stmt]) -> EvalResult<()> {
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                tracing::debug!(%error, "run aborted");
                return Err(error);
            }
        }
        tracing::debug!("run finished");
        Ok(())
    }

    /// Executes a single statement.
    ///
    /// Like [`Interpreter::evaluate`], this grows the native stack before
    /// descending into nested blocks, branches and loop bodies.
    ///
    /// # Errors
    /// Returns a `RuntimeError` if evaluating any part of the statement fails.
    pub fn execute(&mut self, statement: &Stmt) -> EvalResult<Flow> {
        ensure_sufficient_stack(|| match statement {
            Stmt::Expression { expr } => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            },
            Stmt::Print { expr, line } => {
                let value = self.evaluate(expr)?;
                self.emit(&value, *line)?;
                Ok(Flow::Normal)
            },
            Stmt::Var { name, initializer, .. } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(name, value);
                Ok(Flow::Normal)
            },
            Stmt::Block { statements } => {
                let scope = Environment::new_enclosed(Rc::clone(&self.environment));
                self.execute_block(statements, scope)
            },
            Stmt::If { condition,
                       then_branch,
                       else_branch, } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            },
            Stmt::Function(declaration) => {
                let function = Function::new(Rc::clone(declaration), Rc::clone(&self.environment));
                self.environment
                    .borrow_mut()
                    .define(&declaration.name, Value::Function(Rc::new(function)));
                Ok(Flow::Normal)
            },
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            },
        })
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. The native
    /// stack is grown first if nesting has used most of it.
    ///
    /// # Errors
    /// Returns a `RuntimeError` on type errors, undefined variables and
    /// failed calls.
    pub fn evaluate(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Grouping { expr } => self.evaluate(expr),
            Expr::Unary { op, expr, line } => {
                let operand = self.evaluate(expr)?;
                Self::eval_unary(*op, &operand, *line)
            },
            Expr::Binary { left,
                           op,
                           right,
                           line, } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::Logical { left, op, right } => self.eval_logical(left, *op, right),
            Expr::Variable { name, line } => self.environment.borrow().get(name, *line),
            Expr::Assign { name, value, line } => {
                let value = self.evaluate(value)?;
                self.environment
                    .borrow_mut()
                    .assign(name, value.clone(), *line)?;
                Ok(value)
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
        })
    }

    /// Writes the display form of `value` and a newline to the output sink.
    fn emit(&mut self, value: &Value, line: usize) -> EvalResult<()> {
        writeln!(self.out, "{value}").map_err(|error| RuntimeError::Output { details:
                                                                                error.to_string(),
                                                                            line })
    }

    /// Returns the output sink.
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Returns the output sink mutably, so a driver can write to it between
    /// runs.
    pub const fn output_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Consumes the interpreter and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::Diagnostics,
        interpreter::{lexer::scan, parser::core::parse},
    };

    fn run(source: &str) -> (String, EvalResult<()>) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan(source, &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        assert!(!diagnostics.had_error(), "unexpected errors: {diagnostics}");

        let mut interpreter = Interpreter::new(Vec::<u8>::new());
        let result = interpreter.interpret(&program);
        (String::from_utf8_lossy(interpreter.output()).into_owned(), result)
    }

    fn output_of(source: &str) -> String {
        let (output, result) = run(source);
        assert_eq!(result, Ok(()));
        output
    }

    #[test]
    fn prints_display_forms() {
        assert_eq!(output_of("print nil; print true; print 3; print 2.5; print \"hi\"; \
                              print clock;"),
                   "nil\ntrue\n3\n2.5\nhi\n<native fn>\n");
    }

    #[test]
    fn var_without_initializer_is_nil() {
        assert_eq!(output_of("var a; print a;"), "nil\n");
    }

    #[test]
    fn assignment_yields_the_assigned_value() {
        assert_eq!(output_of("var a; var b; a = b = 4; print a; print b;"), "4\n4\n");
    }

    #[test]
    fn if_picks_a_branch_by_truthiness() {
        assert_eq!(output_of("if (0) print \"zero\"; else print \"no\"; \
                              if (nil) print 1; else print 2; if (false) print 3;"),
                   "zero\n2\n");
    }

    #[test]
    fn while_loops_until_the_condition_is_falsy() {
        assert_eq!(output_of("var i = 0; while (i < 3) { print i; i = i + 1; }"),
                   "0\n1\n2\n");
    }

    #[test]
    fn block_shadows_and_restores() {
        assert_eq!(output_of("var a = \"outer\"; { var a = \"inner\"; print a; } print a;"),
                   "inner\nouter\n");
    }

    #[test]
    fn return_unwinds_through_loops() {
        assert_eq!(output_of("fun first() { while (true) { for (;;) { return 7; } } } \
                              print first();"),
                   "7\n");
    }

    #[test]
    fn runtime_error_keeps_earlier_output_and_stops() {
        let (output, result) = run("print 1; print -\"x\"; print 2;");

        assert_eq!(output, "1\n");
        assert_eq!(result,
                   Err(RuntimeError::OperandMustBeNumber { op:   crate::ast::UnaryOperator::Negate,
                                                           line: 1, }));
    }

    #[test]
    fn interpreter_returns_to_global_scope_after_an_error() {
        let mut diagnostics = Diagnostics::new();
        let mut interpreter = Interpreter::new(Vec::<u8>::new());

        let tokens = scan("var a = 1; { var a = 2; print nope; }", &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        assert!(interpreter.interpret(&program).is_err());

        let tokens = scan("print a;", &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        interpreter.interpret(&program).unwrap();

        assert_eq!(interpreter.into_output(), b"1\n");
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_is_a_runtime_error() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan("\nprint 1;", &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);

        let mut interpreter = Interpreter::new(BrokenSink);

        assert_eq!(interpreter.interpret(&program),
                   Err(RuntimeError::Output { details: "closed".into(),
                                              line:    2, }));
    }
}
