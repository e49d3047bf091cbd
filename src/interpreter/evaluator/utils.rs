use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    ast::Stmt,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Flow, Interpreter},
    },
};

impl<W: Write> Interpreter<W> {
    /// Executes `statements` with `scope` as the current environment.
    ///
    /// The previous environment is restored whether the statements complete,
    /// return or fail. A `Flow::Return` stops the block and is passed on to
    /// the caller unchanged.
    ///
    /// # Errors
    /// Returns the first `RuntimeError` raised by a statement.
    pub fn execute_block(&mut self, statements: &[Stmt], scope: Environment) -> EvalResult<Flow> {
        tracing::trace!(statements = statements.len(), "entering scope");
        let previous = std::mem::replace(&mut self.environment, Rc::new(RefCell::new(scope)));
        let result = self.execute_all(statements);
        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> EvalResult<Flow> {
        for statement in statements {
            if let Flow::Return(value) = self.execute(statement)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }
}

/// Checks that a call supplies exactly as many arguments as the callee
/// declares.
///
/// # Errors
/// Returns `RuntimeError::ArityMismatch` naming both counts otherwise.
///
/// # Example
/// ```
/// use lox::{error::RuntimeError, interpreter::evaluator::utils::check_arity};
///
/// assert!(check_arity(2, 2, 1).is_ok());
/// assert_eq!(check_arity(2, 3, 7),
///            Err(RuntimeError::ArityMismatch { expected: 2,
///                                              found:    3,
///                                              line:     7, }));
/// ```
pub const fn check_arity(expected: usize, found: usize, line: usize) -> EvalResult<()> {
    if expected == found {
        Ok(())
    } else {
        Err(RuntimeError::ArityMismatch { expected,
                                          found,
                                          line })
    }
}
