use std::{io::Write, rc::Rc};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            core::{EvalResult, Flow, Interpreter, MAX_CALL_DEPTH},
            utils::check_arity,
        },
        value::{Value, function::Function},
    },
    util::stack::ensure_sufficient_stack,
};

impl<W: Write> Interpreter<W> {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right,
    /// and only then is the callee checked for being callable.
    pub(super) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let callee = self.evaluate(callee)?;
        let arguments = arguments.iter()
                                 .map(|argument| self.evaluate(argument))
                                 .collect::<EvalResult<Vec<_>>>()?;

        self.call_value(&callee, arguments, line)
    }

    /// Calls `callee` with already evaluated arguments.
    ///
    /// # Errors
    /// Returns `RuntimeError::NotCallable` if `callee` is not a function,
    /// `RuntimeError::ArityMismatch` if the argument count differs from the
    /// declared parameter count, and any error raised by the body.
    pub fn call_value(&mut self,
                      callee: &Value,
                      arguments: Vec<Value>,
                      line: usize)
                      -> EvalResult<Value> {
        match callee {
            Value::Function(function) => {
                check_arity(function.arity(), arguments.len(), line)?;
                self.call_function(function, arguments, line)
            },
            Value::Native(native) => {
                check_arity(native.arity, arguments.len(), line)?;
                tracing::trace!(native = native.name, "native call");
                Ok((native.func)(&arguments))
            },
            _ => Err(RuntimeError::NotCallable { line }),
        }
    }

    /// Runs a user function body in a fresh scope enclosed by its closure.
    ///
    /// Parameters are bound to the arguments in order. A `return` becomes the
    /// result; falling off the end of the body yields `nil`.
    fn call_function(&mut self,
                     function: &Function,
                     arguments: Vec<Value>,
                     line: usize)
                     -> EvalResult<Value> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::StackOverflow { line });
        }
        tracing::trace!(function = function.name(), depth = self.depth, "call");

        let mut scope = Environment::new_enclosed(Rc::clone(&function.closure));
        for (param, argument) in function.declaration.params.iter().zip(arguments) {
            scope.define(param, argument);
        }

        self.depth += 1;
        let flow = ensure_sufficient_stack(|| {
                       self.execute_block(&function.declaration.body, scope)
                   });
        self.depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}
