use std::io::Write;

use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation; any other operand is an error.
    /// - `Not`: logical negation of the operand's truthiness; never fails.
    ///
    /// # Example
    /// ```
    /// use lox::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// type Repl = Interpreter<Vec<u8>>;
    ///
    /// let v = Repl::eval_unary(UnaryOperator::Negate, &Value::Number(5.0), 1).unwrap();
    /// assert_eq!(v, Value::Number(-5.0));
    ///
    /// let v = Repl::eval_unary(UnaryOperator::Not, &Value::Nil, 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    /// ```
    ///
    /// # Errors
    /// Returns `RuntimeError::OperandMustBeNumber` when negating a
    /// non-number.
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::OperandMustBeNumber { op, line }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Interp = Interpreter<Vec<u8>>;

    #[test]
    fn negate_requires_a_number() {
        assert_eq!(Interp::eval_unary(UnaryOperator::Negate, &Value::from("3"), 9),
                   Err(RuntimeError::OperandMustBeNumber { op:   UnaryOperator::Negate,
                                                           line: 9, }));
    }

    #[test]
    fn not_uses_truthiness() {
        assert_eq!(Interp::eval_unary(UnaryOperator::Not, &Value::Number(0.0), 1),
                   Ok(Value::Bool(false)));
        assert_eq!(Interp::eval_unary(UnaryOperator::Not, &Value::Bool(false), 1),
                   Ok(Value::Bool(true)));
    }
}
