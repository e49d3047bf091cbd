use std::io::Write;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
};

impl<W: Write> Interpreter<W> {
    /// Applies a binary operator to two already evaluated operands.
    ///
    /// Supported operators:
    /// - `+`: adds two numbers or concatenates two strings.
    /// - `-`, `*`, `/`: IEEE 754 arithmetic; division by zero yields an
    ///   infinity or NaN.
    /// - `<`, `<=`, `>`, `>=`: numeric comparison.
    /// - `==`, `!=`: equality over any values, never an error.
    ///
    /// # Example
    /// ```
    /// use lox::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// type Repl = Interpreter<Vec<u8>>;
    ///
    /// let sum = Repl::eval_binary(BinaryOperator::Add, &Value::from(1.0), &Value::from(2.0), 1);
    /// assert_eq!(sum.unwrap(), Value::from(3.0));
    ///
    /// let joined = Repl::eval_binary(BinaryOperator::Add, &Value::from("a"), &Value::from("b"), 1);
    /// assert_eq!(joined.unwrap(), Value::from("ab"));
    ///
    /// let equal = Repl::eval_binary(BinaryOperator::Equal, &Value::from("1"), &Value::from(1.0), 1);
    /// assert_eq!(equal.unwrap(), Value::from(false));
    /// ```
    ///
    /// # Errors
    /// Returns a `RuntimeError` when an operator receives operands of the
    /// wrong kind.
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        match op {
            BinaryOperator::Equal => return Ok(Value::Bool(left == right)),
            BinaryOperator::NotEqual => return Ok(Value::Bool(left != right)),
            BinaryOperator::Add => {
                if let (Value::String(a), Value::String(b)) = (left, right) {
                    return Ok(Value::from(format!("{a}{b}")));
                }
            },
            _ => {},
        }

        let (Value::Number(a), Value::Number(b)) = (left, right) else {
            return Err(match op {
                BinaryOperator::Add => RuntimeError::OperandsMustBeNumbersOrStrings { line },
                _ => RuntimeError::OperandsMustBeNumbers { op, line },
            });
        };
        let (a, b) = (*a, *b);

        let value = match op {
            BinaryOperator::Add => Value::Number(a + b),
            BinaryOperator::Sub => Value::Number(a - b),
            BinaryOperator::Mul => Value::Number(a * b),
            BinaryOperator::Div => Value::Number(a / b),
            BinaryOperator::Less => Value::Bool(a < b),
            BinaryOperator::LessEqual => Value::Bool(a <= b),
            BinaryOperator::Greater => Value::Bool(a > b),
            BinaryOperator::GreaterEqual => Value::Bool(a >= b),
            BinaryOperator::Equal => Value::Bool(a == b),
            BinaryOperator::NotEqual => Value::Bool(a != b),
        };
        Ok(value)
    }

    /// Evaluates `and` / `or` with short-circuiting.
    ///
    /// The result is the operand that decided the outcome, not a boolean:
    /// `nil or "x"` is `"x"` and `0 and nil` is `nil`. The right operand is
    /// only evaluated when the left one does not decide.
    pub(super) fn eval_logical(&mut self,
                               left: &Expr,
                               op: LogicalOperator,
                               right: &Expr)
                               -> EvalResult<Value> {
        let left = self.evaluate(left)?;
        let decided = match op {
            LogicalOperator::Or => left.is_truthy(),
            LogicalOperator::And => !left.is_truthy(),
        };
        if decided {
            return Ok(left);
        }
        self.evaluate(right)
    }
}
