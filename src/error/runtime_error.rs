use crate::ast::{BinaryOperator, UnaryOperator};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// A runtime error aborts the remaining statements of the current run. Every
/// variant records the source line of the token that caused it.
pub enum RuntimeError {
    /// A unary operator that needs a number received something else.
    OperandMustBeNumber {
        /// The operator that was applied.
        op:   UnaryOperator,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An arithmetic or comparison operator received a non-number operand.
    OperandsMustBeNumbers {
        /// The operator that was applied.
        op:   BinaryOperator,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `+` received operands that are neither two numbers nor two strings.
    OperandsMustBeNumbersOrStrings {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Read or assigned a name that no enclosing scope defines.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a value that is neither a function nor a native.
    NotCallable {
        /// The source line of the call's closing parenthesis.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArityMismatch {
        /// Parameters declared by the callee.
        expected: usize,
        /// Arguments supplied by the call.
        found:    usize,
        /// The source line of the call's closing parenthesis.
        line:     usize,
    },
    /// Too many nested calls are active.
    StackOverflow {
        /// The source line of the call that exceeded the limit.
        line: usize,
    },
    /// The output sink refused a write.
    Output {
        /// The underlying I/O error message.
        details: String,
        /// The source line of the statement that wrote.
        line:    usize,
    },
}

impl RuntimeError {
    /// Returns the source line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::OperandMustBeNumber { line, .. }
            | Self::OperandsMustBeNumbers { line, .. }
            | Self::OperandsMustBeNumbersOrStrings { line }
            | Self::UndefinedVariable { line, .. }
            | Self::NotCallable { line }
            | Self::ArityMismatch { line, .. }
            | Self::StackOverflow { line }
            | Self::Output { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OperandMustBeNumber { op, line } => {
                write!(f, "Operand of '{op}' must be a number.\n[line {line}]")
            },
            Self::OperandsMustBeNumbers { op, line } => {
                write!(f, "Operands of '{op}' must be numbers.\n[line {line}]")
            },
            Self::OperandsMustBeNumbersOrStrings { line } => write!(f,
                                                                    "Operands of '+' must be two numbers or two strings.\n[line {line}]"),
            Self::UndefinedVariable { name, line } => {
                write!(f, "Undefined variable '{name}'.\n[line {line}]")
            },
            Self::NotCallable { line } => {
                write!(f, "Can only call functions.\n[line {line}]")
            },
            Self::ArityMismatch { expected,
                                  found,
                                  line, } => write!(f,
                                                    "Expected {expected} arguments but got {found}.\n[line {line}]"),
            Self::StackOverflow { line } => write!(f, "Stack overflow.\n[line {line}]"),
            Self::Output { details, line } => {
                write!(f, "Failed to write output: {details}.\n[line {line}]")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
