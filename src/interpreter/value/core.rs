use std::rc::Rc;

use crate::{
    ast::LiteralValue,
    interpreter::value::function::{Function, NativeFunction},
};

/// Represents a runtime value in the interpreter.
///
/// Values are dynamically typed. Apart from truthiness and the `+` rules of
/// the evaluator there are no implicit conversions between variants.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value, `nil`.
    Nil,
    /// A double-precision floating-point number.
    Number(f64),
    /// An immutable string.
    String(Rc<str>),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A user-defined function together with its closure.
    Function(Rc<Function>),
    /// A function implemented by the host.
    Native(NativeFunction),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(Rc::from(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Nil => Self::Nil,
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::String(s) => Self::from(s.as_str()),
        }
    }
}

impl Value {
    /// Maps the value to a boolean for conditionals.
    ///
    /// `nil` and `false` are falsy; every other value, including `0` and the
    /// empty string, is truthy.
    ///
    /// # Example
    /// ```
    /// use lox::interpreter::value::Value;
    ///
    /// assert!(!Value::Nil.is_truthy());
    /// assert!(!Value::Bool(false).is_truthy());
    /// assert!(Value::Number(0.0).is_truthy());
    /// assert!(Value::from("").is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }
}

/// Language equality.
///
/// Values of different kinds are never equal. Numbers compare with IEEE-754
/// `==`, so `NaN` is not equal to itself. Functions are equal only to
/// themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// Renders a value the way `print` shows it.
///
/// Finite numbers use the shortest decimal text that reads back as the same
/// double, without a trailing `.0`. Infinities and NaN keep Rust's float
/// text: `inf`, `-inf` and `NaN`.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Function(function) => write!(f, "<fn {}>", function.name()),
            Self::Native(_) => f.write_str("<native fn>"),
        }
    }
}
