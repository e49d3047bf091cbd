use std::{
    cell::RefCell,
    rc::Rc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    ast::FunctionDecl,
    interpreter::{environment::Environment, value::core::Value},
};

/// A user-defined function value.
///
/// Holds the declaration it was created from and the scope that was current
/// when the declaration executed. Calls run the body in a fresh scope
/// enclosed by `closure`, never by the caller's scope.
pub struct Function {
    /// The parsed declaration: name, parameters and body.
    pub declaration: Rc<FunctionDecl>,
    /// The scope captured at declaration time.
    pub closure:     Rc<RefCell<Environment>>,
}

impl Function {
    /// Creates a function value closing over `closure`.
    #[must_use]
    pub const fn new(declaration: Rc<FunctionDecl>, closure: Rc<RefCell<Environment>>) -> Self {
        Self { declaration,
               closure }
    }

    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    /// The number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

// The closure may contain this very function, so only the name is printed.
impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.name())
         .field("arity", &self.arity())
         .finish_non_exhaustive()
    }
}

/// Type alias for native function handlers.
///
/// A native receives the evaluated arguments; its arity has already been
/// checked by the caller.
pub type NativeFn = fn(&[Value]) -> Value;

/// A function implemented by the host and bound in the global scope.
#[derive(Debug, Clone, Copy)]
pub struct NativeFunction {
    /// The global name the native is bound to.
    pub name:  &'static str,
    /// The exact number of arguments it accepts.
    pub arity: usize,
    /// The implementation.
    pub func:  NativeFn,
}

/// Every native function, defined in the global scope of each interpreter.
pub const NATIVE_FUNCTIONS: &[NativeFunction] = &[NativeFunction { name:  "clock",
                                                                   arity: 0,
                                                                   func:  clock, }];

/// Returns the seconds elapsed since the Unix epoch.
///
/// # Example
/// ```
/// use lox::interpreter::value::{Value, function::clock};
///
/// let Value::Number(seconds) = clock(&[]) else { panic!("clock returns a number") };
/// assert!(seconds > 0.0);
/// ```
#[must_use]
pub fn clock(_args: &[Value]) -> Value {
    let seconds = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_or(0.0, |elapsed| elapsed.as_secs_f64());
    Value::Number(seconds)
}
