use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::Value},
};

/// A scope record: the variables of one block or call, linked to the scope
/// that encloses it.
///
/// Scopes are shared through `Rc<RefCell<_>>` because a closure keeps the
/// scope it was declared in alive after the block that created it has exited.
/// The chain always ends at the single global scope.
#[derive(Debug, Default)]
pub struct Environment {
    values:    HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Self>>>,
}

impl Environment {
    /// Creates a root scope with no enclosing scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope nested inside `enclosing`.
    #[must_use]
    pub fn new_enclosed(enclosing: Rc<RefCell<Self>>) -> Self {
        Self { values:    HashMap::new(),
               enclosing: Some(enclosing), }
    }

    /// Binds `name` in this scope, overwriting an existing binding of the same
    /// name in this scope.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Looks a variable up, searching this scope and then each enclosing
    /// scope outward.
    ///
    /// # Errors
    /// Returns `UndefinedVariable` if no scope in the chain defines `name`.
    ///
    /// # Example
    /// ```
    /// use std::{cell::RefCell, rc::Rc};
    ///
    /// use lox::interpreter::{environment::Environment, value::Value};
    ///
    /// let globals = Rc::new(RefCell::new(Environment::new()));
    /// globals.borrow_mut().define("x", Value::Number(1.0));
    ///
    /// let local = Environment::new_enclosed(Rc::clone(&globals));
    /// assert_eq!(local.get("x", 1).unwrap(), Value::Number(1.0));
    /// assert!(local.get("y", 1).is_err());
    /// ```
    pub fn get(&self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }

        let mut scope = self.enclosing.clone();
        while let Some(current) = scope {
            let current = current.borrow();
            if let Some(value) = current.values.get(name) {
                return Ok(value.clone());
            }
            scope = current.enclosing.clone();
        }
        Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                              line })
    }

    /// Assigns to the nearest scope that defines `name`.
    ///
    /// Assignment never declares: the variable must already exist somewhere
    /// in the chain.
    ///
    /// # Errors
    /// Returns `UndefinedVariable` if no scope in the chain defines `name`.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }

        let mut scope = self.enclosing.clone();
        while let Some(current) = scope {
            let mut current = current.borrow_mut();
            if let Some(slot) = current.values.get_mut(name) {
                *slot = value;
                return Ok(());
            }
            scope = current.enclosing.clone();
        }
        Err(RuntimeError::UndefinedVariable { name: name.to_string(),
                                              line })
    }
}

/// Releases the enclosing chain one scope at a time. A closure can keep an
/// arbitrarily deep chain alive, and dropping it link by link would recurse
/// once per scope.
impl Drop for Environment {
    fn drop(&mut self) {
        let mut next = self.enclosing.take();
        while let Some(scope) = next {
            next = match Rc::try_unwrap(scope) {
                Ok(scope) => scope.into_inner().enclosing.take(),
                Err(_) => None,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(environment: Environment) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(environment))
    }

    #[test]
    fn redefinition_in_the_same_scope_overwrites() {
        let mut environment = Environment::new();
        environment.define("a", Value::Number(1.0));
        environment.define("a", Value::Bool(true));

        assert_eq!(environment.get("a", 1), Ok(Value::Bool(true)));
    }

    #[test]
    fn inner_definition_shadows_without_touching_outer() {
        let globals = shared(Environment::new());
        globals.borrow_mut().define("a", Value::Number(1.0));

        let mut local = Environment::new_enclosed(Rc::clone(&globals));
        local.define("a", Value::Number(2.0));

        assert_eq!(local.get("a", 1), Ok(Value::Number(2.0)));
        assert_eq!(globals.borrow().get("a", 1), Ok(Value::Number(1.0)));
    }

    #[test]
    fn assignment_updates_the_nearest_defining_scope() {
        let globals = shared(Environment::new());
        globals.borrow_mut().define("a", Value::Number(1.0));
        let middle = shared(Environment::new_enclosed(Rc::clone(&globals)));
        let mut inner = Environment::new_enclosed(Rc::clone(&middle));

        inner.assign("a", Value::Number(5.0), 1).unwrap();

        assert_eq!(globals.borrow().get("a", 1), Ok(Value::Number(5.0)));
        assert!(!middle.borrow().values.contains_key("a"));
    }

    #[test]
    fn assignment_never_declares() {
        let mut environment = Environment::new();

        assert_eq!(environment.assign("ghost", Value::Nil, 7),
                   Err(RuntimeError::UndefinedVariable { name: "ghost".into(),
                                                         line: 7, }));
        assert!(environment.get("ghost", 7).is_err());
    }

    #[test]
    fn long_chains_are_walked_and_released_without_recursion() {
        let globals = shared(Environment::new());
        globals.borrow_mut().define("a", Value::Number(1.0));

        let mut innermost = Rc::clone(&globals);
        for _ in 0..100_000 {
            innermost = shared(Environment::new_enclosed(innermost));
        }

        innermost.borrow_mut().assign("a", Value::Number(2.0), 1).unwrap();
        assert_eq!(innermost.borrow().get("a", 1), Ok(Value::Number(2.0)));

        drop(innermost);
        assert_eq!(Rc::strong_count(&globals), 1);
    }
}
