/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, its environments and output sink, statement
/// execution and expression dispatch.
pub mod core;

/// Binary operator evaluation.
///
/// Implements arithmetic, comparison and equality, plus the short-circuiting
/// `and` and `or`.
pub mod binary;

/// Unary operator evaluation.
///
/// Implements numeric negation and logical not.
pub mod unary;

/// Function calls.
///
/// Handles user-defined and native function calls, argument checking and
/// return value propagation.
pub mod function;

/// Utility functions for evaluation.
///
/// Provides scope handling and reusable checks shared by evaluation logic.
pub mod utils;
