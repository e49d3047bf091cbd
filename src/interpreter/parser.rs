/// Parser state and entry point.
///
/// Holds the `Parser` cursor over the token slice, token-matching helpers,
/// error recovery and the public `parse` function.
pub mod core;

/// Assignment, logical and binary operator parsing.
///
/// Implements the precedence levels from assignment down to multiplication.
pub mod binary;

/// Unary operators, calls and primary expressions.
pub mod unary;

/// Declarations and simple statements.
///
/// Function and variable declarations, `print`, `return` and expression
/// statements, plus the recovery point used after a syntax error.
pub mod statement;

/// Blocks and control flow.
///
/// Parses braces, `if`, `while` and `for`, lowering the latter to `while`.
pub mod block;

/// Shared parsing helpers.
pub mod utils;
