/// Stack growth for deeply nested recursion.
///
/// The parser and the evaluator both recurse once per nesting level of the
/// source program. This module lets them grow the native stack on demand
/// instead of overflowing it on deeply nested input.
pub mod stack;
