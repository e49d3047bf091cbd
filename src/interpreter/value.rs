/// Core value type and its language-level behavior.
///
/// Defines the `Value` enum with every runtime kind, truthiness, equality and
/// the textual form used by `print`.
pub mod core;
/// Callable values.
///
/// User-defined functions with their captured scope, and the host-provided
/// native functions.
pub mod function;

pub use self::core::Value;
