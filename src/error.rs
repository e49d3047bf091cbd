/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unexpected characters, unterminated strings, unexpected tokens and
/// the advisory limits the parser enforces.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: operand type
/// mismatches, undefined variables and invalid calls.
pub mod runtime_error;
/// Error collection for a single run.
pub mod diagnostics;

pub use diagnostics::Diagnostics;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
