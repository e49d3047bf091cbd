/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens, each
/// corresponding to a meaningful language element such as a number, an
/// identifier, an operator or a keyword. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, lexeme,
///   literal value and source line.
/// - Skips whitespace and `//` comments.
/// - Reports lexical errors and keeps scanning past them.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token sequence produced by the lexer and
/// constructs the statements of the program. On a syntax error it reports the
/// error, skips to the next statement boundary and carries on, so one run
/// surfaces as many independent errors as possible.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates the grammar, reporting errors with location info.
/// - Lowers `for` loops to `while` loops.
pub mod parser;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the statements of a program, evaluates expressions,
/// manages scopes and calls, and writes `print` output to its sink. It is the
/// core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates every expression and statement kind.
/// - Implements closures, calls and `return`.
/// - Reports runtime errors such as operand type mismatches or undefined
///   variables.
pub mod evaluator;
/// Lexically nested variable scopes.
pub mod environment;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares every value a program can compute: `nil`, numbers,
/// strings, booleans and functions. It also defines truthiness, equality and
/// the printed form of each kind.
pub mod value;
