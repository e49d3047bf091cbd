#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Lexical errors carry only a line, syntax errors additionally carry the
/// location they were detected at, rendered as ` at 'lexeme'` or ` at end`.
pub enum ParseError {
    /// The lexer met a character that starts no token.
    UnexpectedCharacter {
        /// The offending character.
        character: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal was still open when the input ended.
    UnterminatedString {
        /// The source line where the input ended.
        line: usize,
    },
    /// Found a token the grammar does not allow here.
    UnexpectedToken {
        /// Where the error was detected, e.g. ` at ';'`.
        location: String,
        /// What the parser expected.
        message:  String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The left-hand side of `=` is not a variable.
    InvalidAssignmentTarget {
        /// The source line of the `=` token.
        line: usize,
    },
    /// A function declaration lists more than 255 parameters.
    TooManyParameters {
        /// Where the error was detected.
        location: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A call passes more than 255 arguments.
    TooManyArguments {
        /// Where the error was detected.
        location: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A `return` statement outside of any function body.
    ReturnAtTopLevel {
        /// The source line of the `return` keyword.
        line: usize,
    },
}

impl ParseError {
    /// Returns the source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnterminatedString { line }
            | Self::UnexpectedToken { line, .. }
            | Self::InvalidAssignmentTarget { line }
            | Self::TooManyParameters { line, .. }
            | Self::TooManyArguments { line, .. }
            | Self::ReturnAtTopLevel { line } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, line } => {
                write!(f, "[line {line}] Error: Unexpected character '{character}'.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "[line {line}] Error: Unterminated string.")
            },
            Self::UnexpectedToken { location,
                                    message,
                                    line, } => {
                write!(f, "[line {line}] Error{location}: {message}")
            },
            Self::InvalidAssignmentTarget { line } => {
                write!(f, "[line {line}] Error at '=': Invalid assignment target.")
            },
            Self::TooManyParameters { location, line } => write!(f,
                                                                 "[line {line}] Error{location}: Can't have more than 255 parameters."),
            Self::TooManyArguments { location, line } => write!(f,
                                                                "[line {line}] Error{location}: Can't have more than 255 arguments."),
            Self::ReturnAtTopLevel { line } => write!(f,
                                                      "[line {line}] Error at 'return': Can't return from top-level code."),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_name_their_location() {
        let at_token = ParseError::UnexpectedToken { location: " at ')'".into(),
                                                     message:  "Expect expression.".into(),
                                                     line:     3, };
        let at_end = ParseError::UnexpectedToken { location: " at end".into(),
                                                   message:  "Expect ';' after value.".into(),
                                                   line:     9, };

        assert_eq!(at_token.to_string(), "[line 3] Error at ')': Expect expression.");
        assert_eq!(at_end.to_string(), "[line 9] Error at end: Expect ';' after value.");
    }

    #[test]
    fn lexical_errors_have_no_location() {
        let error = ParseError::UnexpectedCharacter { character: "@".into(),
                                                      line:      2, };

        assert_eq!(error.to_string(), "[line 2] Error: Unexpected character '@'.");
        assert_eq!(error.line(), 2);
    }
}
