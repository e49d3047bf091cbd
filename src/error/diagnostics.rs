use crate::error::{ParseError, RuntimeError};

/// Exit status for a source unit with lexical or syntax errors.
pub const EXIT_SYNTAX_ERROR: i32 = 65;
/// Exit status for a source unit that failed at runtime.
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// Collects everything that went wrong while running one source unit.
///
/// The lexer and parser push every [`ParseError`] they recover from; the
/// driver records the single [`RuntimeError`] that aborted execution, if any.
/// Nothing is printed here: the caller decides how to surface the errors.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    errors:        Vec<ParseError>,
    runtime_error: Option<RuntimeError>,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lexical or syntax error.
    pub fn report(&mut self, error: ParseError) {
        tracing::debug!(line = error.line(), "syntax error reported");
        self.errors.push(error);
    }

    /// Records the runtime error that aborted the run.
    pub fn report_runtime(&mut self, error: RuntimeError) {
        tracing::debug!(line = error.line(), "runtime error reported");
        self.runtime_error = Some(error);
    }

    /// Returns `true` if any lexical or syntax error was reported.
    #[must_use]
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if execution was aborted by a runtime error.
    #[must_use]
    pub const fn had_runtime_error(&self) -> bool {
        self.runtime_error.is_some()
    }

    /// Returns `true` if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.had_error() && !self.had_runtime_error()
    }

    /// The lexical and syntax errors, in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// The runtime error, if execution was aborted.
    #[must_use]
    pub const fn runtime_error(&self) -> Option<&RuntimeError> {
        self.runtime_error.as_ref()
    }

    /// Maps the collected errors to a process exit status.
    ///
    /// # Example
    /// ```
    /// use lox::error::{Diagnostics, ParseError};
    ///
    /// let mut diagnostics = Diagnostics::new();
    /// assert_eq!(diagnostics.exit_code(), 0);
    ///
    /// diagnostics.report(ParseError::UnterminatedString { line: 1 });
    /// assert_eq!(diagnostics.exit_code(), 65);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.had_error() {
            EXIT_SYNTAX_ERROR
        } else if self.had_runtime_error() {
            EXIT_RUNTIME_ERROR
        } else {
            0
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        if let Some(error) = &self.runtime_error {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_alone_maps_to_seventy() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report_runtime(RuntimeError::NotCallable { line: 3 });

        assert!(!diagnostics.had_error());
        assert!(diagnostics.had_runtime_error());
        assert_eq!(diagnostics.exit_code(), EXIT_RUNTIME_ERROR);
    }

    #[test]
    fn syntax_errors_take_precedence() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(ParseError::InvalidAssignmentTarget { line: 1 });
        diagnostics.report_runtime(RuntimeError::NotCallable { line: 2 });

        assert_eq!(diagnostics.exit_code(), EXIT_SYNTAX_ERROR);
    }

    #[test]
    fn display_lists_every_error_on_its_own_line() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(ParseError::UnterminatedString { line: 1 });
        diagnostics.report(ParseError::InvalidAssignmentTarget { line: 4 });

        assert_eq!(diagnostics.to_string(),
                   "[line 1] Error: Unterminated string.\n[line 4] Error at '=': Invalid \
                    assignment target.");
    }
}
