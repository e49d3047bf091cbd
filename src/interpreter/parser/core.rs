use crate::{
    ast::{Expr, Stmt},
    error::{Diagnostics, ParseError},
    interpreter::lexer::{Token, TokenKind},
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum number of parameters a function may declare and arguments a call
/// may pass.
pub const MAX_ARITY: usize = 255;

/// Recursive-descent parser over a scanned token sequence.
///
/// The grammar functions are spread over the sibling modules, one per
/// precedence level or statement family. Errors that make the current
/// statement unparseable are returned as `Err` and handled by
/// [`Parser::declaration`], which reports them and resynchronizes. Errors that
/// leave the tree well-formed (invalid assignment target, arity limits) are
/// reported directly and parsing carries on.
pub struct Parser<'a> {
    tokens:                   &'a [Token],
    current:                  usize,
    pub(super) function_depth: usize,
    diagnostics:              &'a mut Diagnostics,
}

/// Parses a whole token sequence into a list of statements.
///
/// This never fails: every syntax error is reported to `diagnostics`, the
/// offending statement is dropped, and parsing resumes at the next statement
/// boundary. The token sequence must end with a [`TokenKind::Eof`] token, as
/// produced by [`scan`](crate::interpreter::lexer::scan).
///
/// # Example
/// ```
/// use lox::{
///     error::Diagnostics,
///     interpreter::{lexer::scan, parser::core::parse},
/// };
///
/// let mut diagnostics = Diagnostics::new();
/// let tokens = scan("print 1 + 2 * 3;", &mut diagnostics);
/// let program = parse(&tokens, &mut diagnostics);
///
/// assert_eq!(program.len(), 1);
/// assert_eq!(program[0].to_string(), "(print (+ 1 (* 2 3)))");
/// assert!(!diagnostics.had_error());
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token], diagnostics: &mut Diagnostics) -> Vec<Stmt> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let statements = Parser::new(tokens, diagnostics).parse();
    tracing::debug!(count = statements.len(), "parsed statements");
    statements
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first token.
    pub fn new(tokens: &'a [Token], diagnostics: &'a mut Diagnostics) -> Self {
        Self { tokens,
               current: 0,
               function_depth: 0,
               diagnostics }
    }

    /// Parses declarations until the end of input.
    pub fn parse(mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        statements
    }

    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// lowest-precedence level, assignment, and recursively descends through
    /// the precedence hierarchy.
    ///
    /// Grammar: `expression := assignment`
    pub(super) fn expression(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.assignment())
    }

    /// Discards tokens until a statement boundary: just after a `;`, or just
    /// before a keyword that starts a declaration or statement.
    pub(super) fn synchronize(&mut self) {
        use TokenKind::{Class, For, Fun, If, Print, Return, Semicolon, Var, While};

        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == Semicolon {
                return;
            }
            if matches!(self.peek().kind, Class | Fun | Var | For | If | While | Print | Return) {
                return;
            }
            self.advance();
        }
    }

    /// Reports an error that does not abort the current statement.
    pub(super) fn report(&mut self, error: ParseError) {
        self.diagnostics.report(error);
    }

    /// Builds an error located at `token`.
    pub(super) fn error(token: &Token, message: &str) -> ParseError {
        ParseError::UnexpectedToken { location: token.location(),
                                      message:  message.to_string(),
                                      line:     token.line, }
    }

    /// Consumes the next token if it has the given kind, or fails with
    /// `message` located at the current token.
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&'a Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(Self::error(self.peek(), message))
    }

    /// Consumes the next token if its kind is one of `kinds`.
    pub(super) fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(*kind)) {
            self.advance();
            return true;
        }
        false
    }

    /// Returns `true` if the current token has the given kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Consumes the current token and returns it. The end-of-input marker is
    /// never consumed.
    pub(super) fn advance(&mut self) -> &'a Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(super) fn peek(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.current.min(tokens.len() - 1)]
    }

    pub(super) fn previous(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.current.saturating_sub(1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::scan;

    fn parse_source(source: &str) -> (Vec<Stmt>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan(source, &mut diagnostics);
        let program = parse(&tokens, &mut diagnostics);
        (program, diagnostics)
    }

    fn render(source: &str) -> String {
        let (program, diagnostics) = parse_source(source);
        assert!(!diagnostics.had_error(), "unexpected errors: {diagnostics}");
        program.iter()
               .map(ToString::to_string)
               .collect::<Vec<_>>()
               .join("\n")
    }

    #[test]
    fn precedence_climbs_from_assignment_to_primary() {
        assert_eq!(render("a = b or c and d == e < f + g * -h;"),
                   "(; (= a (or b (and c (== d (< e (+ f (* g (- h)))))))))");
    }

    #[test]
    fn binary_operators_are_left_associative() {
        assert_eq!(render("1 - 2 - 3;"), "(; (- (- 1 2) 3))");
        assert_eq!(render("8 / 4 * 2;"), "(; (* (/ 8 4) 2))");
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(render("a = b = 1;"), "(; (= a (= b 1)))");
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(render("(1 + 2) * 3;"), "(; (* (group (+ 1 2)) 3))");
    }

    #[test]
    fn calls_chain_left_to_right() {
        assert_eq!(render("f(1)(2, x)();"), "(; (call (call (call f 1) 2 x)))");
    }

    #[test]
    fn unary_operators_nest() {
        assert_eq!(render("!!true; - -1;"), "(; (! (! true)))\n(; (- (- 1)))");
    }

    #[test]
    fn for_loop_desugars_to_while_in_a_block() {
        assert_eq!(render("for (var i = 0; i < 3; i = i + 1) print i;"),
                   "(block (var i 0) (while (< i 3) (block (print i) (; (= i (+ i 1))))))");
    }

    #[test]
    fn for_loop_without_clauses_loops_on_true() {
        assert_eq!(render("for (;;) print 1;"), "(while true (print 1))");
    }

    #[test]
    fn declarations_and_control_flow() {
        assert_eq!(render("fun add(a, b) { return a + b; } var x; if (x) print 1; else { print 2; } \
                           while (false) x = 1;"),
                   "(fun add (a b) (return (+ a b)))\n(var x)\n(if x (print 1) (block (print \
                    2)))\n(while false (; (= x 1)))");
    }

    #[test]
    fn invalid_assignment_target_is_reported_and_the_left_side_kept() {
        let (program, diagnostics) = parse_source("a + b = c; print 1;");

        assert_eq!(diagnostics.errors(), [ParseError::InvalidAssignmentTarget { line: 1 }]);
        assert_eq!(program.len(), 2);
        assert_eq!(program[0].to_string(), "(; (+ a b))");
    }

    #[test]
    fn each_malformed_statement_is_reported_once() {
        let (program, diagnostics) = parse_source("var = 1;\nprint (;\nprint 3;");

        assert_eq!(diagnostics.errors().len(), 2);
        assert_eq!(diagnostics.errors()[0].line(), 1);
        assert_eq!(diagnostics.errors()[1].line(), 2);
        assert_eq!(program.len(), 1);
        assert_eq!(program[0].to_string(), "(print 3)");
    }

    #[test]
    fn synchronizes_on_declaration_keywords() {
        let (program, diagnostics) = parse_source("1 + ; var a = 2; fun f() {} print a");

        assert_eq!(diagnostics.errors().len(), 2);
        assert_eq!(program.len(), 2);
        assert_eq!(diagnostics.errors()[1].to_string(),
                   "[line 1] Error at end: Expect ';' after value.");
    }

    #[test]
    fn missing_expression_is_reported_at_the_token() {
        let (_, diagnostics) = parse_source("print );");

        assert_eq!(diagnostics.errors(),
                   [ParseError::UnexpectedToken { location: " at ')'".into(),
                                                  message:  "Expect expression.".into(),
                                                  line:     1, }]);
    }

    #[test]
    fn too_many_arguments_is_advisory() {
        let arguments = vec!["1"; 256].join(", ");
        let (program, diagnostics) = parse_source(&format!("f({arguments});"));

        assert_eq!(program.len(), 1);
        assert_eq!(diagnostics.errors(),
                   [ParseError::TooManyArguments { location: " at '1'".into(),
                                                   line:     1, }]);
    }

    #[test]
    fn too_many_parameters_is_advisory() {
        let params = (0..256).map(|i| format!("p{i}"))
                             .collect::<Vec<_>>()
                             .join(", ");
        let (program, diagnostics) = parse_source(&format!("fun f({params}) {{}}"));

        assert_eq!(program.len(), 1);
        assert_eq!(diagnostics.errors(),
                   [ParseError::TooManyParameters { location: " at 'p255'".into(),
                                                    line:     1, }]);
    }

    #[test]
    fn return_outside_a_function_is_rejected() {
        let (program, diagnostics) = parse_source("return 1;");

        assert_eq!(program.len(), 1);
        assert_eq!(diagnostics.errors(), [ParseError::ReturnAtTopLevel { line: 1 }]);
    }

    #[test]
    fn empty_token_slice_parses_to_nothing() {
        let mut diagnostics = Diagnostics::new();

        assert!(parse(&[], &mut diagnostics).is_empty());
    }

    #[test]
    fn for_loop_accepts_an_expression_initializer() {
        assert_eq!(render("for (i = 0; i < 1;) print i;"),
                   "(block (; (= i 0)) (while (< i 1) (print i)))");
    }

    #[test]
    fn deep_nesting_parses_without_overflowing() {
        const DEPTH: usize = 10_000;

        let (program, diagnostics) =
            parse_source(&format!("{}print 1;{}", "{".repeat(DEPTH), "}".repeat(DEPTH)));
        assert!(!diagnostics.had_error());
        assert_eq!(program.len(), 1);

        let (_, diagnostics) = parse_source(&format!("print {}true;", "!".repeat(DEPTH)));
        assert!(!diagnostics.had_error());

        let (_, diagnostics) =
            parse_source(&format!("print {}1{};", "(".repeat(DEPTH), ")".repeat(DEPTH)));
        assert!(!diagnostics.had_error());

        let (_, diagnostics) = parse_source(&format!("{}1;", "a = ".repeat(DEPTH)));
        assert!(!diagnostics.had_error());

        let (_, diagnostics) = parse_source(&format!("{}print 1;", "if (true) ".repeat(DEPTH)));
        assert!(!diagnostics.had_error());
    }
}

