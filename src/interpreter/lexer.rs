use logos::{FilterResult, Logos};

use crate::{
    ast::LiteralValue,
    error::{Diagnostics, ParseError},
};

/// The lexical category of a token.
///
/// Every category the language knows is listed here. `Eof` is never produced
/// by the generated lexer; [`scan`] appends it once the input is exhausted.
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum TokenKind {
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `/`
    #[token("/")]
    Slash,
    /// `*`
    #[token("*")]
    Star,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,

    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// String literals such as `"hello"`. They may span lines.
    #[regex(r#""[^"]*""#, count_newlines, allow_greedy = true)]
    String,
    /// A string literal that is still open at the end of input.
    #[regex(r#""[^"]*"#, unterminated_string, allow_greedy = true)]
    UnterminatedString,
    /// Numeric literals such as `42` or `3.14`. A trailing `.` is not part of
    /// the number.
    #[regex(r"[0-9]+\.[0-9]+")]
    #[regex(r"[0-9]+")]
    Number,

    /// `and`
    #[token("and")]
    And,
    /// `class`
    #[token("class")]
    Class,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `for`
    #[token("for")]
    For,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `if`
    #[token("if")]
    If,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `or`
    #[token("or")]
    Or,
    /// `print`
    #[token("print")]
    Print,
    /// `return`
    #[token("return")]
    Return,
    /// `super`
    #[token("super")]
    Super,
    /// `this`
    #[token("this")]
    This,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `while`
    #[token("while")]
    While,

    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Line breaks; they only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,

    /// End of input.
    Eof,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Errors produced by the generated lexer before they are turned into
/// [`ParseError`]s.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No token starts with the current character.
    #[default]
    UnexpectedCharacter,
    /// The input ended inside a string literal.
    UnterminatedString,
}

/// A classified lexeme with its literal value and source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The lexical category.
    pub kind:    TokenKind,
    /// The exact source text of the token.
    pub lexeme:  String,
    /// The literal value carried by number and string tokens.
    pub literal: Option<LiteralValue>,
    /// The line the token ends on.
    pub line:    usize,
}

impl Token {
    /// Builds a token from a scanned lexeme, computing its literal value.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: &str, line: usize) -> Self {
        let literal = match kind {
            TokenKind::Number => lexeme.parse().ok().map(LiteralValue::Number),
            TokenKind::String => {
                Some(LiteralValue::String(lexeme[1..lexeme.len() - 1].to_string()))
            },
            _ => None,
        };

        Self { kind,
               lexeme: lexeme.to_string(),
               literal,
               line }
    }

    /// Builds the end-of-input marker.
    #[must_use]
    pub const fn eof(line: usize) -> Self {
        Self { kind: TokenKind::Eof,
               lexeme: String::new(),
               literal: None,
               line }
    }

    /// Describes where a syntax error at this token was detected.
    ///
    /// Returns ` at end` for the end-of-input marker and ` at 'lexeme'`
    /// otherwise.
    #[must_use]
    pub fn location(&self) -> String {
        if self.kind == TokenKind::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", self.lexeme)
        }
    }
}

/// Converts source text into an ordered sequence of tokens.
///
/// Lexical errors are reported to `diagnostics` and scanning resumes with the
/// next character, so one pass finds every lexical error in the source. The
/// returned sequence always ends with a [`TokenKind::Eof`] token.
///
/// # Example
/// ```
/// use lox::{
///     error::Diagnostics,
///     interpreter::lexer::{TokenKind, scan},
/// };
///
/// let mut diagnostics = Diagnostics::new();
/// let tokens = scan("var x = 1.5;", &mut diagnostics);
///
/// let kinds = tokens.iter().map(|t| t.kind).collect::<Vec<_>>();
/// assert_eq!(kinds,
///            [TokenKind::Var,
///             TokenKind::Identifier,
///             TokenKind::Equal,
///             TokenKind::Number,
///             TokenKind::Semicolon,
///             TokenKind::Eof]);
/// assert!(!diagnostics.had_error());
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn scan(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    let mut lexer = TokenKind::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let line = lexer.extras.line;
        match result {
            Ok(kind) => tokens.push(Token::new(kind, lexer.slice(), line)),
            Err(LexError::UnterminatedString) => {
                diagnostics.report(ParseError::UnterminatedString { line });
            },
            Err(LexError::UnexpectedCharacter) => {
                diagnostics.report(ParseError::UnexpectedCharacter { character:
                                                                         lexer.slice().to_string(),
                                                                     line });
            },
        }
    }

    tokens.push(Token::eof(lexer.extras.line));
    tracing::debug!(count = tokens.len(), "scanned tokens");
    tokens
}

/// Advances the line counter past the newlines inside a string literal.
fn count_newlines(lex: &mut logos::Lexer<TokenKind>) {
    lex.extras.line += lex.slice().matches('\n').count();
}

/// Consumes an unterminated string literal and turns it into an error.
fn unterminated_string(lex: &mut logos::Lexer<TokenKind>) -> FilterResult<(), LexError> {
    count_newlines(lex);
    FilterResult::Error(LexError::UnterminatedString)
}
