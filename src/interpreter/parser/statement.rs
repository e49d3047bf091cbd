use std::rc::Rc;

use crate::{
    ast::{FunctionDecl, Stmt},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
    util::stack::ensure_sufficient_stack,
};

impl Parser<'_> {
    /// Parses a single declaration, recovering from syntax errors.
    ///
    /// A declaration may be one of:
    /// - a function declaration (`fun`).
    /// - a variable declaration (`var`).
    /// - any other statement.
    ///
    /// If the declaration fails to parse, the error is reported, the parser
    /// skips to the next statement boundary and `None` is returned.
    pub(super) fn declaration(&mut self) -> Option<Stmt> {
        ensure_sufficient_stack(|| {
            let result = if self.matches(&[TokenKind::Fun]) {
                self.function()
            } else if self.matches(&[TokenKind::Var]) {
                self.var_declaration()
            } else {
                self.statement()
            };

            match result {
                Ok(statement) => Some(statement),
                Err(error) => {
                    self.report(error);
                    self.synchronize();
                    None
                },
            }
        })
    }

    /// Parses a function declaration whose `fun` keyword was just consumed.
    ///
    /// Grammar: `function := IDENTIFIER "(" parameters? ")" block`
    ///
    /// # Errors
    /// Returns a `ParseError` if the name, the parentheses or the body braces
    /// are missing.
    fn function(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect function name.")?;
        self.consume(TokenKind::LeftParen, "Expect '(' after function name.")?;
        let params = self.comma_separated(|parser: &mut Self| parser.identifier("Expect parameter name."),
                                          |location, line| ParseError::TooManyParameters { location,
                                                                                           line })?;
        self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;
        self.consume(TokenKind::LeftBrace, "Expect '{' before function body.")?;

        self.function_depth += 1;
        let body = self.block();
        self.function_depth -= 1;

        Ok(Stmt::Function(Rc::new(FunctionDecl { name: name.lexeme.clone(),
                                                 params,
                                                 body: body?,
                                                 line: name.line })))
    }

    /// Parses a variable declaration whose `var` keyword was just consumed.
    ///
    /// Grammar: `var_declaration := IDENTIFIER ("=" expression)? ";"`
    pub(super) fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;
        let initializer = if self.matches(&[TokenKind::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;

        Ok(Stmt::Var { name: name.lexeme.clone(),
                       initializer,
                       line: name.line })
    }

    /// Parses any statement that is not a declaration.
    ///
    /// The leading keyword selects the statement kind; anything else is an
    /// expression statement.
    pub(super) fn statement(&mut self) -> ParseResult<Stmt> {
        ensure_sufficient_stack(|| {
            match self.peek().kind {
                TokenKind::For => {
                    self.advance();
                    self.for_statement()
                },
                TokenKind::If => {
                    self.advance();
                    self.if_statement()
                },
                TokenKind::Print => {
                    self.advance();
                    self.print_statement()
                },
                TokenKind::Return => {
                    self.advance();
                    self.return_statement()
                },
                TokenKind::While => {
                    self.advance();
                    self.while_statement()
                },
                TokenKind::LeftBrace => {
                    self.advance();
                    Ok(Stmt::Block { statements: self.block()? })
                },
                _ => self.expression_statement(),
            }
        })
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;

        Ok(Stmt::Print { expr, line })
    }

    /// Parses a `return` statement whose keyword was just consumed.
    ///
    /// A `return` outside any function body is reported, but the statement is
    /// still produced so that parsing continues normally.
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        if self.function_depth == 0 {
            self.report(ParseError::ReturnAtTopLevel { line });
        }

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;

        Ok(Stmt::Return { value, line })
    }

    pub(super) fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;

        Ok(Stmt::Expression { expr })
    }
}
