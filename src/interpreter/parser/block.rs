use crate::{
    ast::{Expr, LiteralValue, Stmt},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses the declarations of a block whose `{` was just consumed.
    ///
    /// Declarations that fail to parse are reported and skipped, so only a
    /// missing closing brace makes the block itself fail.
    ///
    /// Grammar: `block := "{" declaration* "}"`
    pub(super) fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;

        Ok(statements)
    }

    /// Grammar: `if_statement := "if" "(" expression ")" statement ("else" statement)?`
    ///
    /// A dangling `else` binds to the nearest `if`.
    pub(super) fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.matches(&[TokenKind::Else]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If { condition,
                      then_branch,
                      else_branch })
    }

    /// Grammar: `while_statement := "while" "(" expression ")" statement`
    pub(super) fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    /// Parses a `for` loop and lowers it to a `while` loop.
    ///
    /// `for (init; cond; incr) body` becomes
    /// `{ init; while (cond) { body; incr; } }`. A missing condition is
    /// `true`; the outer block and the increment wrapper are only produced
    /// when an initializer or an increment is present.
    ///
    /// Grammar: `for_statement := "for" "(" (var_declaration | expression_statement | ";")
    /// expression? ";" expression? ")" statement`
    pub(super) fn for_statement(&mut self) -> ParseResult<Stmt> {
        let line = self.previous().line;
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = match self.peek().kind {
            TokenKind::Semicolon => {
                self.advance();
                None
            },
            TokenKind::Var => {
                self.advance();
                Some(self.var_declaration()?)
            },
            _ => Some(self.expression_statement()?),
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block { statements: vec![body, Stmt::Expression { expr: increment }] };
        }

        let condition = condition.unwrap_or(Expr::Literal { value: LiteralValue::Bool(true),
                                                            line });
        body = Stmt::While { condition,
                             body: Box::new(body) };

        if let Some(initializer) = initializer {
            body = Stmt::Block { statements: vec![initializer, body] };
        }

        Ok(body)
    }
}
