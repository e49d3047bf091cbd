use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
    util::stack::ensure_sufficient_stack,
};

impl Parser<'_> {
    /// Parses prefix `!` and `-`.
    ///
    /// Unary operators are right-associative, so `!!x` is `!(!x)`.
    ///
    /// The rule is: `unary := ("!" | "-") unary | call`
    pub(super) fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Bang => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Negate,
            _ => return self.call(),
        };
        let line = self.advance().line;
        let expr = ensure_sufficient_stack(|| self.unary())?;

        Ok(Expr::Unary { op,
                         expr: Box::new(expr),
                         line })
    }

    /// Parses a primary expression followed by any number of call suffixes.
    ///
    /// The rule is: `call := primary ("(" arguments? ")")*`
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        while self.matches(&[TokenKind::LeftParen]) {
            expr = self.finish_call(expr)?;
        }
        Ok(expr)
    }

    /// Parses the argument list of a call whose `(` was just consumed.
    ///
    /// More than 255 arguments are reported but still parsed.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let arguments = self.comma_separated(Self::expression, |location, line| {
                                ParseError::TooManyArguments { location, line }
                            })?;
        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call { callee: Box::new(callee),
                        arguments,
                        line: paren.line })
    }

    /// Parses literals, variable references and parenthesized groupings.
    ///
    /// The rule is: `primary := "true" | "false" | "nil" | NUMBER | STRING |
    /// IDENTIFIER | "(" expression ")"`
    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek();
        let value = match token.kind {
            TokenKind::False => LiteralValue::Bool(false),
            TokenKind::True => LiteralValue::Bool(true),
            TokenKind::Nil => LiteralValue::Nil,
            TokenKind::Number | TokenKind::String => match &token.literal {
                Some(literal) => literal.clone(),
                None => return Err(Self::error(token, "Invalid literal.")),
            },
            TokenKind::Identifier => {
                self.advance();
                return Ok(Expr::Variable { name: token.lexeme.clone(),
                                           line: token.line, });
            },
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::Grouping { expr: Box::new(expr) });
            },
            _ => return Err(Self::error(token, "Expect expression.")),
        };

        self.advance();
        Ok(Expr::Literal { value,
                           line: token.line })
    }
}
