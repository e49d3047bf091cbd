use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses an assignment or anything of higher precedence.
    ///
    /// The target is parsed as an ordinary expression first. Only a bare
    /// variable reference is a valid target; anything else is reported at the
    /// `=` token and the left-hand expression is returned as is.
    ///
    /// The rule is: `assignment := IDENTIFIER "=" assignment | logical_or`
    pub(super) fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.logical_or()?;

        if self.matches(&[TokenKind::Equal]) {
            let equals = self.previous();
            let value = self.expression()?;

            if let Expr::Variable { name, line } = &expr {
                return Ok(Expr::Assign { name:  name.clone(),
                                         value: Box::new(value),
                                         line:  *line, });
            }

            self.report(ParseError::InvalidAssignmentTarget { line: equals.line });
        }

        Ok(expr)
    }

    /// Parses `or` chains.
    ///
    /// The rule is: `logical_or := logical_and ("or" logical_and)*`
    pub(super) fn logical_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.logical_and()?;
        while self.matches(&[TokenKind::Or]) {
            let right = self.logical_and()?;
            left = Expr::Logical { left:  Box::new(left),
                                   op:    LogicalOperator::Or,
                                   right: Box::new(right), };
        }
        Ok(left)
    }

    /// Parses `and` chains.
    ///
    /// The rule is: `logical_and := equality ("and" equality)*`
    pub(super) fn logical_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.equality()?;
        while self.matches(&[TokenKind::And]) {
            let right = self.equality()?;
            left = Expr::Logical { left:  Box::new(left),
                                   op:    LogicalOperator::And,
                                   right: Box::new(right), };
        }
        Ok(left)
    }

    /// The rule is: `equality := comparison (("==" | "!=") comparison)*`
    pub(super) fn equality(&mut self) -> ParseResult<Expr> {
        self.left_associative(Self::comparison,
                              &[BinaryOperator::Equal, BinaryOperator::NotEqual])
    }

    /// The rule is: `comparison := additive ((">" | ">=" | "<" | "<=") additive)*`
    pub(super) fn comparison(&mut self) -> ParseResult<Expr> {
        self.left_associative(Self::additive,
                              &[BinaryOperator::Greater,
                                BinaryOperator::GreaterEqual,
                                BinaryOperator::Less,
                                BinaryOperator::LessEqual])
    }

    /// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
    pub(super) fn additive(&mut self) -> ParseResult<Expr> {
        self.left_associative(Self::multiplicative, &[BinaryOperator::Add, BinaryOperator::Sub])
    }

    /// The rule is: `multiplicative := unary (("*" | "/") unary)*`
    pub(super) fn multiplicative(&mut self) -> ParseResult<Expr> {
        self.left_associative(Self::unary, &[BinaryOperator::Mul, BinaryOperator::Div])
    }

    /// Parses one left-associative binary precedence level.
    ///
    /// `operand` parses the next-higher level; `operators` are the operators
    /// accepted between operands at this level.
    fn left_associative(&mut self,
                        operand: fn(&mut Self) -> ParseResult<Expr>,
                        operators: &[BinaryOperator])
                        -> ParseResult<Expr> {
        let mut left = operand(self)?;
        loop {
            let token = self.peek();
            if let Some(op) = token_to_binary_operator(token.kind)
               && operators.contains(&op)
            {
                self.advance();
                let right = operand(self)?;
                left = Expr::Binary { left: Box::new(left),
                                      op,
                                      right: Box::new(right),
                                      line: token.line };
                continue;
            }
            break;
        }
        Ok(left)
    }
}

/// Maps a token kind to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` for arithmetic, comparison and equality
/// tokens and `None` for all other tokens. `and` and `or` are logical
/// operators and are not mapped here.
///
/// # Example
/// ```
/// use lox::{
///     ast::BinaryOperator,
///     interpreter::{lexer::TokenKind, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(TokenKind::Plus), Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(TokenKind::And), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}
