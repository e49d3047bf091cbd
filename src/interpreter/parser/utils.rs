use crate::{
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{MAX_ARITY, ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a comma-separated list of items up to, but not including, a `)`.
    ///
    /// This utility is shared by call argument lists and function parameter
    /// lists. An immediately encountered `)` produces an empty list. Once the
    /// list already holds [`MAX_ARITY`] items, `too_many` builds the error that
    /// is reported for the next item; the item is still parsed.
    ///
    /// Grammar (simplified): `list := item ("," item)*`
    ///
    /// # Errors
    /// Returns a `ParseError` if an item fails to parse.
    pub(super) fn comma_separated<T>(&mut self,
                                     parse_item: fn(&mut Self) -> ParseResult<T>,
                                     too_many: impl Fn(String, usize) -> ParseError)
                                     -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.check(TokenKind::RightParen) {
            return Ok(items);
        }
        loop {
            if items.len() >= MAX_ARITY {
                let token = self.peek();
                self.report(too_many(token.location(), token.line));
            }
            items.push(parse_item(self)?);
            if !self.matches(&[TokenKind::Comma]) {
                break;
            }
        }
        Ok(items)
    }

    /// Parses a plain identifier and returns its name.
    ///
    /// # Errors
    /// Returns a `ParseError` carrying `message` if the next token is not an
    /// identifier.
    pub(super) fn identifier(&mut self, message: &str) -> ParseResult<String> {
        Ok(self.consume(TokenKind::Identifier, message)?.lexeme.clone())
    }
}
