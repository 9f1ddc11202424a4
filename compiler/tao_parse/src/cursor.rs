//! Token cursor for navigating the token stream.
//!
//! Provides token access, lookahead, consumption, and nested backtracking
//! frames for speculative parsing.

use tao_ir::{Name, Span, Token, TokenKind, TokenList};
use tracing::trace;

use crate::ParseError;

/// Cursor over a `TokenList`.
///
/// Invariant: the cursor never moves past the trailing `Eof` token.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
    /// Saved positions, innermost last.
    frames: Vec<usize>,
    /// Returned when the list is empty or lookahead runs off the end.
    eof: Token,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        let end = tokens.iter().last().map_or(0, |t| t.span.end);
        Cursor {
            tokens,
            pos: 0,
            frames: Vec::new(),
            eof: Token::new(TokenKind::Eof, Span::new(end, end)),
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|prev| self.tokens.get(prev))
            .map_or(Span::DUMMY, |t| t.span)
    }

    /// Peek at the token kind `n` tokens ahead.
    ///
    /// `peek_nth(0)` is the current token. Returns `Eof` past the end.
    #[inline]
    pub fn peek_nth(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(&self.eof.kind, |t| &t.kind)
    }

    /// Check whether the current token has the same kind as `kind`,
    /// ignoring payloads.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Consume the current token and return its span.
    pub fn advance(&mut self) -> Span {
        let span = self.current_span();
        if !self.is_at_end() {
            self.pos += 1;
        }
        span
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with `UnexpectedToken`.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }

    /// Consume an identifier, returning its name and span.
    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            Ok((name, self.advance()))
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// Build an `UnexpectedToken` error at the current token.
    pub fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current_kind().clone(),
            span: self.current_span(),
        }
    }

    /// Open a backtracking frame at the current position.
    pub fn push_frame(&mut self) {
        trace!(pos = self.pos, depth = self.frames.len(), "push frame");
        self.frames.push(self.pos);
    }

    /// Close the innermost frame.
    ///
    /// With `restore`, the cursor rewinds to where the frame was opened;
    /// otherwise the tokens consumed inside the frame stay consumed.
    pub fn pop_frame(&mut self, restore: bool) {
        let Some(saved) = self.frames.pop() else {
            return;
        };
        trace!(pos = self.pos, saved, restore, "pop frame");
        if restore {
            self.pos = saved;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tao_ir::Name;

    use super::*;

    fn tokens(source: &str) -> TokenList {
        match tao_lexer::lex(source) {
            Ok(tokens) => tokens,
            Err(err) => panic!("lex failed: {err}"),
        }
    }

    #[test]
    fn advance_stops_at_eof() {
        let list = tokens("x");
        let mut cursor = Cursor::new(&list);
        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn peek_looks_ahead_without_consuming() {
        let list = tokens("a = 1");
        let cursor = Cursor::new(&list);
        assert_eq!(cursor.peek_nth(0), &TokenKind::Ident(Name::new("a")));
        assert_eq!(cursor.peek_nth(1), &TokenKind::Assign);
        assert_eq!(cursor.peek_nth(10), &TokenKind::Eof);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn nested_frames_restore_independently() {
        let list = tokens("a b c d");
        let mut cursor = Cursor::new(&list);
        cursor.push_frame();
        cursor.advance();
        cursor.push_frame();
        cursor.advance();
        cursor.advance();
        cursor.pop_frame(true);
        assert_eq!(cursor.position(), 1);
        cursor.pop_frame(false);
        assert_eq!(cursor.position(), 1);
        cursor.push_frame();
        cursor.advance();
        cursor.pop_frame(true);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn expect_reports_found_token() {
        let list = tokens("42");
        let mut cursor = Cursor::new(&list);
        let err = cursor.expect(&TokenKind::Semicolon).err();
        assert_eq!(
            err,
            Some(ParseError::UnexpectedToken {
                expected: "`;`".to_string(),
                found: TokenKind::Number(42),
                span: Span::new(0, 2),
            })
        );
    }

    #[test]
    fn empty_list_behaves_as_eof() {
        let list = TokenList::new();
        let mut cursor = Cursor::new(&list);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance(), Span::new(0, 0));
    }
}
