//! Recursive descent parser for Tao.
//!
//! Consumes a `TokenList` and produces an immutable [`Program`]. Parsing
//! stops at the first error.

mod cursor;
mod error;
mod grammar;

use tao_ir::{Program, TokenKind, TokenList};
use tracing::debug;

pub use cursor::Cursor;
pub use error::ParseError;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    /// Number of enclosing function bodies; `return` needs at least one.
    function_depth: u32,
    /// Number of enclosing loops within the innermost function body.
    loop_depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            function_depth: 0,
            loop_depth: 0,
        }
    }

    /// Parse every statement up to `Eof`.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() {
            stmts.push(self.parse_stmt()?);
        }
        debug!(statements = stmts.len(), "parsed program");
        Ok(Program { stmts })
    }

    // Cursor shorthands used throughout the grammar modules.

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn current_kind(&self) -> &TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn advance(&mut self) -> tao_ir::Span {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: &TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    #[inline]
    fn expect(&mut self, kind: &TokenKind) -> Result<tao_ir::Span, ParseError> {
        self.cursor.expect(kind)
    }
}

/// Parse a token list into a program.
pub fn parse(tokens: &TokenList) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Lex and parse source text.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = tao_lexer::lex(source)?;
    parse(&tokens)
}

#[cfg(test)]
mod tests;
