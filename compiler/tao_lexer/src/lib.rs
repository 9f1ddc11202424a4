//! Lexer for Tao using logos.
//!
//! Produces a `TokenList` terminated by `Eof`. Whitespace and `//` comments
//! are skipped; literal payloads are decoded during conversion.

mod convert;
mod escape;
mod raw_token;

use logos::Logos;
use tao_ir::{Span, Token, TokenList};

use crate::convert::convert_token;
use crate::raw_token::RawToken;

/// Errors produced while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("invalid token at {span}")]
    InvalidToken { span: Span },

    #[error("invalid escape sequence at {span}")]
    InvalidEscape { span: Span },

    #[error("integer literal out of range at {span}")]
    NumberOutOfRange { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::InvalidToken { span }
            | LexError::InvalidEscape { span }
            | LexError::NumberOutOfRange { span } => *span,
        }
    }
}

/// Lex source code into a `TokenList`.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let Ok(raw) = token_result else {
            return Err(LexError::InvalidToken { span });
        };
        let kind = convert_token(raw, logos.slice(), span)?;
        result.push(Token::new(kind, span));
    }

    let eof = u32::try_from(source.len()).unwrap_or(u32::MAX);
    result.finish(eof);
    Ok(result)
}

#[cfg(test)]
mod tests;
