//! Parse error types.

use tao_ir::{Span, TokenKind};
use tao_lexer::LexError;

/// Errors produced while building the syntax tree.
///
/// Parsing stops at the first error; there is no recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {}", found.display_name())]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        span: Span,
    },

    #[error("`return` outside of a function body")]
    ReturnOutsideFunction { span: Span },

    #[error("`break` outside of a loop")]
    BreakOutsideLoop { span: Span },
}

impl ParseError {
    /// Location of the offending token.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::ReturnOutsideFunction { span }
            | ParseError::BreakOutsideLoop { span } => *span,
        }
    }
}
