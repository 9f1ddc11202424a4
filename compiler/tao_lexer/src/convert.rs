//! Token conversion.
//!
//! Converts raw logos tokens to final `TokenKind`, decoding literal payloads.

use tao_ir::{Name, Span, TokenKind};

use crate::escape::unescape_string;
use crate::raw_token::RawToken;
use crate::LexError;

/// Convert a raw token to a `TokenKind`.
///
/// `span` is the raw token's location, used for literal decoding errors.
pub(crate) fn convert_token(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Number => match slice.parse::<i64>() {
            Ok(n) => TokenKind::Number(n),
            Err(_) => return Err(LexError::NumberOutOfRange { span }),
        },
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            match unescape_string(content) {
                Ok(text) => TokenKind::String(text),
                Err(offset) => {
                    // +1 skips the opening quote
                    let start = span.start.saturating_add(u32::try_from(offset + 1).unwrap_or(0));
                    return Err(LexError::InvalidEscape {
                        span: Span::new(start, start.saturating_add(2).min(span.end)),
                    });
                }
            }
        }
        RawToken::Ident => TokenKind::Ident(Name::new(slice)),

        // Keywords
        RawToken::Var => TokenKind::Var,
        RawToken::Let => TokenKind::Let,
        RawToken::Function => TokenKind::Function,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::Break => TokenKind::Break,
        RawToken::New => TokenKind::New,
        RawToken::Nil => TokenKind::Nil,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,

        // Delimiters
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Question => TokenKind::Question,
        RawToken::Arrow => TokenKind::Arrow,

        // Operators
        RawToken::Assign => TokenKind::Assign,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::AmpCaret => TokenKind::AmpCaret,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
    };
    Ok(kind)
}
