//! Operator matching helpers.

use tao_ir::{BinaryOp, TokenKind, UnaryOp, UpdateOp};

pub(super) fn match_logical_or(kind: &TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::PipePipe).then_some(BinaryOp::Or)
}

pub(super) fn match_logical_and(kind: &TokenKind) -> Option<BinaryOp> {
    matches!(kind, TokenKind::AmpAmp).then_some(BinaryOp::And)
}

pub(super) fn match_equality_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::EqEq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        _ => None,
    }
}

pub(super) fn match_comparison_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        _ => None,
    }
}

/// Additive level also carries `|` and `^`.
pub(super) fn match_additive_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Pipe => Some(BinaryOp::BitOr),
        TokenKind::Caret => Some(BinaryOp::BitXor),
        _ => None,
    }
}

/// Multiplicative level also carries shifts, `&` and `&^`.
pub(super) fn match_multiplicative_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        TokenKind::Shl => Some(BinaryOp::Shl),
        TokenKind::Shr => Some(BinaryOp::Shr),
        TokenKind::Amp => Some(BinaryOp::BitAnd),
        TokenKind::AmpCaret => Some(BinaryOp::BitAndNot),
        _ => None,
    }
}

pub(super) fn match_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Bang => Some(UnaryOp::Not),
        TokenKind::Caret => Some(UnaryOp::BitNot),
        _ => None,
    }
}

pub(super) fn match_update_op(kind: &TokenKind) -> Option<UpdateOp> {
    match kind {
        TokenKind::PlusPlus => Some(UpdateOp::Increment),
        TokenKind::MinusMinus => Some(UpdateOp::Decrement),
        _ => None,
    }
}
