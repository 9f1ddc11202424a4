//! Postfix operators: call, member access, index, `++`/`--`.

use tao_ir::{Expr, ExprKind, Literal, TokenKind};

use super::operators::match_update_op;
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            expr = match self.current_kind() {
                TokenKind::LParen => {
                    let (args, end) = self.parse_args()?;
                    let span = expr.span.merge(end);
                    Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    )
                }
                TokenKind::Dot => {
                    self.advance();
                    let (name, name_span) = self.cursor.expect_ident()?;
                    let key = Expr::new(
                        ExprKind::Literal(Literal::String(name.to_string())),
                        name_span,
                    );
                    index(expr, key, name_span)
                }
                TokenKind::LBracket => {
                    self.advance();
                    let key = self.parse_expr()?;
                    let end = self.expect(&TokenKind::RBracket)?;
                    index(expr, key, end)
                }
                kind => {
                    let Some(op) = match_update_op(kind) else {
                        break;
                    };
                    let end = self.advance();
                    let span = expr.span.merge(end);
                    Expr::new(
                        ExprKind::Update {
                            op,
                            prefix: false,
                            target: Box::new(expr),
                        },
                        span,
                    )
                }
            };
        }
        Ok(expr)
    }

    /// Parse `( [expr {, expr}] )`, returning the arguments and the span of
    /// the closing paren.
    pub(super) fn parse_args(&mut self) -> Result<(Vec<Expr>, tao_ir::Span), ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let end = self.expect(&TokenKind::RParen)?;
        Ok((args, end))
    }
}

fn index(object: Expr, key: Expr, end: tao_ir::Span) -> Expr {
    let span = object.span.merge(end);
    Expr::new(
        ExprKind::Index {
            object: Box::new(object),
            key: Box::new(key),
        },
        span,
    )
}
