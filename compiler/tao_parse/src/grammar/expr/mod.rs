//! Expression parsing.
//!
//! - `mod.rs`: entry point (`parse_expr`) and the binary precedence chain
//! - `operators.rs`: token to operator matching
//! - `postfix.rs`: call, member, index, postfix update
//! - `primary.rs`: literals, identifiers, lambdas, object/array literals, `new`

mod operators;
mod postfix;
mod primary;

use tao_ir::{BinaryOp, Expr, ExprKind, TokenKind};
use tao_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

/// Token-to-operator matcher for one precedence level.
type OpMatcher = fn(&TokenKind) -> Option<BinaryOp>;

impl Parser<'_> {
    /// Parse an expression, starting at assignment precedence.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_assign())
    }

    /// `target = value`, right associative. Whether `target` can be
    /// assigned to is decided at evaluation time.
    fn parse_assign(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_ternary()?;
        if !self.eat(&TokenKind::Assign) {
            return Ok(target);
        }
        let value = self.parse_expr()?;
        let span = target.span.merge(value.span);
        Ok(Expr::new(
            ExprKind::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_logical_or()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(cond);
        }
        let then_branch = self.parse_expr()?;
        self.expect(&TokenKind::Colon)?;
        let else_branch = self.parse_expr()?;
        let span = cond.span.merge(else_branch.span);
        Ok(Expr::new(
            ExprKind::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        ))
    }

    /// One left-associative binary level: `next (op next)*`.
    fn parse_binary_level(
        &mut self,
        next: fn(&mut Self) -> Result<Expr, ParseError>,
        matcher: OpMatcher,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        while let Some(op) = matcher(self.current_kind()) {
            self.advance();
            let right = next(self)?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_logical_and, operators::match_logical_or)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_equality, operators::match_logical_and)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_comparison, operators::match_equality_op)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_additive, operators::match_comparison_op)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, operators::match_additive_op)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_power, operators::match_multiplicative_op)
    }

    /// `**` binds tighter than `*` and associates to the right.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_unary()?;
        if !self.eat(&TokenKind::StarStar) {
            return Ok(base);
        }
        let exponent = ensure_sufficient_stack(|| self.parse_power())?;
        Ok(binary(base, BinaryOp::Pow, exponent))
    }

    /// Prefix `+ - ! ^ ++ --`.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = operators::match_unary_op(self.current_kind()) {
            let start = self.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = start.merge(operand.span);
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                span,
            ));
        }
        if let Some(op) = operators::match_update_op(self.current_kind()) {
            let start = self.advance();
            let target = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = start.merge(target.span);
            return Ok(Expr::new(
                ExprKind::Update {
                    op,
                    prefix: true,
                    target: Box::new(target),
                },
                span,
            ));
        }
        self.parse_postfix()
    }
}

fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    )
}
