//! Primary expressions.

use std::rc::Rc;

use tao_ir::{Expr, ExprKind, FunctionBody, FunctionDef, Literal, Name, Span, TokenKind};
use tracing::trace;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.cursor.current_span();
        let literal = match self.current_kind() {
            TokenKind::Number(n) => Literal::Number(*n),
            TokenKind::String(s) => Literal::String(s.clone()),
            TokenKind::True => Literal::Boolean(true),
            TokenKind::False => Literal::Boolean(false),
            TokenKind::Nil => Literal::Nil,
            TokenKind::Ident(name) => {
                let name = name.clone();
                if matches!(self.cursor.peek_nth(1), TokenKind::Arrow) {
                    self.advance();
                    self.advance();
                    return self.parse_lambda_body(vec![name], span);
                }
                self.advance();
                return Ok(Expr::new(ExprKind::Ident(name), span));
            }
            TokenKind::LParen => return self.parse_paren_or_lambda(),
            TokenKind::Function => {
                let def = self.parse_function()?;
                let span = def.span;
                return Ok(Expr::new(ExprKind::Function(Rc::new(def)), span));
            }
            TokenKind::LBrace => return self.parse_object_literal(),
            TokenKind::LBracket => return self.parse_array_literal(),
            TokenKind::New => return self.parse_new(),
            _ => return Err(self.cursor.unexpected("expression")),
        };
        self.advance();
        Ok(Expr::new(ExprKind::Literal(literal), span))
    }

    /// `(a, b) => ...` or `(expr)`.
    ///
    /// The parameter list is tried speculatively inside a backtracking frame;
    /// if it is not followed by `=>` the cursor rewinds and the parens are
    /// parsed as grouping.
    fn parse_paren_or_lambda(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.current_span();
        self.cursor.push_frame();
        if let Ok(params) = self.parse_params() {
            if self.eat(&TokenKind::Arrow) {
                self.cursor.pop_frame(false);
                trace!(params = params.len(), "arrow lambda");
                return self.parse_lambda_body(params, start);
            }
        }
        self.cursor.pop_frame(true);

        self.expect(&TokenKind::LParen)?;
        let inner = self.parse_expr()?;
        let end = self.expect(&TokenKind::RParen)?;
        Ok(Expr::new(inner.kind, start.merge(end)))
    }

    /// Body after `=>`: a block or a single expression.
    fn parse_lambda_body(&mut self, params: Vec<Name>, start: Span) -> Result<Expr, ParseError> {
        let (body, end) = if self.check(&TokenKind::LBrace) {
            let (stmts, end) = self.parse_function_block()?;
            (FunctionBody::Block(stmts), end)
        } else {
            let outer_loops = std::mem::replace(&mut self.loop_depth, 0);
            let expr = self.parse_expr();
            self.loop_depth = outer_loops;
            let expr = expr?;
            let end = expr.span;
            (FunctionBody::Expr(Box::new(expr)), end)
        };
        let span = start.merge(end);
        let def = FunctionDef {
            name: None,
            params,
            body,
            span,
        };
        Ok(Expr::new(ExprKind::Function(Rc::new(def)), span))
    }

    /// `{ key: value, "key": value }`.
    fn parse_object_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LBrace)?;
        let mut props = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let key = match self.current_kind() {
                TokenKind::Ident(name) => name.clone(),
                TokenKind::String(text) => Name::from(text.as_str()),
                _ => return Err(self.cursor.unexpected("property name")),
            };
            self.advance();
            self.expect(&TokenKind::Colon)?;
            props.push((key, self.parse_expr()?));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let end = self.expect(&TokenKind::RBrace)?;
        Ok(Expr::new(ExprKind::Object(props), start.merge(end)))
    }

    /// `[a, b, c]`, trailing comma allowed.
    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::LBracket)?;
        let mut elems = Vec::new();
        while !self.check(&TokenKind::RBracket) {
            elems.push(self.parse_expr()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let end = self.expect(&TokenKind::RBracket)?;
        Ok(Expr::new(ExprKind::Array(elems), start.merge(end)))
    }

    /// `new Name(args)`; the argument list may be omitted.
    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(&TokenKind::New)?;
        let (constructor, mut end) = self.cursor.expect_ident()?;
        let args = if self.check(&TokenKind::LParen) {
            let (args, close) = self.parse_args()?;
            end = close;
            args
        } else {
            Vec::new()
        };
        Ok(Expr::new(ExprKind::New { constructor, args }, start.merge(end)))
    }
}
