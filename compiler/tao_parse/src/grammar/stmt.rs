//! Statement parsing.

use std::rc::Rc;

use tao_ir::{FunctionBody, FunctionDef, Name, Span, Stmt, StmtKind, TokenKind};
use tao_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse one statement.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_stmt_inner())
    }

    fn parse_stmt_inner(&mut self) -> Result<Stmt, ParseError> {
        trace!(token = %self.current_kind(), pos = self.cursor.position(), "statement");
        match self.current_kind() {
            TokenKind::Semicolon => {
                let span = self.advance();
                Ok(Stmt::new(StmtKind::Empty, span))
            }
            TokenKind::LBrace => {
                let (stmts, span) = self.parse_block()?;
                Ok(Stmt::new(StmtKind::Block(stmts), span))
            }
            TokenKind::Function if matches!(self.cursor.peek_nth(1), TokenKind::Ident(_)) => {
                let def = self.parse_function()?;
                let span = def.span;
                Ok(Stmt::new(StmtKind::FunctionDef(Rc::new(def)), span))
            }
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                let start = self.advance();
                if self.loop_depth == 0 {
                    return Err(ParseError::BreakOutsideLoop { span: start });
                }
                let end = self.expect(&TokenKind::Semicolon)?;
                Ok(Stmt::new(StmtKind::Break, start.merge(end)))
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            _ => self.parse_simple_stmt(),
        }
    }

    /// Statements allowed in a `for` initializer: variable definition,
    /// variable assignment, or expression, each terminated by `;`.
    fn parse_simple_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.current_span();
        let kind = match self.current_kind() {
            TokenKind::Var | TokenKind::Let => {
                self.advance();
                let (name, _) = self.cursor.expect_ident()?;
                let init = if self.eat(&TokenKind::Assign) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                StmtKind::VarDef { name, init }
            }
            TokenKind::Ident(name)
                if matches!(self.cursor.peek_nth(1), TokenKind::Assign) =>
            {
                let name = name.clone();
                self.advance();
                self.advance();
                let value = self.parse_expr()?;
                StmtKind::VarAssign { name, value }
            }
            _ => StmtKind::Expr(self.parse_expr()?),
        };
        let end = self.expect(&TokenKind::Semicolon)?;
        Ok(Stmt::new(kind, start.merge(end)))
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance();
        if self.function_depth == 0 {
            return Err(ParseError::ReturnOutsideFunction { span: start });
        }
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let end = self.expect(&TokenKind::Semicolon)?;
        Ok(Stmt::new(StmtKind::Return(value), start.merge(end)))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance();
        self.expect(&TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.eat(&TokenKind::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        let end = else_branch.as_ref().map_or(then_branch.span, |s| s.span);
        Ok(Stmt::new(
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            },
            start.merge(end),
        ))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance();
        self.expect(&TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let body = Box::new(self.parse_loop_body()?);
        let span = start.merge(body.span);
        Ok(Stmt::new(StmtKind::While { cond, body }, span))
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.advance();
        self.expect(&TokenKind::LParen)?;
        let init = if self.eat(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_simple_stmt()?))
        };
        let cond = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon)?;
        let step = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::RParen)?;
        let body = Box::new(self.parse_loop_body()?);
        let span = start.merge(body.span);
        Ok(Stmt::new(
            StmtKind::For {
                init,
                cond,
                step,
                body,
            },
            span,
        ))
    }

    fn parse_loop_body(&mut self) -> Result<Stmt, ParseError> {
        self.loop_depth += 1;
        let body = self.parse_stmt();
        self.loop_depth -= 1;
        body
    }

    /// Parse `{ stmt* }`, returning the statements and the span including
    /// both braces.
    pub(crate) fn parse_block(&mut self) -> Result<(Vec<Stmt>, Span), ParseError> {
        let start = self.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(self.cursor.unexpected("`}`"));
            }
            stmts.push(self.parse_stmt()?);
        }
        let end = self.advance();
        Ok((stmts, start.merge(end)))
    }

    /// Parse `function [name] (params) { body }`.
    ///
    /// Shared by function definition statements and function expressions.
    pub(crate) fn parse_function(&mut self) -> Result<FunctionDef, ParseError> {
        let start = self.expect(&TokenKind::Function)?;
        let name = if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            self.advance();
            Some(name)
        } else {
            None
        };
        let params = self.parse_params()?;
        let (body, end) = self.parse_function_block()?;
        Ok(FunctionDef {
            name,
            params,
            body: FunctionBody::Block(body),
            span: start.merge(end),
        })
    }

    /// Parse `( [ident {, ident}] )`.
    pub(crate) fn parse_params(&mut self) -> Result<Vec<Name>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let (name, _) = self.cursor.expect_ident()?;
                params.push(name);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    /// Parse a function body block. `return` is legal inside; `break` only
    /// inside a loop nested within the body.
    pub(crate) fn parse_function_block(&mut self) -> Result<(Vec<Stmt>, Span), ParseError> {
        let outer_loops = std::mem::replace(&mut self.loop_depth, 0);
        self.function_depth += 1;
        let block = self.parse_block();
        self.function_depth -= 1;
        self.loop_depth = outer_loops;
        block
    }
}
