//! Statement execution.

use std::rc::Rc;

use tao_ir::{Expr, Stmt, StmtKind};
use tao_stack::ensure_sufficient_stack;
use tracing::trace;

use super::Interpreter;
use crate::value::FunctionValue;
use crate::{ContextRef, EvalResult, Value};

impl Interpreter {
    /// Execute one statement in `ctx`.
    ///
    /// `return` and `break` do not unwind; they set flags on `ctx` that the
    /// enclosing block, loop or call inspects.
    pub fn execute(&self, stmt: &Stmt, ctx: &ContextRef) -> EvalResult<()> {
        ensure_sufficient_stack(|| self.execute_inner(stmt, ctx))
    }

    fn execute_inner(&self, stmt: &Stmt, ctx: &ContextRef) -> EvalResult<()> {
        trace!(span = %stmt.span, "execute");
        match &stmt.kind {
            StmtKind::Empty => Ok(()),
            StmtKind::VarDef { name, init } => {
                let value = match init {
                    Some(init) => self.evaluate(init, ctx)?,
                    None => Value::Nil,
                };
                ctx.define(name.clone(), value);
                Ok(())
            }
            StmtKind::VarAssign { name, value } => {
                let value = self.evaluate(value, ctx)?;
                ctx.assign(name, value)
            }
            StmtKind::FunctionDef(def) => {
                if let Some(name) = &def.name {
                    let func = FunctionValue::new(Rc::clone(def), ctx.clone());
                    ctx.define(name.clone(), Value::Function(func));
                }
                Ok(())
            }
            StmtKind::Return(value) => {
                let value = match value {
                    Some(value) => self.evaluate(value, ctx)?,
                    None => Value::Nil,
                };
                ctx.set_return(value);
                Ok(())
            }
            StmtKind::Expr(expr) => {
                self.evaluate(expr, ctx)?;
                Ok(())
            }
            StmtKind::Block(stmts) => self.execute_block(stmts, ctx),
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(cond, ctx)?.truthiness(ctx)? {
                    self.execute(then_branch, ctx)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch, ctx)
                } else {
                    Ok(())
                }
            }
            StmtKind::While { cond, body } => self.run_loop(Some(cond), None, body, ctx),
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => {
                let loop_ctx = ctx.child();
                if let Some(init) = init {
                    self.execute(init, &loop_ctx)?;
                }
                self.run_loop(cond.as_ref(), step.as_ref(), body, &loop_ctx)?;
                ctx.propagate_from(&loop_ctx);
                Ok(())
            }
            StmtKind::Break => {
                ctx.set_break();
                Ok(())
            }
        }
    }

    /// Run `stmts` in a fresh child scope, stopping at the first pending
    /// `return` or `break`, which is handed up to `ctx`.
    fn execute_block(&self, stmts: &[Stmt], ctx: &ContextRef) -> EvalResult<()> {
        let block_ctx = ctx.child();
        for stmt in stmts {
            self.execute(stmt, &block_ctx)?;
            if ctx.propagate_from(&block_ctx) {
                break;
            }
        }
        Ok(())
    }

    fn run_loop(
        &self,
        cond: Option<&Expr>,
        step: Option<&Expr>,
        body: &Stmt,
        ctx: &ContextRef,
    ) -> EvalResult<()> {
        loop {
            if let Some(cond) = cond {
                if !self.evaluate(cond, ctx)?.truthiness(ctx)? {
                    break;
                }
            }
            self.execute(body, ctx)?;
            if ctx.take_break() || ctx.has_returned() {
                break;
            }
            if let Some(step) = step {
                self.evaluate(step, ctx)?;
            }
        }
        Ok(())
    }
}
