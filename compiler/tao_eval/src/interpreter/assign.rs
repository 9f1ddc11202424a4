//! Assignment and `++`/`--`.
//!
//! Only identifiers and index expressions are writable. Anything else is
//! still evaluated, so the error can name what was found.

use tao_ir::{Expr, ExprKind, UpdateOp};

use super::Interpreter;
use crate::errors::{not_assignable, update_requires_number};
use crate::{ContextRef, EvalResult, Value};

impl Interpreter {
    /// Write `value` through an assignment target.
    pub fn assign(&self, target: &Expr, value: Value, ctx: &ContextRef) -> EvalResult<()> {
        match &target.kind {
            ExprKind::Ident(name) => ctx.assign(name, value),
            ExprKind::Index { object, key } => {
                let container = self.evaluate(object, ctx)?.resolve(ctx)?;
                let key = self.evaluate(key, ctx)?;
                self.index_set(&container, &key, value)
            }
            _ => {
                let found = self.evaluate(target, ctx)?;
                Err(not_assignable(&found))
            }
        }
    }

    /// `target = value`; evaluates `value` once and yields it.
    pub(super) fn eval_assign(
        &self,
        target: &Expr,
        value: &Expr,
        ctx: &ContextRef,
    ) -> EvalResult {
        if !target.is_assignable() {
            let found = self.evaluate(target, ctx)?;
            return Err(not_assignable(&found));
        }
        let value = self.evaluate(value, ctx)?;
        self.assign(target, value.clone(), ctx)?;
        Ok(value)
    }

    /// Prefix yields the updated number, postfix the original.
    ///
    /// An index target has its container and key evaluated once; the read
    /// and the write go through the same pair.
    pub(super) fn eval_update(
        &self,
        op: UpdateOp,
        prefix: bool,
        target: &Expr,
        ctx: &ContextRef,
    ) -> EvalResult {
        let step = |old: &Value| match *old {
            Value::Number(n) => Ok((
                n,
                match op {
                    UpdateOp::Increment => n.wrapping_add(1),
                    UpdateOp::Decrement => n.wrapping_sub(1),
                },
            )),
            _ => Err(update_requires_number(op, old)),
        };
        let (n, updated) = match &target.kind {
            ExprKind::Ident(name) => {
                let (n, updated) = step(&self.evaluate(target, ctx)?)?;
                ctx.assign(name, Value::Number(updated))?;
                (n, updated)
            }
            ExprKind::Index { object, key } => {
                let container = self.evaluate(object, ctx)?.resolve(ctx)?;
                let key = self.evaluate(key, ctx)?;
                let (n, updated) = step(&self.index_get(&container, &key)?)?;
                self.index_set(&container, &key, Value::Number(updated))?;
                (n, updated)
            }
            _ => {
                let old = self.evaluate(target, ctx)?;
                step(&old)?;
                return Err(not_assignable(&old));
            }
        };
        Ok(Value::Number(if prefix { updated } else { n }))
    }
}
