//! Function calls and `new`.

use tao_ir::{Expr, FunctionBody, Name};
use tracing::{debug, trace};

use super::Interpreter;
use crate::errors::{not_a_constructor, not_callable};
use crate::value::{Args, FunctionValue};
use crate::{ContextRef, EvalResult, Value};

impl Interpreter {
    /// Call a function or builtin value with already-evaluated arguments.
    ///
    /// Each call gets a fresh context. For script functions it is parented
    /// to the closure's defining context; parameters are bound there, with
    /// missing arguments reading as `nil` and extras ignored.
    pub fn call_value(&self, func: &Value, args: Args) -> EvalResult {
        let call_ctx = ContextRef::root();
        match func {
            Value::Function(func) => self.call_function(func, args, &call_ctx),
            Value::Builtin(builtin) => {
                trace!(name = %builtin.name, args = args.len(), "builtin call");
                (builtin.func)(self, &builtin.receiver, &call_ctx, args)
            }
            other => Err(not_callable(other)),
        }
    }

    fn call_function(&self, func: &FunctionValue, args: Args, ctx: &ContextRef) -> EvalResult {
        let _guard = self.enter_call()?;
        debug!(
            name = func.name().map_or("<anonymous>", Name::as_str),
            args = args.len(),
            depth = self.call_depth(),
            "call"
        );
        ctx.attach_parent(func.closure.clone());
        let mut args = args.into_iter();
        for param in &func.def.params {
            ctx.define(param.clone(), args.next().unwrap_or_default());
        }
        match &func.def.body {
            FunctionBody::Block(stmts) => {
                for stmt in stmts {
                    self.execute(stmt, ctx)?;
                    if ctx.has_returned() {
                        break;
                    }
                }
                Ok(ctx.return_value())
            }
            FunctionBody::Expr(body) => self.evaluate(body, ctx),
        }
    }

    /// `callee(args...)`: callee first, then arguments left to right.
    pub(super) fn eval_call(&self, callee: &Expr, args: &[Expr], ctx: &ContextRef) -> EvalResult {
        let func = self.evaluate(callee, ctx)?.resolve(ctx)?;
        if !matches!(func, Value::Function(_) | Value::Builtin(_)) {
            return Err(not_callable(&func));
        }
        let args = self.evaluate_args(args, ctx)?;
        self.call_value(&func, args)
    }

    /// `new Name(args...)`.
    pub(super) fn eval_new(&self, name: &Name, args: &[Expr], ctx: &ContextRef) -> EvalResult {
        let Some(Value::Constructor(ctor)) = ctx.lookup(name) else {
            return Err(not_a_constructor(name));
        };
        let args = self.evaluate_args(args, ctx)?;
        debug!(constructor = %ctor.name, "new");
        (ctor.construct)(self, args)
    }

    fn evaluate_args(&self, args: &[Expr], ctx: &ContextRef) -> EvalResult<Args> {
        args.iter().map(|arg| self.evaluate(arg, ctx)).collect()
    }
}
