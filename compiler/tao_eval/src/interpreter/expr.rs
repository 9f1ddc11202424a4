//! Expression evaluation.

use std::rc::Rc;

use tao_ir::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
use tao_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::value::{FunctionValue, ObjectRef};
use crate::{evaluate_binary, evaluate_unary, ContextRef, EvalResult, Value};

impl Interpreter {
    /// Evaluate an expression in `ctx`.
    pub fn evaluate(&self, expr: &Expr, ctx: &ContextRef) -> EvalResult {
        ensure_sufficient_stack(|| self.evaluate_inner(expr, ctx))
    }

    fn evaluate_inner(&self, expr: &Expr, ctx: &ContextRef) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(literal_value(literal)),
            ExprKind::Ident(name) => ctx.find(name),
            ExprKind::Unary { op, operand } => {
                let value = self.evaluate(operand, ctx)?;
                match op {
                    UnaryOp::Not => Ok(Value::Boolean(!value.truthiness(ctx)?)),
                    _ => evaluate_unary(*op, &value),
                }
            }
            ExprKind::Update { op, prefix, target } => {
                self.eval_update(*op, *prefix, target, ctx)
            }
            ExprKind::Binary { left, op, right } => self.eval_binary(left, *op, right, ctx),
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(cond, ctx)?.truthiness(ctx)? {
                    self.evaluate(then_branch, ctx)
                } else {
                    self.evaluate(else_branch, ctx)
                }
            }
            ExprKind::Assign { target, value } => self.eval_assign(target, value, ctx),
            ExprKind::Index { object, key } => {
                let key = self.evaluate(key, ctx)?;
                let container = self.evaluate(object, ctx)?.resolve(ctx)?;
                self.index_get(&container, &key)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, ctx),
            ExprKind::New { constructor, args } => self.eval_new(constructor, args, ctx),
            ExprKind::Object(props) => {
                let object = ObjectRef::new();
                for (key, value) in props {
                    object.set(key.clone(), self.evaluate(value, ctx)?);
                }
                Ok(Value::Object(object))
            }
            ExprKind::Array(elems) => {
                let elems = elems
                    .iter()
                    .map(|elem| self.evaluate(elem, ctx))
                    .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::array(elems))
            }
            ExprKind::Function(def) => {
                let func = Value::Function(FunctionValue::new(Rc::clone(def), ctx.clone()));
                // A named function expression is also bound where it appears.
                if let Some(name) = &def.name {
                    ctx.define(name.clone(), func.clone());
                }
                Ok(func)
            }
        }
    }

    fn eval_binary(
        &self,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
        ctx: &ContextRef,
    ) -> EvalResult {
        match op {
            BinaryOp::And => {
                if !self.evaluate(left, ctx)?.truthiness(ctx)? {
                    return Ok(Value::Boolean(false));
                }
                Ok(Value::Boolean(self.evaluate(right, ctx)?.truthiness(ctx)?))
            }
            BinaryOp::Or => {
                let left = self.evaluate(left, ctx)?;
                if left.truthiness(ctx)? {
                    return Ok(left);
                }
                self.evaluate(right, ctx)
            }
            _ => {
                let left = self.evaluate(left, ctx)?;
                let right = self.evaluate(right, ctx)?;
                evaluate_binary(&left, &right, op)
            }
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::string(s),
    }
}
