//! Unary operator implementations.

use tao_ir::UnaryOp;

use crate::errors::unary_requires_number;
use crate::{EvalResult, Value};

/// Evaluate a prefix operator.
///
/// `+`, `-` and `^` require a number. `!` negates truthiness; the
/// interpreter resolves `Variable` operands before calling this.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Boolean(!value.is_truthy())),
        (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(*n)),
        (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(n.wrapping_neg())),
        (UnaryOp::BitNot, Value::Number(n)) => Ok(Value::Number(!n)),
        (_, value) => Err(unary_requires_number(op, value)),
    }
}
