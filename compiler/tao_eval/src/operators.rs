//! Binary operator implementations.
//!
//! Operators are defined only over specific operand pairings; there is no
//! implicit conversion between kinds. Operands of different kinds are a
//! `TypeError`. Operands of the same kind with an operator not defined for
//! that kind are a `SyntaxError`.
//!
//! `&&` and `||` never reach this module: the interpreter short-circuits
//! them before the right operand is evaluated.

use tao_ir::BinaryOp;

use crate::errors::{binary_type_mismatch, divide_by_zero, modulo_by_zero, unsupported_operator};
use crate::{EvalResult, Value};

/// Evaluate a non-short-circuit binary operation.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => eval_number_binary(*a, *b, op),
        (Value::String(a), Value::String(b)) => match op {
            BinaryOp::Add => {
                let mut joined = String::with_capacity(a.len() + b.len());
                joined.push_str(a);
                joined.push_str(b);
                Ok(Value::string(&joined))
            }
            BinaryOp::Eq => Ok(Value::Boolean(a == b)),
            BinaryOp::NotEq => Ok(Value::Boolean(a != b)),
            _ => Err(unsupported_operator(op, "string")),
        },
        (Value::Nil, Value::Nil) => eval_equality(true, op, "nil"),
        (Value::Boolean(a), Value::Boolean(b)) => eval_equality(a == b, op, "boolean"),
        (Value::Builtin(a), Value::Builtin(b)) => eval_equality(a.same_function(b), op, "builtin"),
        _ if left.type_name() == right.type_name() => {
            Err(unsupported_operator(op, left.type_name()))
        }
        _ => Err(binary_type_mismatch(op, left, right)),
    }
}

/// Pairings that only support `==` / `!=`.
fn eval_equality(equal: bool, op: BinaryOp, type_name: &str) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Boolean(equal)),
        BinaryOp::NotEq => Ok(Value::Boolean(!equal)),
        _ => Err(unsupported_operator(op, type_name)),
    }
}

/// Integer arithmetic wraps on overflow.
fn eval_number_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let n = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div => {
            if b == 0 {
                return Err(divide_by_zero());
            }
            a.wrapping_div(b)
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(modulo_by_zero());
            }
            a.wrapping_rem(b)
        }
        BinaryOp::Pow => pow(a, b),
        BinaryOp::Shl => match shift_amount(b) {
            Some(s) => a << s,
            None => 0,
        },
        BinaryOp::Shr => match shift_amount(b) {
            Some(s) => a >> s,
            None if a < 0 => -1,
            None => 0,
        },
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::BitAndNot => a & !b,
        BinaryOp::Eq => return Ok(Value::Boolean(a == b)),
        BinaryOp::NotEq => return Ok(Value::Boolean(a != b)),
        BinaryOp::Lt => return Ok(Value::Boolean(a < b)),
        BinaryOp::LtEq => return Ok(Value::Boolean(a <= b)),
        BinaryOp::Gt => return Ok(Value::Boolean(a > b)),
        BinaryOp::GtEq => return Ok(Value::Boolean(a >= b)),
        BinaryOp::And | BinaryOp::Or => return Err(unsupported_operator(op, "number")),
    };
    Ok(Value::Number(n))
}

/// Shift counts outside `0..64` shift every bit out.
fn shift_amount(b: i64) -> Option<u32> {
    u32::try_from(b).ok().filter(|s| *s < i64::BITS)
}

/// `**` is computed in floating point and truncated back, saturating at the
/// `i64` range. Large operands lose precision.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    reason = "exponentiation is defined through f64"
)]
fn pow(base: i64, exponent: i64) -> i64 {
    (base as f64).powf(exponent as f64) as i64
}
