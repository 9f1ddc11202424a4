#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Tests for unary operator implementations.

use crate::errors::EvalErrorKind;
use crate::unary_operators::evaluate_unary;
use crate::Value;
use tao_ir::UnaryOp;

#[test]
fn test_numeric_unary() {
    assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::Number(5)).unwrap(), Value::Number(-5));
    assert_eq!(evaluate_unary(UnaryOp::Plus, &Value::Number(5)).unwrap(), Value::Number(5));
    assert_eq!(evaluate_unary(UnaryOp::BitNot, &Value::Number(0)).unwrap(), Value::Number(-1));
    assert_eq!(
        evaluate_unary(UnaryOp::Neg, &Value::Number(i64::MIN)).unwrap(),
        Value::Number(i64::MIN)
    );
}

#[test]
fn test_not_uses_truthiness() {
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::Nil).unwrap(), Value::Boolean(true));
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::Number(0)).unwrap(), Value::Boolean(true));
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::string("x")).unwrap(), Value::Boolean(false));
    assert_eq!(evaluate_unary(UnaryOp::Not, &Value::array(vec![])).unwrap(), Value::Boolean(false));
}

#[test]
fn test_numeric_unary_rejects_other_kinds() {
    for op in [UnaryOp::Neg, UnaryOp::Plus, UnaryOp::BitNot] {
        let err = evaluate_unary(op, &Value::string("5")).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::TypeError);
    }
}
