#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Property tests for arithmetic and truthiness.

use proptest::prelude::*;
use tao_eval::{evaluate_binary, ContextRef, EvalErrorKind, Value};
use tao_ir::{BinaryOp, Name};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Number),
        "[a-z]{0,4}".prop_map(|s| Value::string(&s)),
    ]
}

proptest! {
    #[test]
    fn division_truncates_toward_zero(a in any::<i64>(), b in any::<i64>().prop_filter("nonzero", |b| *b != 0)) {
        let q = evaluate_binary(&Value::Number(a), &Value::Number(b), BinaryOp::Div).unwrap();
        prop_assert_eq!(q, Value::Number(a.wrapping_div(b)));
        let r = evaluate_binary(&Value::Number(a), &Value::Number(b), BinaryOp::Mod).unwrap();
        prop_assert_eq!(r, Value::Number(a.wrapping_rem(b)));
    }

    #[test]
    fn division_by_zero_always_fails(a in any::<i64>()) {
        let err = evaluate_binary(&Value::Number(a), &Value::Number(0), BinaryOp::Div).unwrap_err();
        prop_assert_eq!(err.kind, EvalErrorKind::DivideByZero);
    }

    #[test]
    fn truthiness_matches_table(v in scalar()) {
        let expected = match &v {
            Value::Nil => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            _ => true,
        };
        prop_assert_eq!(v.is_truthy(), expected);
    }

    #[test]
    fn variable_truthiness_follows_target(v in scalar()) {
        let ctx = ContextRef::root();
        ctx.define(Name::new("target"), v.clone());
        let var = Value::Variable(Name::new("target"));
        prop_assert_eq!(var.truthiness(&ctx).unwrap(), v.is_truthy());
    }

    #[test]
    fn containers_are_always_truthy(len in 0usize..4) {
        let arr = Value::array(vec![Value::Nil; len]);
        prop_assert!(arr.is_truthy());
        prop_assert!(Value::object([]).is_truthy());
    }
}
