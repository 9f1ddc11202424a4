#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::EvalErrorKind;

#[test]
fn test_define_lookup() {
    let ctx = ContextRef::root();
    ctx.define(Name::new("x"), Value::Number(42));
    assert_eq!(ctx.lookup("x"), Some(Value::Number(42)));
    assert_eq!(ctx.lookup("y"), None);
}

#[test]
fn test_child_sees_parent_and_shadows() {
    let parent = ContextRef::root();
    parent.define(Name::new("x"), Value::Number(1));
    let child = parent.child();
    assert_eq!(child.lookup("x"), Some(Value::Number(1)));

    child.define(Name::new("x"), Value::Number(2));
    assert_eq!(child.lookup("x"), Some(Value::Number(2)));
    assert_eq!(parent.lookup("x"), Some(Value::Number(1)));
}

#[test]
fn test_find_missing_is_name_error() {
    let ctx = ContextRef::root();
    let err = ctx.find("nope").unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UndefinedName);
}

#[test]
fn test_assign_writes_nearest_binding() {
    let outer = ContextRef::root();
    outer.define(Name::new("x"), Value::Number(1));
    let inner = outer.child();
    inner.assign("x", Value::Number(5)).unwrap();
    assert_eq!(outer.lookup("x"), Some(Value::Number(5)));
    assert!(!inner.defines("x"));
}

#[test]
fn test_assign_undefined_fails() {
    let ctx = ContextRef::root().child();
    let err = ctx.assign("ghost", Value::Nil).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::UndefinedName);
}

#[test]
fn test_redefine_overwrites_silently() {
    let ctx = ContextRef::root();
    ctx.define(Name::new("x"), Value::Number(1));
    ctx.define(Name::new("x"), Value::string("two"));
    assert_eq!(ctx.lookup("x"), Some(Value::string("two")));
}

#[test]
fn test_attach_parent_is_set_once() {
    let first = ContextRef::root();
    first.define(Name::new("a"), Value::Number(1));
    let second = ContextRef::root();
    second.define(Name::new("a"), Value::Number(2));

    let call = ContextRef::root();
    call.attach_parent(first);
    call.attach_parent(second);
    assert_eq!(call.lookup("a"), Some(Value::Number(1)));
}

#[test]
fn test_propagate_return_and_break() {
    let outer = ContextRef::root();
    let inner = outer.child();
    assert!(!outer.propagate_from(&inner));

    inner.set_return(Value::Number(7));
    assert!(outer.propagate_from(&inner));
    assert!(outer.has_returned());
    assert_eq!(outer.return_value(), Value::Number(7));

    let loop_body = outer.child();
    loop_body.set_break();
    let loop_ctx = ContextRef::root();
    assert!(loop_ctx.propagate_from(&loop_body));
    assert!(loop_ctx.take_break());
    assert!(!loop_ctx.has_broken());
}
