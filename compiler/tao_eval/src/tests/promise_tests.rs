#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Promise settlement and delivery, driven without the parser.

use smallvec::smallvec;

use crate::errors::EvalErrorKind;
use crate::promise::{Outcome, PromiseRef};
use crate::value::{Args, Receiver};
use crate::{ArrayRef, ContextRef, EvalResult, Interpreter, Value};

/// A builtin that appends its argument to the bound array and returns it.
fn record(_: &Interpreter, receiver: &Receiver, _: &ContextRef, args: Args) -> EvalResult {
    let Receiver::Array(log) = receiver else {
        return Ok(Value::Nil);
    };
    let value = args.into_iter().next().unwrap_or_default();
    log.push([value.clone()]);
    Ok(value)
}

/// A handler that records its argument and tags it.
fn recorder(log: &ArrayRef) -> Value {
    Value::Builtin(crate::BuiltinValue::bound(
        Receiver::Array(log.clone()),
        "record",
        record,
    ))
}

fn interp() -> Interpreter {
    Interpreter::builder().with_globals(false).build()
}

#[test]
fn settle_defers_delivery_to_the_queue() {
    let interp = interp();
    let log = ArrayRef::new(Vec::new());
    let promise = PromiseRef::new();
    promise.then(recorder(&log), Value::Nil);

    promise.resolve(&interp, Value::Number(1));
    assert!(log.is_empty());
    assert_eq!(promise.settlement(), Some((Outcome::Resolved, Value::Number(1))));

    assert_eq!(interp.drain_tasks().unwrap(), 1);
    assert_eq!(log.to_vec(), vec![Value::Number(1)]);
}

#[test]
fn settlement_is_at_most_once() {
    let interp = interp();
    let log = ArrayRef::new(Vec::new());
    let promise = PromiseRef::new();
    promise.then(recorder(&log), recorder(&log));

    promise.resolve(&interp, Value::Number(1));
    promise.reject(&interp, Value::Number(2));
    promise.resolve(&interp, Value::Number(3));
    interp.drain_tasks().unwrap();

    assert_eq!(log.to_vec(), vec![Value::Number(1)]);
}

#[test]
fn rejection_runs_the_reject_handler() {
    let interp = interp();
    let resolved = ArrayRef::new(Vec::new());
    let rejected = ArrayRef::new(Vec::new());
    let promise = PromiseRef::new();
    promise.then(recorder(&resolved), recorder(&rejected));

    promise.reject(&interp, Value::string("boom"));
    interp.drain_tasks().unwrap();

    assert!(resolved.is_empty());
    assert_eq!(rejected.to_vec(), vec![Value::string("boom")]);
}

#[test]
fn unhandled_settlement_is_dropped() {
    let interp = interp();
    let promise = PromiseRef::new();
    let derived = promise.then(Value::Nil, Value::Nil);
    promise.resolve(&interp, Value::Number(1));
    interp.drain_tasks().unwrap();
    assert!(derived.is_pending());
}

#[test]
fn handler_result_resolves_derived() {
    let interp = interp();
    let log = ArrayRef::new(Vec::new());
    let promise = PromiseRef::new();
    let derived = promise.then(Value::Nil, recorder(&log));
    derived.then(recorder(&log), Value::Nil);

    promise.reject(&interp, Value::Number(7));
    interp.drain_tasks().unwrap();

    // Reject handler ran, then its result resolved the derived promise.
    assert_eq!(log.to_vec(), vec![Value::Number(7), Value::Number(7)]);
    assert_eq!(derived.settlement(), Some((Outcome::Resolved, Value::Number(7))));
}

#[test]
fn then_replaces_handlers() {
    let interp = interp();
    let first = ArrayRef::new(Vec::new());
    let second = ArrayRef::new(Vec::new());
    let promise = PromiseRef::new();
    let old_derived = promise.then(recorder(&first), Value::Nil);
    promise.then(recorder(&second), Value::Nil);

    promise.resolve(&interp, Value::Number(1));
    interp.drain_tasks().unwrap();

    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
    assert!(old_derived.is_pending());
}

#[test]
fn forwarded_settlement_reaches_target() {
    let interp = interp();
    let log = ArrayRef::new(Vec::new());
    let source = PromiseRef::new();
    let target = PromiseRef::new();
    target.then(recorder(&log), Value::Nil);

    source.forward_to(&interp, target.clone());
    assert!(source.is_forwarding());
    source.resolve(&interp, Value::Number(9));
    interp.drain_tasks().unwrap();

    assert_eq!(log.to_vec(), vec![Value::Number(9)]);
    assert_eq!(target.settlement(), Some((Outcome::Resolved, Value::Number(9))));
}

#[test]
fn forwarding_after_delivery_redelivers() {
    let interp = interp();
    let log = ArrayRef::new(Vec::new());
    let source = PromiseRef::new();
    source.resolve(&interp, Value::Number(4));
    interp.drain_tasks().unwrap();

    let target = PromiseRef::new();
    target.then(recorder(&log), Value::Nil);
    source.forward_to(&interp, target);
    interp.drain_tasks().unwrap();

    assert_eq!(log.to_vec(), vec![Value::Number(4)]);
}

#[test]
fn settled_target_ignores_forwarded_settlement() {
    let interp = interp();
    let log = ArrayRef::new(Vec::new());
    let target = PromiseRef::new();
    target.then(recorder(&log), Value::Nil);
    target.resolve(&interp, Value::Number(1));

    let source = PromiseRef::new();
    source.forward_to(&interp, target.clone());
    source.resolve(&interp, Value::Number(2));
    interp.drain_tasks().unwrap();

    assert_eq!(log.to_vec(), vec![Value::Number(1)]);
}

#[test]
fn forwarding_cycle_is_an_error() {
    let interp = interp();
    let a = PromiseRef::new();
    let b = PromiseRef::new();
    a.forward_to(&interp, b.clone());
    b.forward_to(&interp, a.clone());
    a.resolve(&interp, Value::Nil);
    let err = interp.drain_tasks().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::TypeError);
}

#[test]
fn non_callable_executor_resolves_immediately() {
    let interp = interp();
    let promise = PromiseRef::with_executor(&interp, Value::Number(3)).unwrap();
    assert_eq!(promise.settlement(), Some((Outcome::Resolved, Value::Number(3))));
}

#[test]
fn executor_receives_bound_resolvers() {
    fn call_reject(interp: &Interpreter, _: &Receiver, _: &ContextRef, args: Args) -> EvalResult {
        let reject = args.get(1).cloned().unwrap_or_default();
        interp.call_value(&reject, smallvec![Value::string("no")])
    }

    let interp = interp();
    let promise =
        PromiseRef::with_executor(&interp, Value::builtin("executor", call_reject)).unwrap();
    assert_eq!(promise.settlement(), Some((Outcome::Rejected, Value::string("no"))));
}
