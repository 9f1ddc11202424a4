//! Promise settlement protocol.
//!
//! Each promise is a small state machine:
//!
//! ```text
//! Pending ──settle──▶ Settled ──delivery task──▶ Delivered
//!    │                   │                           │
//!    └──forward_to──▶ Forwarding(target) ◀──forward_to┘
//! ```
//!
//! Settling never runs handlers inline. It records the outcome and enqueues
//! a delivery task. Delivery walks the forwarding chain iteratively to its
//! terminal promise and invokes that promise's handler. A handler's result
//! settles the promise `then` returned. If the handler returns a promise, that
//! promise is instead forwarded onto the derived one.
//!
//! Settlement is at most once: later `resolve`/`reject` calls are ignored.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use smallvec::smallvec;
use tracing::debug;

use crate::errors::promise_forwarding_cycle;
use crate::value::{Args, BuiltinValue, Receiver};
use crate::{ContextRef, EvalError, EvalErrorKind, EvalResult, Interpreter, Value};

/// How a promise was settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Resolved,
    Rejected,
}

#[derive(Clone)]
struct Settlement {
    outcome: Outcome,
    value: Value,
}

enum PromiseState {
    Pending,
    /// Outcome recorded; a delivery task is queued.
    Settled(Settlement),
    /// The delivery task ran (handlers invoked, or the settlement dropped).
    Delivered(Settlement),
    /// Settlement is redirected onto `target`. `settled` records whether this
    /// promise itself was already settled.
    Forwarding { target: PromiseRef, settled: bool },
}

struct Promise {
    state: PromiseState,
    on_resolved: Value,
    on_rejected: Value,
    /// Promise returned by the latest `then`.
    derived: Option<PromiseRef>,
}

/// Shared handle to a promise.
#[derive(Clone)]
pub struct PromiseRef(Rc<RefCell<Promise>>);

impl PromiseRef {
    /// A pending promise with no handlers.
    pub fn new() -> Self {
        PromiseRef(Rc::new(RefCell::new(Promise {
            state: PromiseState::Pending,
            on_resolved: Value::Nil,
            on_rejected: Value::Nil,
            derived: None,
        })))
    }

    /// Construct a promise from an executor.
    ///
    /// A function or builtin executor is called synchronously with `resolve`
    /// and `reject` builtins bound to the new promise. Any other value
    /// resolves the promise immediately.
    pub fn with_executor(interp: &Interpreter, executor: Value) -> EvalResult<PromiseRef> {
        let promise = PromiseRef::new();
        match executor {
            Value::Function(_) | Value::Builtin(_) => {
                let resolve = BuiltinValue::bound(
                    Receiver::Promise(promise.clone()),
                    "resolve",
                    promise_resolve,
                );
                let reject = BuiltinValue::bound(
                    Receiver::Promise(promise.clone()),
                    "reject",
                    promise_reject,
                );
                interp.call_value(
                    &executor,
                    smallvec![Value::Builtin(resolve), Value::Builtin(reject)],
                )?;
            }
            value => promise.resolve(interp, value),
        }
        Ok(promise)
    }

    pub fn resolve(&self, interp: &Interpreter, value: Value) {
        self.settle(interp, Outcome::Resolved, value);
    }

    pub fn reject(&self, interp: &Interpreter, value: Value) {
        self.settle(interp, Outcome::Rejected, value);
    }

    /// Record the outcome and enqueue its delivery. No-op if already settled.
    pub fn settle(&self, interp: &Interpreter, outcome: Outcome, value: Value) {
        let settlement = Settlement { outcome, value };
        let accepted = {
            let mut promise = self.0.borrow_mut();
            let (state, accepted) =
                match std::mem::replace(&mut promise.state, PromiseState::Pending) {
                    PromiseState::Pending => (PromiseState::Settled(settlement.clone()), true),
                    PromiseState::Forwarding {
                        target,
                        settled: false,
                    } => (
                        PromiseState::Forwarding {
                            target,
                            settled: true,
                        },
                        true,
                    ),
                    other => (other, false),
                };
            promise.state = state;
            accepted
        };
        if !accepted {
            debug!(promise = self.id(), ?outcome, "promise already settled; ignored");
            return;
        }
        debug!(promise = self.id(), ?outcome, "promise settled");
        self.schedule_delivery(interp, settlement);
    }

    /// Register handlers and return the derived promise.
    ///
    /// Calling `then` again replaces both handlers and the derived promise.
    pub fn then(&self, on_resolved: Value, on_rejected: Value) -> PromiseRef {
        let derived = PromiseRef::new();
        let mut promise = self.0.borrow_mut();
        if promise.derived.is_some() {
            debug!(promise = self.id(), "handlers replaced");
        }
        promise.on_resolved = on_resolved;
        promise.on_rejected = on_rejected;
        promise.derived = Some(derived.clone());
        derived
    }

    /// Redirect this promise's settlement onto `target`.
    ///
    /// If this promise's settlement was already delivered, it is delivered
    /// again, this time through to `target`.
    pub fn forward_to(&self, interp: &Interpreter, target: PromiseRef) {
        debug!(promise = self.id(), target = target.id(), "forwarding");
        let redeliver = {
            let mut promise = self.0.borrow_mut();
            let (state, redeliver) =
                match std::mem::replace(&mut promise.state, PromiseState::Pending) {
                    PromiseState::Pending => (
                        PromiseState::Forwarding {
                            target,
                            settled: false,
                        },
                        None,
                    ),
                    // The queued delivery walks through to `target`.
                    PromiseState::Settled(_) => (
                        PromiseState::Forwarding {
                            target,
                            settled: true,
                        },
                        None,
                    ),
                    PromiseState::Delivered(settlement) => (
                        PromiseState::Forwarding {
                            target,
                            settled: true,
                        },
                        Some(settlement),
                    ),
                    PromiseState::Forwarding { settled, .. } => {
                        (PromiseState::Forwarding { target, settled }, None)
                    }
                };
            promise.state = state;
            redeliver
        };
        if let Some(settlement) = redeliver {
            self.schedule_delivery(interp, settlement);
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.0.borrow().state, PromiseState::Pending)
    }

    pub fn is_forwarding(&self) -> bool {
        matches!(self.0.borrow().state, PromiseState::Forwarding { .. })
    }

    /// The recorded outcome and value, once this promise has settled on its
    /// own (not through forwarding).
    pub fn settlement(&self) -> Option<(Outcome, Value)> {
        match &self.0.borrow().state {
            PromiseState::Settled(s) | PromiseState::Delivered(s) => {
                Some((s.outcome, s.value.clone()))
            }
            PromiseState::Pending | PromiseState::Forwarding { .. } => None,
        }
    }

    #[inline]
    pub fn ptr_eq(&self, other: &PromiseRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address-based identity, for tracing and cycle detection.
    fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    fn schedule_delivery(&self, interp: &Interpreter, settlement: Settlement) {
        let promise = self.clone();
        let task_interp = interp.clone();
        interp.enqueue(Box::new(move || promise.deliver(&task_interp, settlement)));
    }

    /// Delivery task body.
    fn deliver(&self, interp: &Interpreter, settlement: Settlement) -> Result<(), EvalError> {
        let terminal = self.forwarding_terminal()?;
        let is_start = terminal.ptr_eq(self);

        let (handler, derived) = {
            let mut promise = terminal.0.borrow_mut();
            let accepted = match &promise.state {
                PromiseState::Pending => !is_start,
                PromiseState::Settled(_) => is_start,
                PromiseState::Delivered(_) | PromiseState::Forwarding { .. } => false,
            };
            if !accepted {
                debug!(promise = terminal.id(), "forward target already settled; dropped");
                return Ok(());
            }
            promise.state = PromiseState::Delivered(settlement.clone());
            let handler = match settlement.outcome {
                Outcome::Resolved => promise.on_resolved.clone(),
                Outcome::Rejected => promise.on_rejected.clone(),
            };
            (handler, promise.derived.clone())
        };

        if handler.is_nil() {
            debug!(promise = terminal.id(), outcome = ?settlement.outcome, "no handler; dropped");
            return Ok(());
        }

        debug!(promise = terminal.id(), outcome = ?settlement.outcome, "invoking handler");
        let result = interp.call_value(&handler, smallvec![settlement.value])?;
        let Some(derived) = derived else {
            return Ok(());
        };
        match result {
            Value::Promise(returned) => returned.forward_to(interp, derived),
            // Both handler kinds resolve the derived promise.
            value => derived.resolve(interp, value),
        }
        Ok(())
    }

    /// Follow `Forwarding` links to the first promise that is not forwarding.
    fn forwarding_terminal(&self) -> Result<PromiseRef, EvalError> {
        let mut visited = FxHashSet::default();
        let mut current = self.clone();
        loop {
            let next = match &current.0.borrow().state {
                PromiseState::Forwarding { target, .. } => target.clone(),
                _ => break,
            };
            if !visited.insert(current.id()) {
                return Err(promise_forwarding_cycle());
            }
            current = next;
        }
        Ok(current)
    }
}

impl Default for PromiseRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PromiseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.0.borrow().state {
            PromiseState::Pending => "pending",
            PromiseState::Settled(_) => "settled",
            PromiseState::Delivered(_) => "delivered",
            PromiseState::Forwarding { .. } => "forwarding",
        };
        write!(f, "Promise({state})")
    }
}

// Native surface

/// `new Promise(executor)`.
pub(crate) fn construct_promise(interp: &Interpreter, args: Args) -> EvalResult {
    let executor = args.into_iter().next().unwrap_or_default();
    Ok(Value::Promise(PromiseRef::with_executor(interp, executor)?))
}

/// Named members readable on a promise.
pub(crate) fn promise_member(promise: &PromiseRef, name: &str) -> Value {
    match name {
        "then" => Value::Builtin(BuiltinValue::bound(
            Receiver::Promise(promise.clone()),
            "then",
            promise_then,
        )),
        _ => Value::Nil,
    }
}

fn receiver_promise<'r>(receiver: &'r Receiver, method: &str) -> EvalResult<&'r PromiseRef> {
    match receiver {
        Receiver::Promise(promise) => Ok(promise),
        Receiver::None | Receiver::Array(_) => Err(EvalError::new(
            EvalErrorKind::TypeError,
            format!("{method} must be called on a promise"),
        )),
    }
}

fn promise_resolve(
    interp: &Interpreter,
    receiver: &Receiver,
    _ctx: &ContextRef,
    args: Args,
) -> EvalResult {
    let promise = receiver_promise(receiver, "resolve")?;
    promise.resolve(interp, args.into_iter().next().unwrap_or_default());
    Ok(Value::Nil)
}

fn promise_reject(
    interp: &Interpreter,
    receiver: &Receiver,
    _ctx: &ContextRef,
    args: Args,
) -> EvalResult {
    let promise = receiver_promise(receiver, "reject")?;
    promise.reject(interp, args.into_iter().next().unwrap_or_default());
    Ok(Value::Nil)
}

fn promise_then(
    _interp: &Interpreter,
    receiver: &Receiver,
    _ctx: &ContextRef,
    args: Args,
) -> EvalResult {
    let promise = receiver_promise(receiver, "then")?;
    let mut args = args.into_iter();
    let on_resolved = args.next().unwrap_or_default();
    let on_rejected = args.next().unwrap_or_default();
    Ok(Value::Promise(promise.then(on_resolved, on_rejected)))
}
