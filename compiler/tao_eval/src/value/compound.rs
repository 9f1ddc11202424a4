//! Reference-typed payloads of [`Value`](super::Value).
//!
//! Objects and arrays are shared mutable containers: cloning the handle
//! shares the underlying storage, so a mutation through one holder is
//! visible through all of them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tao_ir::{FunctionDef, Name};

use super::{Args, Value};
use crate::{ContextRef, EvalResult, Interpreter, PromiseRef};

/// A script function paired with the context it was defined in.
#[derive(Clone)]
pub struct FunctionValue {
    pub def: Rc<FunctionDef>,
    /// Defining scope; kept alive for as long as this value is.
    pub closure: ContextRef,
}

impl FunctionValue {
    pub fn new(def: Rc<FunctionDef>, closure: ContextRef) -> Self {
        FunctionValue { def, closure }
    }

    pub fn name(&self) -> Option<&Name> {
        self.def.name.as_ref()
    }
}

/// Native function signature.
///
/// Receives the interpreter, the bound receiver, the fresh call context,
/// and the evaluated arguments.
pub type NativeFn = fn(&Interpreter, &Receiver, &ContextRef, Args) -> EvalResult;

/// Native constructor hook invoked by `new`.
pub type ConstructFn = fn(&Interpreter, Args) -> EvalResult;

/// Opaque handle a builtin method is bound to.
#[derive(Clone)]
pub enum Receiver {
    /// Free function.
    None,
    Array(ArrayRef),
    Promise(PromiseRef),
}

/// A native function value.
#[derive(Clone)]
pub struct BuiltinValue {
    pub receiver: Receiver,
    pub name: Name,
    pub func: NativeFn,
}

impl BuiltinValue {
    pub fn new(name: &str, func: NativeFn) -> Self {
        BuiltinValue {
            receiver: Receiver::None,
            name: Name::new(name),
            func,
        }
    }

    pub fn bound(receiver: Receiver, name: &str, func: NativeFn) -> Self {
        BuiltinValue {
            receiver,
            name: Name::new(name),
            func,
        }
    }

    /// Builtins compare by native function identity only; receiver and name
    /// are ignored.
    #[inline]
    pub fn same_function(&self, other: &BuiltinValue) -> bool {
        self.func as usize == other.func as usize
    }
}

/// A value instantiable with `new`.
#[derive(Clone)]
pub struct ConstructorValue {
    pub name: Name,
    pub construct: ConstructFn,
}

/// Shared property bag.
#[derive(Clone, Default)]
pub struct ObjectRef(Rc<RefCell<FxHashMap<Name, Value>>>);

impl ObjectRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing properties read as `None`; callers map that to `Nil`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn set(&self, key: Name, value: Value) {
        self.0.borrow_mut().insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Properties sorted by name, for stable display.
    pub fn sorted_entries(&self) -> Vec<(Name, Value)> {
        let mut entries: Vec<_> = self
            .0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared storage; stable while any handle is alive.
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl FromIterator<(Name, Value)> for ObjectRef {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        ObjectRef(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

/// Shared element sequence.
#[derive(Clone, Default)]
pub struct ArrayRef(Rc<RefCell<Vec<Value>>>);

impl ArrayRef {
    pub fn new(elems: Vec<Value>) -> Self {
        ArrayRef(Rc::new(RefCell::new(elems)))
    }

    pub fn get(&self, index: i64) -> Option<Value> {
        let index = usize::try_from(index).ok()?;
        self.0.borrow().get(index).cloned()
    }

    /// Overwrite an existing element. Returns `false` if out of bounds.
    pub fn set(&self, index: i64, value: Value) -> bool {
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Append values, returning the new length.
    pub fn push(&self, values: impl IntoIterator<Item = Value>) -> usize {
        let mut elems = self.0.borrow_mut();
        elems.extend(values);
        elems.len()
    }

    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().pop()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Snapshot of the current elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared storage; stable while any handle is alive.
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({} props)", self.len())
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Array({} elems)", self.len())
    }
}
