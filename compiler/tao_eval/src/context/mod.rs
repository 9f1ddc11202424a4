//! Lexical contexts.
//!
//! A [`Context`] is one scope: a symbol table, an optional parent, and the
//! per-activation control flags `return`/`break` set by statements and
//! inspected by the enclosing block, loop, or call.
//!
//! Contexts are shared through [`ContextRef`]. A function value keeps its
//! defining context alive, which is how closures see variables of an outer
//! call after that call has returned.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tao_ir::Name;

use crate::errors::undefined_name;
use crate::{EvalResult, Value};

/// A single scope.
#[derive(Default)]
pub struct Context {
    symbols: FxHashMap<Name, Value>,
    parent: Option<ContextRef>,
    has_returned: bool,
    return_value: Value,
    has_broken: bool,
}

/// Shared handle to a [`Context`].
///
/// Every method borrows the inner `RefCell` only for its own duration and
/// hands back owned values, so callers never hold a borrow across evaluation.
#[derive(Clone, Default)]
pub struct ContextRef(Rc<RefCell<Context>>);

impl ContextRef {
    /// A context with no parent: the global scope, or a fresh call activation.
    pub fn root() -> Self {
        Self::default()
    }

    /// A child scope of `self`.
    pub fn child(&self) -> Self {
        ContextRef(Rc::new(RefCell::new(Context {
            parent: Some(self.clone()),
            ..Context::default()
        })))
    }

    /// Link a parentless call context to a closure's defining context.
    ///
    /// Done once at call entry; an already-linked context is left as is.
    pub fn attach_parent(&self, parent: ContextRef) {
        let mut ctx = self.0.borrow_mut();
        if ctx.parent.is_none() {
            ctx.parent = Some(parent);
        }
    }

    /// Bind `name` in this scope, shadowing any earlier binding here.
    pub fn define(&self, name: Name, value: Value) {
        self.0.borrow_mut().symbols.insert(name, value);
    }

    /// Look `name` up along the parent chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let parent = {
                let ctx = current.0.borrow();
                if let Some(value) = ctx.symbols.get(name) {
                    return Some(value.clone());
                }
                ctx.parent.clone()
            };
            current = parent?;
        }
    }

    /// Like [`lookup`](Self::lookup), but a missing name is an error.
    pub fn find(&self, name: &str) -> EvalResult {
        self.lookup(name).ok_or_else(|| undefined_name(name))
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&self, name: &str, value: Value) -> EvalResult<()> {
        let mut current = self.clone();
        loop {
            let parent = {
                let mut ctx = current.0.borrow_mut();
                if let Some(slot) = ctx.symbols.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }
                ctx.parent.clone()
            };
            match parent {
                Some(parent) => current = parent,
                None => return Err(undefined_name(name)),
            }
        }
    }

    /// Whether `name` is bound directly in this scope.
    pub fn defines(&self, name: &str) -> bool {
        self.0.borrow().symbols.contains_key(name)
    }

    // Control flags

    pub fn set_return(&self, value: Value) {
        let mut ctx = self.0.borrow_mut();
        ctx.has_returned = true;
        ctx.return_value = value;
    }

    pub fn has_returned(&self) -> bool {
        self.0.borrow().has_returned
    }

    /// The returned value, or `Nil` if nothing returned.
    pub fn return_value(&self) -> Value {
        self.0.borrow().return_value.clone()
    }

    pub fn set_break(&self) {
        self.0.borrow_mut().has_broken = true;
    }

    pub fn has_broken(&self) -> bool {
        self.0.borrow().has_broken
    }

    /// Clear the break flag, returning whether it was set.
    pub fn take_break(&self) -> bool {
        std::mem::take(&mut self.0.borrow_mut().has_broken)
    }

    /// Copy pending `return`/`break` flags from `inner` into `self`.
    ///
    /// Returns `true` if either was set, meaning the caller should stop
    /// executing further statements.
    pub fn propagate_from(&self, inner: &ContextRef) -> bool {
        if inner.has_returned() {
            self.set_return(inner.return_value());
            return true;
        }
        if inner.has_broken() {
            self.set_break();
            return true;
        }
        false
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ContextRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = self.0.borrow();
        let mut names: Vec<&str> = ctx.symbols.keys().map(Name::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Context")
            .field("symbols", &names)
            .field("has_parent", &ctx.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests;
