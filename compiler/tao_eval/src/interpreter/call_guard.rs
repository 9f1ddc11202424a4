//! RAII call depth accounting.
//!
//! Entering a script function increments the shared depth counter; the
//! guard decrements it on drop, so early returns through `?` stay balanced.

use std::cell::Cell;
use std::rc::Rc;

use super::Interpreter;
use crate::errors::stack_overflow;
use crate::EvalResult;

pub(super) struct CallGuard {
    depth: Rc<Cell<usize>>,
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

impl Interpreter {
    /// Enter one level of script call, failing past the configured limit.
    pub(super) fn enter_call(&self) -> EvalResult<CallGuard> {
        let depth = self.call_depth.get();
        if depth >= self.max_call_depth {
            return Err(stack_overflow(self.max_call_depth));
        }
        self.call_depth.set(depth + 1);
        Ok(CallGuard {
            depth: Rc::clone(&self.call_depth),
        })
    }

    /// Current nesting of script calls.
    pub fn call_depth(&self) -> usize {
        self.call_depth.get()
    }
}
