//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::cell::Cell;
use std::rc::Rc;

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::builtins;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::task_queue::{FifoTaskQueue, TaskQueue};
use crate::ContextRef;

pub struct InterpreterBuilder {
    task_queue: Option<Rc<dyn TaskQueue>>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
    with_globals: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            task_queue: None,
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            with_globals: true,
        }
    }

    /// Use a host-provided task queue instead of the built-in FIFO.
    ///
    /// The host is then responsible for running queued tasks.
    #[must_use]
    pub fn task_queue(mut self, queue: Rc<dyn TaskQueue>) -> Self {
        self.task_queue = Some(queue);
        self
    }

    /// Set where `print`/`println` write. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Limit on nested script function calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Whether to define the builtin globals (`print`, `len`, `Promise`, ...).
    #[must_use]
    pub fn with_globals(mut self, enabled: bool) -> Self {
        self.with_globals = enabled;
        self
    }

    pub fn build(self) -> Interpreter {
        let (queue, fifo) = match self.task_queue {
            Some(queue) => (queue, None),
            None => {
                let fifo = Rc::new(FifoTaskQueue::new());
                (Rc::clone(&fifo) as Rc<dyn TaskQueue>, Some(fifo))
            }
        };
        let globals = ContextRef::root();
        if self.with_globals {
            builtins::install(&globals);
        }
        Interpreter {
            globals,
            queue,
            fifo,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_depth: Rc::new(Cell::new(0)),
            max_call_depth: self.max_call_depth,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
