//! Tree-walking interpreter for Tao.
//!
//! # Architecture
//!
//! Evaluation is split by concern:
//!
//! - `stmt` - statement execution and control flow (return/break signals)
//! - `expr` - expression evaluation and operator dispatch
//! - `assign` - assignment targets and `++`/`--`
//! - `index` - index reads and writes per container kind
//! - `call` - function invocation, `new`, call depth accounting
//!
//! Control flow is carried by flags on [`ContextRef`] rather than by Rust
//! unwinding: `return` and `break` mark the context they execute in, and
//! enclosing blocks and loops check those flags after every statement.
//!
//! # Sharing
//!
//! `Interpreter` is a cheap-clone handle. Promise delivery tasks capture a
//! clone so they can call script functions after the synchronous run has
//! finished.

mod assign;
mod builder;
mod call;
mod call_guard;
mod expr;
mod index;
mod stmt;

pub use builder::InterpreterBuilder;

use std::cell::Cell;
use std::rc::Rc;

use tao_ir::Program;
use tracing::debug;

use crate::print_handler::SharedPrintHandler;
use crate::task_queue::{FifoTaskQueue, Task, TaskQueue};
use crate::{ContextRef, EvalResult};

/// Default limit on nested script function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

#[derive(Clone)]
pub struct Interpreter {
    globals: ContextRef,
    queue: Rc<dyn TaskQueue>,
    /// Set when the interpreter owns its queue, so it can drain it.
    fifo: Option<Rc<FifoTaskQueue>>,
    print_handler: SharedPrintHandler,
    call_depth: Rc<Cell<usize>>,
    max_call_depth: usize,
}

impl Interpreter {
    /// Interpreter with the builtin globals, a FIFO task queue and stdout output.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Execute a program's statements in the global context.
    ///
    /// Stops at the first error, which carries the failing statement's span.
    /// Queued promise deliveries are not run; see [`Interpreter::drain_tasks`].
    pub fn run(&self, program: &Program) -> EvalResult<()> {
        debug!(stmts = program.stmts.len(), "run");
        for stmt in &program.stmts {
            self.execute(stmt, &self.globals)
                .map_err(|e| e.or_span(stmt.span))?;
        }
        Ok(())
    }

    /// Run the program, then run queued tasks until the queue is empty.
    pub fn run_to_completion(&self, program: &Program) -> EvalResult<()> {
        self.run(program)?;
        self.drain_tasks()?;
        Ok(())
    }

    /// Run queued tasks in FIFO order, including tasks they enqueue.
    ///
    /// Returns the number of tasks run. With an external task queue the
    /// host owns scheduling and this returns `Ok(0)`.
    pub fn drain_tasks(&self) -> EvalResult<usize> {
        match &self.fifo {
            Some(fifo) => fifo.drain(),
            None => Ok(0),
        }
    }

    /// Hand a task to the task queue.
    pub fn enqueue(&self, task: Task) {
        self.queue.enqueue(task);
    }

    pub fn globals(&self) -> &ContextRef {
        &self.globals
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
