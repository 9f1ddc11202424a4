//! Tao Eval - tree-walking evaluator for the Tao language.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - [`Value`]: runtime values; objects, arrays and promises are shared handles
//! - [`ContextRef`]: lexical scopes carrying `return`/`break` flags
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//! - [`PromiseRef`]: settlement state machine delivering through a [`TaskQueue`]
//! - [`Interpreter`]: statement execution, calls, and the builtin globals
//!
//! Evaluation is single-threaded. Promise handlers never run inline; they
//! are queued and run when the host drains the task queue.

mod builtins;
mod context;
pub mod errors;
pub mod interpreter;
mod operators;
mod print_handler;
mod promise;
mod task_queue;
mod unary_operators;
mod value;

pub use context::{Context, ContextRef};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use promise::{Outcome, PromiseRef};
pub use task_queue::{FifoTaskQueue, Task, TaskQueue};
pub use unary_operators::evaluate_unary;
pub use value::{
    Args, ArrayRef, BuiltinValue, ConstructFn, ConstructorValue, FunctionValue, NativeFn,
    ObjectRef, Receiver, Value,
};

#[cfg(test)]
mod tests;
