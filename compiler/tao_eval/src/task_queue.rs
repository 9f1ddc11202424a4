//! Deferred task queue.
//!
//! Promise settlement never runs handlers inline; it enqueues a task. The
//! host decides when to drain. [`FifoTaskQueue`] is the single-threaded FIFO
//! the interpreter uses unless another [`TaskQueue`] is configured.

use std::cell::RefCell;
use std::collections::VecDeque;

use tracing::trace;

use crate::EvalError;

/// A zero-argument continuation.
pub type Task = Box<dyn FnOnce() -> Result<(), EvalError>>;

/// Sink for deferred tasks.
///
/// Implementations must run tasks in enqueue order on a single thread.
pub trait TaskQueue {
    fn enqueue(&self, task: Task);
}

/// First-in first-out task queue.
#[derive(Default)]
pub struct FifoTaskQueue {
    tasks: RefCell<VecDeque<Task>>,
}

impl FifoTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Run the oldest task. Returns `Ok(false)` if the queue was empty.
    pub fn run_next(&self) -> Result<bool, EvalError> {
        // Release the borrow first: the task may enqueue more tasks.
        let task = self.tasks.borrow_mut().pop_front();
        match task {
            Some(task) => {
                task()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run tasks until the queue is empty, including tasks enqueued while
    /// draining. Stops at the first failing task, leaving the rest queued.
    ///
    /// Returns the number of tasks run.
    pub fn drain(&self) -> Result<usize, EvalError> {
        let mut ran = 0;
        while self.run_next()? {
            ran += 1;
        }
        trace!(ran, "task queue drained");
        Ok(ran)
    }
}

impl TaskQueue for FifoTaskQueue {
    fn enqueue(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::EvalErrorKind;

    fn recorder(log: &Rc<RefCell<Vec<u32>>>, n: u32) -> Task {
        let log = Rc::clone(log);
        Box::new(move || {
            log.borrow_mut().push(n);
            Ok(())
        })
    }

    #[test]
    fn runs_in_fifo_order() {
        let queue = FifoTaskQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        queue.enqueue(recorder(&log, 1));
        queue.enqueue(recorder(&log, 2));
        queue.enqueue(recorder(&log, 3));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.drain().unwrap(), 3);
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn tasks_enqueued_while_draining_run_last() {
        let queue = Rc::new(FifoTaskQueue::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner_queue = Rc::clone(&queue);
        let inner_log = Rc::clone(&log);
        queue.enqueue(Box::new(move || {
            inner_log.borrow_mut().push(1);
            inner_queue.enqueue(recorder(&inner_log, 3));
            Ok(())
        }));
        queue.enqueue(recorder(&log, 2));
        assert_eq!(queue.drain().unwrap(), 3);
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn drain_stops_at_first_error() {
        let queue = FifoTaskQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        queue.enqueue(Box::new(|| {
            Err(EvalError::new(EvalErrorKind::TypeError, "boom"))
        }));
        queue.enqueue(recorder(&log, 1));
        let err = queue.drain().unwrap_err();
        assert_eq!(err.message, "boom");
        assert_eq!(queue.len(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn run_next_on_empty_queue() {
        assert!(!FifoTaskQueue::new().run_next().unwrap());
    }
}
