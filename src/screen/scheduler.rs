//! Deferred task queue
//!
//! Work that must happen "on the next tick" (focus restoration, tearing
//! down a mounted layer) is queued here and run by the host between input
//! events. A tick runs only the tasks that were queued before it started;
//! anything they queue waits for the following tick.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use super::adapter::HostAdapter;

/// A unit of deferred work, run with access to the host
pub type Task = Box<dyn FnOnce(&mut dyn HostAdapter)>;

/// Cloneable handle to the host's task queue
#[derive(Clone, Default)]
pub struct Scheduler {
    queue: Rc<RefCell<VecDeque<Task>>>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the next tick
    pub fn defer(&self, task: impl FnOnce(&mut dyn HostAdapter) + 'static) {
        self.queue.borrow_mut().push_back(Box::new(task));
    }

    /// Number of tasks waiting to run
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Take every task queued so far, leaving the queue empty
    ///
    /// The queue is not borrowed while the returned tasks run, so they may
    /// queue further work.
    pub fn take_ready(&self) -> Vec<Task> {
        self.queue.borrow_mut().drain(..).collect()
    }
}
