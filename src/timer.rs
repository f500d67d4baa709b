//! One-shot deferred tasks.
//!
//! Components schedule work through [`Scheduler`] so the same code runs on
//! browser timeouts in the page and on `testing::VirtualScheduler` in tests, where
//! time only moves when the test advances it.

use gloo_timers::callback::Timeout;

pub trait Scheduler {
    /// Runs `task` once after `delay_ms`. Dropping the returned handle cancels
    /// the task if it has not fired yet.
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle;
}

#[must_use = "dropping a TaskHandle cancels the task"]
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TaskHandle {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Lets the task fire even after the handle is gone. The cancel hook is
    /// leaked rather than dropped, so this is safe to call from inside the
    /// task itself.
    pub fn forget(mut self) {
        if let Some(cancel) = self.cancel.take() {
            std::mem::forget(cancel);
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let timeout = Timeout::new(delay_ms, task);
        // dropping a gloo Timeout clears it
        TaskHandle::new(move || drop(timeout))
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use super::{Scheduler, TaskHandle};

    struct PendingTask {
        id: u64,
        due: u64,
        task: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct VirtualClock {
        now: u64,
        next_id: u64,
        pending: Vec<PendingTask>,
    }

    impl VirtualClock {
        fn take_next_due(&mut self, until: u64) -> Option<PendingTask> {
            let index = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= until)
                .min_by_key(|(_, t)| (t.due, t.id))
                .map(|(i, _)| i)?;
            Some(self.pending.remove(index))
        }
    }

    /// Manually driven clock. Tasks fire in deadline order, ties in scheduling order.
    #[derive(Clone, Default)]
    pub struct VirtualScheduler {
        clock: Rc<RefCell<VirtualClock>>,
    }

    impl VirtualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> u64 {
            self.clock.borrow().now
        }

        pub fn pending(&self) -> usize {
            self.clock.borrow().pending.len()
        }

        /// Moves time forward by `ms`, running every task that comes due on the
        /// way. Tasks scheduled by those tasks run too if they fall in the window.
        pub fn advance(&self, ms: u64) {
            let until = self.now() + ms;
            loop {
                let next = self.clock.borrow_mut().take_next_due(until);
                let Some(next) = next else { break };
                self.clock.borrow_mut().now = next.due;
                (next.task)();
            }
            self.clock.borrow_mut().now = until;
        }
    }

    impl Scheduler for VirtualScheduler {
        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
            let id = {
                let mut clock = self.clock.borrow_mut();
                let id = clock.next_id;
                clock.next_id += 1;
                let due = clock.now + u64::from(delay_ms);
                clock.pending.push(PendingTask { id, due, task });
                id
            };
            let clock: Weak<RefCell<VirtualClock>> = Rc::downgrade(&self.clock);
            TaskHandle::new(move || {
                if let Some(clock) = clock.upgrade() {
                    if let Ok(mut clock) = clock.try_borrow_mut() {
                        clock.pending.retain(|t| t.id != id);
                    }
                }
            })
        }
    }
}
