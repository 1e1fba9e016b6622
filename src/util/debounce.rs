//! Debounce primitives.
//!
//! `Debouncer` is the per-owner timer slot: arming it cancels whatever was
//! pending. `Debounced<A>` wraps a function so that a burst of calls collapses
//! into one invocation with the last arguments.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::cell::Cell;
use std::rc::Rc;

use super::timer::{Scheduler, TaskId};

/// One pending timer at most; re-arming supersedes the previous one.
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    wait_ms: u32,
    pending: Rc<Cell<Option<TaskId>>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, wait_ms: u32) -> Self {
        Self { scheduler, wait_ms, pending: Rc::new(Cell::new(None)) }
    }

    /// Cancel any pending task and arm `task` to run after the wait period.
    pub fn trigger(&self, task: impl FnOnce() + 'static) {
        self.cancel();
        let slot = Rc::clone(&self.pending);
        let id = self.scheduler.schedule(
            self.wait_ms,
            Box::new(move || {
                slot.set(None);
                task();
            }),
        );
        self.pending.set(Some(id));
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }
}

/// A function whose invocations are delayed until calls stop for `wait_ms`.
pub struct Debounced<A> {
    gate: Debouncer,
    func: Rc<dyn Fn(A)>,
}

impl<A: 'static> Debounced<A> {
    /// Record a call; only the last call inside the window reaches `func`.
    pub fn call(&self, args: A) {
        let func = Rc::clone(&self.func);
        self.gate.trigger(move || func(args));
    }

    /// Drop the pending invocation, if any.
    pub fn cancel(&self) {
        self.gate.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }
}

/// Wrap `func` so that it runs once after `wait_ms` of call silence.
pub fn debounce<A: 'static>(scheduler: Rc<dyn Scheduler>, wait_ms: u32, func: impl Fn(A) + 'static) -> Debounced<A> {
    Debounced { gate: Debouncer::new(scheduler, wait_ms), func: Rc::new(func) }
}
