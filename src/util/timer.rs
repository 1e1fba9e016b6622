//! Timer seam used by debounce, auto-save, and notification lifetimes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every delayed action goes through `Scheduler`. The browser build uses
//! `BrowserScheduler` (backed by `gloo-timers`); native hosts and tests use
//! `ManualScheduler`, a virtual clock advanced explicitly.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::cell::RefCell;
use std::rc::Rc;

/// Identifier returned by `Scheduler::schedule`.
pub type TaskId = u64;

/// A deferred task.
pub type Task = Box<dyn FnOnce()>;

/// Single-threaded one-shot timer service.
pub trait Scheduler {
    /// Run `task` once after `delay_ms`.
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskId;

    /// Drop a pending task. Unknown or already-fired ids are ignored.
    fn cancel(&self, id: TaskId);
}

// =============================================================================
// MANUAL CLOCK
// =============================================================================

struct PendingTask {
    id: TaskId,
    due_ms: u64,
    task: Task,
}

#[derive(Default)]
struct ManualState {
    now_ms: u64,
    next_id: TaskId,
    pending: Vec<PendingTask>,
}

/// Virtual-clock scheduler. Nothing runs until `advance` is called.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Move the clock forward, running due tasks in due-time order.
    ///
    /// Tasks scheduled by running tasks are honored if they fall inside the
    /// window. Returns the number of tasks run.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.state.borrow().now_ms + ms;
        let mut ran = 0;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let idx = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due_ms <= target)
                    .min_by_key(|(_, p)| (p.due_ms, p.id))
                    .map(|(idx, _)| idx);
                idx.map(|idx| {
                    let entry = state.pending.remove(idx);
                    state.now_ms = entry.due_ms;
                    entry.task
                })
            };
            // The borrow is released before running so tasks can reschedule.
            let Some(task) = next else { break };
            task();
            ran += 1;
        }
        self.state.borrow_mut().now_ms = target;
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        let due_ms = state.now_ms + u64::from(delay_ms);
        state.pending.push(PendingTask { id, due_ms, task });
        id
    }

    fn cancel(&self, id: TaskId) {
        self.state.borrow_mut().pending.retain(|p| p.id != id);
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// `setTimeout`-backed scheduler.
#[cfg(feature = "hydrate")]
#[derive(Clone, Default)]
pub struct BrowserScheduler {
    inner: Rc<RefCell<BrowserTimers>>,
}

#[cfg(feature = "hydrate")]
#[derive(Default)]
struct BrowserTimers {
    next_id: TaskId,
    live: std::collections::HashMap<TaskId, gloo_timers::callback::Timeout>,
}

#[cfg(feature = "hydrate")]
impl BrowserScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "hydrate")]
impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskId {
        let id = {
            let mut timers = self.inner.borrow_mut();
            timers.next_id += 1;
            timers.next_id
        };
        let inner = Rc::clone(&self.inner);
        let timeout = gloo_timers::callback::Timeout::new(delay_ms, move || {
            // Hand the fired handle to JS instead of dropping it from inside
            // its own callback.
            if let Some(fired) = inner.borrow_mut().live.remove(&id) {
                let _ = fired.forget();
            }
            task();
        });
        self.inner.borrow_mut().live.insert(id, timeout);
        id
    }

    fn cancel(&self, id: TaskId) {
        let removed = self.inner.borrow_mut().live.remove(&id);
        drop(removed);
    }
}
