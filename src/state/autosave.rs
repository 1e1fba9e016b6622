//! Debounced per-form draft persistence.
//!
//! DESIGN
//! ======
//! Each tracked form walks `Idle -> Pending -> Saved -> Idle`. An input event
//! re-arms the form's own debounce timer; when it fires the whole form is
//! captured and written under `storage_key`. `Saved` drops back to `Idle` once
//! the confirmation notice has expired, unless a new edit got there first.
//!
//! ERROR HANDLING
//! ==============
//! A failed write is logged and the form returns to `Idle`. There is no retry;
//! the next edit simply tries again.

#[cfg(test)]
#[path = "autosave_test.rs"]
mod autosave_test;

use std::cell::Cell;
use std::rc::Rc;

use super::notify::{NotificationCenter, Severity};
use super::snapshot::{FormSnapshot, SnapshotStore, storage_key};
use crate::config::Settings;
use crate::util::debounce::Debouncer;
use crate::util::timer::{Scheduler, TaskId};

pub const AUTOSAVE_NOTICE: &str = "Data auto-saved";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoSavePhase {
    #[default]
    Idle,
    /// Timer armed, waiting for the edit burst to settle.
    Pending,
    /// Last write succeeded; the confirmation notice is showing.
    Saved,
}

/// A form whose current field values can be captured.
pub trait SnapshotSource {
    /// The form's `id` attribute, if any.
    fn form_id(&self) -> Option<String>;
    fn snapshot(&self) -> FormSnapshot;
}

struct SaveContext {
    store: Rc<dyn SnapshotStore>,
    notices: Rc<NotificationCenter>,
    scheduler: Rc<dyn Scheduler>,
    settings: Settings,
}

/// Factory for tracked forms; holds the shared store and notice service.
pub struct AutoSaveEngine {
    ctx: Rc<SaveContext>,
}

impl AutoSaveEngine {
    pub fn new(store: Rc<dyn SnapshotStore>, notices: Rc<NotificationCenter>, settings: &Settings) -> Self {
        let scheduler = Rc::clone(notices.scheduler());
        Self { ctx: Rc::new(SaveContext { store, notices, scheduler, settings: settings.clone() }) }
    }

    /// Start tracking `source`. Each form gets its own timer.
    pub fn track(&self, source: Rc<dyn SnapshotSource>) -> AutoSaveForm {
        AutoSaveForm {
            source,
            gate: Debouncer::new(Rc::clone(&self.ctx.scheduler), self.ctx.settings.autosave_delay_ms),
            state: Rc::new(FormState::default()),
            ctx: Rc::clone(&self.ctx),
        }
    }

    /// Previously saved draft for a form id.
    pub fn load(&self, form_id: Option<&str>) -> Option<FormSnapshot> {
        self.ctx.store.load(&storage_key(form_id, &self.ctx.settings))
    }
}

#[derive(Default)]
struct FormState {
    phase: Cell<AutoSavePhase>,
    saves: Cell<u64>,
    /// Pending `Saved -> Idle` transition.
    settle: Cell<Option<TaskId>>,
}

impl FormState {
    fn cancel_settle(&self, scheduler: &dyn Scheduler) {
        if let Some(id) = self.settle.take() {
            scheduler.cancel(id);
        }
    }
}

pub struct AutoSaveForm {
    source: Rc<dyn SnapshotSource>,
    gate: Debouncer,
    state: Rc<FormState>,
    ctx: Rc<SaveContext>,
}

impl AutoSaveForm {
    /// Record an edit: (re)arm the save timer.
    pub fn on_input(&self) {
        self.state.cancel_settle(self.ctx.scheduler.as_ref());
        self.state.phase.set(AutoSavePhase::Pending);
        let source = Rc::clone(&self.source);
        let state = Rc::clone(&self.state);
        let ctx = Rc::clone(&self.ctx);
        self.gate.trigger(move || save_now(&ctx, source.as_ref(), &state));
    }

    pub fn phase(&self) -> AutoSavePhase {
        self.state.phase.get()
    }

    /// Successful writes so far.
    pub fn saves(&self) -> u64 {
        self.state.saves.get()
    }

    /// Key the form is currently written under.
    pub fn storage_key(&self) -> String {
        storage_key(self.source.form_id().as_deref(), &self.ctx.settings)
    }
}

fn save_now(ctx: &SaveContext, source: &dyn SnapshotSource, state: &Rc<FormState>) {
    let snapshot = source.snapshot();
    let key = storage_key(source.form_id().as_deref(), &ctx.settings);
    if let Err(e) = ctx.store.save(&key, &snapshot) {
        log::warn!("autosave: write to {key} failed: {e}");
        state.phase.set(AutoSavePhase::Idle);
        return;
    }
    log::debug!("autosave: wrote {} fields to {key}", snapshot.len());
    state.saves.set(state.saves.get() + 1);
    state.phase.set(AutoSavePhase::Saved);

    let notice_ms = ctx.settings.autosave_notice_ms;
    ctx.notices.notify(AUTOSAVE_NOTICE, Severity::Info, Some(notice_ms));
    state.cancel_settle(ctx.scheduler.as_ref());
    let settling = Rc::clone(state);
    let id = ctx.scheduler.schedule(
        notice_ms,
        Box::new(move || {
            settling.settle.set(None);
            if settling.phase.get() == AutoSavePhase::Saved {
                settling.phase.set(AutoSavePhase::Idle);
            }
        }),
    );
    state.settle.set(Some(id));
}

// =============================================================================
// BROWSER
// =============================================================================

/// A live `<form>` element read through `FormData`.
#[cfg(feature = "hydrate")]
pub struct DomForm(pub web_sys::HtmlFormElement);

#[cfg(feature = "hydrate")]
impl DomForm {
    /// Text entries of the form in document order; file inputs are skipped.
    pub fn entries(&self) -> Vec<(String, String)> {
        let Ok(data) = web_sys::FormData::new_with_form(&self.0) else {
            return Vec::new();
        };
        let Ok(Some(iter)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };
        iter.filter_map(Result::ok)
            .filter_map(|entry| {
                let pair = js_sys::Array::from(&entry);
                let name = pair.get(0).as_string()?;
                let value = pair.get(1).as_string()?;
                Some((name, value))
            })
            .collect()
    }
}

#[cfg(feature = "hydrate")]
impl SnapshotSource for DomForm {
    fn form_id(&self) -> Option<String> {
        self.0.get_attribute("id")
    }

    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::from_entries(self.entries())
    }
}
