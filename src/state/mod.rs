//! Stateful page services: notifications, auto-save drafts, snapshots.
//!
//! SYSTEM CONTEXT
//! ==============
//! These services own timers and storage but never touch the DOM directly;
//! browser-backed implementations of their seams are hydrate-only.

pub mod autosave;
pub mod notify;
pub mod snapshot;
