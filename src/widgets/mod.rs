//! Widget initializers driven by DOM markers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `markers` is the attribute/class contract with the server templates,
//! `registry` maps markers to handlers and keeps scans idempotent, and `dom`
//! holds the browser handlers themselves.

#[cfg(feature = "hydrate")]
pub mod dom;
pub mod markers;
pub mod registry;
