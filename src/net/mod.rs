//! Networking: AJAX form submission and partial-content loading.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` owns the request/notify/restore flow, `transport` abstracts
//! `fetch`, and `types` defines the payloads and DOM seams.

pub mod gateway;
pub mod transport;
pub mod types;
