//! Browser-side utility layer for server-rendered Bootstrap pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are rendered by the server and marked up with data attributes and
//! classes. This crate activates those markers (tooltips, confirmations,
//! validation, auto-save, auto-hiding alerts), shows transient notices,
//! submits forms and loads partials over AJAX, and exposes small formatting
//! and export helpers to inline scripts.
//!
//! ARCHITECTURE
//! ============
//! Everything that touches the browser sits behind a trait seam (scheduler,
//! storage, notice surface, transport, DOM controls). The `hydrate` feature
//! supplies the `web-sys`/`gloo` implementations plus the `PageKit` export;
//! without it the crate builds natively and the services are tested against
//! fakes and a virtual clock.

pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod util;
pub mod widgets;

#[cfg(feature = "hydrate")]
pub mod controller;
#[cfg(feature = "hydrate")]
mod wasm;

#[cfg(feature = "hydrate")]
pub use wasm::PageKit;

#[cfg(test)]
mod testing;
