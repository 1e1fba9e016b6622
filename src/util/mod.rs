//! Stateless helpers and the timer seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep browser glue (timers, downloads, print windows) apart
//! from the stateful services so the services stay testable natively.

pub mod debounce;
pub mod export;
pub mod format;
pub mod markup;
pub mod timer;
