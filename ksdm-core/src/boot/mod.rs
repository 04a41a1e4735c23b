//! Power-on reconciliation
//!
//! The vehicle module always powers up in its own defaults. At boot the
//! panel loads the stored preferences and replays the presses that walk
//! the module from those defaults to the stored state.

pub mod reconcile;

pub use reconcile::{load, BootReport, FallbackReason, LoadOutcome, LoadSource, ReplayPlan};
