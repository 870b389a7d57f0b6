//! View controllers: one per dashboard screen.
//!
//! A controller owns its screen's state (records, filters, form, status)
//! and runs the fetch → store → edit → patch cycle against a
//! [`DataService`](campus_core::service::DataService). Failed requests never
//! touch the records; they only set the screen's error message.

pub mod courses;
pub mod statistics;
pub mod students;

/// The message shown when a request for `entity` fails.
pub(crate) fn failure_message(verb: &str, entity: &str) -> String {
  format!("Failed to {verb} {entity}. Please try again.")
}

/// Keep a list cursor inside a list of `len` items.
pub(crate) fn clamp_cursor(cursor: usize, len: usize) -> usize {
  cursor.min(len.saturating_sub(1))
}

// ─── In-memory service for controller tests ──────────────────────────────────
