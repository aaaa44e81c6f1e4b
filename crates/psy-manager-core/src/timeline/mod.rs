//! Note timeline ordering and trend estimation.
//!
//! ```text
//! Patient.notes ──► sort_newest_first ──► history timeline
//!                          │
//!                          ├──► latest_note ──► list summary, edit prefill
//!                          │
//!                          └──► estimate_trend ──► Improving | Stable | Declining | Unavailable
//! ```

mod trend;

pub use trend::*;

use crate::models::PatientNote;

/// Notes ordered by date, most recent first.
///
/// Returns a new sequence and leaves `notes` untouched. The sort is
/// stable, so notes sharing a date keep their insertion order.
pub fn sort_newest_first(notes: &[PatientNote]) -> Vec<&PatientNote> {
    let mut sorted: Vec<&PatientNote> = notes.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// The most recent note, if any.
pub fn latest_note(notes: &[PatientNote]) -> Option<&PatientNote> {
    sort_newest_first(notes).into_iter().next()
}
