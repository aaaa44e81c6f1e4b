//! Session note models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::mood::Mood;

/// A dated note from one session. Notes are never edited once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientNote {
    /// Unique note ID
    pub id: String,
    /// Free-text session notes
    pub content: String,
    /// Session date
    pub date: NaiveDate,
    /// Mood tag; `None` means the session was not evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl PatientNote {
    /// Create a note with a freshly generated ID.
    pub fn new(content: String, date: NaiveDate, mood: Option<Mood>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            date,
            mood,
        }
    }

    /// Create a note dated today (UTC).
    pub fn today(content: String, mood: Option<Mood>) -> Self {
        Self::new(content, today(), mood)
    }
}

/// The current UTC calendar date.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
