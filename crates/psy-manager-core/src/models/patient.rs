//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::note::{today, PatientNote};
use crate::timeline;

/// A patient record. The patient owns its notes outright.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique patient ID within the directory
    pub id: String,
    /// Full name
    pub name: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Contact phone number
    pub phone: String,
    /// Session notes, in insertion order
    #[serde(default)]
    pub notes: Vec<PatientNote>,
    /// Date the record was created
    pub created_at: NaiveDate,
}

impl Patient {
    /// Create a patient from a submitted form, dated today.
    ///
    /// The draft's free-text note becomes the first note (mood neutral)
    /// when it is non-blank.
    pub fn from_draft(draft: PatientDraft) -> Self {
        let mut patient = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            birth_date: draft.birth_date,
            phone: draft.phone,
            notes: Vec::new(),
            created_at: today(),
        };
        if let Some(note) = PatientDraft::note_from_text(draft.notes) {
            patient.notes.push(note);
        }
        patient
    }

    /// The most recent note, if any.
    pub fn latest_note(&self) -> Option<&PatientNote> {
        timeline::latest_note(&self.notes)
    }
}

/// Form contents supplied by the presentation layer.
///
/// `notes` is the optional free-text field: the initial note on creation,
/// an additional note on edit. Empty means no note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientDraft {
    pub name: String,
    pub birth_date: NaiveDate,
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

impl PatientDraft {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            birth_date,
            phone: phone.into(),
            notes: String::new(),
        }
    }

    /// Attach free-text note content.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Pre-fill an edit form from an existing patient.
    ///
    /// The note field starts out holding the latest note's content, so
    /// submitting it unchanged appends a copy of that note.
    pub fn for_edit(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            birth_date: patient.birth_date,
            phone: patient.phone.clone(),
            notes: patient
                .latest_note()
                .map(|note| note.content.clone())
                .unwrap_or_default(),
        }
    }

    /// Build a neutral note dated today from form text, unless it is blank.
    pub(crate) fn note_from_text(text: String) -> Option<PatientNote> {
        if text.trim().is_empty() {
            return None;
        }
        Some(PatientNote::today(text, Some(super::Mood::Neutral)))
    }
}
