//! In-memory patient directory.
//!
//! The directory owns every patient for the lifetime of a session and is
//! the only place patients and notes are mutated. Operations are total:
//! an unknown ID is a silent no-op reported through the return value.

mod seed;

pub use seed::*;

use crate::models::{today, Mood, Patient, PatientDraft, PatientNote};

/// Owned, versioned collection of patients in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    patients: Vec<Patient>,
    version: u64,
}

impl Directory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding the given patients.
    pub fn from_patients(patients: Vec<Patient>) -> Self {
        Self {
            patients,
            version: 0,
        }
    }

    /// Create a directory seeded with the bundled demo patients.
    pub fn with_demo_data() -> SeedResult<Self> {
        let patients = demo_patients()?;
        tracing::debug!(count = patients.len(), "Seeded directory with demo patients");
        Ok(Self::from_patients(patients))
    }

    /// Mutation counter. Bumped by every operation that changes state.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Get a patient by ID.
    pub fn get(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Patient> {
        self.patients.iter_mut().find(|p| p.id == id)
    }

    /// Add a patient from a submitted form and return its new ID.
    ///
    /// A non-blank note field becomes the first note, mood neutral.
    pub fn add(&mut self, draft: PatientDraft) -> String {
        let patient = Patient::from_draft(draft);
        let id = patient.id.clone();
        tracing::debug!(patient_id = %id, notes = patient.notes.len(), "Added patient");
        self.patients.push(patient);
        self.version += 1;
        id
    }

    /// Overwrite a patient's details and optionally append one note.
    ///
    /// Existing notes are never rewritten. Returns `false` if `id` is unknown.
    pub fn update(&mut self, id: &str, draft: PatientDraft) -> bool {
        let Some(patient) = self.get_mut(id) else {
            tracing::debug!(patient_id = %id, "Update skipped: no such patient");
            return false;
        };

        patient.name = draft.name;
        patient.birth_date = draft.birth_date;
        patient.phone = draft.phone;
        let appended = match PatientDraft::note_from_text(draft.notes) {
            Some(note) => {
                patient.notes.push(note);
                true
            }
            None => false,
        };

        tracing::debug!(patient_id = %id, appended, "Updated patient");
        self.version += 1;
        true
    }

    /// Remove a patient and its notes. Returns `false` if `id` is unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.patients.len();
        self.patients.retain(|p| p.id != id);
        let removed = self.patients.len() != before;
        if removed {
            self.version += 1;
        }
        tracing::debug!(patient_id = %id, removed, "Remove patient");
        removed
    }

    /// Patients whose name contains `term`, ignoring case.
    ///
    /// Both sides are lowercased; accents are not folded, so "maria" does
    /// not match "María". An empty term matches everyone. Directory order
    /// is preserved.
    pub fn filter_by_name(&self, term: &str) -> Vec<&Patient> {
        let needle = term.to_lowercase();
        self.patients
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Append a note dated today to a patient's history.
    ///
    /// Content is stored trimmed. Returns `false`, changing nothing, when
    /// `id` is unknown or the content is blank.
    pub fn add_note(&mut self, id: &str, content: &str, mood: Option<Mood>) -> bool {
        let content = content.trim();
        if content.is_empty() {
            tracing::debug!(patient_id = %id, "Note skipped: blank content");
            return false;
        }
        let Some(patient) = self.get_mut(id) else {
            tracing::debug!(patient_id = %id, "Note skipped: no such patient");
            return false;
        };

        let note = PatientNote::new(content.to_string(), today(), mood);
        tracing::debug!(patient_id = %id, note_id = %note.id, ?mood, "Added note");
        patient.notes.push(note);
        self.version += 1;
        true
    }
}
