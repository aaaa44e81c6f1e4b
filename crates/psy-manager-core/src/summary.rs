//! Values derived from the directory for list, history and header views.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::directory::Directory;
use crate::models::{Mood, Patient, PatientNote};
use crate::timeline::{estimate_trend, latest_note, sort_newest_first, Trend};

/// One row of the patient list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub age: u32,
    pub birth_date: NaiveDate,
    pub phone: String,
    pub note_count: usize,
    /// Content of the most recent note
    pub latest_note: Option<String>,
    /// Mood of the most recent note
    pub latest_mood: Option<Mood>,
}

impl PatientSummary {
    pub fn from_patient(patient: &Patient, today: NaiveDate) -> Self {
        let latest = latest_note(&patient.notes);
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            initials: initials(&patient.name),
            age: age_on(patient.birth_date, today),
            birth_date: patient.birth_date,
            phone: patient.phone.clone(),
            note_count: patient.notes.len(),
            latest_note: latest.map(|note| note.content.clone()),
            latest_mood: latest.and_then(|note| note.mood),
        }
    }
}

/// Everything the history view shows for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientHistory {
    pub patient_id: String,
    pub name: String,
    pub initials: String,
    pub age: u32,
    pub note_count: usize,
    /// Notes, most recent first
    pub timeline: Vec<PatientNote>,
    /// Mood of the most recent note; `None` when unevaluated or no notes
    pub current_mood: Option<Mood>,
    pub trend: Trend,
}

impl PatientHistory {
    pub fn build(patient: &Patient, today: NaiveDate) -> Self {
        let timeline: Vec<PatientNote> = sort_newest_first(&patient.notes)
            .into_iter()
            .cloned()
            .collect();
        let current_mood = timeline.first().and_then(|note| note.mood);

        Self {
            patient_id: patient.id.clone(),
            name: patient.name.clone(),
            initials: initials(&patient.name),
            age: age_on(patient.birth_date, today),
            note_count: patient.notes.len(),
            timeline,
            current_mood,
            trend: estimate_trend(&patient.notes),
        }
    }
}

/// Header counters for the patient list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total: usize,
    /// Patients created in the same calendar month as `today`
    pub new_this_month: usize,
    /// Patients in active treatment; every listed patient counts
    pub active: usize,
}

impl DirectoryStats {
    pub fn compute(directory: &Directory, today: NaiveDate) -> Self {
        let new_this_month = directory
            .patients()
            .iter()
            .filter(|p| p.created_at.year() == today.year() && p.created_at.month() == today.month())
            .count();

        Self {
            total: directory.len(),
            new_this_month,
            active: directory.len(),
        }
    }
}

/// Up to two uppercase initials, one per space-separated word.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Age in whole years on `today`. Zero for birth dates in the future.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    u32::try_from(age).unwrap_or(0)
}
