//! Bundled demo patients.

use thiserror::Error;

use crate::models::Patient;

const DEMO_PATIENTS_JSON: &str = include_str!("../../seed/demo_patients.json");

/// Seed data errors.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to parse seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SeedResult<T> = Result<T, SeedError>;

/// Parse the bundled demo patients.
pub fn demo_patients() -> SeedResult<Vec<Patient>> {
    parse_patients(DEMO_PATIENTS_JSON)
}

/// Parse a JSON array of patients.
pub fn parse_patients(json: &str) -> SeedResult<Vec<Patient>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use std::collections::HashSet;

    #[test]
    fn test_demo_patients_parse() {
        let patients = demo_patients().unwrap();
        assert_eq!(patients.len(), 3);

        let maria = &patients[0];
        assert_eq!(maria.name, "María González");
        assert_eq!(maria.notes.len(), 3);
        assert_eq!(maria.notes[2].mood, Some(Mood::Good));

        let ana = &patients[2];
        assert_eq!(ana.notes[0].mood, Some(Mood::Concerning));
    }

    #[test]
    fn test_demo_ids_unique() {
        let patients = demo_patients().unwrap();
        let patient_ids: HashSet<&str> = patients.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(patient_ids.len(), patients.len());

        let note_ids: HashSet<&str> = patients
            .iter()
            .flat_map(|p| p.notes.iter().map(|n| n.id.as_str()))
            .collect();
        assert_eq!(note_ids.len(), 7);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_patients("[{\"id\": 1}]").unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }
}
