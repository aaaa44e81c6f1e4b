//! Coarse mood trend heuristic.
//!
//! Compares the mean mood score of the three most recent notes with the
//! mean of the next three. Not a statistical model: no weighting inside a
//! window, no smoothing, no confidence measure.

use serde::{Deserialize, Serialize};

use super::sort_newest_first;
use crate::models::{mood_score, PatientNote};

/// Number of notes in the recent window.
pub const RECENT_WINDOW: usize = 3;
/// Number of notes in the older window, directly after the recent one.
pub const OLDER_WINDOW: usize = 3;
/// Minimum mean difference, in score points, to report a change.
pub const TREND_THRESHOLD: f64 = 0.5;

/// Direction of a patient's recent mood trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    /// Not enough notes to compare two windows
    Unavailable,
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
            Trend::Unavailable => "unavailable",
        }
    }

    /// Classify a difference of window means.
    pub fn from_delta(delta: f64) -> Self {
        if delta > TREND_THRESHOLD {
            Trend::Improving
        } else if delta < -TREND_THRESHOLD {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

/// Estimate the trend for a note collection.
///
/// A trend is only reported when the older window is non-empty, i.e. with
/// at least `RECENT_WINDOW + 1` notes. Notes past the older window are
/// ignored.
pub fn estimate_trend(notes: &[PatientNote]) -> Trend {
    if notes.len() < 2 {
        return Trend::Unavailable;
    }

    let sorted = sort_newest_first(notes);
    let recent = &sorted[..sorted.len().min(RECENT_WINDOW)];
    let older_end = sorted.len().min(RECENT_WINDOW + OLDER_WINDOW);
    let older = sorted.get(RECENT_WINDOW..older_end).unwrap_or(&[]);

    match (window_mean(recent), window_mean(older)) {
        (Some(recent_mean), Some(older_mean)) => Trend::from_delta(recent_mean - older_mean),
        _ => Trend::Unavailable,
    }
}

/// Arithmetic mean mood score of a window, `None` when empty.
pub fn window_mean(window: &[&PatientNote]) -> Option<f64> {
    if window.is_empty() {
        return None;
    }
    let total: u32 = window.iter().map(|note| u32::from(mood_score(note.mood))).sum();
    Some(f64::from(total) / window.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use chrono::{Duration, NaiveDate};

    /// Notes with the given moods, newest first, one week apart.
    fn notes_newest_first(moods: &[Option<Mood>]) -> Vec<PatientNote> {
        let newest = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        moods
            .iter()
            .enumerate()
            .map(|(i, mood)| PatientNote {
                id: format!("n{}", i),
                content: "session".into(),
                date: newest - Duration::weeks(i as i64),
                mood: *mood,
            })
            .collect()
    }

    #[test]
    fn test_too_few_notes() {
        assert_eq!(estimate_trend(&[]), Trend::Unavailable);
        assert_eq!(estimate_trend(&notes_newest_first(&[Some(Mood::Good)])), Trend::Unavailable);
    }

    #[test]
    fn test_two_or_three_notes_unavailable() {
        let two = notes_newest_first(&[Some(Mood::Excellent), Some(Mood::Critical)]);
        assert_eq!(estimate_trend(&two), Trend::Unavailable);

        let three = notes_newest_first(&[
            Some(Mood::Excellent),
            Some(Mood::Critical),
            Some(Mood::Critical),
        ]);
        assert_eq!(estimate_trend(&three), Trend::Unavailable);
    }

    #[test]
    fn test_improving() {
        // recent mean 5, older mean 3
        let notes = notes_newest_first(&[
            Some(Mood::Excellent),
            Some(Mood::Excellent),
            Some(Mood::Excellent),
            Some(Mood::Neutral),
            None,
            Some(Mood::Neutral),
        ]);
        assert_eq!(estimate_trend(&notes), Trend::Improving);
    }

    #[test]
    fn test_declining() {
        // recent mean 2, older mean 4
        let notes = notes_newest_first(&[
            Some(Mood::Concerning),
            Some(Mood::Concerning),
            Some(Mood::Concerning),
            Some(Mood::Good),
        ]);
        assert_eq!(estimate_trend(&notes), Trend::Declining);
    }

    #[test]
    fn test_stable_small_delta() {
        // recent mean 3.33, older mean 3.0
        let notes = notes_newest_first(&[
            Some(Mood::Good),
            Some(Mood::Neutral),
            Some(Mood::Neutral),
            Some(Mood::Neutral),
            Some(Mood::Neutral),
        ]);
        assert_eq!(estimate_trend(&notes), Trend::Stable);
        assert_eq!(Trend::from_delta(3.2 - 3.0), Trend::Stable);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(Trend::from_delta(0.5), Trend::Stable);
        assert_eq!(Trend::from_delta(-0.5), Trend::Stable);
        assert_eq!(Trend::from_delta(0.51), Trend::Improving);
        assert_eq!(Trend::from_delta(-0.51), Trend::Declining);
    }

    #[test]
    fn test_notes_past_older_window_ignored() {
        let mut moods = vec![Some(Mood::Neutral); 6];
        // Anything after position 6 must not move the result
        moods.extend([Some(Mood::Excellent); 4]);
        assert_eq!(estimate_trend(&notes_newest_first(&moods)), Trend::Stable);
    }

    #[test]
    fn test_windows_use_date_order_not_insertion_order() {
        let mut notes = notes_newest_first(&[
            Some(Mood::Excellent),
            Some(Mood::Excellent),
            Some(Mood::Excellent),
            Some(Mood::Critical),
        ]);
        notes.reverse();
        assert_eq!(estimate_trend(&notes), Trend::Improving);
    }

    #[test]
    fn test_window_mean() {
        let notes = notes_newest_first(&[Some(Mood::Good), None, Some(Mood::Critical)]);
        let refs: Vec<&PatientNote> = notes.iter().collect();
        let mean = window_mean(&refs).unwrap();
        assert!((mean - 8.0 / 3.0).abs() < 1e-9);
        assert_eq!(window_mean(&[]), None);
    }
}
