//! Localized labels for moods, trends, dates and login failures.
//!
//! Kept apart from scoring: an absent mood scores as neutral but is
//! labelled "unevaluated".

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Mood;
use crate::session::{AuthError, DemoAuthenticator};
use crate::timeline::Trend;

/// UI language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

/// Returned when a string names no supported locale.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown locale: {0}")]
pub struct LocaleParseError(pub String);

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            _ => Err(LocaleParseError(s.to_string())),
        }
    }
}

pub fn mood_label(mood: Option<Mood>, locale: Locale) -> &'static str {
    match (locale, mood) {
        (Locale::Es, Some(Mood::Excellent)) => "Excelente",
        (Locale::Es, Some(Mood::Good)) => "Bueno",
        (Locale::Es, Some(Mood::Neutral)) => "Neutral",
        (Locale::Es, Some(Mood::Concerning)) => "Preocupante",
        (Locale::Es, Some(Mood::Critical)) => "Crítico",
        (Locale::Es, None) => "Sin evaluar",
        (Locale::En, Some(Mood::Excellent)) => "Excellent",
        (Locale::En, Some(Mood::Good)) => "Good",
        (Locale::En, Some(Mood::Neutral)) => "Neutral",
        (Locale::En, Some(Mood::Concerning)) => "Concerning",
        (Locale::En, Some(Mood::Critical)) => "Critical",
        (Locale::En, None) => "Unevaluated",
    }
}

pub fn trend_label(trend: Trend, locale: Locale) -> &'static str {
    match (locale, trend) {
        (Locale::Es, Trend::Improving) => "↗️ Mejorando",
        (Locale::Es, Trend::Stable) => "→ Estable",
        (Locale::Es, Trend::Declining) => "↘️ Requiere atención",
        (Locale::Es, Trend::Unavailable) => "Sin datos",
        (Locale::En, Trend::Improving) => "↗️ Improving",
        (Locale::En, Trend::Stable) => "→ Stable",
        (Locale::En, Trend::Declining) => "↘️ Needs attention",
        (Locale::En, Trend::Unavailable) => "No data",
    }
}

/// "1 nota", "3 notas".
pub fn note_count_label(count: usize, locale: Locale) -> String {
    let noun = match locale {
        Locale::Es => "nota",
        Locale::En => "note",
    };
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// List-row preview of the latest note, or a placeholder when there is none.
pub fn latest_note_label(latest: Option<&str>, locale: Locale) -> String {
    match (latest, locale) {
        (Some(content), _) => content.to_string(),
        (None, Locale::Es) => "Sin notas".into(),
        (None, Locale::En) => "No notes".into(),
    }
}

const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Long-form date, e.g. "15 de enero de 2024" or "January 15, 2024".
pub fn format_long_date(date: NaiveDate, locale: Locale) -> String {
    let month = date.month0() as usize;
    match locale {
        Locale::Es => format!("{} de {} de {}", date.day(), MONTHS_ES[month], date.year()),
        Locale::En => format!("{} {}, {}", MONTHS_EN[month], date.day(), date.year()),
    }
}

/// Inline message for a failed login. Invalid credentials mention the
/// demo account.
pub fn auth_error_message(err: &AuthError, locale: Locale, demo: &DemoAuthenticator) -> String {
    match (locale, err) {
        (Locale::Es, AuthError::MissingFields) => "Por favor, completa todos los campos".into(),
        (Locale::Es, AuthError::InvalidCredentials) => format!(
            "Credenciales incorrectas. Usa: {} / {}",
            demo.username(),
            demo.password()
        ),
        (Locale::En, AuthError::MissingFields) => "Please fill in all fields".into(),
        (Locale::En, AuthError::InvalidCredentials) => format!(
            "Invalid credentials. Use: {} / {}",
            demo.username(),
            demo.password()
        ),
    }
}
