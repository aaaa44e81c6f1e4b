//! PsyManager Core Library
//!
//! In-memory patient records for a single-practitioner therapy practice:
//! a login gate, a searchable patient directory, and per-patient session
//! notes tagged with a mood, summarised by a coarse trend heuristic.
//!
//! # Architecture
//!
//! ```text
//!   Presentation (forms, lists, dialogs)
//!            │  drafts / navigation          ▲ summaries, labels
//!            ▼                               │
//!   ┌────────────────────┐          ┌────────┴─────────┐
//!   │ SessionController  │─────────►│ summary/display  │
//!   │  login gate, View  │          └────────▲─────────┘
//!   └─────────┬──────────┘                   │
//!             │ add / update / remove / add_note
//!             ▼                              │
//!   ┌────────────────────┐   notes  ┌────────┴─────────┐
//!   │     Directory      │─────────►│     timeline     │
//!   │ patients + notes   │          │  sort, trend     │
//!   └────────────────────┘          └──────────────────┘
//! ```
//!
//! Nothing is persisted. A session starts from the bundled demo patients
//! (or empty) and is dropped with the process.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Patient, PatientNote, Mood, PatientDraft)
//! - [`timeline`]: Newest-first ordering and the mood trend estimator
//! - [`directory`]: The in-memory directory and demo seed data
//! - [`session`]: Login gate and view state machine
//! - [`summary`]: List rows, history view and header counters
//! - [`display`]: Localized labels
//! - [`config`]: TOML configuration
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod directory;
pub mod display;
pub mod logging;
pub mod models;
pub mod session;
pub mod summary;
pub mod timeline;

// Re-export commonly used types
pub use config::CoreConfig;
pub use directory::Directory;
pub use display::Locale;
pub use models::{Mood, Patient, PatientDraft, PatientNote};
pub use session::{Authenticator, DemoAuthenticator, SessionController, View};
pub use summary::{DirectoryStats, PatientHistory, PatientSummary};
pub use timeline::{estimate_trend, sort_newest_first, Trend};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PsyManagerError {
    /// Login rejected; carries the localized inline message
    #[error("Login failed: {0}")]
    AuthFailed(String),

    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Seed data error: {0}")]
    SeedError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<session::SessionError> for PsyManagerError {
    fn from(e: session::SessionError) -> Self {
        let message = e.to_string();
        match e {
            session::SessionError::NotAuthenticated => PsyManagerError::NotAuthenticated(message),
            session::SessionError::NoOpenForm => PsyManagerError::InvalidInput(message),
            session::SessionError::Auth(_) => PsyManagerError::AuthFailed(message),
        }
    }
}

impl From<config::ConfigError> for PsyManagerError {
    fn from(e: config::ConfigError) -> Self {
        PsyManagerError::ConfigError(e.to_string())
    }
}

impl From<directory::SeedError> for PsyManagerError {
    fn from(e: directory::SeedError) -> Self {
        PsyManagerError::SeedError(e.to_string())
    }
}

impl From<models::MoodParseError> for PsyManagerError {
    fn from(e: models::MoodParseError) -> Self {
        PsyManagerError::InvalidInput(e.to_string())
    }
}

impl From<chrono::ParseError> for PsyManagerError {
    fn from(e: chrono::ParseError) -> Self {
        PsyManagerError::InvalidInput(format!("Invalid date: {}", e))
    }
}

impl<T> From<std::sync::PoisonError<T>> for PsyManagerError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PsyManagerError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a session configured from a TOML file, or defaults when `None`.
#[uniffi::export]
pub fn open_session(config_path: Option<String>) -> Result<Arc<PsyManagerCore>, PsyManagerError> {
    let config = match config_path {
        Some(path) => CoreConfig::load_or_default(Some(Path::new(&path))),
        None => CoreConfig::default(),
    };
    Ok(Arc::new(PsyManagerCore::from_config(config)?))
}

/// Open a session with the demo account and demo patients.
#[uniffi::export]
pub fn open_demo_session() -> Result<Arc<PsyManagerCore>, PsyManagerError> {
    Ok(Arc::new(PsyManagerCore::from_config(CoreConfig::default())?))
}

/// Install the global log subscriber. Returns `false` if one was already set.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) -> bool {
    let filter = filter.unwrap_or_else(|| config::LoggingConfig::default().filter);
    logging::init(&filter)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PsyManagerCore {
    session: Arc<Mutex<SessionController<DemoAuthenticator>>>,
    directory: Arc<Mutex<Directory>>,
    locale: Locale,
}

impl PsyManagerCore {
    /// Build a session from configuration.
    pub fn from_config(config: CoreConfig) -> Result<Self, PsyManagerError> {
        let directory = if config.directory.seed_demo_data {
            Directory::with_demo_data()?
        } else {
            Directory::new()
        };
        tracing::info!(
            patients = directory.len(),
            locale = ?config.display.locale,
            "Opened session"
        );

        Ok(Self {
            session: Arc::new(Mutex::new(SessionController::new(config.session.authenticator()))),
            directory: Arc::new(Mutex::new(directory)),
            locale: config.display.locale,
        })
    }
}

#[uniffi::export]
impl PsyManagerCore {
    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Log in. Failures carry the message to show under the form.
    pub fn login(&self, username: String, password: String) -> Result<(), PsyManagerError> {
        let mut session = self.session.lock()?;
        session.login(&username, &password).map_err(|e| {
            PsyManagerError::AuthFailed(display::auth_error_message(
                &e,
                self.locale,
                session.authenticator(),
            ))
        })
    }

    pub fn logout(&self) -> Result<(), PsyManagerError> {
        self.session.lock()?.logout();
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool, PsyManagerError> {
        Ok(self.session.lock()?.is_authenticated())
    }

    pub fn current_user(&self) -> Result<Option<String>, PsyManagerError> {
        Ok(self.session.lock()?.current_user().map(str::to_string))
    }

    /// The screen to compose right now.
    pub fn current_view(&self) -> Result<FfiView, PsyManagerError> {
        let session = self.session.lock()?;
        let directory = self.directory.lock()?;
        Ok(session.resolve_view(&directory).into())
    }

    // =========================================================================
    // Patient List
    // =========================================================================

    pub fn set_search_term(&self, term: String) -> Result<(), PsyManagerError> {
        Ok(self.session.lock()?.set_search_term(&term)?)
    }

    /// Patients matching the current search term.
    pub fn list_patients(&self) -> Result<Vec<FfiPatientSummary>, PsyManagerError> {
        let session = self.session.lock()?;
        if !session.is_authenticated() {
            return Err(session::SessionError::NotAuthenticated.into());
        }
        let directory = self.directory.lock()?;
        let today = models::today();
        Ok(session
            .visible_patients(&directory)
            .into_iter()
            .map(|p| FfiPatientSummary::new(PatientSummary::from_patient(p, today), self.locale))
            .collect())
    }

    pub fn directory_stats(&self) -> Result<FfiDirectoryStats, PsyManagerError> {
        if !self.session.lock()?.is_authenticated() {
            return Err(session::SessionError::NotAuthenticated.into());
        }
        let directory = self.directory.lock()?;
        Ok(DirectoryStats::compute(&directory, models::today()).into())
    }

    pub fn delete_patient(&self, patient_id: String) -> Result<bool, PsyManagerError> {
        let mut session = self.session.lock()?;
        let mut directory = self.directory.lock()?;
        Ok(session.delete_patient(&mut directory, &patient_id)?)
    }

    // =========================================================================
    // Patient History
    // =========================================================================

    pub fn open_history(&self, patient_id: String) -> Result<(), PsyManagerError> {
        Ok(self.session.lock()?.open_history(&patient_id)?)
    }

    /// History of the patient in focus, if the history view is open.
    pub fn patient_history(&self) -> Result<Option<FfiPatientHistory>, PsyManagerError> {
        let session = self.session.lock()?;
        let directory = self.directory.lock()?;
        if !matches!(session.view(), View::History(_)) {
            return Ok(None);
        }
        Ok(session
            .selected_patient(&directory)
            .map(|p| FfiPatientHistory::new(PatientHistory::build(p, models::today()), self.locale)))
    }

    /// Add a note to the open history. `mood` is a lowercase mood name.
    pub fn add_note(&self, content: String, mood: Option<String>) -> Result<bool, PsyManagerError> {
        let mood = mood.map(|m| m.parse::<Mood>()).transpose()?;
        let mut session = self.session.lock()?;
        let mut directory = self.directory.lock()?;
        Ok(session.add_note(&mut directory, &content, mood)?)
    }

    pub fn show_patient_list(&self) -> Result<(), PsyManagerError> {
        Ok(self.session.lock()?.show_patient_list()?)
    }

    // =========================================================================
    // Patient Form
    // =========================================================================

    pub fn open_create_form(&self) -> Result<(), PsyManagerError> {
        Ok(self.session.lock()?.open_create_form()?)
    }

    pub fn open_edit_form(&self, patient_id: String) -> Result<(), PsyManagerError> {
        Ok(self.session.lock()?.open_edit_form(&patient_id)?)
    }

    /// Pre-filled contents for the edit form.
    pub fn edit_form_draft(&self) -> Result<Option<FfiPatientDraft>, PsyManagerError> {
        let session = self.session.lock()?;
        let directory = self.directory.lock()?;
        Ok(session.form_draft(&directory).map(Into::into))
    }

    pub fn cancel_form(&self) -> Result<(), PsyManagerError> {
        Ok(self.session.lock()?.cancel_form()?)
    }

    /// Save the open form. Returns the affected patient ID, or `None` when
    /// the patient being edited was removed in the meantime.
    pub fn submit_form(&self, draft: FfiPatientDraft) -> Result<Option<String>, PsyManagerError> {
        let draft = PatientDraft::try_from(draft)?;
        let mut session = self.session.lock()?;
        let mut directory = self.directory.lock()?;
        Ok(session.submit_form(&mut directory, draft)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe view.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum FfiView {
    Login,
    PatientList,
    CreatingPatient,
    EditingPatient { patient_id: String },
    History { patient_id: String },
}

impl From<View> for FfiView {
    fn from(view: View) -> Self {
        match view {
            View::Login => FfiView::Login,
            View::PatientList => FfiView::PatientList,
            View::CreatingPatient => FfiView::CreatingPatient,
            View::EditingPatient(patient_id) => FfiView::EditingPatient { patient_id },
            View::History(patient_id) => FfiView::History { patient_id },
        }
    }
}

/// FFI-safe patient form contents. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientDraft {
    pub name: String,
    pub birth_date: String,
    pub phone: String,
    pub notes: String,
}

impl From<PatientDraft> for FfiPatientDraft {
    fn from(draft: PatientDraft) -> Self {
        Self {
            name: draft.name,
            birth_date: draft.birth_date.to_string(),
            phone: draft.phone,
            notes: draft.notes,
        }
    }
}

impl TryFrom<FfiPatientDraft> for PatientDraft {
    type Error = PsyManagerError;

    fn try_from(draft: FfiPatientDraft) -> Result<Self, Self::Error> {
        Ok(PatientDraft {
            name: draft.name,
            birth_date: draft.birth_date.trim().parse::<NaiveDate>()?,
            phone: draft.phone,
            notes: draft.notes,
        })
    }
}

/// FFI-safe note.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNote {
    pub id: String,
    pub content: String,
    pub date: String,
    pub date_label: String,
    pub mood: Option<String>,
    pub mood_label: String,
}

impl FfiNote {
    fn new(note: PatientNote, locale: Locale) -> Self {
        Self {
            id: note.id,
            content: note.content,
            date: note.date.to_string(),
            date_label: display::format_long_date(note.date, locale),
            mood: note.mood.map(|m| m.as_str().to_string()),
            mood_label: display::mood_label(note.mood, locale).to_string(),
        }
    }
}

/// FFI-safe patient list row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientSummary {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub age: u32,
    pub birth_date: String,
    pub birth_date_label: String,
    pub phone: String,
    pub note_count: u32,
    pub note_count_label: String,
    pub latest_note: Option<String>,
    pub latest_note_label: String,
    pub latest_mood: Option<String>,
}

impl FfiPatientSummary {
    fn new(summary: PatientSummary, locale: Locale) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            initials: summary.initials,
            age: summary.age,
            birth_date: summary.birth_date.to_string(),
            birth_date_label: display::format_long_date(summary.birth_date, locale),
            phone: summary.phone,
            note_count: summary.note_count as u32,
            note_count_label: display::note_count_label(summary.note_count, locale),
            latest_note_label: display::latest_note_label(summary.latest_note.as_deref(), locale),
            latest_note: summary.latest_note,
            latest_mood: summary.latest_mood.map(|m| m.as_str().to_string()),
        }
    }
}

/// FFI-safe patient history.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientHistory {
    pub patient_id: String,
    pub name: String,
    pub initials: String,
    pub age: u32,
    pub note_count: u32,
    pub timeline: Vec<FfiNote>,
    pub current_mood: Option<String>,
    pub current_mood_label: String,
    pub trend: String,
    pub trend_label: String,
}

impl FfiPatientHistory {
    fn new(history: PatientHistory, locale: Locale) -> Self {
        Self {
            patient_id: history.patient_id,
            name: history.name,
            initials: history.initials,
            age: history.age,
            note_count: history.note_count as u32,
            timeline: history
                .timeline
                .into_iter()
                .map(|note| FfiNote::new(note, locale))
                .collect(),
            current_mood: history.current_mood.map(|m| m.as_str().to_string()),
            current_mood_label: display::mood_label(history.current_mood, locale).to_string(),
            trend: history.trend.as_str().to_string(),
            trend_label: display::trend_label(history.trend, locale).to_string(),
        }
    }
}

/// FFI-safe header counters.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDirectoryStats {
    pub total: u32,
    pub new_this_month: u32,
    pub active: u32,
}

impl From<DirectoryStats> for FfiDirectoryStats {
    fn from(stats: DirectoryStats) -> Self {
        Self {
            total: stats.total as u32,
            new_this_month: stats.new_this_month as u32,
            active: stats.active as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in_core() -> Arc<PsyManagerCore> {
        let core = open_demo_session().unwrap();
        core.login("admin".into(), "123456".into()).unwrap();
        core
    }

    #[test]
    fn test_login_failure_message_is_localized() {
        let core = open_demo_session().unwrap();
        let err = core.login("admin".into(), "wrong".into()).unwrap_err();
        match err {
            PsyManagerError::AuthFailed(msg) => {
                assert_eq!(msg, "Credenciales incorrectas. Usa: admin / 123456")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!core.is_authenticated().unwrap());
        assert_eq!(core.current_view().unwrap(), FfiView::Login);
    }

    #[test]
    fn test_list_requires_login() {
        let core = open_demo_session().unwrap();
        assert!(matches!(
            core.list_patients(),
            Err(PsyManagerError::NotAuthenticated(_))
        ));
    }

    #[test]
    fn test_list_and_search() {
        let core = logged_in_core();
        assert_eq!(core.list_patients().unwrap().len(), 3);

        core.set_search_term("carlos".into()).unwrap();
        let rows = core.list_patients().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].initials, "CR");
        assert_eq!(rows[0].note_count_label, "2 notas");
        assert_eq!(rows[0].latest_mood.as_deref(), Some("good"));
    }

    #[test]
    fn test_history_and_add_note() {
        let core = logged_in_core();
        assert!(core.patient_history().unwrap().is_none());

        core.open_history("3".into()).unwrap();
        assert_eq!(
            core.current_view().unwrap(),
            FfiView::History { patient_id: "3".into() }
        );

        let history = core.patient_history().unwrap().unwrap();
        assert_eq!(history.timeline[0].id, "n7");
        assert_eq!(history.current_mood_label, "Excelente");
        assert_eq!(history.trend, "unavailable");
        assert_eq!(history.trend_label, "Sin datos");

        assert!(core.add_note("Sesión de seguimiento".into(), Some("good".into())).unwrap());
        assert_eq!(core.patient_history().unwrap().unwrap().note_count, 3);

        assert!(matches!(
            core.add_note("x".into(), Some("happy".into())),
            Err(PsyManagerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_create_and_edit_through_form() {
        let core = logged_in_core();

        core.open_create_form().unwrap();
        let id = core
            .submit_form(FfiPatientDraft {
                name: "Lucía Pérez".into(),
                birth_date: "1990-05-04".into(),
                phone: "+34 600 111 222".into(),
                notes: "Motivo de consulta: insomnio".into(),
            })
            .unwrap()
            .unwrap();
        assert_eq!(core.current_view().unwrap(), FfiView::PatientList);

        core.open_edit_form(id.clone()).unwrap();
        let mut draft = core.edit_form_draft().unwrap().unwrap();
        assert_eq!(draft.birth_date, "1990-05-04");
        assert_eq!(draft.notes, "Motivo de consulta: insomnio");

        draft.phone = "+34 600 333 444".into();
        draft.notes = String::new();
        assert_eq!(core.submit_form(draft).unwrap(), Some(id));

        core.set_search_term("lucía".into()).unwrap();
        let rows = core.list_patients().unwrap();
        assert_eq!(rows[0].phone, "+34 600 333 444");
        assert_eq!(rows[0].note_count, 1);
    }

    #[test]
    fn test_submit_rejects_bad_date() {
        let core = logged_in_core();
        core.open_create_form().unwrap();
        let result = core.submit_form(FfiPatientDraft {
            name: "X".into(),
            birth_date: "15/03/1985".into(),
            phone: "600".into(),
            notes: String::new(),
        });
        assert!(matches!(result, Err(PsyManagerError::InvalidInput(_))));
        assert_eq!(core.current_view().unwrap(), FfiView::CreatingPatient);
    }

    #[test]
    fn test_delete_patient_in_history_falls_back_to_list() {
        let core = logged_in_core();
        core.open_history("1".into()).unwrap();
        assert!(core.delete_patient("1".into()).unwrap());
        assert_eq!(core.current_view().unwrap(), FfiView::PatientList);
        assert_eq!(core.directory_stats().unwrap().total, 2);
    }

    #[test]
    fn test_open_session_without_seed() {
        let config = CoreConfig::from_toml_str("[directory]\nseed_demo_data = false").unwrap();
        let core = PsyManagerCore::from_config(config).unwrap();
        core.login("admin".into(), "123456".into()).unwrap();
        assert_eq!(core.directory_stats().unwrap().total, 0);
    }

    #[test]
    fn test_open_session_missing_config_file() {
        let core = open_session(Some("/nonexistent/psy-manager.toml".into())).unwrap();
        core.login("admin".into(), "123456".into()).unwrap();
        assert_eq!(core.directory_stats().unwrap().total, 3);
    }

    #[test]
    fn test_directory_stats_requires_login() {
        let core = open_demo_session().unwrap();
        assert!(matches!(
            core.directory_stats(),
            Err(PsyManagerError::NotAuthenticated(_))
        ));
    }

    #[test]
    fn test_summary_latest_note_label() {
        let core = logged_in_core();
        core.open_create_form().unwrap();
        core.submit_form(FfiPatientDraft {
            name: "Sin Historial".into(),
            birth_date: "2000-01-01".into(),
            phone: "600".into(),
            notes: String::new(),
        })
        .unwrap();
        core.set_search_term("sin historial".into()).unwrap();
        let rows = core.list_patients().unwrap();
        assert_eq!(rows[0].latest_note, None);
        assert_eq!(rows[0].latest_note_label, "Sin notas");
    }
}
