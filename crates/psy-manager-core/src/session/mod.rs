//! Session and view state.
//!
//! Tracks who is logged in and which screen the presentation layer should
//! compose. The controller never renders; it routes form submissions to
//! the [`Directory`] and reports which patient, if any, is in focus.
//!
//! ```text
//!            login ok
//!   Login ───────────► PatientList ◄──────────────┐
//!     ▲                  │   │   │                │ submit / cancel / back
//!     │ logout           │   │   └─► History(id) ─┤
//!     └──────── (any)    │   └─────► EditingPatient(id)
//!                        └─────────► CreatingPatient
//! ```

mod auth;

pub use auth::*;

use thiserror::Error;

use crate::directory::Directory;
use crate::models::{Mood, Patient, PatientDraft};

/// Session errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("No patient form is open")]
    NoOpenForm,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Screen the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    PatientList,
    CreatingPatient,
    EditingPatient(String),
    History(String),
}

/// Login state plus current view for one UI session.
#[derive(Debug)]
pub struct SessionController<A: Authenticator> {
    auth: A,
    current_user: Option<String>,
    view: View,
    search_term: String,
}

impl<A: Authenticator> SessionController<A> {
    pub fn new(auth: A) -> Self {
        Self {
            auth,
            current_user: None,
            view: View::Login,
            search_term: String::new(),
        }
    }

    pub fn authenticator(&self) -> &A {
        &self.auth
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Attempt to log in. On success the patient list is shown.
    pub fn login(&mut self, username: &str, password: &str) -> AuthResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        if !self.auth.authenticate(username, password) {
            tracing::info!(username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(username, "Logged in");
        self.current_user = Some(username.to_string());
        self.view = View::PatientList;
        Ok(())
    }

    /// End the session and return to the login screen.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            tracing::info!(username = %user, "Logged out");
        }
        self.search_term.clear();
        self.view = View::Login;
    }

    fn require_auth(&self) -> SessionResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(SessionError::NotAuthenticated)
        }
    }

    fn navigate(&mut self, view: View) -> SessionResult<()> {
        self.require_auth()?;
        tracing::debug!(?view, "Navigate");
        self.view = view;
        Ok(())
    }

    pub fn show_patient_list(&mut self) -> SessionResult<()> {
        self.navigate(View::PatientList)
    }

    pub fn open_create_form(&mut self) -> SessionResult<()> {
        self.navigate(View::CreatingPatient)
    }

    pub fn open_edit_form(&mut self, patient_id: &str) -> SessionResult<()> {
        self.navigate(View::EditingPatient(patient_id.to_string()))
    }

    pub fn open_history(&mut self, patient_id: &str) -> SessionResult<()> {
        self.navigate(View::History(patient_id.to_string()))
    }

    /// Close an open form without saving.
    pub fn cancel_form(&mut self) -> SessionResult<()> {
        self.show_patient_list()
    }

    pub fn set_search_term(&mut self, term: &str) -> SessionResult<()> {
        self.require_auth()?;
        self.search_term = term.to_string();
        Ok(())
    }

    /// Patients matching the current search term.
    pub fn visible_patients<'d>(&self, directory: &'d Directory) -> Vec<&'d Patient> {
        directory.filter_by_name(&self.search_term)
    }

    /// The patient being viewed or edited, if it still exists.
    pub fn selected_patient<'d>(&self, directory: &'d Directory) -> Option<&'d Patient> {
        match &self.view {
            View::History(id) | View::EditingPatient(id) => directory.get(id),
            _ => None,
        }
    }

    /// The view to compose against the current directory.
    ///
    /// A view pointing at a patient that has since been removed falls back
    /// to the patient list.
    pub fn resolve_view(&self, directory: &Directory) -> View {
        match &self.view {
            View::History(_) | View::EditingPatient(_) if self.selected_patient(directory).is_none() => {
                View::PatientList
            }
            view => view.clone(),
        }
    }

    /// Draft to pre-fill the open form with.
    pub fn form_draft(&self, directory: &Directory) -> Option<PatientDraft> {
        match &self.view {
            View::EditingPatient(_) => self.selected_patient(directory).map(PatientDraft::for_edit),
            _ => None,
        }
    }

    /// Save the open form and return to the patient list.
    ///
    /// Creating adds a patient; editing updates the one in focus. Returns
    /// the affected patient ID, or `None` when the patient being edited
    /// was removed while its form was open.
    pub fn submit_form(
        &mut self,
        directory: &mut Directory,
        draft: PatientDraft,
    ) -> SessionResult<Option<String>> {
        self.require_auth()?;
        let id = match &self.view {
            View::CreatingPatient => Some(directory.add(draft)),
            View::EditingPatient(id) => directory.update(id, draft).then(|| id.clone()),
            _ => return Err(SessionError::NoOpenForm),
        };
        self.view = View::PatientList;
        Ok(id)
    }

    /// Delete a patient from the list.
    pub fn delete_patient(&mut self, directory: &mut Directory, patient_id: &str) -> SessionResult<bool> {
        self.require_auth()?;
        Ok(directory.remove(patient_id))
    }

    /// Record a note for the patient whose history is open.
    pub fn add_note(
        &mut self,
        directory: &mut Directory,
        content: &str,
        mood: Option<Mood>,
    ) -> SessionResult<bool> {
        self.require_auth()?;
        match &self.view {
            View::History(id) => Ok(directory.add_note(id, content, mood)),
            _ => Ok(false),
        }
    }
}

impl Default for SessionController<DemoAuthenticator> {
    fn default() -> Self {
        Self::new(DemoAuthenticator::default())
    }
}
