//! Login gate.
//!
//! Credential checking belongs to an external collaborator; the session
//! only reacts to its yes/no answer. `DemoAuthenticator` stands in for it
//! with a single configured account.

use thiserror::Error;

/// Authentication failures shown inline on the login form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingFields,

    #[error("Invalid credentials")]
    InvalidCredentials,
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Decides whether a username/password pair may open a session.
pub trait Authenticator {
    fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// Fixed demo account. Not real authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAuthenticator {
    username: String,
    password: String,
}

impl DemoAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Default for DemoAuthenticator {
    fn default() -> Self {
        Self::new("admin", "123456")
    }
}

impl Authenticator for DemoAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
