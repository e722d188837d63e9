//! Login credentials and session identity.
//!
//! Only the shape of the credentials is checked. A session is identified by
//! a random token; the engine compares tokens to gate every operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Email and password as entered by the user.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    /// Login email.
    pub email: String,
    /// Login password. Never logged.
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("email", &self.email).field("password", &"***").finish()
    }
}

/// Why a login was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email or password is empty.
    #[error("Please enter both email and password")]
    MissingCredentials,

    /// The email has no `@`.
    #[error("Please enter a valid email")]
    InvalidEmail,
}

/// Check the shape of a set of credentials.
///
/// # Errors
///
/// Returns [`AuthError::MissingCredentials`] if either field is empty, and
/// [`AuthError::InvalidEmail`] if the email has no `@`.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), AuthError> {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if !credentials.email.contains('@') {
        return Err(AuthError::InvalidEmail);
    }
    Ok(())
}

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(Uuid);

impl SessionToken {
    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Token compared on every gated operation.
    pub token: SessionToken,
    /// Email the session was opened with.
    pub email: String,
    /// When the session started.
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for validated credentials.
    #[must_use]
    pub fn open(credentials: &Credentials) -> Self {
        Self {
            token: SessionToken::generate(),
            email: credentials.email.clone(),
            started_at: Utc::now(),
        }
    }
}
