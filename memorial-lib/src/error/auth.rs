//! Authentication error types

use chrono::DateTime;
use chrono::Utc;

/// Errors that can occur while signing in or reading the session token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token is stored.
    #[error("Not signed in")]
    NotSignedIn,

    /// The stored token's `exp` claim is in the past.
    #[error("Session expired at {expired_at}")]
    TokenExpired { expired_at: DateTime<Utc> },

    /// Invalid email or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The token store failed to load, save or clear the token.
    #[error("Token store error: {0}")]
    Store(String),

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}

impl AuthError {
    /// Returns `true` for the errors that send the user back to the login form.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::NotSignedIn | Self::TokenExpired { .. })
    }
}
