//! Error types

mod api;
mod auth;

pub use api::*;
pub use auth::*;

/// Top-level error returned by [`AdminClient`](crate::AdminClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request reached the API and failed, or never got there.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No usable session token.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` if the caller has to sign in again before retrying.
    ///
    /// Covers a missing or expired local token as well as the API rejecting
    /// the token with `401 Unauthorized`.
    pub fn requires_login(&self) -> bool {
        match self {
            Self::Auth(e) => e.requires_login(),
            Self::Api(e) => e.status_code() == Some(401),
            Self::Serialization(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login() {
        assert!(Error::Auth(AuthError::NotSignedIn).requires_login());
        assert!(Error::Api(ApiError::http(401, "jwt expired")).requires_login());
        assert!(!Error::Api(ApiError::http(404, "Not found")).requires_login());
        assert!(!Error::Auth(AuthError::InvalidCredentials).requires_login());
    }

    #[test]
    fn test_display_is_transparent() {
        let err = Error::Api(ApiError::http(500, "boom"));
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
