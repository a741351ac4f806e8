//! API error types

use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// The backend's `message`, or the raw body when it had none.
        message: String,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

/// JSON error body sent by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates an HTTP error from a failed response body.
    ///
    /// Uses the body's `message` (or `error`) field when the body is JSON,
    /// the trimmed body otherwise.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| body.trim().to_string());
        Self::http(status, message)
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_body_uses_message() {
        let err = ApiError::from_body(404, r#"{"success":false,"message":"Tribute not found"}"#);
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "HTTP 404: Tribute not found");
    }

    #[test]
    fn test_from_json_body_falls_back_to_error_field() {
        let err = ApiError::from_body(403, r#"{"error":"Forbidden"}"#);
        assert_eq!(err.to_string(), "HTTP 403: Forbidden");
    }

    #[test]
    fn test_from_plain_body() {
        let err = ApiError::from_body(502, "  Bad Gateway\n");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn test_from_empty_body_keeps_status() {
        let err = ApiError::from_body(500, "");
        assert_eq!(err.status_code(), Some(500));
        assert!(matches!(err, ApiError::Http { ref message, .. } if message.is_empty()));
    }

    #[test]
    fn test_parse_keeps_body() {
        match ApiError::parse_with_body("missing pagination", "{}") {
            ApiError::Parse { body, .. } => assert_eq!(body.as_deref(), Some("{}")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(ApiError::parse("x").status_code(), None);
    }
}
