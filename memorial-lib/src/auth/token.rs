//! AccessToken and JWT expiry decoding

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A bearer token issued by the admin API.
///
/// The token is a JWT. Only its `exp` claim is read, without verifying the
/// signature, to tell whether a stored session is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The raw bearer token.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a token with unknown expiry.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Creates a token with expiration time.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Creates a token from a raw JWT, reading the expiry from its `exp` claim.
    ///
    /// Tokens that are not a decodable JWT, or carry no `exp`, get no expiry
    /// and never count as expired.
    ///
    /// # Example
    ///
    /// ```
    /// use memorial_lib::auth::AccessToken;
    ///
    /// let token = AccessToken::from_jwt("not-a-jwt");
    /// assert!(token.expires_at.is_none());
    /// assert!(!token.is_expired());
    /// ```
    pub fn from_jwt(raw: impl Into<String>) -> Self {
        let access_token = raw.into();
        let expires_at = jwt_expiry(&access_token);
        Self {
            access_token,
            expires_at,
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }
}

fn jwt_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let payload = raw.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?;
    let secs = exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))?;
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds an unsigned JWT with the given claims.
    pub(crate) fn jwt(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_from_jwt_reads_exp() {
        let token = AccessToken::from_jwt(jwt(serde_json::json!({ "id": "a1", "exp": 4102444800i64 })));
        assert_eq!(
            token.expires_at,
            DateTime::from_timestamp(4_102_444_800, 0)
        );
        assert!(!token.is_expired());
    }

    #[test]
    fn test_from_jwt_past_exp_is_expired() {
        let token = AccessToken::from_jwt(jwt(serde_json::json!({ "exp": 1_000_000 })));
        assert!(token.is_expired());
    }

    #[test]
    fn test_from_jwt_fractional_exp() {
        let token = AccessToken::from_jwt(jwt(serde_json::json!({ "exp": 1_000_000.5 })));
        assert_eq!(token.expires_at, DateTime::from_timestamp(1_000_000, 0));
    }

    #[test]
    fn test_from_jwt_without_exp() {
        let token = AccessToken::from_jwt(jwt(serde_json::json!({ "id": "a1" })));
        assert!(token.expires_at.is_none());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_from_jwt_malformed() {
        for raw in ["", "abc", "a.!!!.c", "a.bm90IGpzb24.c"] {
            let token = AccessToken::from_jwt(raw);
            assert!(token.expires_at.is_none(), "{:?}", raw);
            assert_eq!(token.access_token, raw);
        }
    }
}
