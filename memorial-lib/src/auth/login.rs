//! Email and password sign-in

use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;

use super::AccessToken;
use crate::AdminClient;
use crate::api::read_json;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;

/// Admin login credentials.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken")]
    token: String,
}

impl AdminClient {
    /// Signs in with email and password.
    ///
    /// Posts the credentials to `auth/login`, stores the returned token in the
    /// client's session and returns it.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the API answers `400` or `401`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, Error> {
        let url = self.endpoint("auth/login")?;
        let body = serde_json::to_string(&Credentials::new(email, password))?;

        let response = match self.send(Method::POST, url, Some(body), None).await {
            Ok(response) => response,
            Err(Error::Api(ApiError::Http { status: 400 | 401, message })) => {
                log::warn!("Login rejected for {}: {}", email, message);
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let body = read_json(response).await?;
        let login: LoginResponse = serde_json::from_value(body)
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        Ok(self.inner.session.sign_in(login.token).await?)
    }

    /// Forgets the session token.
    pub async fn logout(&self) -> Result<(), Error> {
        Ok(self.inner.session.sign_out().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("a@b.c", "hunter2"));
        assert!(debug.contains("a@b.c"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_login_response_aliases() {
        let a: LoginResponse = serde_json::from_str(r#"{"token":"t1"}"#).unwrap();
        let b: LoginResponse = serde_json::from_str(r#"{"accessToken":"t2","admin":{}}"#).unwrap();
        assert_eq!(a.token, "t1");
        assert_eq!(b.token, "t2");
    }
}
