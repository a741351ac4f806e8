//! Main AdminClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::auth::Session;
use crate::error::ApiError;
use crate::error::Error;

/// The client for the memorial admin REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks. It holds no token itself: each request asks the injected
/// [`Session`] for one.
///
/// # Example
///
/// ```ignore
/// use memorial_lib::AdminClient;
/// use memorial_lib::auth::Session;
///
/// let client = AdminClient::builder()
///     .url("https://api.example.com/api/v1")
///     .session(Session::in_memory())
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct AdminClient {
    pub(crate) inner: Arc<AdminClientInner>,
}

pub(crate) struct AdminClientInner {
    pub(crate) base_url: Url,
    pub(crate) session: Session,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
}

impl AdminClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> AdminClientBuilder<Missing, Missing> {
        AdminClientBuilder::new()
    }

    /// Returns the API root all resource paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the session this client authorizes requests with.
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Resolves a path relative to the API root.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

/// Parses the API root, making sure relative joins append to its path.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`AdminClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The API root, e.g. `https://api.example.com/api/v1`
/// - `session` - The [`Session`] holding the admin's token
pub struct AdminClientBuilder<U, S> {
    url: U,
    session: S,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl AdminClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            session: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for AdminClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> AdminClientBuilder<Missing, S> {
    /// Sets the API root URL.
    pub fn url(self, url: impl Into<String>) -> AdminClientBuilder<Set<String>, S> {
        AdminClientBuilder {
            url: Set(url.into()),
            session: self.session,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> AdminClientBuilder<U, Missing> {
    /// Sets the session used to authorize requests.
    pub fn session(self, session: Session) -> AdminClientBuilder<U, Set<Session>> {
        AdminClientBuilder {
            url: self.url,
            session: Set(session),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, S> AdminClientBuilder<U, S> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl AdminClientBuilder<Set<String>, Set<Session>> {
    /// Builds the [`AdminClient`].
    ///
    /// This method is only available when both `url` and `session` have been set.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the URL cannot serve as an API root
    /// and [`ApiError::Network`] if the HTTP client cannot be created.
    pub fn build(self) -> Result<AdminClient, Error> {
        let base_url = parse_base_url(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(AdminClient {
            inner: Arc::new(AdminClientInner {
                base_url,
                session: self.session.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> Result<AdminClient, Error> {
        AdminClient::builder()
            .url(url)
            .session(Session::in_memory())
            .build()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = client("https://api.example.com/api/v1").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.example.com/api/v1/");
        assert_eq!(
            client.endpoint("tributes").unwrap().as_str(),
            "https://api.example.com/api/v1/tributes"
        );
        assert_eq!(
            client.endpoint("/faqs/42").unwrap().as_str(),
            "https://api.example.com/api/v1/faqs/42"
        );
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(matches!(
            client("not a url"),
            Err(Error::Api(ApiError::InvalidUrl(_)))
        ));
        assert!(matches!(
            client("mailto:admin@example.com"),
            Err(Error::Api(ApiError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn test_builder_options() {
        let client = AdminClient::builder()
            .session(Session::in_memory())
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .url("http://localhost:3000/api/")
            .build()
            .unwrap();
        assert_eq!(client.inner.timeout, Some(Duration::from_secs(5)));
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/api/");
    }
}
