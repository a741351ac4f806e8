//! Session context and token storage

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AccessToken;
use crate::error::AuthError;

/// Persists the signed-in admin's token.
///
/// Implementations decide where the token lives: in memory for tests and
/// short-lived tools, on disk for the console.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the stored token, if any.
    async fn load(&self) -> Result<Option<AccessToken>, AuthError>;

    /// Replaces the stored token.
    async fn save(&self, token: &AccessToken) -> Result<(), AuthError>;

    /// Removes the stored token.
    async fn clear(&self) -> Result<(), AuthError>;
}

/// A token store that keeps the token in process memory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `token`.
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<AccessToken>, AuthError> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &AccessToken) -> Result<(), AuthError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AuthError> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// The signed-in admin's session.
///
/// Cheap to clone. The client reads the bearer token through the session on
/// every request, so signing in or out is visible to all clones at once.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    /// Creates a session backed by `store`.
    pub fn new<S: TokenStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a session backed by a shared store.
    pub fn from_store(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Creates a session with an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore::new())
    }

    /// Returns the token to authorize a request with.
    ///
    /// # Errors
    ///
    /// [`AuthError::NotSignedIn`] if no token is stored and
    /// [`AuthError::TokenExpired`] if its `exp` claim has passed.
    pub async fn bearer(&self) -> Result<AccessToken, AuthError> {
        let Some(token) = self.store.load().await? else {
            return Err(AuthError::NotSignedIn);
        };
        match token.expires_at {
            Some(expired_at) if token.is_expired() => Err(AuthError::TokenExpired { expired_at }),
            _ => Ok(token),
        }
    }

    /// Stores a raw token returned by the login endpoint.
    pub async fn sign_in(&self, raw: impl Into<String>) -> Result<AccessToken, AuthError> {
        let token = AccessToken::from_jwt(raw);
        self.store.save(&token).await?;
        log::info!("Signed in, token expires at {:?}", token.expires_at);
        Ok(token)
    }

    /// Forgets the stored token.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.store.clear().await?;
        log::info!("Signed out");
        Ok(())
    }

    /// Returns `true` if a usable token is stored.
    pub async fn is_signed_in(&self) -> bool {
        self.bearer().await.is_ok()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
