//! SQLite storage for the signed-in admin's session token.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use memorial_lib::auth::AccessToken;
use memorial_lib::auth::TokenStore;
use memorial_lib::error::AuthError;
use thiserror::Error;

/// Token store error type.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("invalid expiry timestamp: {0}")]
    InvalidExpiry(String),
}

impl From<TokenStoreError> for AuthError {
    fn from(err: TokenStoreError) -> Self {
        AuthError::Store(err.to_string())
    }
}

/// SQLite-backed token storage holding at most one session.
pub struct SqliteTokenStore {
    client: Client,
}

impl SqliteTokenStore {
    /// Open (or create) the token database at `path`.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, TokenStoreError> {
        let client = async_sqlite::ClientBuilder::new().path(path).open().await?;

        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS session (
                        id INTEGER PRIMARY KEY CHECK (id = 1),
                        access_token TEXT NOT NULL,
                        expires_at TEXT
                    )",
                    [],
                )
            })
            .await?;

        Ok(Self { client })
    }

    async fn load_token(&self) -> Result<Option<AccessToken>, TokenStoreError> {
        let row = self
            .client
            .conn(|conn| {
                let mut stmt = conn.prepare("SELECT access_token, expires_at FROM session WHERE id = 1")?;
                let mut rows = stmt.query([])?;
                match rows.next()? {
                    Some(row) => Ok(Some((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))),
                    None => Ok(None),
                }
            })
            .await?;

        let Some((access_token, expires_at)) = row else {
            return Ok(None);
        };
        let expires_at = match expires_at {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(&raw)
                    .map_err(|_| TokenStoreError::InvalidExpiry(raw.clone()))?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        Ok(Some(AccessToken {
            access_token,
            expires_at,
        }))
    }

    async fn save_token(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        let access_token = token.access_token.clone();
        let expires_at = token.expires_at.map(|e| e.to_rfc3339());

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO session (id, access_token, expires_at) VALUES (1, ?, ?)
                     ON CONFLICT(id) DO UPDATE SET
                        access_token = excluded.access_token,
                        expires_at = excluded.expires_at",
                    rusqlite::params![&access_token, &expires_at],
                )
            })
            .await?;
        Ok(())
    }

    async fn clear_token(&self) -> Result<(), TokenStoreError> {
        self.client
            .conn(|conn| conn.execute("DELETE FROM session", []))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn load(&self) -> Result<Option<AccessToken>, AuthError> {
        Ok(self.load_token().await?)
    }

    async fn save(&self, token: &AccessToken) -> Result<(), AuthError> {
        Ok(self.save_token(token).await?)
    }

    async fn clear(&self) -> Result<(), AuthError> {
        Ok(self.clear_token().await?)
    }
}

#[cfg(test)]
mod tests {
    use memorial_lib::auth::Session;

    use super::*;

    #[tokio::test]
    async fn test_token_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.db");
        let expires = DateTime::from_timestamp(4_102_444_800, 0).unwrap();

        let store = SqliteTokenStore::new(&path).await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        store.save(&AccessToken::new("first")).await.unwrap();
        store
            .save(&AccessToken::with_expiry("second", expires))
            .await
            .unwrap();
        drop(store);

        let store = SqliteTokenStore::new(&path).await.unwrap();
        assert_eq!(
            store.load().await.unwrap(),
            Some(AccessToken::with_expiry("second", expires))
        );

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_backs_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteTokenStore::new(dir.path().join("tokens.db")).await.unwrap();
        let session = Session::new(store);

        assert!(!session.is_signed_in().await);
        session.sign_in("opaque").await.unwrap();
        assert_eq!(session.bearer().await.unwrap().access_token, "opaque");
    }
}
