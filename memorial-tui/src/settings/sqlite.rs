//! SQLite settings storage.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::SettingsBackend;
use super::SettingsError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS console_settings (
    name TEXT PRIMARY KEY,
    value BLOB NOT NULL,
    updated_at TEXT NOT NULL
)";

/// Settings table in a SQLite file. Reads are served from a cache once a key
/// has been seen.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let client = async_sqlite::ClientBuilder::new().path(path).open().await?;
        client.conn(|conn| conn.execute(SCHEMA, [])).await?;
        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(cached) = self.cache.get(key) {
            return Ok(Some(cached.clone()));
        }

        let name = key.to_string();
        let stored: Option<Vec<u8>> = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM console_settings WHERE name = ?1")?;
                let mut rows = stmt.query([&name])?;
                rows.next()?.map(|row| row.get(0)).transpose()
            })
            .await?;

        if let Some(value) = &stored {
            self.cache.insert(key.to_string(), value.clone());
        }
        Ok(stored)
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let name = key.to_string();
        let bytes = value.clone();
        let updated_at = Utc::now().to_rfc3339();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO console_settings (name, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    rusqlite::params![name, bytes, updated_at],
                )
            })
            .await?;

        log::debug!("Saved setting {}", key);
        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let name = key.to_string();
        self.client
            .conn(move |conn| conn.execute("DELETE FROM console_settings WHERE name = ?1", [name]))
            .await?;
        self.cache.remove(key);
        Ok(())
    }
}
