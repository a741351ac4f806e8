//! Persisted console settings.
//!
//! Values are bincode-encoded and stored by key through a [`SettingsBackend`].

mod backend;
mod sqlite;

pub use backend::SettingsBackend;
#[cfg(test)]
pub(crate) use backend::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use memorial_grid::DEFAULT_PAGE_SIZE;
use memorial_grid::DEFAULT_PAGE_SIZE_OPTIONS;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Stored API root.
pub const API_BASE_URL: &str = "api.base_url";
/// Stored page size of the list screens.
pub const GRID_PAGE_SIZE: &str = "grid.page_size";
/// Stored language for localized names.
pub const UI_LANGUAGE: &str = "ui.language";

/// Environment variable overriding the stored API root.
pub const API_URL_ENV: &str = "MEMORIAL_API_URL";

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/v1";
const DEFAULT_LANGUAGE: &str = "en";

/// Settings error type.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}

/// Typed access to the settings store. Cheap to clone.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Reads `key`, `None` if it was never written.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        match self.backend.read(key).await? {
            Some(bytes) => Ok(Some(
                bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    pub async fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, SettingsError> {
        Ok(self.get(key).await?.unwrap_or(default))
    }

    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.write(key, bytes).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key).await
    }
}

/// Console settings resolved at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub api_base_url: String,
    pub page_size: u32,
    pub language: String,
}

impl ConsoleSettings {
    /// Loads the settings, applying `env_url` over the stored API root.
    ///
    /// An override is written back so the next start uses it without the
    /// variable.
    pub async fn load(
        settings: &SettingsProvider,
        env_url: Option<String>,
    ) -> Result<Self, SettingsError> {
        let api_base_url = match env_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                log::info!("Using API root from {}: {}", API_URL_ENV, url);
                settings.set(API_BASE_URL, &url).await?;
                url
            }
            None => {
                settings
                    .get_or(API_BASE_URL, DEFAULT_API_BASE_URL.to_string())
                    .await?
            }
        };

        let mut page_size = settings.get_or(GRID_PAGE_SIZE, DEFAULT_PAGE_SIZE).await?;
        if !DEFAULT_PAGE_SIZE_OPTIONS.contains(&page_size) {
            log::warn!("Dropping stored page size {}", page_size);
            settings.delete(GRID_PAGE_SIZE).await?;
            page_size = DEFAULT_PAGE_SIZE;
        }

        Ok(Self {
            api_base_url,
            page_size,
            language: settings.get_or(UI_LANGUAGE, DEFAULT_LANGUAGE.to_string()).await?,
        })
    }
}
