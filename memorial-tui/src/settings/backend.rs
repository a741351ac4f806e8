use async_trait::async_trait;

use super::SettingsError;

/// Byte-level storage under the typed [`SettingsProvider`](super::SettingsProvider).
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Inserts or replaces the value of `key`.
    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}

/// Process-local backend for tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryBackend {
    values: dashmap::DashMap<String, Vec<u8>>,
}

#[cfg(test)]
#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        Ok(self.values.get(key).map(|v| v.clone()))
    }

    async fn write(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.values.remove(key);
        Ok(())
    }
}
