pub mod in_memory;
pub mod json_file;

use crate::core::errors::LedgerError;
use async_trait::async_trait;

/// Durable string values addressed by string keys. Last write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;
    async fn set(&self, key: &str, value: String) -> Result<(), LedgerError>;
    async fn remove(&self, keys: &[&str]) -> Result<(), LedgerError>;
}

/// Store chosen at runtime.
pub type SharedStore = std::sync::Arc<dyn KeyValueStore>;

#[async_trait]
impl KeyValueStore for SharedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), LedgerError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), LedgerError> {
        (**self).remove(keys).await
    }
}
