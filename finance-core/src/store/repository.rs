use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Narrow string-keyed storage shared by the calculator screens.
///
/// Each call is all-or-nothing. Reading a key that was never written gives
/// `None`, not an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    // Single values
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError>;

    // Ordered lists; a write replaces the whole list
    async fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, StoreError>;
    async fn set_string_list(&self, key: &str, values: &[String]) -> Result<(), StoreError>;
}
