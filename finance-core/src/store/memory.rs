//! Process-local store. Nothing survives the process; used for tests and
//! when no persistent backend is configured.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::trace;

use super::factory::{StoreConfig, StoreFactory};
use super::repository::{KeyValueStore, StoreError};

#[derive(Debug, Default)]
struct Entries {
    strings: HashMap<String, String>,
    lists: HashMap<String, Vec<String>>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().strings.get(key).cloned())
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        trace!(key, value, "memory store write");
        self.entries()
            .strings
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>, StoreError> {
        Ok(self.entries().lists.get(key).cloned())
    }

    async fn set_string_list(&self, key: &str, values: &[String]) -> Result<(), StoreError> {
        trace!(key, len = values.len(), "memory store list write");
        self.entries()
            .lists
            .insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

/// [`StoreFactory`] for the `"memory"` backend. Every call to `create`
/// returns a new, empty store.
pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, _config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        Ok(Arc::new(MemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn missing_keys_read_as_none() {
        let store = MemoryStore::new();

        assert_eq!(store.get_string("compound_present").await, Ok(None));
        assert_eq!(store.get_string_list("MortgageHistory").await, Ok(None));
    }

    #[tokio::test]
    async fn set_string_overwrites() {
        let store = MemoryStore::new();

        store.set_string("mortgage_amount", "1").await.unwrap();
        store.set_string("mortgage_amount", "12").await.unwrap();

        assert_eq!(
            store.get_string("mortgage_amount").await,
            Ok(Some("12".to_string()))
        );
    }

    #[tokio::test]
    async fn set_string_list_replaces_whole_list() {
        let store = MemoryStore::new();
        let first = vec!["a".to_string(), "b".to_string()];
        let second = vec!["c".to_string()];

        store.set_string_list("history", &first).await.unwrap();
        store.set_string_list("history", &second).await.unwrap();

        assert_eq!(store.get_string_list("history").await, Ok(Some(second)));
    }

    #[tokio::test]
    async fn strings_and_lists_live_in_separate_namespaces() {
        let store = MemoryStore::new();

        store.set_string("key", "value").await.unwrap();

        assert_eq!(store.get_string_list("key").await, Ok(None));
    }

    #[tokio::test]
    async fn factory_creates_independent_stores() {
        let factory = MemoryStoreFactory;
        let config = StoreConfig::default();

        let a = factory.create(&config).await.unwrap();
        let b = factory.create(&config).await.unwrap();
        a.set_string("k", "v").await.unwrap();

        assert_eq!(b.get_string("k").await, Ok(None));
    }
}
