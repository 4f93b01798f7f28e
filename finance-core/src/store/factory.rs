//! Selecting a storage backend by name at startup.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::repository::{KeyValueStore, StoreError};

/// Which backend to open and what to hand it.
///
/// `connection_string` is only interpreted by the backend: a file path or
/// `:memory:` for `sqlite`, ignored by `memory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }
}

/// Opens one kind of store.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Name matched against [`StoreConfig::backend`].
    fn backend_name(&self) -> &'static str;

    /// Returns a store that is ready for reads and writes; schema setup
    /// happens here.
    async fn create(&self, config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError>;
}

/// The backends compiled into the binary.
#[derive(Default)]
pub struct StoreRegistry {
    factories: BTreeMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`. A factory registered earlier under the same name is
    /// dropped.
    pub fn register(&mut self, factory: Box<dyn StoreFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the backend named by `config`.
    ///
    /// An unregistered name is a [`StoreError::Configuration`] listing the
    /// names that would have worked. Factory errors are passed through.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(StoreError::Configuration(format!(
                "unknown backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        debug!(backend = factory.backend_name(), "opening store");
        factory.create(config).await
    }
}
