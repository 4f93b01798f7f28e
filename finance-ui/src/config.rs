//! Application configuration loaded from an optional TOML file.
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "finance.db"
//!
//! [logging]
//! level = "debug"
//! file = "finance.log"
//! console = true
//! ```
//!
//! Every key is optional. Command-line flags are applied on top with
//! [`AppConfig::apply`].

use std::fs;
use std::path::{Path, PathBuf};

use finance_core::StoreConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// The `[store]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "finance.db".to_string(),
        }
    }
}

/// The `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// A level name or any `EnvFilter` directive.
    pub level: String,
    pub file: Option<PathBuf>,
    /// Whether log records are echoed to stderr.
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub logging: LoggingConfig,
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<String>,
    pub db: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub quiet: bool,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn apply(
        &mut self,
        overrides: Overrides,
    ) {
        if let Some(backend) = overrides.backend {
            self.store.backend = backend;
        }
        if let Some(db) = overrides.db {
            self.store.connection_string = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(file) = overrides.log_file {
            self.logging.file = Some(file);
        }
        if overrides.quiet {
            self.logging.console = false;
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            backend: self.store.backend.clone(),
            connection_string: self.store.connection_string.clone(),
        }
    }
}
