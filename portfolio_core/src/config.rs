//! Engine configuration, read from TOML.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::LayoutConfig;
use crate::orbit::OrbitConfig;
use crate::progression::ProgressionConfig;
use crate::store::{FileStore, MemoryStore, ProgressStore, STORAGE_KEY};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub progression: ProgressionConfig,
    pub layout: LayoutConfig,
    pub orbit: OrbitConfig,
    pub storage: StorageConfig,
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Where the progression record lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub key: String,
    /// Directory for the record file. Without one, progress only lasts the session.
    pub dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: STORAGE_KEY.to_string(),
            dir: None,
        }
    }
}

impl StorageConfig {
    pub fn open_store(&self) -> Box<dyn ProgressStore> {
        match &self.dir {
            Some(dir) => Box::new(FileStore::new(dir, &self.key)),
            None => {
                tracing::info!("No storage directory configured, keeping progress in memory");
                Box::new(MemoryStore::new())
            }
        }
    }
}
