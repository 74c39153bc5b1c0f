//! Error types for the engines and their collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the persistent store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while loading engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failures of the remote "last updated" enrichment.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("repository metadata request failed: {0}")]
    Request(String),

    #[error("repository metadata has no push timestamp")]
    MissingPushedAt,

    #[error("malformed repository metadata: {0}")]
    Json(#[from] serde_json::Error),
}
