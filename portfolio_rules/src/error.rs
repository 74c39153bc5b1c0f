//! Errors raised while building rulebook data.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("level table must contain at least one threshold")]
    EmptyLevelTable,

    #[error("level threshold for level {level} must be positive")]
    ZeroThreshold { level: u32 },

    #[error("level threshold for level {level} ({value}) is below the previous one ({previous})")]
    NonMonotonicThreshold { level: u32, value: u64, previous: u64 },

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}
