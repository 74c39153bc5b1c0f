//! Remote "last updated" enrichment of project cards.
//!
//! Best effort: any failure keeps the value precomputed from the content
//! document.

use serde::{Deserialize, Serialize};

use portfolio_rules::{format_date, Project};

use crate::error::EnrichmentError;

/// Text shown while a repository lookup is pending.
pub const LOADING: &str = "Loading…";

/// Fetches repository metadata as raw JSON.
pub trait RepoMetadataSource {
    /// `repo` is an `owner/name` slug.
    fn fetch_repo(&self, repo: &str) -> Result<String, EnrichmentError>;
}

/// A project's rendered "last updated" value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUpdated {
    pub display: String,
    /// Machine-readable timestamp, when one is known.
    pub datetime: Option<String>,
}

impl LastUpdated {
    pub fn from_timestamp(timestamp: &str) -> Self {
        Self {
            display: format_date(Some(timestamp)),
            datetime: Some(timestamp.to_string()),
        }
    }
}

/// Extract the push timestamp from a repository metadata document.
pub fn parse_pushed_at(body: &str) -> Result<String, EnrichmentError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    value
        .get("pushed_at")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(EnrichmentError::MissingPushedAt)
}

/// The value derived from the content document alone.
pub fn fallback_last_updated(project: &Project) -> LastUpdated {
    LastUpdated {
        display: format_date(project.last_updated.as_deref()),
        datetime: project.last_updated.clone(),
    }
}

/// What to render before enrichment finishes.
pub fn initial_last_updated(project: &Project) -> LastUpdated {
    if project.repo.is_some() {
        LastUpdated {
            display: LOADING.to_string(),
            datetime: project.last_updated.clone(),
        }
    } else {
        fallback_last_updated(project)
    }
}

/// Look up the repository's latest push, falling back on any failure.
pub fn enrich_last_updated(project: &Project, source: &dyn RepoMetadataSource) -> LastUpdated {
    let Some(repo) = project.repo.as_deref().filter(|r| !r.is_empty()) else {
        return fallback_last_updated(project);
    };

    match source.fetch_repo(repo).and_then(|body| parse_pushed_at(&body)) {
        Ok(pushed_at) => LastUpdated::from_timestamp(&pushed_at),
        Err(e) => {
            tracing::warn!("Using fallback date for {}: {}", repo, e);
            fallback_last_updated(project)
        }
    }
}
