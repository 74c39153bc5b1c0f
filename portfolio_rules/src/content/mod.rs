//! Content document - projects and quests loaded from the static data file.
//!
//! The engines never depend on this document; it only feeds the card and
//! quest renderers. Every field is defaulted so partial documents decode.

mod format;
mod view;

pub use format::*;
pub use view::*;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Status of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Future,
    #[default]
    InProgress,
    Completed,
    /// Any status string this version does not know.
    #[serde(other)]
    Other,
}

impl QuestStatus {
    /// Ordering used by the quest log: future, then in progress, then the rest.
    pub fn rank(&self) -> u8 {
        match self {
            QuestStatus::Future => 0,
            QuestStatus::InProgress => 1,
            QuestStatus::Completed | QuestStatus::Other => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestStatus::Completed => "Completed",
            QuestStatus::Future => "Future",
            QuestStatus::InProgress | QuestStatus::Other => "In Progress",
        }
    }
}

/// An entry of the quest log.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub status: QuestStatus,
    pub project_id: Option<String>,
    pub completed_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub github: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectImages {
    pub preview: Option<String>,
    pub gallery: Vec<String>,
}

/// A project card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub difficulty: Option<String>,
    pub boss: Option<String>,
    pub status: Option<String>,
    pub tags: Vec<String>,
    pub last_updated: Option<String>,
    /// `owner/name` of the repository used for "last updated" enrichment.
    pub repo: Option<String>,
    pub quest_id: Option<String>,
    pub featured: bool,
    pub links: ProjectLinks,
    pub images: ProjectImages,
}

impl Project {
    pub fn kind_or_default(&self) -> &str {
        self.kind.as_deref().unwrap_or("all")
    }

    pub fn difficulty_or_default(&self) -> &str {
        self.difficulty.as_deref().unwrap_or("B")
    }

    pub fn boss_or_default(&self) -> &str {
        self.boss.as_deref().unwrap_or("Polish")
    }

    pub fn is_completed(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("completed"))
            .unwrap_or(false)
    }
}

/// The whole content document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioContent {
    pub projects: Vec<Project>,
    pub quests: Vec<Quest>,
}

impl PortfolioContent {
    /// Decode the content document.
    pub fn from_json(raw: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Decode a fetched document, yielding an empty one when the fetch
    /// produced nothing or the payload is malformed.
    pub fn from_fetch(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            tracing::warn!("Portfolio content unavailable, rendering without it");
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Portfolio content is malformed, rendering without it: {}", e);
                Self::default()
            }
        }
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}
