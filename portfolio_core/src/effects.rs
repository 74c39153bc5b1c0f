//! Effects - what the engines ask the presentation shell (or each other) to do.
//!
//! Engine operations never call into the host directly. They return an ordered
//! list of effects; the shell renders notifications, plays cues and redraws,
//! while [`Effect::Progress`] requests are routed back into the progression
//! engine by the session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portfolio_rules::Zone;

use crate::layout::LineSet;

/// Unique identifier for a notification, so the shell can track dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A toast notification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    /// How long the toast should stay up, in milliseconds.
    pub duration_ms: u64,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: NotificationId::new(),
            title: title.into(),
            body: body.into(),
            duration_ms,
        }
    }
}

/// Named audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Confirm,
}

/// What the HUD displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub level: u32,
    pub xp: u64,
    /// XP required to finish the current level.
    pub next: u64,
}

/// Requests for the progression engine raised by other engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressRequest {
    AwardXp { amount: i64, reason: String },
    Unlock(String),
    TrackVisit(Zone),
}

/// A single effect emitted by an engine operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Notify(Notification),
    PlayCue(Cue),
    RefreshHud(HudSnapshot),

    /// Replace the skill tree's line layer with this set.
    DrawLines(LineSet),

    /// Show a card's details in the perk panel.
    ShowPerk { title: String, items: Vec<String> },
    /// Reset the perk panel to its placeholder.
    ClearPerk,

    /// Ask for the interactive surface to be revealed (subject to the intro gate).
    RevealRequested { skip_auto_scroll: bool },
    /// Reveal the interactive surface.
    RevealSurface,
    ScrollTo(Zone),

    Progress(ProgressRequest),

    /// The stored record was cleared; the host should restart.
    RestartRequested,
}

impl Effect {
    /// Shorthand for a notification effect.
    pub fn notify(title: impl Into<String>, body: impl Into<String>, duration_ms: u64) -> Self {
        Effect::Notify(Notification::new(title, body, duration_ms))
    }

    pub fn award_xp(amount: i64, reason: impl Into<String>) -> Self {
        Effect::Progress(ProgressRequest::AwardXp {
            amount,
            reason: reason.into(),
        })
    }

    pub fn unlock(id: impl Into<String>) -> Self {
        Effect::Progress(ProgressRequest::Unlock(id.into()))
    }

    /// The notification carried by this effect, if any.
    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            Effect::Notify(n) => Some(n),
            _ => None,
        }
    }
}

/// Titles of every notification in an effect list, in order.
pub fn notification_titles(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(Effect::as_notification)
        .map(|n| n.title.as_str())
        .collect()
}
