//! Canonical content zones of the portfolio.

use serde::{Deserialize, Serialize};

/// One of the four canonical content sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    About,
    Projects,
    Skills,
    Contact,
}

impl Zone {
    /// All zones, in navigation order.
    pub const ALL: [Zone; 4] = [Zone::About, Zone::Projects, Zone::Skills, Zone::Contact];

    /// The section id used by the host surface.
    pub fn id(&self) -> &'static str {
        match self {
            Zone::About => "about",
            Zone::Projects => "projects",
            Zone::Skills => "skills",
            Zone::Contact => "contact",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Zone::About => "About",
            Zone::Projects => "Projects",
            Zone::Skills => "Skills",
            Zone::Contact => "Contact",
        }
    }

    /// Parse a section id. Unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Zone> {
        Zone::ALL.into_iter().find(|zone| zone.id() == id)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
