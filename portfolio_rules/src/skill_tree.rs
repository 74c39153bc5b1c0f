//! Skill graph - a root, its branches, and the cards under each branch.
//!
//! The graph is a fixed three-level tree (root, branch, card). Cards own their
//! items and do not outlive their branch.

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Identifier of a branch (e.g. "frontend").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchId(pub String);

impl BranchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A grouped cluster of items under a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

/// A top-level category of the skill graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub label: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// The complete skill graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGraph {
    pub title: String,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl SkillGraph {
    /// Decode a skill graph document.
    pub fn from_json(raw: &str) -> Result<Self, RulesError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Find a branch by id.
    pub fn branch(&self, id: &BranchId) -> Option<&Branch> {
        self.branches.iter().find(|b| &b.id == id)
    }

    /// Whether a branch with this id exists.
    pub fn has_branch(&self, id: &BranchId) -> bool {
        self.branch(id).is_some()
    }

    /// Resolve a card by branch and position.
    pub fn card(&self, branch: &BranchId, index: usize) -> Option<&Card> {
        self.branch(branch)?.cards.get(index)
    }

    /// Iterate branch ids in display order.
    pub fn branch_ids(&self) -> impl Iterator<Item = &BranchId> {
        self.branches.iter().map(|b| &b.id)
    }

    /// The portfolio's own skill graph.
    pub fn portfolio() -> Self {
        fn card(title: &str, items: &[&str]) -> Card {
            Card {
                title: title.to_string(),
                items: items.iter().map(|s| s.to_string()).collect(),
            }
        }

        fn branch(id: &str, label: &str, cards: Vec<Card>) -> Branch {
            Branch {
                id: BranchId::new(id),
                label: label.to_string(),
                cards,
            }
        }

        Self {
            title: "SOFTWARE ENGINEER".to_string(),
            branches: vec![
                branch(
                    "frontend",
                    "FRONTEND",
                    vec![
                        card("LANGUAGES", &["TypeScript", "JavaScript", "HTML", "CSS"]),
                        card("FRAMEWORKS", &["Angular (v15–19)", "React"]),
                        card("UI + UX", &["Scalable UI design", "UX polish", "Responsive layout"]),
                    ],
                ),
                branch(
                    "backend",
                    "BACKEND",
                    vec![
                        card("CORE", &["Java", "Python", "Spring Boot", "REST APIs"]),
                        card("SERVER UI", &["Thymeleaf"]),
                        card("RUNTIME", &["Node.js", "npm"]),
                        card(
                            "QUALITY",
                            &["Input validation", "Test planning / execution / reporting"],
                        ),
                        card("ARCHITECTURE", &["OOP", "MVC/MVVM", "Repository pattern"]),
                    ],
                ),
                branch(
                    "database",
                    "DATABASE",
                    vec![
                        card("RDBMS", &["MySQL", "SQL"]),
                        card("MOBILE DATA", &["SQLite", "Room ORM", "Room DAOs"]),
                        card("PATTERNS", &["Repository pattern", "Entity relationships"]),
                        card(
                            "SECURITY",
                            &["Parameterized queries (SQL injection prevention)"],
                        ),
                        card("MODELING", &["Data modeling", "Schema design", "Indexing basics"]),
                    ],
                ),
                branch(
                    "devops",
                    "DEVOPS",
                    vec![
                        card("CONTAINERS", &["Docker", "Containerization"]),
                        card("CI/CD", &["GitLab CI/CD"]),
                        card("APIS", &["World Bank API", "REST APIs", "Internationalization"]),
                        card("FORMATTING", &["Currency + time zone formatting"]),
                        card(
                            "TOOLS",
                            &["Postman", "Git/GitLab", "VS Code", "IntelliJ", "PyCharm"],
                        ),
                        card("AI TOOLS", &["GitHub Copilot", "ChatGPT"]),
                    ],
                ),
                branch(
                    "mobile",
                    "MOBILE",
                    vec![
                        card(
                            "PLATFORM",
                            &["Android Studio", "Android SDK (API 26+ / Android 8.0+)"],
                        ),
                        card(
                            "UI",
                            &["XML layouts", "Material components", "RecyclerView + Adapters"],
                        ),
                        card(
                            "SYSTEM",
                            &["Intents (explicit/implicit)", "Notifications", "AlarmManager"],
                        ),
                        card("BUILD", &["Gradle", "APK generation", "AAB signing"]),
                        card("RELEASE", &["Google Play Console (deployment)"]),
                    ],
                ),
            ],
        }
    }
}

impl Default for SkillGraph {
    fn default() -> Self {
        Self::portfolio()
    }
}
