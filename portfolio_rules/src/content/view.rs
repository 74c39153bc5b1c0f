//! Pure view operations over the content document.

use std::cmp::Ordering;

use super::{parse_iso, Project, Quest, QuestStatus};

/// Which quests the quest log shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestView {
    #[default]
    All,
    Status(QuestStatus),
}

impl QuestView {
    /// Parse a filter button value ("all", "future", "in_progress", "completed").
    pub fn from_key(key: &str) -> QuestView {
        match key {
            "future" => QuestView::Status(QuestStatus::Future),
            "in_progress" => QuestView::Status(QuestStatus::InProgress),
            "completed" => QuestView::Status(QuestStatus::Completed),
            _ => QuestView::All,
        }
    }

    fn admits(&self, quest: &Quest) -> bool {
        match self {
            QuestView::All => true,
            QuestView::Status(status) => quest.status == *status,
        }
    }
}

/// Quests for the quest log, filtered and ordered future, in progress, completed.
pub fn quests_for_view(quests: &[Quest], view: QuestView) -> Vec<&Quest> {
    let mut shown: Vec<_> = quests.iter().filter(|q| view.admits(q)).collect();
    shown.sort_by_key(|q| q.status.rank());
    shown
}

/// Quests attached to a project, oldest completion first, undated last.
pub fn quests_for_project<'a>(quests: &'a [Quest], project_id: &str) -> Vec<&'a Quest> {
    let mut attached: Vec<_> = quests
        .iter()
        .filter(|q| q.project_id.as_deref() == Some(project_id))
        .collect();
    attached.sort_by(|a, b| {
        let a = a.completed_on.as_deref().and_then(parse_iso);
        let b = b.completed_on.as_deref().and_then(parse_iso);
        match (a, b) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    attached
}

/// Projects with completed ones first; relative order is otherwise kept.
pub fn sort_by_completion(projects: &[Project]) -> Vec<&Project> {
    let mut sorted: Vec<_> = projects.iter().collect();
    sorted.sort_by_key(|p| if p.is_completed() { 0 } else { 1 });
    sorted
}

/// Sort order of the project grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSort {
    #[default]
    Featured,
    Difficulty,
    /// Keep document order.
    Unsorted,
}

impl ProjectSort {
    pub fn from_key(key: &str) -> ProjectSort {
        match key {
            "featured" => ProjectSort::Featured,
            "difficulty" => ProjectSort::Difficulty,
            _ => ProjectSort::Unsorted,
        }
    }
}

/// Filter and sort selection of the project grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    /// Project type to show, or "all".
    pub filter: String,
    pub sort: ProjectSort,
}

impl Default for ProjectView {
    fn default() -> Self {
        Self {
            filter: "all".to_string(),
            sort: ProjectSort::Featured,
        }
    }
}

/// Result of applying a [`ProjectView`]: sorted visible cards, then hidden ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectListing<'a> {
    pub visible: Vec<&'a Project>,
    pub hidden: Vec<&'a Project>,
}

/// Rank used by the difficulty sort (S highest).
pub fn difficulty_rank(difficulty: &str) -> u8 {
    match difficulty {
        "S" => 4,
        "A" => 3,
        "B" => 2,
        "C" => 1,
        _ => 0,
    }
}

/// Apply a filter and sort to the project grid.
pub fn apply_project_view<'a>(projects: &[&'a Project], view: &ProjectView) -> ProjectListing<'a> {
    let (mut visible, hidden): (Vec<&Project>, Vec<&Project>) = projects
        .iter()
        .copied()
        .partition(|p| view.filter == "all" || p.kind_or_default() == view.filter);

    match view.sort {
        ProjectSort::Featured => visible.sort_by_key(|p| !p.featured),
        ProjectSort::Difficulty => {
            visible.sort_by(|a, b| {
                difficulty_rank(b.difficulty_or_default()).cmp(&difficulty_rank(a.difficulty_or_default()))
            });
        }
        ProjectSort::Unsorted => {}
    }

    ProjectListing { visible, hidden }
}
