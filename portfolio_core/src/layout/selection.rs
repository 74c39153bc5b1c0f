//! Selection state of the skill tree.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use portfolio_rules::BranchId;

/// Filter key that selects every branch at once.
pub const AGGREGATE_FILTER_KEY: &str = "fullstack";

/// The single active filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActiveFilter {
    Branch(BranchId),
    /// Every branch.
    Aggregate,
}

impl ActiveFilter {
    /// Parse a planner filter key; the aggregate key selects every branch.
    pub fn from_key(key: &str) -> Self {
        if key == AGGREGATE_FILTER_KEY {
            ActiveFilter::Aggregate
        } else {
            ActiveFilter::Branch(BranchId::new(key))
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ActiveFilter::Branch(id) => id.as_str(),
            ActiveFilter::Aggregate => AGGREGATE_FILTER_KEY,
        }
    }
}

/// Which branches are highlighted.
///
/// The active filter and the tracked set contribute independently: a branch
/// is highlighted when either selects it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub active_filter: Option<ActiveFilter>,
    pub tracked: BTreeSet<BranchId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pristine(&self) -> bool {
        self.active_filter.is_none() && self.tracked.is_empty()
    }

    /// Flip a branch's tracked flag, returning whether it is now tracked.
    pub fn toggle_tracked(&mut self, branch: &BranchId) -> bool {
        if self.tracked.remove(branch) {
            false
        } else {
            self.tracked.insert(branch.clone());
            true
        }
    }

    pub fn is_tracked(&self, branch: &BranchId) -> bool {
        self.tracked.contains(branch)
    }

    pub fn is_branch_highlighted(&self, branch: &BranchId) -> bool {
        let by_filter = match &self.active_filter {
            Some(ActiveFilter::Aggregate) => true,
            Some(ActiveFilter::Branch(id)) => id == branch,
            None => false,
        };
        by_filter || self.is_tracked(branch)
    }

    pub fn clear(&mut self) {
        self.active_filter = None;
        self.tracked.clear();
    }
}
