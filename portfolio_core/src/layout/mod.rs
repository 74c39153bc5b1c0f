//! Graph Layout Engine - skill tree selection and connecting lines.
//!
//! Lines are recomputed from scratch out of the current [`SelectionState`]
//! and whatever the [`GeometrySource`] reports. Nothing is cached between
//! calls, so the same inputs always produce the same [`LineSet`].

mod geometry_source;
mod lines;
mod selection;

pub use geometry_source::*;
pub use lines::*;
pub use selection::*;

use serde::{Deserialize, Serialize};

use portfolio_rules::{BranchId, Point, SkillGraph, SKILL_PERK_SELECTED};

use crate::effects::{Cue, Effect};

/// Planner key that clears the whole selection.
pub const PLANNER_RESET_KEY: &str = "reset";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Radius of a category marker's dot.
    pub marker_radius: f64,
    /// Radius of a card's dot.
    pub card_radius: f64,
    /// Clearance kept between a line end and a dot.
    pub gap: f64,
    /// Where on a card's width its leader line ends.
    pub card_anchor_fraction: f64,
    /// XP awarded for inspecting a card.
    pub perk_xp: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            marker_radius: 4.0,
            card_radius: 3.0,
            gap: 8.0,
            card_anchor_fraction: 0.15,
            perk_xp: 8,
        }
    }
}

/// A card by branch and position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRef {
    pub branch: BranchId,
    pub index: usize,
}

pub struct GraphLayoutEngine {
    graph: SkillGraph,
    selection: SelectionState,
    last_inspected: Option<CardRef>,
    config: LayoutConfig,
}

impl GraphLayoutEngine {
    pub fn new(graph: SkillGraph, config: LayoutConfig) -> Self {
        Self {
            graph,
            selection: SelectionState::default(),
            last_inspected: None,
            config,
        }
    }

    pub fn graph(&self) -> &SkillGraph {
        &self.graph
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn last_inspected(&self) -> Option<&CardRef> {
        self.last_inspected.as_ref()
    }

    /// Whether any branch is selected, by filter or by tracking.
    pub fn is_filtering(&self) -> bool {
        !self.selection.is_pristine()
    }

    pub fn is_tracked(&self, branch: &BranchId) -> bool {
        self.selection.is_tracked(branch)
    }

    pub fn is_branch_highlighted(&self, branch: &BranchId) -> bool {
        self.selection.is_branch_highlighted(branch)
    }

    pub fn is_card_highlighted(&self, branch: &BranchId, index: usize) -> bool {
        self.is_branch_highlighted(branch)
            || self
                .last_inspected
                .as_ref()
                .is_some_and(|card| &card.branch == branch && card.index == index)
    }

    /// Replace the active filter, or clear it with `None`.
    ///
    /// Filters naming a branch the graph does not have are ignored.
    pub fn set_active_filter(
        &mut self,
        filter: Option<ActiveFilter>,
        geometry: &dyn GeometrySource,
    ) -> Vec<Effect> {
        if let Some(ActiveFilter::Branch(id)) = &filter {
            if !self.graph.has_branch(id) {
                tracing::debug!("Ignoring filter on unknown branch '{}'", id);
                return Vec::new();
            }
        }
        self.selection.active_filter = filter;
        vec![Effect::DrawLines(self.recompute_layout(geometry))]
    }

    /// Flip a branch's tracked flag. Unknown branches are ignored.
    pub fn toggle_tracked(&mut self, branch: &BranchId, geometry: &dyn GeometrySource) -> Vec<Effect> {
        if !self.graph.has_branch(branch) {
            tracing::debug!("Ignoring tracking of unknown branch '{}'", branch);
            return Vec::new();
        }
        let tracked = self.selection.toggle_tracked(branch);
        tracing::debug!("Branch '{}' tracked: {}", branch, tracked);
        vec![Effect::DrawLines(self.recompute_layout(geometry))]
    }

    /// Clear the filter, the tracked set and the inspected card.
    pub fn reset_selection(&mut self, geometry: &dyn GeometrySource) -> Vec<Effect> {
        self.selection.clear();
        self.last_inspected = None;
        vec![
            Effect::ClearPerk,
            Effect::DrawLines(self.recompute_layout(geometry)),
        ]
    }

    /// Apply a planner button: a branch id, the aggregate key, or reset.
    pub fn select_planner(&mut self, key: &str, geometry: &dyn GeometrySource) -> Vec<Effect> {
        if key == PLANNER_RESET_KEY {
            self.reset_selection(geometry)
        } else {
            self.set_active_filter(Some(ActiveFilter::from_key(key)), geometry)
        }
    }

    /// Show a card's details and focus its branch.
    ///
    /// Cards that do not exist are ignored. Otherwise the card becomes the
    /// last inspected one, its branch becomes the active filter, and the perk
    /// reward is requested from the progression engine.
    pub fn inspect_card(
        &mut self,
        branch: &BranchId,
        index: usize,
        geometry: &dyn GeometrySource,
    ) -> Vec<Effect> {
        let Some(card) = self.graph.card(branch, index) else {
            tracing::debug!("Ignoring inspection of missing card {}#{}", branch, index);
            return Vec::new();
        };
        let perk = Effect::ShowPerk {
            title: card.title.clone(),
            items: card.items.clone(),
        };

        self.last_inspected = Some(CardRef {
            branch: branch.clone(),
            index,
        });
        self.selection.active_filter = Some(ActiveFilter::Branch(branch.clone()));

        vec![
            perk,
            Effect::DrawLines(self.recompute_layout(geometry)),
            Effect::award_xp(self.config.perk_xp, "Selected perk"),
            Effect::PlayCue(Cue::Confirm),
            Effect::unlock(SKILL_PERK_SELECTED),
        ]
    }

    /// Compute every line of the tree from current geometry.
    ///
    /// A missing or zero-size canvas, or a missing root, yields an empty set.
    /// Branches without a rendered marker and cards without a rendered
    /// rectangle are skipped.
    pub fn recompute_layout(&self, geometry: &dyn GeometrySource) -> LineSet {
        let canvas = match geometry.rect(&NodeHandle::Canvas) {
            Some(canvas) if !canvas.is_empty() => canvas,
            _ => {
                tracing::debug!("Skipping layout, canvas has no area");
                return LineSet::empty();
            }
        };
        let Some(root) = geometry.rect(&NodeHandle::Root) else {
            tracing::debug!("Skipping layout, root is not rendered");
            return LineSet::empty();
        };

        let origin = canvas.origin();
        let anchor = root.bottom_center().relative_to(origin);
        let card_clearance = self.config.card_radius + self.config.gap;
        let marker_clearance = self.config.marker_radius + self.config.gap;

        let mut lines = Vec::new();
        for branch in &self.graph.branches {
            let Some(marker) = geometry.rect(&NodeHandle::marker(&branch.id)) else {
                continue;
            };
            let top = marker.top_center().relative_to(origin);
            let highlighted = self.is_branch_highlighted(&branch.id);

            lines.push(LinePrimitive {
                kind: LineKind::Trunk,
                from: anchor,
                to: top,
                emphasis: Emphasis::from_highlight(highlighted),
            });

            let mut points: Vec<(usize, Point)> = (0..branch.cards.len())
                .filter_map(|index| {
                    let rect = geometry.rect(&NodeHandle::card(&branch.id, index))?;
                    Some((
                        index,
                        rect.left_anchor(self.config.card_anchor_fraction)
                            .relative_to(origin),
                    ))
                })
                .collect();
            points.sort_by(|a, b| a.1.y.total_cmp(&b.1.y));

            let spine_x = top.x;
            let mut prev_y = top.y;
            for (i, (index, point)) in points.iter().enumerate() {
                let start = if i == 0 { marker_clearance } else { card_clearance };
                let y1 = prev_y + start;
                let y2 = point.y - card_clearance;
                if y2 > y1 {
                    lines.push(LinePrimitive {
                        kind: LineKind::Spine,
                        from: Point::new(spine_x, y1),
                        to: Point::new(spine_x, y2),
                        emphasis: Emphasis::Normal,
                    });
                }

                let x2 = point.x - card_clearance;
                if x2 > spine_x {
                    lines.push(LinePrimitive {
                        kind: LineKind::Leader,
                        from: Point::new(spine_x, point.y),
                        to: Point::new(x2, point.y),
                        emphasis: Emphasis::from_highlight(
                            self.is_card_highlighted(&branch.id, *index),
                        ),
                    });
                }

                prev_y = point.y;
            }
        }

        LineSet {
            size: canvas.size(),
            lines,
        }
    }
}
