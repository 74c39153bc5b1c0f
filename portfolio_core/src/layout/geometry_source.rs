//! Geometry Source - the host's live node rectangles.

use std::collections::HashMap;

use portfolio_rules::{BranchId, Rect};

/// A visual node of the skill tree the layout engine asks about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeHandle {
    /// The drawing surface; line coordinates are relative to its origin.
    Canvas,
    Root,
    /// A branch's category marker.
    Marker(BranchId),
    Card { branch: BranchId, index: usize },
}

impl NodeHandle {
    pub fn marker(branch: &BranchId) -> Self {
        NodeHandle::Marker(branch.clone())
    }

    pub fn card(branch: &BranchId, index: usize) -> Self {
        NodeHandle::Card {
            branch: branch.clone(),
            index,
        }
    }
}

/// Synchronous access to the current bounding rectangle of a node, in a
/// coordinate space shared by every node.
///
/// `None` means the node is not currently rendered.
pub trait GeometrySource {
    fn rect(&self, node: &NodeHandle) -> Option<Rect>;
}

/// A fixed table of rectangles, for hosts that snapshot their geometry.
#[derive(Debug, Clone, Default)]
pub struct StaticGeometry {
    rects: HashMap<NodeHandle, Rect>,
}

impl StaticGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: NodeHandle, rect: Rect) -> &mut Self {
        self.rects.insert(node, rect);
        self
    }

    pub fn with(mut self, node: NodeHandle, rect: Rect) -> Self {
        self.rects.insert(node, rect);
        self
    }

    pub fn remove(&mut self, node: &NodeHandle) -> Option<Rect> {
        self.rects.remove(node)
    }
}

impl GeometrySource for StaticGeometry {
    fn rect(&self, node: &NodeHandle) -> Option<Rect> {
        self.rects.get(node).copied()
    }
}
