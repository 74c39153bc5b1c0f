//! Line primitives emitted by the layout engine.

use serde::{Deserialize, Serialize};

use portfolio_rules::{Point, Size};

/// Which part of the tree a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Root anchor to a category marker.
    Trunk,
    /// Vertical segment through a branch's cards.
    Spine,
    /// Horizontal segment from the spine to a card.
    Leader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    #[default]
    Normal,
    Emphasized,
}

impl Emphasis {
    pub fn from_highlight(highlighted: bool) -> Self {
        if highlighted {
            Emphasis::Emphasized
        } else {
            Emphasis::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub kind: LineKind,
    pub from: Point,
    pub to: Point,
    pub emphasis: Emphasis,
}

impl LinePrimitive {
    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }
}

/// A full replacement set of lines, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSet {
    /// Size of the drawing surface.
    pub size: Size,
    pub lines: Vec<LinePrimitive>,
}

impl LineSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn of_kind(&self, kind: LineKind) -> impl Iterator<Item = &LinePrimitive> {
        self.lines.iter().filter(move |l| l.kind == kind)
    }

    pub fn emphasized(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.lines
            .iter()
            .filter(|l| l.emphasis == Emphasis::Emphasized)
    }
}
