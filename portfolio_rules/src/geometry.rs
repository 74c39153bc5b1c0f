//! Geometry primitives shared by the layout and orbit engines.

use serde::{Deserialize, Serialize};

/// A point in a 2D coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate this point into a frame whose origin is `origin`.
    pub fn relative_to(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Width and height of a container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A size is empty when either side is not strictly positive (or NaN).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A bounding rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Horizontal center of the bottom edge.
    pub fn bottom_center(&self) -> Point {
        Point::new(self.center_x(), self.bottom())
    }

    /// Horizontal center of the top edge.
    pub fn top_center(&self) -> Point {
        Point::new(self.center_x(), self.top)
    }

    /// Point at `fraction` of the width in from the left edge, vertically centered.
    pub fn left_anchor(&self, fraction: f64) -> Point {
        Point::new(self.left + self.width * fraction, self.center_y())
    }
}
