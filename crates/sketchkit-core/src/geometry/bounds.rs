use serde::{Deserialize, Serialize};

use super::Point;

/// Axis-aligned box in model space, stored as bottom-left and top-right.
///
/// Used for rubber-band containment, not for precise hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub bottom_left: Point,
    pub top_right: Point,
}

impl BoundingBox {
    /// Creates a box from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            bottom_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
            top_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Smallest box covering every point; `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_corners(first, first), |bb, p| bb.including(p)))
    }

    /// Returns the box grown to cover `p`.
    pub fn including(self, p: Point) -> Self {
        Self {
            bottom_left: Point::new(self.bottom_left.x.min(p.x), self.bottom_left.y.min(p.y)),
            top_right: Point::new(self.top_right.x.max(p.x), self.top_right.y.max(p.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.top_right.x - self.bottom_left.x
    }

    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_left.y
    }

    /// True when both dimensions are strictly positive.
    pub fn has_area(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// True when `inner` lies fully inside this box (edges included).
    pub fn contains_box(&self, inner: &BoundingBox) -> bool {
        inner.bottom_left.x >= self.bottom_left.x
            && inner.bottom_left.y >= self.bottom_left.y
            && inner.top_right.x <= self.top_right.x
            && inner.top_right.y <= self.top_right.y
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.bottom_left.x
            && p.x <= self.top_right.x
            && p.y >= self.bottom_left.y
            && p.y <= self.top_right.y
    }
}
