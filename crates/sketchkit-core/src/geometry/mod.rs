//! Model-space geometry: points, boxes, segments, the proximity kernel and
//! directional snapping.

mod bounds;
mod kernel;
mod point;
pub mod snap;

use serde::{Deserialize, Serialize};

pub use bounds::BoundingBox;
pub use kernel::{
    angle, angle_in_sweep, arc_bounds, arc_center_candidates, choose_center_nearest,
    cubic_bezier_bounds, cubic_bezier_point, distance, find_arc_center, midpoint,
    move_center_along_bisector, normalize_angle, perpendicular_bisector_segment,
    point_near_arc, point_near_bezier, point_near_ellipse, point_near_point,
    point_near_segment, project_onto_bisector, snap_to_grid,
};
pub use point::Point;

/// Directed segment; snapping keeps `start` fixed and moves `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}
