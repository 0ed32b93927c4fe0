//! # SketchKit Core
//!
//! Core types and pure geometry for SketchKit.
//! Provides the model-space point and box types, the geometry kernel used
//! by hit-testing and handle editing, the directional snap helpers, and
//! length formatting for on-canvas annotations.
//!
//! Everything in this crate is stateless: functions take points by value and
//! return new values, so the designer crate can call them freely from inside
//! input handlers.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod units;

pub use error::{GeometryError, GeometryResult};

pub use geometry::{
    angle, angle_in_sweep, arc_bounds, arc_center_candidates, choose_center_nearest,
    cubic_bezier_bounds, cubic_bezier_point, distance, find_arc_center, midpoint,
    move_center_along_bisector, normalize_angle, perpendicular_bisector_segment, point_near_arc,
    point_near_bezier, point_near_ellipse, point_near_point, point_near_segment,
    project_onto_bisector, snap_to_grid, BoundingBox, Point, Segment,
};

pub use geometry::snap::{
    snap_135, snap_45, snap_axis, snap_horizontal, snap_segment, snap_vertical, SnapRules,
};

pub use units::{format_angle, format_length, unit_label, MeasurementSystem};
