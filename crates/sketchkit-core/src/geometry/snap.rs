//! Directional snapping.
//!
//! Every helper treats `segment.start` as the fixed reference and only ever
//! moves `segment.end`. Helpers return `None` when their rule does not apply
//! so callers can chain them.

use serde::{Deserialize, Serialize};

use super::Segment;
use crate::constants::{
    AXIS_SNAP_TOLERANCE, DIAGONAL_SNAP_BAND, SEMICIRCLE_SNAP_TOLERANCE, SQUARE_SNAP_TOLERANCE,
};

/// Snapping policy applied while dragging handles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapRules {
    /// Snap nearly horizontal/vertical segments onto the axis.
    pub axis: bool,
    /// Snap segments close to 45/135 degrees onto the diagonal.
    pub diagonal: bool,
    /// Largest off-axis delta still snapped onto the axis.
    pub axis_tolerance: f64,
    /// Lower bound of |dy/dx| treated as diagonal; upper bound is 1/band.
    pub diagonal_band: f64,
    /// Width/height difference under which rectangles become squares
    /// (and ellipses circles).
    pub square_tolerance: f64,
    /// Distance from the chord midpoint under which an arc center snaps
    /// onto it.
    pub semicircle_tolerance: f64,
}

impl Default for SnapRules {
    fn default() -> Self {
        Self {
            axis: true,
            diagonal: true,
            axis_tolerance: AXIS_SNAP_TOLERANCE,
            diagonal_band: DIAGONAL_SNAP_BAND,
            square_tolerance: SQUARE_SNAP_TOLERANCE,
            semicircle_tolerance: SEMICIRCLE_SNAP_TOLERANCE,
        }
    }
}

impl SnapRules {
    /// No snapping at all.
    pub fn disabled() -> Self {
        Self {
            axis: false,
            diagonal: false,
            square_tolerance: 0.0,
            semicircle_tolerance: 0.0,
            ..Self::default()
        }
    }

    /// Returns the rules with every distance tolerance multiplied by
    /// `factor`. The diagonal band is a ratio and stays as is.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            axis_tolerance: self.axis_tolerance * factor,
            square_tolerance: self.square_tolerance * factor,
            semicircle_tolerance: self.semicircle_tolerance * factor,
            ..*self
        }
    }
}

/// Flattens the segment when its vertical extent is under `tolerance`.
pub fn snap_horizontal(segment: Segment, tolerance: f64) -> Option<Segment> {
    let dy = segment.end.y - segment.start.y;
    if dy.abs() < tolerance {
        let mut snapped = segment;
        snapped.end.y = segment.start.y;
        Some(snapped)
    } else {
        None
    }
}

/// Straightens the segment when its horizontal extent is under `tolerance`.
pub fn snap_vertical(segment: Segment, tolerance: f64) -> Option<Segment> {
    let dx = segment.end.x - segment.start.x;
    if dx.abs() < tolerance {
        let mut snapped = segment;
        snapped.end.x = segment.start.x;
        Some(snapped)
    } else {
        None
    }
}

/// Horizontal or vertical snap, whichever needs the smaller correction.
pub fn snap_axis(segment: Segment, tolerance: f64) -> Option<Segment> {
    let dx = (segment.end.x - segment.start.x).abs();
    let dy = (segment.end.y - segment.start.y).abs();
    if dy <= dx {
        snap_horizontal(segment, tolerance).or_else(|| snap_vertical(segment, tolerance))
    } else {
        snap_vertical(segment, tolerance).or_else(|| snap_horizontal(segment, tolerance))
    }
}

fn snap_diagonal(segment: Segment, band: f64, ascending: bool) -> Option<Segment> {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;
    if dx == 0.0 || dy == 0.0 || band <= 0.0 {
        return None;
    }
    let slope = dy / dx;
    if (slope > 0.0) != ascending {
        return None;
    }
    let magnitude = slope.abs();
    if magnitude < band || magnitude > 1.0 / band {
        return None;
    }

    let side = (dx.abs() + dy.abs()) / 2.0;
    let mut snapped = segment;
    snapped.end.x = segment.start.x + side.copysign(dx);
    snapped.end.y = segment.start.y + side.copysign(dy);
    Some(snapped)
}

/// Forces a 45 degree slope (dy/dx = 1) when the slope lies in
/// `[band, 1/band]`.
pub fn snap_45(segment: Segment, band: f64) -> Option<Segment> {
    snap_diagonal(segment, band, true)
}

/// Forces a 135 degree slope (dy/dx = -1) when the slope lies in
/// `[-1/band, -band]`.
pub fn snap_135(segment: Segment, band: f64) -> Option<Segment> {
    snap_diagonal(segment, band, false)
}

/// Applies the enabled rules: axis first, then diagonal.
pub fn snap_segment(segment: Segment, rules: &SnapRules) -> Segment {
    let axis = if rules.axis {
        snap_axis(segment, rules.axis_tolerance)
    } else {
        None
    };
    axis.or_else(|| {
        if rules.diagonal {
            snap_45(segment, rules.diagonal_band).or_else(|| snap_135(segment, rules.diagonal_band))
        } else {
            None
        }
    })
    .unwrap_or(segment)
}
