//! Default values shared across the workspace.
//!
//! Lengths are model-space millimeters unless noted as pixels.

/// Grid spacing used when committing edits.
pub const DEFAULT_GRID_SPACING: f64 = 10.0;

/// Half-size of the square around a handle that grabs it (pixels).
pub const HANDLE_TOLERANCE: f64 = 5.0;
/// Distance from a segment or arc outline that selects the body (pixels).
pub const SEGMENT_TOLERANCE: f64 = 5.0;
/// Distance from a Bezier curve that selects the body (pixels).
pub const CURVE_TOLERANCE: f64 = 10.0;
/// Relative band around 1.0 of the implicit ellipse equation.
pub const ELLIPSE_TOLERANCE: f64 = 0.5;

/// Axis snap threshold between a moving point and its reference.
pub const AXIS_SNAP_TOLERANCE: f64 = 5.0;
/// Lower bound of |dy/dx| treated as diagonal; the upper bound is its inverse.
pub const DIAGONAL_SNAP_BAND: f64 = 0.95;
/// Width/height difference under which a rectangle snaps to a square.
pub const SQUARE_SNAP_TOLERANCE: f64 = 2.0;
/// Distance from the chord midpoint under which an arc center snaps onto it.
pub const SEMICIRCLE_SNAP_TOLERANCE: f64 = 5.0;

/// Perpendicular offset of the auto-placed Bezier control points.
pub const BEZIER_BIAS: f64 = 30.0;
/// Upper bound on samples taken by the Bezier proximity search.
pub const BEZIER_SEARCH_ITERATIONS: usize = 100;

/// Margin between the canvas border and the model origin (pixels).
pub const CANVAS_MARGIN: f64 = 20.0;
/// Relative scale change per wheel notch.
pub const ZOOM_STEP: f64 = 0.1;
/// Smallest allowed zoom; the view never shrinks below native size.
pub const MIN_ZOOM: f64 = 1.0;
/// Largest allowed zoom.
pub const MAX_ZOOM: f64 = 50.0;

/// Half-size of the square drawn on each handle of a selected shape.
pub const HANDLE_MARKER_SIZE: f64 = 4.0;
/// Dash pattern for construction lines and the rubber band.
pub const DASH_PATTERN: [f64; 2] = [3.0, 3.0];
