//! Shape model for the editing surface.
//!
//! Every shape stores an `offset` in model space plus handle points
//! relative to that offset. A shape is either unselected, selected as a
//! whole (`Body`), or has exactly one active handle. The handle kinds are
//! per-variant enums so an index can never point past a shape's handles.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use sketchkit_core::{BoundingBox, Point, SnapRules};
use sketchkit_settings::HitTolerances;

use crate::renderer::{DrawSink, StyleToken};

pub mod arc;
pub mod bezier;
pub mod ellipse;
pub mod line;
pub mod rectangle;

pub use arc::{ArcHandle, DesignArc};
pub use bezier::{BezierHandle, DesignBezier};
pub use ellipse::{DesignEllipse, EllipseHandle};
pub use line::{DesignLine, LineHandle};
pub use rectangle::{DesignRectangle, RectangleHandle};

static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

fn next_shape_id() -> u64 {
    NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Selection state of a single shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection<H> {
    None,
    Body,
    Handle(H),
}

impl<H> Default for Selection<H> {
    fn default() -> Self {
        Selection::None
    }
}

impl<H: HandleKind> Selection<H> {
    /// Forgets the handle type, keeping only the handle's position in the
    /// shape's handle list.
    pub fn erase(self) -> SelectionState {
        match self {
            Selection::None => Selection::None,
            Selection::Body => Selection::Body,
            Selection::Handle(h) => Selection::Handle(h.index()),
        }
    }

    pub fn handle(self) -> Option<H> {
        match self {
            Selection::Handle(h) => Some(h),
            _ => None,
        }
    }
}

/// Type-erased selection used at the canvas and renderer level.
pub type SelectionState = Selection<usize>;

/// A named handle of one shape variant.
pub trait HandleKind: Copy + Eq + std::fmt::Debug + 'static {
    /// All handles in hit-test priority order.
    const ALL: &'static [Self];

    fn index(self) -> usize;
}

/// Kinds of shapes that can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Line,
    Arc,
    Bezier,
    Rectangle,
    Ellipse,
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShapeType::Line => "Line",
            ShapeType::Arc => "Arc",
            ShapeType::Bezier => "Bezier",
            ShapeType::Rectangle => "Rectangle",
            ShapeType::Ellipse => "Ellipse",
        };
        f.write_str(name)
    }
}

/// Snapping and construction parameters for one edit step, already scaled
/// to model units for the current zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditRules {
    pub snap: SnapRules,
    /// Perpendicular offset of auto-placed Bezier control points.
    pub bezier_bias: f64,
}

impl Default for EditRules {
    fn default() -> Self {
        Self {
            snap: SnapRules::default(),
            bezier_bias: sketchkit_core::constants::BEZIER_BIAS,
        }
    }
}

/// Per-frame drawing parameters, in model units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    /// Half-size of a handle marker.
    pub handle_size: f64,
    /// Rectangles within this of square get their diagonals drawn.
    pub square_tolerance: f64,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            handle_size: sketchkit_core::constants::HANDLE_MARKER_SIZE,
            square_tolerance: sketchkit_core::constants::SQUARE_SNAP_TOLERANCE,
        }
    }
}

/// State shared by every shape variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeHeader<H> {
    pub id: u64,
    pub offset: Point,
    pub selection: Selection<H>,
    /// True from creation until the first commit.
    pub first_edit: bool,
    /// Offset between the dragged handle and the cursor, captured on the
    /// first edit of a gesture.
    grab: Option<Point>,
}

impl<H: HandleKind> ShapeHeader<H> {
    /// Header for a shape under construction, with `handle` active. The
    /// handle follows the cursor exactly until the first commit.
    pub fn drawing(offset: Point, handle: H) -> Self {
        Self {
            id: next_shape_id(),
            offset,
            selection: Selection::Handle(handle),
            first_edit: true,
            grab: Some(Point::zero()),
        }
    }

    /// Header for a finished, unselected shape.
    pub fn committed(offset: Point) -> Self {
        Self {
            id: next_shape_id(),
            offset,
            selection: Selection::None,
            first_edit: false,
            grab: None,
        }
    }

    /// Where the dragged handle should go for this cursor position.
    ///
    /// `handle` is the handle's current absolute position. The first call
    /// of a gesture records how far the handle sat from the cursor at the
    /// previous event, so snapping a handle never makes it sticky.
    pub fn drag_target(&mut self, handle: Point, cursor: Point, delta: Point) -> Point {
        let grab = *self.grab.get_or_insert(handle - (cursor - delta));
        cursor + grab
    }

    /// Starts a new gesture.
    pub fn reset_grab(&mut self) {
        self.grab = None;
    }

    pub fn finish_commit(&mut self) {
        self.first_edit = false;
        self.grab = None;
    }
}

/// Common interface for all shapes on the editing surface.
pub trait DesignerShape {
    fn id(&self) -> u64;

    fn shape_type(&self) -> ShapeType;

    /// Model-space anchor; handle points are relative to it.
    fn offset(&self) -> Point;

    /// Handle points in model space, in hit-test priority order.
    fn handles(&self) -> Vec<Point>;

    fn selection_state(&self) -> SelectionState;

    fn is_selected(&self) -> bool {
        self.selection_state() != Selection::None
    }

    fn is_first_edit(&self) -> bool;

    /// Updates the shape's selection from a pointer press at `cursor`.
    /// Returns whether anything was hit.
    fn hit_test(&mut self, cursor: Point, tolerances: &HitTolerances) -> bool;

    /// Applies one drag step to whatever is selected.
    fn edit(&mut self, cursor: Point, delta: Point, rules: &EditRules);

    /// Grid-snaps the result of a drag and repairs degenerate geometry.
    fn commit(&mut self, grid_spacing: f64);

    fn is_valid(&self) -> bool;

    fn bounding_box(&self) -> BoundingBox;

    fn draw(&self, sink: &mut dyn DrawSink, options: &DrawOptions);

    fn select(&mut self);

    fn clear_selection(&mut self);
}

/// Draws the shape's handle markers, filling the active one.
pub(crate) fn draw_handles(
    sink: &mut dyn DrawSink,
    handles: &[Point],
    active: Option<usize>,
    size: f64,
) {
    sink.line_width(1.0);
    sink.set_dash(&[]);
    for (i, h) in handles.iter().enumerate() {
        let fill = if active == Some(i) {
            StyleToken::HandleActiveFill
        } else {
            StyleToken::HandleFill
        };
        let corner = *h - Point::new(size, size);
        let extent = Point::new(2.0 * size, 2.0 * size);
        sink.fill_style(fill);
        sink.fill_rect(corner, extent);
        sink.stroke_style(StyleToken::Default);
        sink.begin_path();
        sink.move_to(corner);
        sink.line_to(corner + Point::new(extent.x, 0.0));
        sink.line_to(corner + extent);
        sink.line_to(corner + Point::new(0.0, extent.y));
        sink.close_path();
        sink.stroke();
    }
}

/// Stroke token for a shape's outline.
pub(crate) fn outline_token(selected: bool) -> StyleToken {
    if selected {
        StyleToken::Selected
    } else {
        StyleToken::Default
    }
}

/// Draws a dashed construction polyline.
pub(crate) fn draw_construction(sink: &mut dyn DrawSink, points: &[Point]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    sink.stroke_style(StyleToken::Light);
    sink.line_width(1.0);
    sink.set_dash(&sketchkit_core::constants::DASH_PATTERN);
    sink.begin_path();
    sink.move_to(*first);
    for p in rest {
        sink.line_to(*p);
    }
    sink.stroke();
    sink.set_dash(&[]);
}

/// Closed set of shape variants stored on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(DesignLine),
    Arc(DesignArc),
    Bezier(DesignBezier),
    Rectangle(DesignRectangle),
    Ellipse(DesignEllipse),
}

impl Shape {
    /// Starts a new shape of `shape_type` at `start`, with its creation
    /// handle active.
    pub fn begin(shape_type: ShapeType, start: Point) -> Self {
        match shape_type {
            ShapeType::Line => Shape::Line(DesignLine::begin(start)),
            ShapeType::Arc => Shape::Arc(DesignArc::begin(start)),
            ShapeType::Bezier => Shape::Bezier(DesignBezier::begin(start)),
            ShapeType::Rectangle => Shape::Rectangle(DesignRectangle::begin(start)),
            ShapeType::Ellipse => Shape::Ellipse(DesignEllipse::begin(start)),
        }
    }

    fn inner(&self) -> &dyn DesignerShape {
        match self {
            Shape::Line(s) => s,
            Shape::Arc(s) => s,
            Shape::Bezier(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn DesignerShape {
        match self {
            Shape::Line(s) => s,
            Shape::Arc(s) => s,
            Shape::Bezier(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
        }
    }
}

impl DesignerShape for Shape {
    fn id(&self) -> u64 {
        self.inner().id()
    }

    fn shape_type(&self) -> ShapeType {
        self.inner().shape_type()
    }

    fn offset(&self) -> Point {
        self.inner().offset()
    }

    fn handles(&self) -> Vec<Point> {
        self.inner().handles()
    }

    fn selection_state(&self) -> SelectionState {
        self.inner().selection_state()
    }

    fn is_first_edit(&self) -> bool {
        self.inner().is_first_edit()
    }

    fn hit_test(&mut self, cursor: Point, tolerances: &HitTolerances) -> bool {
        self.inner_mut().hit_test(cursor, tolerances)
    }

    fn edit(&mut self, cursor: Point, delta: Point, rules: &EditRules) {
        self.inner_mut().edit(cursor, delta, rules)
    }

    fn commit(&mut self, grid_spacing: f64) {
        self.inner_mut().commit(grid_spacing)
    }

    fn is_valid(&self) -> bool {
        self.inner().is_valid()
    }

    fn bounding_box(&self) -> BoundingBox {
        self.inner().bounding_box()
    }

    fn draw(&self, sink: &mut dyn DrawSink, options: &DrawOptions) {
        self.inner().draw(sink, options)
    }

    fn select(&mut self) {
        self.inner_mut().select()
    }

    fn clear_selection(&mut self) {
        self.inner_mut().clear_selection()
    }
}

/// First handle within `tolerance` of `cursor`, in priority order.
pub(crate) fn hit_handle<H: HandleKind>(
    cursor: Point,
    tolerance: f64,
    position: impl Fn(H) -> Point,
) -> Option<H> {
    H::ALL
        .iter()
        .copied()
        .find(|h| sketchkit_core::point_near_point(cursor, position(*h), tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Two {
        A,
        B,
    }

    impl HandleKind for Two {
        const ALL: &'static [Self] = &[Two::A, Two::B];
        fn index(self) -> usize {
            self as usize
        }
    }

    #[test]
    fn test_selection_erase() {
        assert_eq!(Selection::<Two>::None.erase(), Selection::None);
        assert_eq!(Selection::<Two>::Body.erase(), Selection::Body);
        assert_eq!(Selection::Handle(Two::B).erase(), Selection::Handle(1));
    }

    #[test]
    fn test_drag_target_keeps_grab_offset() {
        let mut header = ShapeHeader::<Two>::committed(Point::zero());
        // Handle at (10, 0), cursor pressed at (12, 1) then moved by (5, 5).
        let t = header.drag_target(Point::new(10.0, 0.0), Point::new(17.0, 6.0), Point::new(5.0, 5.0));
        assert_eq!(t, Point::new(15.0, 5.0));
        // Later steps ignore where the handle was snapped to.
        let t = header.drag_target(Point::new(15.0, 0.0), Point::new(20.0, 6.0), Point::new(3.0, 0.0));
        assert_eq!(t, Point::new(18.0, 5.0));
        header.reset_grab();
        let t = header.drag_target(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert_eq!(t, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_hit_handle_priority() {
        let pos = |h: Two| match h {
            Two::A => Point::new(0.0, 0.0),
            Two::B => Point::new(2.0, 0.0),
        };
        assert_eq!(hit_handle(Point::new(1.0, 0.0), 5.0, pos), Some(Two::A));
        assert_eq!(hit_handle(Point::new(6.0, 0.0), 5.0, pos), Some(Two::B));
        assert_eq!(hit_handle(Point::new(9.0, 0.0), 5.0, pos), None);
    }

    #[test]
    fn test_shape_ids_are_unique() {
        let a = Shape::begin(ShapeType::Line, Point::zero());
        let b = Shape::begin(ShapeType::Line, Point::zero());
        assert_ne!(a.id(), b.id());
    }
}
