use sketchkit_core::{point_near_segment, snap_to_grid, BoundingBox, Point};
use sketchkit_settings::HitTolerances;

use super::{
    draw_construction, draw_handles, hit_handle, outline_token, DesignerShape, DrawOptions,
    EditRules, HandleKind, Selection, SelectionState, ShapeHeader, ShapeType,
};
use crate::renderer::DrawSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectangleHandle {
    BottomLeft,
    TopLeft,
    BottomRight,
    TopRight,
    MidLeft,
    MidTop,
    MidRight,
    MidBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Low,
    High,
}

impl RectangleHandle {
    /// Which vertical edge the handle drags.
    fn x_side(self) -> Option<Side> {
        use RectangleHandle::*;
        match self {
            BottomLeft | TopLeft | MidLeft => Some(Side::Low),
            BottomRight | TopRight | MidRight => Some(Side::High),
            MidTop | MidBottom => None,
        }
    }

    /// Which horizontal edge the handle drags.
    fn y_side(self) -> Option<Side> {
        use RectangleHandle::*;
        match self {
            BottomLeft | BottomRight | MidBottom => Some(Side::Low),
            TopLeft | TopRight | MidTop => Some(Side::High),
            MidLeft | MidRight => None,
        }
    }

    fn mirrored_x(self) -> Self {
        use RectangleHandle::*;
        match self {
            BottomLeft => BottomRight,
            BottomRight => BottomLeft,
            TopLeft => TopRight,
            TopRight => TopLeft,
            MidLeft => MidRight,
            MidRight => MidLeft,
            other => other,
        }
    }

    fn mirrored_y(self) -> Self {
        use RectangleHandle::*;
        match self {
            BottomLeft => TopLeft,
            TopLeft => BottomLeft,
            BottomRight => TopRight,
            TopRight => BottomRight,
            MidTop => MidBottom,
            MidBottom => MidTop,
            other => other,
        }
    }
}

impl HandleKind for RectangleHandle {
    const ALL: &'static [Self] = &[
        RectangleHandle::BottomLeft,
        RectangleHandle::TopLeft,
        RectangleHandle::BottomRight,
        RectangleHandle::TopRight,
        RectangleHandle::MidLeft,
        RectangleHandle::MidTop,
        RectangleHandle::MidRight,
        RectangleHandle::MidBottom,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned rectangle anchored at `offset` with signed `edge` size.
///
/// Handles are derived from `offset` and `edge` on demand, so they can
/// never disagree with the authoritative size.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignRectangle {
    pub header: ShapeHeader<RectangleHandle>,
    edge: Point,
}

impl DesignRectangle {
    /// New zero-size rectangle at `start`, dragging its top-right corner.
    pub fn begin(start: Point) -> Self {
        Self {
            header: ShapeHeader::drawing(start, RectangleHandle::TopRight),
            edge: Point::zero(),
        }
    }

    /// Rectangle spanning two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let bb = BoundingBox::from_corners(a, b);
        Self {
            header: ShapeHeader::committed(bb.bottom_left),
            edge: bb.top_right - bb.bottom_left,
        }
    }

    pub fn width(&self) -> f64 {
        self.edge.x
    }

    pub fn height(&self) -> f64 {
        self.edge.y
    }

    pub fn selection(&self) -> Selection<RectangleHandle> {
        self.header.selection
    }

    pub fn handle(&self, h: RectangleHandle) -> Point {
        use RectangleHandle::*;
        let (w, hh) = (self.edge.x, self.edge.y);
        let rel = match h {
            BottomLeft => Point::zero(),
            TopLeft => Point::new(0.0, hh),
            BottomRight => Point::new(w, 0.0),
            TopRight => Point::new(w, hh),
            MidLeft => Point::new(0.0, hh / 2.0),
            MidTop => Point::new(w / 2.0, hh),
            MidRight => Point::new(w, hh / 2.0),
            MidBottom => Point::new(w / 2.0, 0.0),
        };
        self.header.offset + rel
    }

    fn corners(&self) -> [Point; 4] {
        use RectangleHandle::*;
        [
            self.handle(BottomLeft),
            self.handle(BottomRight),
            self.handle(TopRight),
            self.handle(TopLeft),
        ]
    }

    fn drag_handle(&mut self, h: RectangleHandle, target: Point, square_tolerance: f64) {
        let mut lo = self.header.offset;
        let mut hi = self.header.offset + self.edge;
        let (xs, ys) = (h.x_side(), h.y_side());
        match xs {
            Some(Side::Low) => lo.x = target.x,
            Some(Side::High) => hi.x = target.x,
            None => {}
        }
        match ys {
            Some(Side::Low) => lo.y = target.y,
            Some(Side::High) => hi.y = target.y,
            None => {}
        }

        let size = hi - lo;
        let near_square = size.x != 0.0
            && size.y != 0.0
            && (size.x.abs() - size.y.abs()).abs() < square_tolerance;
        if near_square {
            if let Some(side) = ys {
                let h = size.x.abs() * size.y.signum();
                match side {
                    Side::Low => lo.y = hi.y - h,
                    Side::High => hi.y = lo.y + h,
                }
            } else if let Some(side) = xs {
                let w = size.y.abs() * size.x.signum();
                match side {
                    Side::Low => lo.x = hi.x - w,
                    Side::High => hi.x = lo.x + w,
                }
            }
        }

        self.header.offset = lo;
        self.edge = hi - lo;
    }

    /// Grid-snaps only the edges `h` drags, so the opposite corner stays
    /// where it is. An edge that snaps onto its opposite is pushed one grid
    /// unit away.
    fn snap_moved_edges(&mut self, h: RectangleHandle, grid_spacing: f64) {
        let mut lo = self.header.offset;
        let mut hi = self.header.offset + self.edge;
        let snapped_lo = snap_to_grid(lo, grid_spacing);
        let snapped_hi = snap_to_grid(hi, grid_spacing);
        match h.x_side() {
            Some(Side::Low) => lo.x = snapped_lo.x,
            Some(Side::High) => hi.x = snapped_hi.x,
            None => {}
        }
        match h.y_side() {
            Some(Side::Low) => lo.y = snapped_lo.y,
            Some(Side::High) => hi.y = snapped_hi.y,
            None => {}
        }
        if hi.x == lo.x {
            match h.x_side() {
                Some(Side::Low) => lo.x = hi.x - grid_spacing,
                _ => hi.x = lo.x + grid_spacing,
            }
        }
        if hi.y == lo.y {
            match h.y_side() {
                Some(Side::Low) => lo.y = hi.y - grid_spacing,
                _ => hi.y = lo.y + grid_spacing,
            }
        }
        self.header.offset = lo;
        self.edge = hi - lo;
        self.normalize();
    }

    /// Makes `edge` non-negative, keeping the active handle on the same
    /// physical corner.
    fn normalize(&mut self) {
        if self.edge.x < 0.0 {
            self.header.offset.x += self.edge.x;
            self.edge.x = -self.edge.x;
            if let Selection::Handle(h) = self.header.selection {
                self.header.selection = Selection::Handle(h.mirrored_x());
            }
        }
        if self.edge.y < 0.0 {
            self.header.offset.y += self.edge.y;
            self.edge.y = -self.edge.y;
            if let Selection::Handle(h) = self.header.selection {
                self.header.selection = Selection::Handle(h.mirrored_y());
            }
        }
    }
}

impl DesignerShape for DesignRectangle {
    fn id(&self) -> u64 {
        self.header.id
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Rectangle
    }

    fn offset(&self) -> Point {
        self.header.offset
    }

    fn handles(&self) -> Vec<Point> {
        RectangleHandle::ALL.iter().map(|h| self.handle(*h)).collect()
    }

    fn selection_state(&self) -> SelectionState {
        self.header.selection.erase()
    }

    fn is_first_edit(&self) -> bool {
        self.header.first_edit
    }

    fn hit_test(&mut self, cursor: Point, tolerances: &HitTolerances) -> bool {
        self.header.reset_grab();
        let corners = self.corners();
        let on_edge = (0..4).any(|i| {
            point_near_segment(cursor, corners[i], corners[(i + 1) % 4], tolerances.segment)
        });
        self.header.selection = match hit_handle(cursor, tolerances.handle, |h| self.handle(h)) {
            Some(h) => Selection::Handle(h),
            None if on_edge => Selection::Body,
            None => Selection::None,
        };
        self.is_selected()
    }

    fn edit(&mut self, cursor: Point, delta: Point, rules: &EditRules) {
        match self.header.selection {
            Selection::None => {}
            Selection::Body => self.header.offset += delta,
            Selection::Handle(h) => {
                let target = self.header.drag_target(self.handle(h), cursor, delta);
                self.drag_handle(h, target, rules.snap.square_tolerance);
            }
        }
    }

    fn commit(&mut self, grid_spacing: f64) {
        match self.header.selection {
            Selection::None => {}
            Selection::Body => self.header.offset = snap_to_grid(self.header.offset, grid_spacing),
            Selection::Handle(h) => self.snap_moved_edges(h, grid_spacing),
        }
        self.header.finish_commit();
    }

    fn is_valid(&self) -> bool {
        self.edge.x != 0.0 && self.edge.y != 0.0
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.header.offset, self.header.offset + self.edge)
    }

    fn draw(&self, sink: &mut dyn DrawSink, options: &DrawOptions) {
        let [bl, br, tr, tl] = self.corners();
        let near_square = self.is_valid()
            && (self.edge.x.abs() - self.edge.y.abs()).abs() < options.square_tolerance;
        if self.is_selected() && near_square {
            draw_construction(sink, &[bl, tr]);
            draw_construction(sink, &[br, tl]);
        }
        sink.stroke_style(outline_token(self.is_selected()));
        sink.line_width(1.0);
        sink.begin_path();
        sink.move_to(bl);
        sink.line_to(br);
        sink.line_to(tr);
        sink.line_to(tl);
        sink.close_path();
        sink.stroke();
        if self.is_selected() {
            let active = self.header.selection.handle().map(HandleKind::index);
            draw_handles(sink, &self.handles(), active, options.handle_size);
        }
    }

    fn select(&mut self) {
        self.header.selection = Selection::Body;
    }

    fn clear_selection(&mut self) {
        self.header.selection = Selection::None;
        self.header.reset_grab();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_snap() -> EditRules {
        EditRules {
            snap: sketchkit_core::SnapRules::disabled(),
            ..EditRules::default()
        }
    }

    #[test]
    fn test_draw_then_commit() {
        let mut rect = DesignRectangle::begin(Point::new(10.0, 10.0));
        rect.edit(Point::new(72.0, 38.0), Point::new(62.0, 28.0), &EditRules::default());
        assert_eq!(rect.width(), 62.0);
        assert_eq!(rect.height(), 28.0);
        rect.commit(10.0);
        assert_eq!(rect.width(), 60.0);
        assert_eq!(rect.height(), 30.0);
        assert!(rect.is_valid());
    }

    #[test]
    fn test_commit_never_leaves_zero_edge() {
        let mut rect = DesignRectangle::begin(Point::new(0.0, 0.0));
        rect.edit(Point::new(3.0, 40.0), Point::new(3.0, 40.0), &EditRules::default());
        rect.commit(10.0);
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.height(), 40.0);
    }

    #[test]
    fn test_bottom_left_drag_moves_offset() {
        let mut rect = DesignRectangle::from_corners(Point::new(100.0, 100.0), Point::new(200.0, 150.0));
        rect.hit_test(Point::new(100.0, 100.0), &HitTolerances::default());
        assert_eq!(rect.selection(), Selection::Handle(RectangleHandle::BottomLeft));
        rect.edit(Point::new(110.0, 90.0), Point::new(10.0, -10.0), &no_snap());
        assert_eq!(rect.offset(), Point::new(110.0, 90.0));
        assert_eq!(rect.width(), 90.0);
        assert_eq!(rect.height(), 60.0);
        assert_eq!(rect.handle(RectangleHandle::TopRight), Point::new(200.0, 150.0));
    }

    #[test]
    fn test_commit_keeps_opposite_corner() {
        let mut rect = DesignRectangle::from_corners(Point::new(100.0, 100.0), Point::new(200.0, 150.0));
        rect.hit_test(Point::new(100.0, 100.0), &HitTolerances::default());
        rect.edit(Point::new(115.0, 100.0), Point::new(15.0, 0.0), &no_snap());
        rect.commit(10.0);
        assert_eq!(rect.handle(RectangleHandle::BottomLeft), Point::new(120.0, 100.0));
        assert_eq!(rect.handle(RectangleHandle::TopRight), Point::new(200.0, 150.0));
    }

    #[test]
    fn test_midpoint_commit_leaves_other_edges() {
        let mut rect = DesignRectangle::from_corners(Point::new(3.0, 4.0), Point::new(103.0, 54.0));
        rect.hit_test(Point::new(53.0, 54.0), &HitTolerances::default());
        assert_eq!(rect.selection(), Selection::Handle(RectangleHandle::MidTop));
        rect.edit(Point::new(53.0, 78.0), Point::new(0.0, 24.0), &no_snap());
        rect.commit(10.0);
        assert_eq!(rect.offset(), Point::new(3.0, 4.0));
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 76.0);
    }

    #[test]
    fn test_midpoint_drag_changes_one_side() {
        let mut rect = DesignRectangle::from_corners(Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        rect.hit_test(Point::new(100.0, 25.0), &HitTolerances::default());
        assert_eq!(rect.selection(), Selection::Handle(RectangleHandle::MidRight));
        rect.edit(Point::new(130.0, 40.0), Point::new(30.0, 15.0), &no_snap());
        assert_eq!(rect.width(), 130.0);
        assert_eq!(rect.height(), 50.0);
    }

    #[test]
    fn test_corner_drag_snaps_to_square() {
        let mut rect = DesignRectangle::begin(Point::zero());
        rect.edit(Point::new(50.0, 49.0), Point::new(50.0, 49.0), &EditRules::default());
        assert_eq!(rect.width(), 50.0);
        assert_eq!(rect.height(), 50.0);
    }

    #[test]
    fn test_commit_normalizes_flipped_rectangle() {
        let mut rect = DesignRectangle::begin(Point::new(50.0, 50.0));
        rect.edit(Point::new(20.0, 10.0), Point::new(-30.0, -40.0), &no_snap());
        assert_eq!(rect.width(), -30.0);
        rect.commit(10.0);
        assert_eq!(rect.offset(), Point::new(20.0, 10.0));
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 40.0);
        assert_eq!(rect.selection(), Selection::Handle(RectangleHandle::BottomLeft));
    }

    #[test]
    fn test_interior_click_misses() {
        let mut rect = DesignRectangle::from_corners(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert!(!rect.hit_test(Point::new(50.0, 40.0), &HitTolerances::default()));
        assert!(rect.hit_test(Point::new(30.0, 98.0), &HitTolerances::default()));
        assert_eq!(rect.selection(), Selection::Body);
    }
}
