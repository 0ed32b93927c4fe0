use sketchkit_core::{
    cubic_bezier_bounds, point_near_bezier, snap_axis, snap_segment, snap_to_grid, BoundingBox,
    Point, Segment,
};
use sketchkit_settings::HitTolerances;

use super::{
    draw_construction, draw_handles, hit_handle, outline_token, DesignerShape, DrawOptions,
    EditRules, HandleKind, Selection, SelectionState, ShapeHeader, ShapeType,
};
use crate::renderer::DrawSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BezierHandle {
    Start,
    Ctrl1,
    Ctrl2,
    End,
}

impl BezierHandle {
    /// The handle a drag of `self` is snapped against.
    fn partner(self) -> Self {
        match self {
            BezierHandle::Start => BezierHandle::Ctrl1,
            BezierHandle::Ctrl1 => BezierHandle::Start,
            BezierHandle::Ctrl2 => BezierHandle::End,
            BezierHandle::End => BezierHandle::Ctrl2,
        }
    }

    /// The other endpoint, for Start and End only.
    fn other_end(self) -> Option<Self> {
        match self {
            BezierHandle::Start => Some(BezierHandle::End),
            BezierHandle::End => Some(BezierHandle::Start),
            _ => None,
        }
    }

    fn is_control(self) -> bool {
        matches!(self, BezierHandle::Ctrl1 | BezierHandle::Ctrl2)
    }
}

impl HandleKind for BezierHandle {
    const ALL: &'static [Self] = &[
        BezierHandle::Start,
        BezierHandle::Ctrl1,
        BezierHandle::Ctrl2,
        BezierHandle::End,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Cubic Bezier curve `P0..P3`.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignBezier {
    pub header: ShapeHeader<BezierHandle>,
    points: [Point; 4],
    bias: f64,
}

impl DesignBezier {
    /// New curve collapsed onto `start`, dragging its end. Control points
    /// follow the end until the first commit.
    pub fn begin(start: Point) -> Self {
        Self {
            header: ShapeHeader::drawing(start, BezierHandle::End),
            points: [Point::zero(); 4],
            bias: sketchkit_core::constants::BEZIER_BIAS,
        }
    }

    pub fn new(start: Point, ctrl1: Point, ctrl2: Point, end: Point) -> Self {
        Self {
            header: ShapeHeader::committed(start),
            points: [Point::zero(), ctrl1 - start, ctrl2 - start, end - start],
            bias: sketchkit_core::constants::BEZIER_BIAS,
        }
    }

    pub fn point(&self, h: BezierHandle) -> Point {
        self.header.offset + self.points[h.index()]
    }

    pub fn selection(&self) -> Selection<BezierHandle> {
        self.header.selection
    }

    fn set_point(&mut self, h: BezierHandle, p: Point) {
        self.points[h.index()] = p - self.header.offset;
    }

    fn abs_points(&self) -> [Point; 4] {
        self.points.map(|p| self.header.offset + p)
    }

    /// Places the controls at 1/3 and 2/3 of the chord, pushed to either
    /// side of it by the bias.
    fn derive_controls(&mut self) {
        let p0 = self.point(BezierHandle::Start);
        let chord = self.point(BezierHandle::End) - p0;
        let len = chord.length();
        let normal = if len > 0.0 {
            let n = chord.perpendicular();
            Point::new(n.x / len, n.y / len)
        } else {
            Point::new(0.0, 1.0)
        };
        let third = Point::new(chord.x / 3.0, chord.y / 3.0);
        let two_thirds = Point::new(chord.x * 2.0 / 3.0, chord.y * 2.0 / 3.0);
        self.set_point(BezierHandle::Ctrl1, p0 + third + normal * self.bias);
        self.set_point(BezierHandle::Ctrl2, p0 + two_thirds - normal * self.bias);
    }

    fn auto_controls(&self, h: BezierHandle) -> bool {
        self.header.first_edit && h == BezierHandle::End
    }
}

impl DesignerShape for DesignBezier {
    fn id(&self) -> u64 {
        self.header.id
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Bezier
    }

    fn offset(&self) -> Point {
        self.header.offset
    }

    fn handles(&self) -> Vec<Point> {
        self.abs_points().to_vec()
    }

    fn selection_state(&self) -> SelectionState {
        self.header.selection.erase()
    }

    fn is_first_edit(&self) -> bool {
        self.header.first_edit
    }

    fn hit_test(&mut self, cursor: Point, tolerances: &HitTolerances) -> bool {
        self.header.reset_grab();
        let was_selected = self.is_selected();
        let [p0, p1, p2, p3] = self.abs_points();
        self.header.selection = match hit_handle(cursor, tolerances.handle, |h| self.point(h)) {
            Some(h) if h.is_control() && !was_selected => Selection::None,
            Some(h) => Selection::Handle(h),
            None if point_near_bezier(cursor, p0, p1, p2, p3, tolerances.curve) => Selection::Body,
            None => Selection::None,
        };
        self.is_selected()
    }

    fn edit(&mut self, cursor: Point, delta: Point, rules: &EditRules) {
        match self.header.selection {
            Selection::None => {}
            Selection::Body => self.header.offset += delta,
            Selection::Handle(h) => {
                self.bias = rules.bezier_bias;
                let target = self.header.drag_target(self.point(h), cursor, delta);
                if self.auto_controls(h) {
                    let start = self.point(BezierHandle::Start);
                    let end = if rules.snap.axis {
                        snap_axis(Segment::new(start, target), rules.snap.axis_tolerance)
                            .map_or(target, |s| s.end)
                    } else {
                        target
                    };
                    self.set_point(h, end);
                    self.derive_controls();
                } else {
                    let fixed = self.point(h.partner());
                    let mut p = snap_segment(Segment::new(fixed, target), &rules.snap).end;
                    if let Some(other) = h.other_end().filter(|_| rules.snap.axis) {
                        let chord = Segment::new(self.point(other), p);
                        p = snap_axis(chord, rules.snap.axis_tolerance).map_or(p, |s| s.end);
                    }
                    self.set_point(h, p);
                }
            }
        }
    }

    fn commit(&mut self, grid_spacing: f64) {
        match self.header.selection {
            Selection::None => {}
            Selection::Body => self.header.offset = snap_to_grid(self.header.offset, grid_spacing),
            Selection::Handle(h) => {
                let mut p = snap_to_grid(self.point(h), grid_spacing);
                let opposite = h.other_end().map(|o| self.point(o));
                if opposite == Some(p) && !self.header.first_edit {
                    p.x += grid_spacing;
                }
                self.set_point(h, p);
                if self.auto_controls(h) {
                    self.derive_controls();
                }
            }
        }
        self.header.finish_commit();
    }

    fn is_valid(&self) -> bool {
        self.points[0] != self.points[3]
    }

    fn bounding_box(&self) -> BoundingBox {
        let [p0, p1, p2, p3] = self.abs_points();
        cubic_bezier_bounds(p0, p1, p2, p3)
    }

    fn draw(&self, sink: &mut dyn DrawSink, options: &DrawOptions) {
        let [p0, p1, p2, p3] = self.abs_points();
        if self.is_selected() {
            draw_construction(sink, &[p0, p1]);
            draw_construction(sink, &[p3, p2]);
        }
        sink.stroke_style(outline_token(self.is_selected()));
        sink.line_width(1.0);
        sink.begin_path();
        sink.move_to(p0);
        sink.bezier_curve_to(p1, p2, p3);
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
