use sketchkit_core::{point_near_segment, snap_segment, snap_to_grid, BoundingBox, Point, Segment};
use sketchkit_settings::HitTolerances;

use super::{
    draw_handles, hit_handle, outline_token, DesignerShape, DrawOptions, EditRules, HandleKind,
    Selection, SelectionState, ShapeHeader, ShapeType,
};
use crate::renderer::DrawSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHandle {
    Start,
    End,
}

impl LineHandle {
    fn other(self) -> Self {
        match self {
            LineHandle::Start => LineHandle::End,
            LineHandle::End => LineHandle::Start,
        }
    }
}

impl HandleKind for LineHandle {
    const ALL: &'static [Self] = &[LineHandle::Start, LineHandle::End];

    fn index(self) -> usize {
        self as usize
    }
}

/// Straight segment between two handles.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignLine {
    pub header: ShapeHeader<LineHandle>,
    start: Point,
    end: Point,
}

impl DesignLine {
    /// New line of zero length at `start`, dragging its end.
    pub fn begin(start: Point) -> Self {
        Self {
            header: ShapeHeader::drawing(start, LineHandle::End),
            start: Point::zero(),
            end: Point::zero(),
        }
    }

    pub fn new(start: Point, end: Point) -> Self {
        Self {
            header: ShapeHeader::committed(start),
            start: Point::zero(),
            end: end - start,
        }
    }

    pub fn start(&self) -> Point {
        self.header.offset + self.start
    }

    pub fn end(&self) -> Point {
        self.header.offset + self.end
    }

    pub fn length(&self) -> f64 {
        self.start().distance_to(&self.end())
    }

    pub fn selection(&self) -> Selection<LineHandle> {
        self.header.selection
    }

    fn handle(&self, h: LineHandle) -> Point {
        match h {
            LineHandle::Start => self.start(),
            LineHandle::End => self.end(),
        }
    }

    fn set_handle(&mut self, h: LineHandle, p: Point) {
        let rel = p - self.header.offset;
        match h {
            LineHandle::Start => self.start = rel,
            LineHandle::End => self.end = rel,
        }
    }
}

impl DesignerShape for DesignLine {
    fn id(&self) -> u64 {
        self.header.id
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Line
    }

    fn offset(&self) -> Point {
        self.header.offset
    }

    fn handles(&self) -> Vec<Point> {
        vec![self.start(), self.end()]
    }

    fn selection_state(&self) -> SelectionState {
        self.header.selection.erase()
    }

    fn is_first_edit(&self) -> bool {
        self.header.first_edit
    }

    fn hit_test(&mut self, cursor: Point, tolerances: &HitTolerances) -> bool {
        self.header.reset_grab();
        self.header.selection = match hit_handle(cursor, tolerances.handle, |h| self.handle(h)) {
            Some(h) => Selection::Handle(h),
            None if point_near_segment(cursor, self.start(), self.end(), tolerances.segment) => {
                Selection::Body
            }
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
                let fixed = self.handle(h.other());
                let snapped = snap_segment(Segment::new(fixed, target), &rules.snap);
                self.set_handle(h, snapped.end);
            }
        }
    }

    fn commit(&mut self, grid_spacing: f64) {
        match self.header.selection {
            Selection::None => {}
            Selection::Body => self.header.offset = snap_to_grid(self.header.offset, grid_spacing),
            Selection::Handle(h) => {
                let mut p = snap_to_grid(self.handle(h), grid_spacing);
                if p == self.handle(h.other()) && !self.header.first_edit {
                    p.x += grid_spacing;
                }
                self.set_handle(h, p);
            }
        }
        self.header.finish_commit();
    }

    fn is_valid(&self) -> bool {
        self.start != self.end
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.start(), self.end())
    }

    fn draw(&self, sink: &mut dyn DrawSink, options: &DrawOptions) {
        sink.stroke_style(outline_token(self.is_selected()));
        sink.line_width(1.0);
        sink.begin_path();
        sink.move_to(self.start());
        sink.line_to(self.end());
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
