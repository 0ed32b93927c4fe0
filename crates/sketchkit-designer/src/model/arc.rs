use sketchkit_core::{
    angle, distance, find_arc_center, midpoint, move_center_along_bisector,
    perpendicular_bisector_segment, point_near_arc, project_onto_bisector, snap_to_grid,
    arc_bounds, BoundingBox, Point,
};
use sketchkit_settings::HitTolerances;
use tracing::debug;

use super::{
    draw_construction, draw_handles, hit_handle, outline_token, DesignerShape, DrawOptions,
    EditRules, HandleKind, Selection, SelectionState, ShapeHeader, ShapeType,
};
use crate::renderer::DrawSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcHandle {
    Start,
    End,
    Center,
}

impl HandleKind for ArcHandle {
    const ALL: &'static [Self] = &[ArcHandle::Start, ArcHandle::End, ArcHandle::Center];

    fn index(self) -> usize {
        self as usize
    }
}

/// Circular arc swept counter-clockwise from `start` to `end` around
/// `center`. The center always stays equidistant from both endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignArc {
    pub header: ShapeHeader<ArcHandle>,
    start: Point,
    end: Point,
    center: Point,
    radius: f64,
}

impl DesignArc {
    /// New arc collapsed onto `start`, dragging its end.
    pub fn begin(start: Point) -> Self {
        Self {
            header: ShapeHeader::drawing(start, ArcHandle::End),
            start: Point::zero(),
            end: Point::zero(),
            center: Point::zero(),
            radius: 0.0,
        }
    }

    /// Arc on the circle (`center`, `radius`) between two angles in radians.
    pub fn from_center(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        let at = |a: f64| center + Point::new(a.cos(), a.sin()) * radius;
        let start = at(start_angle);
        Self {
            header: ShapeHeader::committed(start),
            start: Point::zero(),
            end: at(end_angle) - start,
            center: center - start,
            radius,
        }
    }

    pub fn start(&self) -> Point {
        self.header.offset + self.start
    }

    pub fn end(&self) -> Point {
        self.header.offset + self.end
    }

    pub fn center(&self) -> Point {
        self.header.offset + self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start_angle(&self) -> f64 {
        angle(self.center(), self.start())
    }

    pub fn end_angle(&self) -> f64 {
        angle(self.center(), self.end())
    }

    pub fn selection(&self) -> Selection<ArcHandle> {
        self.header.selection
    }

    fn handle(&self, h: ArcHandle) -> Point {
        match h {
            ArcHandle::Start => self.start(),
            ArcHandle::End => self.end(),
            ArcHandle::Center => self.center(),
        }
    }

    fn set_handle(&mut self, h: ArcHandle, p: Point) {
        let rel = p - self.header.offset;
        match h {
            ArcHandle::Start => self.start = rel,
            ArcHandle::End => self.end = rel,
            ArcHandle::Center => self.center = rel,
        }
    }

    /// Moves one endpoint to `p`, re-solving the circle through both
    /// endpoints with the chord as radius. Leaves the arc untouched when
    /// no circle exists.
    fn move_endpoint(&mut self, h: ArcHandle, p: Point) {
        let (a, b) = match h {
            ArcHandle::Start => (p, self.end()),
            _ => (self.start(), p),
        };
        let radius = distance(a, b);
        match find_arc_center(self.center(), a, b, radius) {
            Ok(center) => {
                self.set_handle(h, p);
                self.set_handle(ArcHandle::Center, center);
                self.radius = radius;
            }
            Err(e) => debug!("Arc {} keeps its endpoint: {}", self.header.id, e),
        }
    }

    fn place_center(&mut self, center: Point) {
        self.set_handle(ArcHandle::Center, center);
        self.radius = distance(self.start(), center);
    }
}

impl DesignerShape for DesignArc {
    fn id(&self) -> u64 {
        self.header.id
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Arc
    }

    fn offset(&self) -> Point {
        self.header.offset
    }

    fn handles(&self) -> Vec<Point> {
        vec![self.start(), self.end(), self.center()]
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
        self.header.selection = match hit_handle(cursor, tolerances.handle, |h| self.handle(h)) {
            // The center is only grabbable once the arc shows its handles.
            Some(ArcHandle::Center) if !was_selected => Selection::None,
            Some(h) => Selection::Handle(h),
            None if self.radius > 0.0
                && point_near_arc(
                    cursor,
                    self.center(),
                    self.radius,
                    self.start_angle(),
                    self.end_angle(),
                    tolerances.segment,
                ) =>
            {
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
            Selection::Handle(ArcHandle::Center) => {
                let current = self.center();
                let target = self.header.drag_target(current, cursor, delta);
                match move_center_along_bisector(self.start(), self.end(), current, target - current) {
                    Ok(mut center) => {
                        let mid = midpoint(self.start(), self.end());
                        if distance(center, mid) < rules.snap.semicircle_tolerance {
                            center = mid;
                        }
                        self.place_center(center);
                    }
                    Err(e) => debug!("Arc {} keeps its center: {}", self.header.id, e),
                }
            }
            Selection::Handle(h) => {
                let target = self.header.drag_target(self.handle(h), cursor, delta);
                self.move_endpoint(h, target);
            }
        }
    }

    fn commit(&mut self, grid_spacing: f64) {
        match self.header.selection {
            Selection::None => {}
            Selection::Body => self.header.offset = snap_to_grid(self.header.offset, grid_spacing),
            Selection::Handle(ArcHandle::Center) => {
                let snapped = snap_to_grid(self.center(), grid_spacing);
                match project_onto_bisector(self.start(), self.end(), snapped) {
                    Ok(center) => self.place_center(center),
                    Err(e) => debug!("Arc {} keeps its center: {}", self.header.id, e),
                }
            }
            Selection::Handle(h) => {
                let other = match h {
                    ArcHandle::Start => self.end(),
                    _ => self.start(),
                };
                let mut p = snap_to_grid(self.handle(h), grid_spacing);
                if p == other && self.header.first_edit {
                    // Collapsed onto the start; left degenerate for the canvas to drop.
                    self.set_handle(h, p);
                    self.radius = 0.0;
                } else {
                    if p == other {
                        p.x += grid_spacing;
                    }
                    if p != self.handle(h) {
                        self.move_endpoint(h, p);
                    }
                }
            }
        }
        self.header.finish_commit();
    }

    fn is_valid(&self) -> bool {
        self.start != self.end && self.radius > 0.0 && self.radius.is_finite()
    }

    fn bounding_box(&self) -> BoundingBox {
        if self.radius > 0.0 {
            arc_bounds(self.center(), self.radius, self.start_angle(), self.end_angle())
        } else {
            BoundingBox::from_corners(self.start(), self.end())
        }
    }

    fn draw(&self, sink: &mut dyn DrawSink, options: &DrawOptions) {
        if self.is_selected() {
            draw_construction(sink, &[self.start(), self.center(), self.end()]);
            if self.header.selection == Selection::Handle(ArcHandle::Center) {
                let bisector = perpendicular_bisector_segment(self.start(), self.end());
                draw_construction(sink, &[bisector.start, bisector.end]);
            }
        }
        sink.stroke_style(outline_token(self.is_selected()));
        sink.line_width(1.0);
        sink.begin_path();
        if self.radius > 0.0 {
            sink.move_to(self.start());
            sink.arc(self.center(), self.radius, self.start_angle(), self.end_angle());
        } else {
            sink.move_to(self.start());
            sink.line_to(self.end());
        }
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
