use sketchkit_core::{point_near_ellipse, snap_to_grid, BoundingBox, Point};
use sketchkit_settings::HitTolerances;

use super::{
    draw_handles, hit_handle, outline_token, DesignerShape, DrawOptions, EditRules, HandleKind,
    Selection, SelectionState, ShapeHeader, ShapeType,
};
use crate::renderer::DrawSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EllipseHandle {
    Center,
    Left,
    Top,
    Right,
    Bottom,
    Corner,
}

impl HandleKind for EllipseHandle {
    const ALL: &'static [Self] = &[
        EllipseHandle::Center,
        EllipseHandle::Left,
        EllipseHandle::Top,
        EllipseHandle::Right,
        EllipseHandle::Bottom,
        EllipseHandle::Corner,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Axis-aligned ellipse centered on `offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignEllipse {
    pub header: ShapeHeader<EllipseHandle>,
    radii: Point,
}

impl DesignEllipse {
    /// New zero-size ellipse at `center`, dragging its corner control.
    pub fn begin(center: Point) -> Self {
        Self {
            header: ShapeHeader::drawing(center, EllipseHandle::Corner),
            radii: Point::zero(),
        }
    }

    pub fn new(center: Point, rx: f64, ry: f64) -> Self {
        Self {
            header: ShapeHeader::committed(center),
            radii: Point::new(rx.abs(), ry.abs()),
        }
    }

    pub fn center(&self) -> Point {
        self.header.offset
    }

    pub fn radius_x(&self) -> f64 {
        self.radii.x
    }

    pub fn radius_y(&self) -> f64 {
        self.radii.y
    }

    pub fn selection(&self) -> Selection<EllipseHandle> {
        self.header.selection
    }

    pub fn handle(&self, h: EllipseHandle) -> Point {
        let Point { x: rx, y: ry } = self.radii;
        let rel = match h {
            EllipseHandle::Center => Point::zero(),
            EllipseHandle::Left => Point::new(-rx, 0.0),
            EllipseHandle::Top => Point::new(0.0, ry),
            EllipseHandle::Right => Point::new(rx, 0.0),
            EllipseHandle::Bottom => Point::new(0.0, -ry),
            EllipseHandle::Corner => Point::new(rx, ry),
        };
        self.header.offset + rel
    }
}

impl DesignerShape for DesignEllipse {
    fn id(&self) -> u64 {
        self.header.id
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Ellipse
    }

    fn offset(&self) -> Point {
        self.header.offset
    }

    fn handles(&self) -> Vec<Point> {
        EllipseHandle::ALL.iter().map(|h| self.handle(*h)).collect()
    }

    fn selection_state(&self) -> SelectionState {
        self.header.selection.erase()
    }

    fn is_first_edit(&self) -> bool {
        self.header.first_edit
    }

    fn hit_test(&mut self, cursor: Point, tolerances: &HitTolerances) -> bool {
        self.header.reset_grab();
        let center = self.center();
        let on_outline = point_near_ellipse(cursor, center, self.radii, tolerances.ellipse);
        self.header.selection = match hit_handle(cursor, tolerances.handle, |h| self.handle(h)) {
            Some(h) => Selection::Handle(h),
            None if on_outline => Selection::Body,
            None => Selection::None,
        };
        self.is_selected()
    }

    fn edit(&mut self, cursor: Point, delta: Point, rules: &EditRules) {
        let h = match self.header.selection {
            Selection::None => return,
            Selection::Body | Selection::Handle(EllipseHandle::Center) => {
                self.header.offset += delta;
                return;
            }
            Selection::Handle(h) => h,
        };
        let c = self.center();
        match h {
            EllipseHandle::Left | EllipseHandle::Right => {
                let target = self.header.drag_target(self.handle(h), cursor, delta);
                self.radii.x = (target.x - c.x).abs();
            }
            EllipseHandle::Top | EllipseHandle::Bottom => {
                let target = self.header.drag_target(self.handle(h), cursor, delta);
                self.radii.y = (target.y - c.y).abs();
            }
            _ => {
                self.radii = Point::new((cursor.x - c.x).abs(), (cursor.y - c.y).abs());
            }
        }

        let Point { x: rx, y: ry } = self.radii;
        if rx > 0.0 && ry > 0.0 && (rx - ry).abs() < rules.snap.square_tolerance {
            match h {
                EllipseHandle::Left | EllipseHandle::Right => self.radii.x = ry,
                _ => self.radii.y = rx,
            }
        }
    }

    fn commit(&mut self, grid_spacing: f64) {
        match self.header.selection {
            Selection::None => {}
            Selection::Body | Selection::Handle(EllipseHandle::Center) => {
                self.header.offset = snap_to_grid(self.header.offset, grid_spacing);
            }
            Selection::Handle(_) => {
                self.header.offset = snap_to_grid(self.header.offset, grid_spacing);
                let radii = snap_to_grid(self.radii, grid_spacing);
                self.radii = Point::new(radii.x.abs(), radii.y.abs());
                if self.radii.x == 0.0 {
                    self.radii.x = grid_spacing;
                }
                if self.radii.y == 0.0 {
                    self.radii.y = grid_spacing;
                }
            }
        }
        self.header.finish_commit();
    }

    fn is_valid(&self) -> bool {
        self.radii.x > 0.0 && self.radii.y > 0.0
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.center() - self.radii, self.center() + self.radii)
    }

    fn draw(&self, sink: &mut dyn DrawSink, options: &DrawOptions) {
        sink.stroke_style(outline_token(self.is_selected()));
        sink.line_width(1.0);
        sink.begin_path();
        sink.ellipse(self.center(), self.radii);
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
