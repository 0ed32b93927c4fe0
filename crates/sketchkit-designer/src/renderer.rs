//! Scene renderer for the editing surface.
//!
//! Rendering goes through the [`DrawSink`] trait: a small immediate-mode
//! command interface in model coordinates. The renderer never deals with
//! colors directly; it names a [`StyleToken`] and the sink resolves it.
//!
//! Frame layout:
//! - Margin bands around the working area
//! - Grid lines at the grid spacing
//! - X and Y axes
//! - Origin marker
//! - Committed shapes in insertion order, then the shape being drawn
//! - Dimension labels for selected shapes
//! - Rubber-band rectangle
//! - Machine head marker

use sketchkit_core::constants::DASH_PATTERN;
use sketchkit_core::Point;
use sketchkit_settings::StyleSettings;

use crate::annotations::annotations_for;
use crate::model::{DesignerShape, DrawOptions};
use crate::viewport::ScreenTransform;
use crate::Canvas;

const MAX_GRID_LINES: usize = 10_000;
const ORIGIN_RADIUS_PX: f64 = 10.0;
const HEAD_ARM_PX: f64 = 8.0;
const LABEL_GAP_PX: f64 = 5.0;

/// Named colors used while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    Default,
    Selected,
    Light,
    Grid,
    Axis,
    Margin,
    Origin,
    Head,
    HandleFill,
    HandleActiveFill,
    Text,
}

impl StyleToken {
    /// Looks the token up in the configured style.
    pub fn resolve(self, style: &StyleSettings) -> &str {
        match self {
            StyleToken::Default => &style.default,
            StyleToken::Selected => &style.selected,
            StyleToken::Light => &style.light,
            StyleToken::Grid => &style.grid,
            StyleToken::Axis => &style.axis,
            StyleToken::Margin => &style.margin,
            StyleToken::Origin => &style.origin,
            StyleToken::Head => &style.head,
            StyleToken::HandleFill => &style.handle_fill,
            StyleToken::HandleActiveFill => &style.handle_active_fill,
            StyleToken::Text => &style.text,
        }
    }
}

/// Drawing-command interface consumed by shapes and the scene renderer.
///
/// Coordinates are in model space; the sink maps them through the current
/// transform. Angles are radians, counter-clockwise in model space.
pub trait DrawSink {
    fn save(&mut self);
    fn restore(&mut self);
    fn set_transform(&mut self, transform: ScreenTransform);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);
    /// Counter-clockwise arc; connects from the current point to the arc
    /// start with a straight line.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);
    fn ellipse(&mut self, center: Point, radii: Point);
    fn close_path(&mut self);

    fn stroke_style(&mut self, token: StyleToken);
    fn fill_style(&mut self, token: StyleToken);
    fn line_width(&mut self, width: f64);
    fn set_dash(&mut self, pattern: &[f64]);

    fn stroke(&mut self);
    fn fill(&mut self);
    fn fill_rect(&mut self, corner: Point, size: Point);
    fn fill_text(&mut self, text: &str, at: Point);
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    SetTransform(ScreenTransform),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    BezierCurveTo(Point, Point, Point),
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Ellipse {
        center: Point,
        radii: Point,
    },
    ClosePath,
    StrokeStyle(StyleToken),
    FillStyle(StyleToken),
    LineWidth(f64),
    SetDash(Vec<f64>),
    Stroke,
    Fill,
    FillRect(Point, Point),
    FillText(String, Point),
}

/// Sink that records every call, for hosts that replay commands onto
/// their own surface.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts passed to `fill_text`, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText(t, _) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSink for CommandRecorder {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }
    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }
    fn set_transform(&mut self, transform: ScreenTransform) {
        self.commands.push(DrawCommand::SetTransform(transform));
    }
    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }
    fn move_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::MoveTo(p));
    }
    fn line_to(&mut self, p: Point) {
        self.commands.push(DrawCommand::LineTo(p));
    }
    fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.commands.push(DrawCommand::BezierCurveTo(ctrl1, ctrl2, to));
    }
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }
    fn ellipse(&mut self, center: Point, radii: Point) {
        self.commands.push(DrawCommand::Ellipse { center, radii });
    }
    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }
    fn stroke_style(&mut self, token: StyleToken) {
        self.commands.push(DrawCommand::StrokeStyle(token));
    }
    fn fill_style(&mut self, token: StyleToken) {
        self.commands.push(DrawCommand::FillStyle(token));
    }
    fn line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }
    fn set_dash(&mut self, pattern: &[f64]) {
        self.commands.push(DrawCommand::SetDash(pattern.to_vec()));
    }
    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }
    fn fill_rect(&mut self, corner: Point, size: Point) {
        self.commands.push(DrawCommand::FillRect(corner, size));
    }
    fn fill_text(&mut self, text: &str, at: Point) {
        self.commands.push(DrawCommand::FillText(text.to_string(), at));
    }
}

/// Renders the whole scene of `canvas` into `sink`.
pub fn render_canvas(canvas: &Canvas, sink: &mut dyn DrawSink) {
    let viewport = canvas.viewport();
    let config = canvas.config();
    let px = 1.0 / viewport.zoom();

    sink.save();
    sink.set_transform(viewport.screen_transform());

    let area = viewport.working_area();
    render_margins(sink, area, viewport.margin());
    if config.grid.visible {
        render_grid(sink, area, config.grid.spacing);
    }
    render_axes(sink, area);
    render_origin(sink, ORIGIN_RADIUS_PX * px);

    let options = DrawOptions {
        handle_size: sketchkit_core::constants::HANDLE_MARKER_SIZE * px,
        square_tolerance: config.snapping.square_tolerance * px,
    };
    for shape in canvas.shapes() {
        shape.draw(sink, &options);
    }
    if let Some(shape) = canvas.current_shape() {
        shape.draw(sink, &options);
    }

    if config.show_annotations {
        sink.fill_style(StyleToken::Text);
        let drawn = canvas.shapes().chain(canvas.current_shape());
        for shape in drawn.filter(|s| s.is_selected()) {
            for label in annotations_for(shape, config.units, LABEL_GAP_PX * px) {
                sink.fill_text(&label.text, label.anchor);
            }
        }
    }

    if let Some(area) = canvas.selection_area() {
        let bounds = area.bounds();
        if bounds.has_area() {
            let (bl, tr) = (bounds.bottom_left, bounds.top_right);
            sink.stroke_style(StyleToken::Light);
            sink.line_width(1.0);
            sink.set_dash(&DASH_PATTERN);
            sink.begin_path();
            sink.move_to(bl);
            sink.line_to(Point::new(tr.x, bl.y));
            sink.line_to(tr);
            sink.line_to(Point::new(bl.x, tr.y));
            sink.close_path();
            sink.stroke();
            sink.set_dash(&[]);
        }
    }

    if let Some(head) = canvas.head_position() {
        render_head(sink, head, HEAD_ARM_PX * px);
    }

    sink.restore();
}

fn render_margins(sink: &mut dyn DrawSink, area: Point, margin: f64) {
    if margin <= 0.0 {
        return;
    }
    sink.fill_style(StyleToken::Margin);
    let full_height = area.y + 2.0 * margin;
    sink.fill_rect(Point::new(-margin, -margin), Point::new(margin, full_height));
    sink.fill_rect(Point::new(area.x, -margin), Point::new(margin, full_height));
    sink.fill_rect(Point::new(0.0, -margin), Point::new(area.x, margin));
    sink.fill_rect(Point::new(0.0, area.y), Point::new(area.x, margin));
}

fn render_grid(sink: &mut dyn DrawSink, area: Point, spacing: f64) {
    if spacing <= 0.0 {
        return;
    }
    sink.stroke_style(StyleToken::Grid);
    sink.line_width(1.0);
    sink.set_dash(&[]);
    sink.begin_path();
    let mut x = spacing;
    let mut count = 0;
    while x < area.x && count < MAX_GRID_LINES {
        sink.move_to(Point::new(x, 0.0));
        sink.line_to(Point::new(x, area.y));
        x += spacing;
        count += 1;
    }
    let mut y = spacing;
    while y < area.y && count < MAX_GRID_LINES {
        sink.move_to(Point::new(0.0, y));
        sink.line_to(Point::new(area.x, y));
        y += spacing;
        count += 1;
    }
    sink.stroke();
}

fn render_axes(sink: &mut dyn DrawSink, area: Point) {
    sink.stroke_style(StyleToken::Axis);
    sink.line_width(2.0);
    sink.begin_path();
    sink.move_to(Point::zero());
    sink.line_to(Point::new(area.x, 0.0));
    sink.move_to(Point::zero());
    sink.line_to(Point::new(0.0, area.y));
    sink.stroke();
}

fn render_origin(sink: &mut dyn DrawSink, radius: f64) {
    sink.fill_style(StyleToken::Origin);
    sink.begin_path();
    sink.ellipse(Point::zero(), Point::new(radius, radius));
    sink.fill();

    let arm = radius * std::f64::consts::FRAC_1_SQRT_2;
    sink.stroke_style(StyleToken::HandleFill);
    sink.line_width(2.0);
    sink.begin_path();
    sink.move_to(Point::new(-arm, -arm));
    sink.line_to(Point::new(arm, arm));
    sink.move_to(Point::new(-arm, arm));
    sink.line_to(Point::new(arm, -arm));
    sink.stroke();
}

fn render_head(sink: &mut dyn DrawSink, head: Point, arm: f64) {
    sink.stroke_style(StyleToken::Head);
    sink.line_width(2.0);
    sink.set_dash(&[]);
    sink.begin_path();
    sink.move_to(head - Point::new(arm, 0.0));
    sink.line_to(head + Point::new(arm, 0.0));
    sink.move_to(head - Point::new(0.0, arm));
    sink.line_to(head + Point::new(0.0, arm));
    sink.stroke();
}
