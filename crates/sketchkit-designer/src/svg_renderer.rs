//! SVG drawing sink.
//!
//! Realizes [`DrawSink`] commands as an SVG document in screen space. Points
//! are transformed on the way in, so text stays upright even though the
//! model Y axis points up.

use std::f64::consts::TAU;
use std::fmt::Write as _;

use lyon::geom::{point, vector, Angle, Arc};
use sketchkit_core::{normalize_angle, Point};
use sketchkit_settings::StyleSettings;

use crate::renderer::{DrawSink, StyleToken};
use crate::viewport::ScreenTransform;

const FONT_SIZE: f64 = 12.0;

#[derive(Debug, Clone)]
struct SinkState {
    transform: ScreenTransform,
    stroke: StyleToken,
    fill: StyleToken,
    line_width: f64,
    dash: Vec<f64>,
}

impl Default for SinkState {
    fn default() -> Self {
        Self {
            transform: ScreenTransform::IDENTITY,
            stroke: StyleToken::Default,
            fill: StyleToken::Default,
            line_width: 1.0,
            dash: Vec::new(),
        }
    }
}

/// Collects drawing commands into an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSink {
    width: f64,
    height: f64,
    style: StyleSettings,
    state: SinkState,
    stack: Vec<SinkState>,
    path: String,
    current: Option<Point>,
    subpath_start: Option<Point>,
    body: String,
}

impl SvgSink {
    pub fn new(width: f64, height: f64, style: StyleSettings) -> Self {
        Self {
            width,
            height,
            style,
            state: SinkState::default(),
            stack: Vec::new(),
            path: String::new(),
            current: None,
            subpath_start: None,
            body: String::new(),
        }
    }

    /// Returns the finished SVG document.
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = fmt_num(self.width),
            h = fmt_num(self.height),
            body = self.body,
        )
    }

    fn to_screen(&self, p: Point) -> Point {
        self.state.transform.apply(p)
    }

    fn color(&self, token: StyleToken) -> String {
        escape(token.resolve(&self.style))
    }

    fn push_point(&mut self, cmd: char, p: Point) {
        let _ = write!(self.path, "{} {} {} ", cmd, fmt_num(p.x), fmt_num(p.y));
    }

    /// Connects the current point to `p` like canvas arcs do.
    fn connect_to(&mut self, p: Point) {
        match self.current {
            None => {
                self.push_point('M', p);
                self.subpath_start = Some(p);
            }
            Some(c) if (c - p).length() > 1e-9 => self.push_point('L', p),
            Some(_) => {}
        }
        self.current = Some(p);
    }
}

impl DrawSink for SvgSink {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_transform(&mut self, transform: ScreenTransform) {
        self.state.transform = transform;
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, p: Point) {
        let s = self.to_screen(p);
        self.push_point('M', s);
        self.current = Some(s);
        self.subpath_start = Some(s);
    }

    fn line_to(&mut self, p: Point) {
        let s = self.to_screen(p);
        if self.current.is_none() {
            self.move_to(p);
            return;
        }
        self.push_point('L', s);
        self.current = Some(s);
    }

    fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        let (c1, c2, t) = (self.to_screen(ctrl1), self.to_screen(ctrl2), self.to_screen(to));
        if self.current.is_none() {
            self.connect_to(c1);
        }
        let _ = write!(
            self.path,
            "C {} {} {} {} {} {} ",
            fmt_num(c1.x),
            fmt_num(c1.y),
            fmt_num(c2.x),
            fmt_num(c2.y),
            fmt_num(t.x),
            fmt_num(t.y)
        );
        self.current = Some(t);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        let sweep = normalize_angle(end_angle - start_angle);
        if radius <= 0.0 || sweep == 0.0 {
            return;
        }
        let t = self.state.transform;
        let c = t.apply(center);
        let r = radius * t.scale_x.abs();
        // Mirroring Y turns counter-clockwise model angles clockwise.
        let sign = if t.flips_y() { -1.0 } else { 1.0 };
        let arc = Arc {
            center: point(c.x, c.y),
            radii: vector(r, r),
            start_angle: Angle::radians(sign * start_angle),
            sweep_angle: Angle::radians(sign * sweep.min(TAU)),
            x_rotation: Angle::radians(0.0),
        };
        let svg = arc.to_svg_arc();
        self.connect_to(Point::new(svg.from.x, svg.from.y));
        let _ = write!(
            self.path,
            "A {r} {r} 0 {} {} {} {} ",
            u8::from(svg.flags.large_arc),
            u8::from(svg.flags.sweep),
            fmt_num(svg.to.x),
            fmt_num(svg.to.y),
            r = fmt_num(r),
        );
        self.current = Some(Point::new(svg.to.x, svg.to.y));
    }

    fn ellipse(&mut self, center: Point, radii: Point) {
        let t = self.state.transform;
        let c = t.apply(center);
        let (rx, ry) = (radii.x * t.scale_x.abs(), radii.y * t.scale_y.abs());
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let right = Point::new(c.x + rx, c.y);
        let left = Point::new(c.x - rx, c.y);
        self.push_point('M', right);
        for p in [left, right] {
            let _ = write!(
                self.path,
                "A {} {} 0 1 0 {} {} ",
                fmt_num(rx),
                fmt_num(ry),
                fmt_num(p.x),
                fmt_num(p.y)
            );
        }
        self.current = Some(right);
        self.subpath_start = Some(right);
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.path.push_str("Z ");
            self.current = self.subpath_start;
        }
    }

    fn stroke_style(&mut self, token: StyleToken) {
        self.state.stroke = token;
    }

    fn fill_style(&mut self, token: StyleToken) {
        self.state.fill = token;
    }

    fn line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_dash(&mut self, pattern: &[f64]) {
        self.state.dash = pattern.to_vec();
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let dash = if self.state.dash.is_empty() {
            String::new()
        } else {
            let parts: Vec<String> = self.state.dash.iter().map(|d| fmt_num(*d)).collect();
            format!(" stroke-dasharray=\"{}\"", parts.join(" "))
        };
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
            self.path.trim_end(),
            self.color(self.state.stroke),
            fmt_num(self.state.line_width),
            dash
        );
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"{}\" stroke=\"none\"/>",
            self.path.trim_end(),
            self.color(self.state.fill)
        );
    }

    fn fill_rect(&mut self, corner: Point, size: Point) {
        let a = self.to_screen(corner);
        let b = self.to_screen(corner + size);
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            fmt_num(a.x.min(b.x)),
            fmt_num(a.y.min(b.y)),
            fmt_num((a.x - b.x).abs()),
            fmt_num((a.y - b.y).abs()),
            self.color(self.state.fill)
        );
    }

    fn fill_text(&mut self, text: &str, at: Point) {
        let p = self.to_screen(at);
        let _ = writeln!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            fmt_num(p.x),
            fmt_num(p.y),
            fmt_num(FONT_SIZE),
            self.color(self.state.fill),
            escape(text)
        );
    }
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
