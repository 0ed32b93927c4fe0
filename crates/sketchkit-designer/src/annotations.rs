//! Dimension and angle labels shown next to selected shapes.

use sketchkit_core::{angle, distance, format_angle, format_length, midpoint, MeasurementSystem, Point};

use crate::model::{RectangleHandle, Shape};

/// A text label anchored at a model point.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub anchor: Point,
    pub text: String,
}

/// Anchor for a label along `a -> b`: the midpoint pushed `gap` to the
/// side that reads upward.
pub fn label_anchor(a: Point, b: Point, gap: f64) -> Point {
    let mid = midpoint(a, b);
    let len = distance(a, b);
    if len == 0.0 {
        return mid;
    }
    let n = (b - a).perpendicular();
    let normal = Point::new(n.x / len, n.y / len);
    if b.x > a.x {
        mid + normal * gap
    } else {
        mid - normal * gap
    }
}

/// Labels for one shape. Bezier curves carry none.
pub fn annotations_for(shape: &Shape, units: MeasurementSystem, gap: f64) -> Vec<Annotation> {
    let label = |anchor: Point, text: String| Annotation { anchor, text };
    match shape {
        Shape::Line(line) => {
            let (a, b) = (line.start(), line.end());
            vec![
                label(label_anchor(a, b, gap), format_length(line.length(), units)),
                label(a + Point::new(gap, gap), format_angle(angle(a, b))),
            ]
        }
        Shape::Arc(arc) => vec![label(
            label_anchor(arc.center(), arc.start(), gap),
            format!("R {}", format_length(arc.radius(), units)),
        )],
        Shape::Rectangle(rect) => {
            let bl = rect.handle(RectangleHandle::BottomLeft);
            let br = rect.handle(RectangleHandle::BottomRight);
            let tr = rect.handle(RectangleHandle::TopRight);
            vec![
                label(label_anchor(bl, br, gap), format_length(rect.width().abs(), units)),
                label(label_anchor(br, tr, gap), format_length(rect.height().abs(), units)),
            ]
        }
        Shape::Ellipse(ellipse) => {
            let c = ellipse.center();
            vec![
                label(
                    label_anchor(c, c + Point::new(ellipse.radius_x(), 0.0), gap),
                    format!("Rx {}", format_length(ellipse.radius_x(), units)),
                ),
                label(
                    label_anchor(c, c + Point::new(0.0, ellipse.radius_y()), gap),
                    format!("Ry {}", format_length(ellipse.radius_y(), units)),
                ),
            ]
        }
        Shape::Bezier(_) => Vec::new(),
    }
}
