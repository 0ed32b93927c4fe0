use std::f64::consts::PI;

use sketchkit_core::distance;
use sketchkit_designer::{
    ArcHandle, BezierHandle, Canvas, DesignArc, DesignBezier, DesignEllipse, DesignLine,
    DesignRectangle, DesignerShape, LineHandle, Point, RectangleHandle, Selection, Shape,
};

use crate::support::{assert_near, click, drag, move_to, press, release};

fn canvas_with(shape: Shape) -> (Canvas, u64) {
    let mut canvas = Canvas::new();
    let id = canvas.add_shape(shape);
    (canvas, id)
}

fn line(canvas: &Canvas, id: u64) -> &DesignLine {
    match canvas.shape(id) {
        Some(Shape::Line(line)) => line,
        other => panic!("line expected, got {:?}", other),
    }
}

fn arc(canvas: &Canvas, id: u64) -> &DesignArc {
    match canvas.shape(id) {
        Some(Shape::Arc(arc)) => arc,
        other => panic!("arc expected, got {:?}", other),
    }
}

#[test]
fn test_handle_wins_over_body() {
    let (mut canvas, id) = canvas_with(Shape::Line(DesignLine::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    )));
    press(&mut canvas, Point::new(98.0, 2.0));
    assert_eq!(line(&canvas, id).selection(), Selection::Handle(LineHandle::End));
}

#[test]
fn test_body_drag_moves_rigidly_and_snaps() {
    let (mut canvas, id) = canvas_with(Shape::Line(DesignLine::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    )));
    drag(&mut canvas, Point::new(50.0, 0.0), Point::new(73.0, 12.0));

    let line = line(&canvas, id);
    assert_eq!(line.selection(), Selection::Body);
    assert_near(line.start(), Point::new(20.0, 10.0));
    assert_near(line.end(), Point::new(120.0, 10.0));
}

#[test]
fn test_axis_snap_releases_once_past_tolerance() {
    let (mut canvas, id) = canvas_with(Shape::Line(DesignLine::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    )));
    press(&mut canvas, Point::new(100.0, 0.0));
    move_to(&mut canvas, Point::new(100.0, 3.0));
    assert_near(line(&canvas, id).end(), Point::new(100.0, 0.0));

    move_to(&mut canvas, Point::new(100.0, 8.0));
    assert_near(line(&canvas, id).end(), Point::new(100.0, 8.0));

    release(&mut canvas, Point::new(100.0, 8.0));
    assert_near(line(&canvas, id).end(), Point::new(100.0, 10.0));
}

#[test]
fn test_bezier_controls_need_prior_selection() {
    let (mut canvas, id) = canvas_with(Shape::Bezier(DesignBezier::new(
        Point::new(0.0, 0.0),
        Point::new(30.0, 40.0),
        Point::new(70.0, 40.0),
        Point::new(100.0, 0.0),
    )));
    let bezier = |canvas: &Canvas| match canvas.shape(id) {
        Some(Shape::Bezier(b)) => b.clone(),
        other => panic!("bezier expected, got {:?}", other),
    };

    click(&mut canvas, Point::new(30.0, 40.0));
    assert_eq!(bezier(&canvas).selection(), Selection::None);

    click(&mut canvas, Point::new(50.0, 30.0));
    assert_eq!(bezier(&canvas).selection(), Selection::Body);

    drag(&mut canvas, Point::new(30.0, 40.0), Point::new(33.0, 52.0));
    let b = bezier(&canvas);
    assert_eq!(b.selection(), Selection::Handle(BezierHandle::Ctrl1));
    assert_near(b.point(BezierHandle::Ctrl1), Point::new(30.0, 50.0));
    assert_near(b.point(BezierHandle::Start), Point::new(0.0, 0.0));
    assert_near(b.point(BezierHandle::End), Point::new(100.0, 0.0));
}

#[test]
fn test_arc_center_drag_keeps_arc_through_endpoints() {
    let (mut canvas, id) = canvas_with(Shape::Arc(DesignArc::from_center(
        Point::new(50.0, 0.0),
        50.0,
        0.0,
        PI,
    )));
    click(&mut canvas, Point::new(50.0, 0.0));
    assert_eq!(arc(&canvas, id).selection(), Selection::None);

    click(&mut canvas, Point::new(50.0, 50.0));
    assert_eq!(arc(&canvas, id).selection(), Selection::Body);

    drag(&mut canvas, Point::new(50.0, 0.0), Point::new(50.0, 23.0));
    let a = arc(&canvas, id);
    assert_eq!(a.selection(), Selection::Handle(ArcHandle::Center));
    assert_near(a.center(), Point::new(50.0, 20.0));
    assert!((distance(a.center(), a.start()) - a.radius()).abs() < 1e-6);
    assert!((distance(a.center(), a.end()) - a.radius()).abs() < 1e-6);
}

#[test]
fn test_arc_collapsing_endpoint_drag_is_rejected() {
    let (mut canvas, id) = canvas_with(Shape::Arc(DesignArc::from_center(
        Point::new(50.0, 0.0),
        50.0,
        0.0,
        PI,
    )));
    drag(&mut canvas, Point::new(100.0, 0.0), Point::new(0.0, 0.0));

    let a = arc(&canvas, id);
    assert_eq!(a.selection(), Selection::Handle(ArcHandle::Start));
    assert_near(a.start(), Point::new(100.0, 0.0));
    assert_near(a.center(), Point::new(50.0, 0.0));
    assert!((a.radius() - 50.0).abs() < 1e-9);
    assert!(a.is_valid());
}

#[test]
fn test_rectangle_midpoint_changes_one_dimension() {
    let (mut canvas, id) = canvas_with(Shape::Rectangle(DesignRectangle::from_corners(
        Point::new(0.0, 0.0),
        Point::new(100.0, 50.0),
    )));
    drag(&mut canvas, Point::new(100.0, 25.0), Point::new(140.0, 30.0));

    let Some(Shape::Rectangle(rect)) = canvas.shape(id) else {
        panic!("rectangle expected");
    };
    assert_eq!(rect.width(), 140.0);
    assert_eq!(rect.height(), 50.0);
    assert_near(rect.offset(), Point::zero());
}

#[test]
fn test_rectangle_corner_drag_keeps_opposite_corner() {
    let (mut canvas, id) = canvas_with(Shape::Rectangle(DesignRectangle::from_corners(
        Point::new(100.0, 100.0),
        Point::new(200.0, 150.0),
    )));
    drag(&mut canvas, Point::new(100.0, 100.0), Point::new(115.0, 103.0));

    let Some(Shape::Rectangle(rect)) = canvas.shape(id) else {
        panic!("rectangle expected");
    };
    assert_near(rect.offset(), Point::new(120.0, 100.0));
    assert_near(rect.handle(RectangleHandle::TopRight), Point::new(200.0, 150.0));
}

#[test]
fn test_ellipse_axis_handle_sets_one_radius() {
    let (mut canvas, id) = canvas_with(Shape::Ellipse(DesignEllipse::new(
        Point::new(100.0, 100.0),
        40.0,
        20.0,
    )));
    drag(&mut canvas, Point::new(140.0, 100.0), Point::new(160.0, 103.0));

    let Some(Shape::Ellipse(e)) = canvas.shape(id) else {
        panic!("ellipse expected");
    };
    assert_eq!(e.radius_x(), 60.0);
    assert_eq!(e.radius_y(), 20.0);
    assert_near(e.center(), Point::new(100.0, 100.0));
}

#[test]
fn test_ellipse_snaps_to_circle() {
    let (mut canvas, id) = canvas_with(Shape::Ellipse(DesignEllipse::new(
        Point::new(100.0, 100.0),
        40.0,
        20.0,
    )));
    press(&mut canvas, Point::new(140.0, 100.0));
    move_to(&mut canvas, Point::new(121.0, 100.0));

    let Some(Shape::Ellipse(e)) = canvas.shape(id) else {
        panic!("ellipse expected");
    };
    assert_eq!(e.radius_x(), e.radius_y());
}
