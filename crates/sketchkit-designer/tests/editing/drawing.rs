use sketchkit_core::distance;
use sketchkit_designer::{BoundingBox, Canvas, DesignerShape, DrawingMode, Point, Shape};

use crate::support::{assert_near, drag, drag_through, move_to, press, release};

fn only_shape(canvas: &Canvas) -> &Shape {
    assert_eq!(canvas.shape_count(), 1);
    canvas.shapes().next().unwrap()
}

#[test]
fn test_draw_line_scenario() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawLine);
    drag(&mut canvas, Point::new(0.0, 0.0), Point::new(100.0, 0.0));

    let line = only_shape(&canvas);
    let handles = line.handles();
    assert_near(handles[0], Point::new(0.0, 0.0));
    assert_near(handles[1], Point::new(100.0, 0.0));
    assert!(line.is_valid());
    assert_eq!(canvas.mode(), DrawingMode::Pointer);
    assert!(canvas.current_shape().is_none());
}

#[test]
fn test_line_end_snaps_to_grid_on_release() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawLine);
    drag(&mut canvas, Point::new(1.0, 2.0), Point::new(103.0, 47.0));

    let handles = only_shape(&canvas).handles();
    assert_near(handles[0], Point::new(0.0, 0.0));
    assert_near(handles[1], Point::new(100.0, 50.0));
}

#[test]
fn test_line_snaps_horizontal_while_dragging() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawLine);
    press(&mut canvas, Point::new(0.0, 0.0));
    move_to(&mut canvas, Point::new(87.0, 3.0));

    let live = canvas.current_shape().unwrap().handles();
    assert!(live[1].y.abs() < 1e-6, "end not on axis: {}", live[1]);
    assert!((live[1].x - 87.0).abs() < 1e-6);

    release(&mut canvas, Point::new(87.0, 3.0));
    assert_near(only_shape(&canvas).handles()[1], Point::new(90.0, 0.0));
}

#[test]
fn test_line_snaps_diagonal_while_dragging() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawLine);
    press(&mut canvas, Point::new(0.0, 0.0));
    move_to(&mut canvas, Point::new(60.0, 58.0));

    let live = canvas.current_shape().unwrap().handles();
    assert!((live[1].x - live[1].y).abs() < 1e-6, "end not on 45°: {}", live[1]);
}

#[test]
fn test_bezier_first_edit_derives_controls() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawBezier);
    drag_through(
        &mut canvas,
        Point::new(0.0, 0.0),
        &[Point::new(150.0, 0.0), Point::new(300.0, 0.0)],
    );

    let bias = canvas.config().bezier_bias;
    let [p0, c1, c2, p3]: [Point; 4] = only_shape(&canvas).handles().try_into().unwrap();
    assert_near(p0, Point::new(0.0, 0.0));
    assert_near(p3, Point::new(300.0, 0.0));
    assert!((c1.x - 100.0).abs() < 1e-6);
    assert!((c2.x - 200.0).abs() < 1e-6);
    assert!((c1.y - bias).abs() < 1e-6);
    assert!((c2.y + bias).abs() < 1e-6);
}

#[test]
fn test_rectangle_from_drag() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawRectangle);
    drag(&mut canvas, Point::new(10.0, 10.0), Point::new(60.0, 40.0));

    let Shape::Rectangle(rect) = only_shape(&canvas) else {
        panic!("rectangle expected");
    };
    assert_eq!(rect.width(), 50.0);
    assert_eq!(rect.height(), 30.0);
    assert_near(rect.offset(), Point::new(10.0, 10.0));
}

#[test]
fn test_rectangle_dragged_backwards_is_normalized() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawRectangle);
    drag(&mut canvas, Point::new(60.0, 40.0), Point::new(10.0, 10.0));

    let Shape::Rectangle(rect) = only_shape(&canvas) else {
        panic!("rectangle expected");
    };
    assert!(rect.width() > 0.0 && rect.height() > 0.0);
    assert_eq!(
        rect.bounding_box(),
        BoundingBox::from_corners(Point::new(10.0, 10.0), Point::new(60.0, 40.0))
    );
}

#[test]
fn test_rectangle_click_never_commits_zero_edges() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawRectangle);
    drag(&mut canvas, Point::new(30.0, 30.0), Point::new(31.0, 32.0));

    let Shape::Rectangle(rect) = only_shape(&canvas) else {
        panic!("rectangle expected");
    };
    assert_ne!(rect.width(), 0.0);
    assert_ne!(rect.height(), 0.0);
}

#[test]
fn test_rectangle_snaps_to_square() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawRectangle);
    drag(&mut canvas, Point::new(0.0, 0.0), Point::new(50.0, 49.0));

    let Shape::Rectangle(rect) = only_shape(&canvas) else {
        panic!("rectangle expected");
    };
    assert_eq!(rect.width(), rect.height());
}

#[test]
fn test_ellipse_corner_sets_radii() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawEllipse);
    drag(&mut canvas, Point::new(100.0, 100.0), Point::new(130.0, 120.0));

    let Shape::Ellipse(ellipse) = only_shape(&canvas) else {
        panic!("ellipse expected");
    };
    assert_near(ellipse.center(), Point::new(100.0, 100.0));
    assert_eq!(ellipse.radius_x(), 30.0);
    assert_eq!(ellipse.radius_y(), 20.0);
}

#[test]
fn test_arc_through_both_endpoints() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawArc);
    drag(&mut canvas, Point::new(0.0, 0.0), Point::new(100.0, 0.0));

    let Shape::Arc(arc) = only_shape(&canvas) else {
        panic!("arc expected");
    };
    assert!((arc.radius() - 100.0).abs() < 1e-6);
    assert!((distance(arc.center(), arc.start()) - arc.radius()).abs() < 1e-6);
    assert!((distance(arc.center(), arc.end()) - arc.radius()).abs() < 1e-6);
}

#[test]
fn test_mode_switch_drops_shape_under_construction() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawLine);
    press(&mut canvas, Point::new(0.0, 0.0));
    move_to(&mut canvas, Point::new(50.0, 20.0));
    canvas.set_mode(DrawingMode::Pointer);

    assert!(canvas.current_shape().is_none());
    assert!(!release(&mut canvas, Point::new(50.0, 20.0)));
    assert_eq!(canvas.shape_count(), 0);
}

#[test]
fn test_drawing_clears_previous_selection() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawLine);
    drag(&mut canvas, Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    canvas.set_mode(DrawingMode::DrawLine);
    drag(&mut canvas, Point::new(0.0, 50.0), Point::new(100.0, 50.0));

    let selected = canvas.selected_ids();
    assert_eq!(selected.len(), 1);
    assert_eq!(canvas.shape_count(), 2);
}
