use sketchkit_designer::{Canvas, DesignLine, DrawingMode, Key, Point, Shape};

use crate::support::{click, key, move_to, press};

fn canvas_with_lines() -> Canvas {
    let mut canvas = Canvas::new();
    for y in [0.0, 50.0, 100.0] {
        canvas.add_shape(Shape::Line(DesignLine::new(
            Point::new(0.0, y),
            Point::new(100.0, y),
        )));
    }
    canvas
}

#[test]
fn test_delete_removes_selected_shapes() {
    let mut canvas = canvas_with_lines();
    click(&mut canvas, Point::new(50.0, 50.0));
    assert_eq!(canvas.selected_ids().len(), 1);

    assert!(key(&mut canvas, Key::Delete));
    assert_eq!(canvas.shape_count(), 2);
    assert!(canvas.selected_ids().is_empty());
}

#[test]
fn test_backspace_after_rubber_band() {
    let mut canvas = canvas_with_lines();
    key(&mut canvas, Key::Shift);
    crate::support::drag(&mut canvas, Point::new(-10.0, -10.0), Point::new(110.0, 60.0));

    assert!(key(&mut canvas, Key::Backspace));
    assert_eq!(canvas.shape_count(), 1);
}

#[test]
fn test_delete_without_selection_does_nothing() {
    let mut canvas = canvas_with_lines();
    assert!(!key(&mut canvas, Key::Delete));
    assert_eq!(canvas.shape_count(), 3);
}

#[test]
fn test_shift_is_ignored_while_drawing() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawEllipse);
    assert!(!key(&mut canvas, Key::Shift));
    assert_eq!(canvas.mode(), DrawingMode::DrawEllipse);
}

#[test]
fn test_escape_abandons_drawing() {
    let mut canvas = Canvas::new();
    canvas.set_mode(DrawingMode::DrawBezier);
    press(&mut canvas, Point::new(0.0, 0.0));
    move_to(&mut canvas, Point::new(200.0, 0.0));

    assert!(key(&mut canvas, Key::Escape));
    assert!(canvas.current_shape().is_none());
    assert_eq!(canvas.mode(), DrawingMode::Pointer);
    assert_eq!(canvas.shape_count(), 0);
}

#[test]
fn test_other_keys_are_ignored() {
    let mut canvas = canvas_with_lines();
    click(&mut canvas, Point::new(50.0, 0.0));
    assert!(!key(&mut canvas, Key::Other));
    assert_eq!(canvas.shape_count(), 3);
    assert_eq!(canvas.selected_ids().len(), 1);
}
