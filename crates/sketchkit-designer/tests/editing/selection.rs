use sketchkit_designer::{
    Canvas, DesignEllipse, DesignLine, DesignerShape, DrawingMode, InputEvent, Key, Modifiers,
    Point, PointerButton, Selection, Shape,
};

use crate::support::{click, drag, key};

fn two_lines() -> (Canvas, u64, u64) {
    let mut canvas = Canvas::new();
    let inside = canvas.add_shape(Shape::Line(DesignLine::new(
        Point::new(10.0, 10.0),
        Point::new(50.0, 40.0),
    )));
    let partial = canvas.add_shape(Shape::Line(DesignLine::new(
        Point::new(40.0, 100.0),
        Point::new(200.0, 100.0),
    )));
    (canvas, inside, partial)
}

fn selection_of(canvas: &Canvas, id: u64) -> Selection<usize> {
    canvas.shape(id).unwrap().selection_state()
}

#[test]
fn test_rubber_band_selects_enclosed_only() {
    let (mut canvas, inside, partial) = two_lines();
    key(&mut canvas, Key::Shift);
    assert_eq!(canvas.mode(), DrawingMode::RubberBandSelect);

    drag(&mut canvas, Point::new(0.0, 0.0), Point::new(100.0, 150.0));

    assert_eq!(selection_of(&canvas, inside), Selection::Body);
    assert_eq!(selection_of(&canvas, partial), Selection::None);
    assert_eq!(canvas.mode(), DrawingMode::Pointer);
    assert!(canvas.selection_area().is_none());
}

#[test]
fn test_rubber_band_works_in_any_direction() {
    let (mut canvas, inside, _) = two_lines();
    canvas.set_mode(DrawingMode::RubberBandSelect);
    drag(&mut canvas, Point::new(100.0, 80.0), Point::new(0.0, 0.0));
    assert_eq!(selection_of(&canvas, inside), Selection::Body);
}

#[test]
fn test_rubber_band_without_area_selects_nothing() {
    let mut canvas = Canvas::new();
    let flat = canvas.add_shape(Shape::Line(DesignLine::new(
        Point::new(10.0, 20.0),
        Point::new(50.0, 20.0),
    )));
    canvas.set_mode(DrawingMode::RubberBandSelect);
    drag(&mut canvas, Point::new(0.0, 20.0), Point::new(100.0, 20.0));

    assert_eq!(selection_of(&canvas, flat), Selection::None);
    assert_eq!(canvas.mode(), DrawingMode::Pointer);
}

#[test]
fn test_empty_click_clears_rubber_band_selection() {
    let (mut canvas, inside, partial) = two_lines();
    canvas.set_mode(DrawingMode::RubberBandSelect);
    drag(&mut canvas, Point::new(0.0, 0.0), Point::new(100.0, 150.0));

    // A click that hits nothing clears every selection.
    click(&mut canvas, Point::new(300.0, 300.0));
    assert_eq!(selection_of(&canvas, inside), Selection::None);
    assert_eq!(selection_of(&canvas, partial), Selection::None);
}

#[test]
fn test_shift_press_starts_rubber_band() {
    let mut canvas = Canvas::new();
    let id = canvas.add_shape(Shape::Ellipse(DesignEllipse::new(
        Point::new(50.0, 50.0),
        20.0,
        10.0,
    )));
    let shift = Modifiers {
        shift: true,
        ..Modifiers::default()
    };
    let (x0, y0) = canvas.viewport().world_to_pixel(0.0, 0.0);
    let (x1, y1) = canvas.viewport().world_to_pixel(100.0, 100.0);
    canvas.handle_event(InputEvent::PointerDown {
        x: x0,
        y: y0,
        button: PointerButton::Primary,
        modifiers: shift,
    });
    assert_eq!(canvas.mode(), DrawingMode::RubberBandSelect);
    canvas.handle_event(InputEvent::PointerMove {
        x: x1,
        y: y1,
        modifiers: shift,
    });
    canvas.handle_event(InputEvent::PointerUp {
        x: x1,
        y: y1,
        button: PointerButton::Primary,
        modifiers: shift,
    });

    assert_eq!(selection_of(&canvas, id), Selection::Body);
    assert_eq!(canvas.selected_ids(), vec![id]);
}

#[test]
fn test_click_selects_each_hit_shape() {
    let mut canvas = Canvas::new();
    let a = canvas.add_shape(Shape::Line(DesignLine::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    )));
    let b = canvas.add_shape(Shape::Line(DesignLine::new(
        Point::new(50.0, -50.0),
        Point::new(50.0, 50.0),
    )));
    click(&mut canvas, Point::new(50.0, 0.0));
    assert_eq!(selection_of(&canvas, a), Selection::Body);
    assert_eq!(selection_of(&canvas, b), Selection::Body);
}
