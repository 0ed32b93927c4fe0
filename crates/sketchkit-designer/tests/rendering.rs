//! Scene rendering through the command recorder and the SVG sink.

use sketchkit_designer::{
    render_canvas, Canvas, CommandRecorder, DesignArc, DesignLine, DesignRectangle,
    DesignerShape, DrawCommand, InputEvent, Modifiers, Point, PointerButton, Shape, StyleToken,
    SvgSink,
};

fn svg_of(canvas: &Canvas) -> String {
    let vp = canvas.viewport();
    let mut sink = SvgSink::new(vp.canvas_width(), vp.canvas_height(), canvas.config().style.clone());
    render_canvas(canvas, &mut sink);
    sink.finish()
}

#[test]
fn test_committed_line_lands_on_screen_pixels() {
    let mut canvas = Canvas::new();
    canvas.add_shape(Shape::Line(DesignLine::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 50.0),
    )));
    let svg = svg_of(&canvas);

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("width=\"1200\" height=\"800\""));
    // Model origin sits at the bottom-left margin corner.
    assert!(svg.contains("M 20 780 L 120 730"), "{}", svg);
}

#[test]
fn test_selected_shape_shows_handles_and_annotations() {
    let mut canvas = Canvas::new();
    let id = canvas.add_shape(Shape::Rectangle(DesignRectangle::from_corners(
        Point::new(0.0, 0.0),
        Point::new(40.0, 30.0),
    )));
    canvas.shape_mut(id).unwrap().select();

    let mut rec = CommandRecorder::new();
    render_canvas(&canvas, &mut rec);
    let markers = rec
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillRect(..)))
        .count();
    // Four margin bands plus eight rectangle handles.
    assert_eq!(markers, 12);
    assert_eq!(rec.texts(), vec!["40.0 mm", "30.0 mm"]);
}

#[test]
fn test_annotations_can_be_turned_off() {
    let mut config = sketchkit_settings::EditorConfig::default();
    config.show_annotations = false;
    let mut canvas = Canvas::with_config(config);
    let id = canvas.add_shape(Shape::Line(DesignLine::new(
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
    )));
    canvas.shape_mut(id).unwrap().select();

    let mut rec = CommandRecorder::new();
    render_canvas(&canvas, &mut rec);
    assert!(rec.texts().is_empty());
}

#[test]
fn test_arc_is_drawn_counter_clockwise() {
    let mut canvas = Canvas::new();
    canvas.add_shape(Shape::Arc(DesignArc::from_center(
        Point::new(100.0, 100.0),
        50.0,
        0.0,
        std::f64::consts::FRAC_PI_2,
    )));
    let mut rec = CommandRecorder::new();
    render_canvas(&canvas, &mut rec);

    let arc = rec.commands.iter().find_map(|c| match c {
        DrawCommand::Arc {
            radius,
            start_angle,
            end_angle,
            ..
        } if (*radius - 50.0).abs() < 1e-9 => Some((*start_angle, *end_angle)),
        _ => None,
    });
    let (start, end) = arc.expect("arc command");
    assert!(start.abs() < 1e-9);
    assert!((end - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn test_rubber_band_and_head_marker() {
    let mut canvas = Canvas::new();
    canvas.set_head_position(Some(Point::new(10.0, 10.0)));
    canvas.set_mode(sketchkit_designer::DrawingMode::RubberBandSelect);
    let (x0, y0) = canvas.viewport().world_to_pixel(0.0, 0.0);
    canvas.handle_event(InputEvent::PointerDown {
        x: x0,
        y: y0,
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    });
    canvas.handle_event(InputEvent::PointerMove {
        x: x0 + 50.0,
        y: y0 - 40.0,
        modifiers: Modifiers::default(),
    });

    let mut rec = CommandRecorder::new();
    render_canvas(&canvas, &mut rec);
    assert!(rec
        .commands
        .contains(&DrawCommand::StrokeStyle(StyleToken::Light)));
    assert!(rec.commands.contains(&DrawCommand::StrokeStyle(StyleToken::Head)));

    let svg = svg_of(&canvas);
    assert!(svg.contains("stroke-dasharray"));
}

#[test]
fn test_shape_under_construction_is_rendered() {
    let mut canvas = Canvas::new();
    canvas.set_mode(sketchkit_designer::DrawingMode::DrawEllipse);
    let (x, y) = canvas.viewport().world_to_pixel(100.0, 100.0);
    canvas.handle_event(InputEvent::PointerDown {
        x,
        y,
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    });
    canvas.handle_event(InputEvent::PointerMove {
        x: x + 30.0,
        y: y - 20.0,
        modifiers: Modifiers::default(),
    });

    let mut rec = CommandRecorder::new();
    render_canvas(&canvas, &mut rec);
    assert!(rec.commands.contains(&DrawCommand::Ellipse {
        center: Point::new(100.0, 100.0),
        radii: Point::new(30.0, 20.0),
    }));
}
