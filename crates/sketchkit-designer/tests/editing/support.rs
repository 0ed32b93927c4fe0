//! Helpers that drive a canvas with pixel events from model coordinates.
#![allow(dead_code)]

use sketchkit_designer::{Canvas, InputEvent, Key, Modifiers, Point, PointerButton};

pub fn press(canvas: &mut Canvas, p: Point) -> bool {
    let (x, y) = canvas.viewport().world_point_to_pixel(&p);
    canvas.handle_event(InputEvent::PointerDown {
        x,
        y,
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    })
}

pub fn move_to(canvas: &mut Canvas, p: Point) -> bool {
    let (x, y) = canvas.viewport().world_point_to_pixel(&p);
    canvas.handle_event(InputEvent::PointerMove {
        x,
        y,
        modifiers: Modifiers::default(),
    })
}

pub fn release(canvas: &mut Canvas, p: Point) -> bool {
    let (x, y) = canvas.viewport().world_point_to_pixel(&p);
    canvas.handle_event(InputEvent::PointerUp {
        x,
        y,
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    })
}

/// Press at `from`, move through `path`, release at the last point.
pub fn drag_through(canvas: &mut Canvas, from: Point, path: &[Point]) {
    press(canvas, from);
    for p in path {
        move_to(canvas, *p);
    }
    release(canvas, path.last().copied().unwrap_or(from));
}

pub fn drag(canvas: &mut Canvas, from: Point, to: Point) {
    drag_through(canvas, from, &[to]);
}

pub fn click(canvas: &mut Canvas, p: Point) {
    press(canvas, p);
    release(canvas, p);
}

pub fn key(canvas: &mut Canvas, key: Key) -> bool {
    canvas.handle_event(InputEvent::KeyDown {
        key,
        modifiers: Modifiers::default(),
    })
}

pub fn assert_near(actual: Point, expected: Point) {
    assert!(
        (actual - expected).length() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}
