//! Pointer and keyboard routing for Canvas.

use sketchkit_core::{snap_to_grid, Point};
use tracing::{debug, info};

use super::types::{DrawingMode, InputEvent, Key, PointerButton};
use super::{Canvas, Gesture};
use crate::model::{DesignerShape, Shape};

impl Canvas {
    /// Routes one input event. Returns true when the scene changed and
    /// should be redrawn.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => {
                if button != PointerButton::Primary {
                    return false;
                }
                if modifiers.shift && self.mode == DrawingMode::Pointer {
                    self.set_mode(DrawingMode::RubberBandSelect);
                }
                self.pointer_down(x, y)
            }
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(x, y),
            InputEvent::PointerUp { x, y, button, .. } => {
                button == PointerButton::Primary && self.pointer_up(x, y)
            }
            InputEvent::Wheel { x, y, delta_y } => self.wheel(x, y, delta_y),
            InputEvent::KeyDown { key, .. } => self.key_down(key),
        }
    }

    /// Starts a gesture at pixel (`x`, `y`).
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let cursor = self.pixel_to_world(x, y);
        self.gesture = Some(Gesture {
            pixel: (x, y),
            cursor,
        });

        match self.mode {
            DrawingMode::Pointer => {
                let tolerances = self.config.hit.at_zoom(self.zoom());
                self.selection_manager
                    .hit_test_all(&mut self.shape_store, cursor, &tolerances);
            }
            DrawingMode::RubberBandSelect => self.selection_manager.begin_area(cursor),
            mode => {
                if let Some(shape_type) = mode.shape_type() {
                    self.deselect_all();
                    let start = snap_to_grid(cursor, self.config.grid.spacing);
                    debug!("Started {} at {}", shape_type, start);
                    self.current_shape = Some(Shape::begin(shape_type, start));
                }
            }
        }
        true
    }

    /// Continues the active gesture. Moves without a pressed button are
    /// ignored.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let Some(last) = self.gesture else {
            return false;
        };
        let cursor = self.pixel_to_world(x, y);
        let delta = cursor - last.cursor;
        let (dx, dy) = (x - last.pixel.0, y - last.pixel.1);

        match self.mode {
            DrawingMode::Pointer => {
                if self.selection_manager.has_selection(&self.shape_store) {
                    let rules = self.edit_rules();
                    for shape in self.shape_store.iter_mut().filter(|s| s.is_selected()) {
                        shape.edit(cursor, delta, &rules);
                    }
                } else {
                    self.viewport.pan_by(dx, dy);
                }
            }
            DrawingMode::RubberBandSelect => self.selection_manager.extend_area(delta),
            _ => {
                let rules = self.edit_rules();
                if let Some(shape) = self.current_shape.as_mut() {
                    shape.edit(cursor, delta, &rules);
                }
            }
        }

        // Re-read after a pan so the next delta is measured in the new view.
        self.gesture = Some(Gesture {
            pixel: (x, y),
            cursor: self.pixel_to_world(x, y),
        });
        true
    }

    /// Ends the active gesture.
    pub fn pointer_up(&mut self, _x: f64, _y: f64) -> bool {
        if self.gesture.take().is_none() {
            return false;
        }
        let spacing = self.config.grid.spacing;

        match self.mode {
            DrawingMode::Pointer => {
                for shape in self.shape_store.iter_mut().filter(|s| s.is_selected()) {
                    shape.commit(spacing);
                }
            }
            DrawingMode::RubberBandSelect => {
                let selected = self.selection_manager.finish_area(&mut self.shape_store);
                info!("Rubber band selected {} shape(s)", selected);
                self.set_mode(DrawingMode::Pointer);
            }
            _ => {
                if let Some(shape) = self.current_shape.take() {
                    self.finish_shape(shape, spacing);
                }
                self.set_mode(DrawingMode::Pointer);
            }
        }
        true
    }

    /// Zooms about pixel (`x`, `y`); negative `delta_y` zooms in.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        if delta_y == 0.0 {
            return false;
        }
        let step = self.config.view.zoom_step;
        self.viewport.wheel_zoom(x, y, delta_y, step);
        debug!("{}", self.viewport);
        true
    }

    pub fn key_down(&mut self, key: Key) -> bool {
        match key {
            Key::Delete | Key::Backspace => self.delete_selected() > 0,
            Key::Shift => {
                if self.mode == DrawingMode::Pointer && self.gesture.is_none() {
                    self.set_mode(DrawingMode::RubberBandSelect);
                    true
                } else {
                    false
                }
            }
            Key::Escape => {
                let changed = self.current_shape.is_some()
                    || self.selection_manager.area().is_some()
                    || self.mode != DrawingMode::Pointer;
                self.set_mode(DrawingMode::Pointer);
                self.current_shape = None;
                self.selection_manager.cancel_area();
                self.gesture = None;
                changed
            }
            Key::Other => false,
        }
    }

    /// Removes every selected shape. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let removed = self.selection_manager.delete_selected(&mut self.shape_store);
        if removed > 0 {
            info!("Deleted {} shape(s)", removed);
        }
        removed
    }

    fn finish_shape(&mut self, mut shape: Shape, spacing: f64) {
        shape.commit(spacing);
        if shape.is_valid() {
            let shape_type = shape.shape_type();
            let id = self.shape_store.push(shape);
            info!("Committed {} {}", shape_type, id);
        } else {
            info!("Discarded degenerate {}", shape.shape_type());
        }
    }

    /// Model point currently under the pointer, if a gesture is active.
    pub fn gesture_cursor(&self) -> Option<Point> {
        self.gesture.map(|g| g.cursor)
    }
}
