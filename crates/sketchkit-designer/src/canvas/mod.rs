//! Canvas for drawing and manipulating shapes.
//!
//! The canvas owns the scene: committed shapes, the shape under
//! construction, the active mode, the viewport and the editor settings.
//! Hosts feed it raw [`InputEvent`]s and redraw when it asks them to.

mod operations;
mod types;

pub use types::{DrawingMode, InputEvent, Key, Modifiers, PointerButton};

use sketchkit_core::Point;
use sketchkit_settings::EditorConfig;
use tracing::info;

use crate::model::{EditRules, Shape};
use crate::selection_manager::{SelectionArea, SelectionManager};
use crate::shape_store::ShapeStore;
use crate::viewport::Viewport;

/// Pointer state between a press and its release.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Gesture {
    /// Last pointer position in pixels.
    pixel: (f64, f64),
    /// Last pointer position in model space.
    cursor: Point,
}

/// Canvas state managing shapes and drawing operations.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub shape_store: ShapeStore,
    pub selection_manager: SelectionManager,
    current_shape: Option<Shape>,
    mode: DrawingMode,
    viewport: Viewport,
    config: EditorConfig,
    gesture: Option<Gesture>,
    head_position: Option<Point>,
}

impl Canvas {
    /// Creates a new canvas with default settings.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Creates a canvas using the given settings.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            shape_store: ShapeStore::new(),
            selection_manager: SelectionManager::new(),
            current_shape: None,
            mode: DrawingMode::Pointer,
            viewport: Viewport::new(&config.view),
            config,
            gesture: None,
            head_position: None,
        }
    }

    /// Sets the drawing mode. A shape still under construction is dropped.
    pub fn set_mode(&mut self, mode: DrawingMode) {
        if self.mode == mode {
            return;
        }
        if self.current_shape.take().is_some() {
            info!("Discarded shape under construction");
        }
        self.selection_manager.cancel_area();
        self.gesture = None;
        info!("Mode: {}", mode);
        self.mode = mode;
    }

    /// Gets the current drawing mode.
    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    /// Gets the editor settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces the editor settings. View size, zoom and pan are kept.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config;
    }

    /// Gets the viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Gets the viewport mutably.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Gets the current zoom level.
    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    /// Sets the canvas size in pixels (typically on window resize).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
    }

    /// Adds a committed shape and returns its id.
    pub fn add_shape(&mut self, shape: Shape) -> u64 {
        self.shape_store.push(shape)
    }

    /// Removes a shape by id.
    pub fn remove_shape(&mut self, id: u64) -> bool {
        self.shape_store.remove(id).is_some()
    }

    /// Iterates over the committed shapes in draw order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shape_store.iter()
    }

    pub fn shape(&self, id: u64) -> Option<&Shape> {
        self.shape_store.get(id)
    }

    pub fn shape_mut(&mut self, id: u64) -> Option<&mut Shape> {
        self.shape_store.get_mut(id)
    }

    pub fn shape_count(&self) -> usize {
        self.shape_store.len()
    }

    /// Gets the shape being drawn, if a drawing gesture is in progress.
    pub fn current_shape(&self) -> Option<&Shape> {
        self.current_shape.as_ref()
    }

    /// Gets the rubber band being dragged, if any.
    pub fn selection_area(&self) -> Option<&SelectionArea> {
        self.selection_manager.area()
    }

    /// Ids of every selected shape.
    pub fn selected_ids(&self) -> Vec<u64> {
        self.selection_manager.selected_ids(&self.shape_store)
    }

    /// Clears the selection of every shape.
    pub fn deselect_all(&mut self) {
        self.selection_manager.deselect_all(&mut self.shape_store);
    }

    /// Gets the machine head marker position.
    pub fn head_position(&self) -> Option<Point> {
        self.head_position
    }

    /// Shows the machine head marker at `position`, or hides it.
    pub fn set_head_position(&mut self, position: Option<Point>) {
        self.head_position = position;
    }

    /// Converts a pixel position to model space.
    pub fn pixel_to_world(&self, x: f64, y: f64) -> Point {
        self.viewport.pixel_to_world(x, y)
    }

    /// Edit rules in model units for the current zoom.
    fn edit_rules(&self) -> EditRules {
        EditRules {
            snap: self.config.snapping.scaled(1.0 / self.zoom()),
            bezier_bias: self.config.bezier_bias,
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
