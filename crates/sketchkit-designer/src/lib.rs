//! # SketchKit Designer
//!
//! The interactive editing surface: a shape model with handle editing and
//! snapping, a scene controller that routes pointer and keyboard input, a
//! pannable and zoomable viewport, and a renderer that emits drawing
//! commands into any [`DrawSink`].
//!
//! ## Architecture
//!
//! ```text
//! Canvas (scene controller)
//!   ├── ShapeStore (committed shapes, draw order)
//!   ├── SelectionManager (hit-testing, rubber band, delete)
//!   ├── Viewport (zoom, pan, model <-> pixel transform)
//!   └── current shape (under construction)
//!
//! Renderer
//!   ├── DrawSink (command interface)
//!   ├── CommandRecorder (records commands)
//!   └── SvgSink (SVG document output)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sketchkit_designer::{Canvas, DrawingMode, InputEvent, Modifiers, PointerButton};
//!
//! let mut canvas = Canvas::new();
//! canvas.set_mode(DrawingMode::DrawLine);
//! canvas.handle_event(InputEvent::PointerDown {
//!     x: 20.0,
//!     y: 780.0,
//!     button: PointerButton::Primary,
//!     modifiers: Modifiers::default(),
//! });
//! canvas.handle_event(InputEvent::PointerMove {
//!     x: 120.0,
//!     y: 780.0,
//!     modifiers: Modifiers::default(),
//! });
//! canvas.handle_event(InputEvent::PointerUp {
//!     x: 120.0,
//!     y: 780.0,
//!     button: PointerButton::Primary,
//!     modifiers: Modifiers::default(),
//! });
//! assert_eq!(canvas.shape_count(), 1);
//! assert_eq!(canvas.mode(), DrawingMode::Pointer);
//! ```

pub mod annotations;
pub mod canvas;
pub mod model;
pub mod renderer;
pub mod selection_manager;
pub mod shape_store;
pub mod svg_renderer;
pub mod viewport;

pub use annotations::{annotations_for, Annotation};
pub use canvas::{Canvas, DrawingMode, InputEvent, Key, Modifiers, PointerButton};
pub use model::{
    ArcHandle, BezierHandle, DesignArc, DesignBezier, DesignEllipse, DesignLine,
    DesignRectangle, DesignerShape, DrawOptions, EditRules, EllipseHandle, LineHandle,
    RectangleHandle, Selection, SelectionState, Shape, ShapeType,
};
pub use renderer::{render_canvas, CommandRecorder, DrawCommand, DrawSink, StyleToken};
pub use selection_manager::{SelectionArea, SelectionManager};
pub use shape_store::ShapeStore;
pub use sketchkit_core::{BoundingBox, Point};
pub use svg_renderer::SvgSink;
pub use viewport::{ScreenTransform, Viewport};
