//! # SketchKit
//!
//! An interactive 2D vector sketching core: lines, arcs, cubic Bezier
//! curves, rectangles and ellipses edited through handles, with grid,
//! axis and 45° snapping on a pannable, zoomable canvas.
//!
//! ## Architecture
//!
//! SketchKit is organized as a workspace with multiple crates:
//!
//! 1. **sketchkit-core** - Points, boxes, the geometry kernel, snapping, units
//! 2. **sketchkit-settings** - Editor configuration and persistence
//! 3. **sketchkit-designer** - Shapes, canvas, viewport and rendering
//! 4. **sketchkit** - This crate: logging setup, script replay and the binary
//!
//! The binary replays a recorded input script through a [`Canvas`] and
//! prints the resulting scene as SVG.

pub mod script;

pub use sketchkit_core::{BoundingBox, GeometryError, MeasurementSystem, Point, SnapRules};
pub use sketchkit_designer::{
    render_canvas, Canvas, CommandRecorder, DesignerShape, DrawSink, DrawingMode, InputEvent,
    Key, Modifiers, PointerButton, Shape, ShapeType, StyleToken, SvgSink, Viewport,
};
pub use sketchkit_settings::{EditorConfig, SettingsError};

pub use script::{render_svg, Script, Step};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so SVG written to stdout stays clean
/// - RUST_LOG environment variable support (INFO when unset)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
