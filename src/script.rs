//! Recorded input scripts.
//!
//! A script is a JSON document listing mode changes and raw input events.
//! Replaying it through a [`Canvas`] reproduces an editing session without
//! a window system:
//!
//! ```json
//! {
//!   "canvas": { "width": 800, "height": 600 },
//!   "steps": [
//!     { "mode": "draw_line" },
//!     { "kind": "pointer_down", "x": 20, "y": 580 },
//!     { "kind": "pointer_move", "x": 120, "y": 580 },
//!     { "kind": "pointer_up", "x": 120, "y": 580 }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sketchkit_core::Point;
use sketchkit_designer::{render_canvas, Canvas, DrawingMode, InputEvent, SvgSink};
use sketchkit_settings::EditorConfig;
use tracing::{debug, info};

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// Switch the canvas mode.
    SetMode { mode: DrawingMode },
    /// Feed a raw input event.
    Event(InputEvent),
    /// Show the machine head marker at a model point.
    Head { head: Point },
    /// Hide the machine head marker.
    HideHead { hide_head: bool },
}

/// A recorded session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub canvas: Option<CanvasSize>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid script")
    }

    /// Reads a script file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Replays every step on a fresh canvas built from `config`.
    pub fn replay(&self, config: EditorConfig) -> Canvas {
        let mut canvas = Canvas::with_config(config);
        if let Some(size) = self.canvas {
            canvas.set_canvas_size(size.width, size.height);
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::SetMode { mode } => canvas.set_mode(*mode),
                Step::Head { head } => canvas.set_head_position(Some(*head)),
                Step::HideHead { hide_head } => {
                    if *hide_head {
                        canvas.set_head_position(None);
                    }
                }
                Step::Event(event) => {
                    let redraw = canvas.handle_event(*event);
                    debug!("Step {}: {:?} (redraw: {})", i, event, redraw);
                }
            }
        }
        info!(
            "Replayed {} step(s), {} shape(s) on canvas",
            self.steps.len(),
            canvas.shape_count()
        );
        canvas
    }
}

/// Renders the canvas as an SVG document sized to the viewport.
pub fn render_svg(canvas: &Canvas) -> String {
    let viewport = canvas.viewport();
    let mut sink = SvgSink::new(
        viewport.canvas_width(),
        viewport.canvas_height(),
        canvas.config().style.clone(),
    );
    render_canvas(canvas, &mut sink);
    sink.finish()
}
