//! Viewport and coordinate transformation for the editing surface.
//!
//! Converts between pixel coordinates (screen space, origin top-left, +Y
//! down) and model coordinates (design space, origin bottom-left of the
//! working area, +Y up). The working area sits inside a fixed pixel margin.

use std::fmt;

use sketchkit_core::Point;
use sketchkit_settings::{PanPolicy, ViewSettings};

/// Affine map `(x, y) -> (x * scale_x + translate_x, y * scale_y + translate_y)`.
///
/// A drawing sink receives one of these per frame to place model points on
/// screen; `scale_y` is negative because model +Y points up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ScreenTransform {
    pub const IDENTITY: ScreenTransform = ScreenTransform {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale_x + self.translate_x,
            p.y * self.scale_y + self.translate_y,
        )
    }

    /// True when the map mirrors the Y axis.
    pub fn flips_y(&self) -> bool {
        self.scale_y < 0.0
    }
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    margin: f64,
    min_zoom: f64,
    max_zoom: f64,
    pan_policy: PanPolicy,
}

impl Viewport {
    /// Creates a viewport at 1:1 zoom with no pan.
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width: settings.canvas_width,
            canvas_height: settings.canvas_height,
            margin: settings.margin,
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            pan_policy: settings.pan_policy,
        }
    }

    /// Gets the canvas width in pixels.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height in pixels.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Gets the margin around the working area, in unscaled pixels.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Sets the canvas dimensions (typically called when the window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.apply_pan_policy();
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
            self.apply_pan_policy();
        }
    }

    /// Gets the pan offset (X coordinate) in pixels.
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y coordinate) in pixels.
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn pan_policy(&self) -> PanPolicy {
        self.pan_policy
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
        self.apply_pan_policy();
    }

    /// Pans by a raw pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
        self.apply_pan_policy();
    }

    /// Resets zoom and pan.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Converts pixel coordinates to model coordinates.
    ///
    /// Formula:
    /// ```text
    /// model_x = (pixel_x - pan_x) / zoom - margin
    /// model_y = canvas_height - margin - (pixel_y - pan_y) / zoom
    /// ```
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        Point::new(
            (pixel_x - self.pan_x) / self.zoom - self.margin,
            self.canvas_height - self.margin - (pixel_y - self.pan_y) / self.zoom,
        )
    }

    /// Converts model coordinates to pixel coordinates.
    ///
    /// Formula:
    /// ```text
    /// pixel_x = pan_x + zoom * (model_x + margin)
    /// pixel_y = pan_y + zoom * (canvas_height - margin - model_y)
    /// ```
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        (
            self.pan_x + self.zoom * (world_x + self.margin),
            self.pan_y + self.zoom * (self.canvas_height - self.margin - world_y),
        )
    }

    /// Converts a model point to pixel coordinates.
    pub fn world_point_to_pixel(&self, point: &Point) -> (f64, f64) {
        self.world_to_pixel(point.x, point.y)
    }

    /// The model-to-screen map as an affine transform.
    pub fn screen_transform(&self) -> ScreenTransform {
        ScreenTransform {
            scale_x: self.zoom,
            scale_y: -self.zoom,
            translate_x: self.pan_x + self.zoom * self.margin,
            translate_y: self.pan_y + self.zoom * (self.canvas_height - self.margin),
        }
    }

    /// Size of the working area in model units (the canvas minus margins).
    pub fn working_area(&self) -> Point {
        Point::new(
            (self.canvas_width - 2.0 * self.margin).max(0.0),
            (self.canvas_height - 2.0 * self.margin).max(0.0),
        )
    }

    /// Zooms so the model point under the pixel `(pixel_x, pixel_y)` stays
    /// under it. The zoom is clamped to the configured range.
    pub fn zoom_at_pixel(&mut self, pixel_x: f64, pixel_y: f64, new_zoom: f64) {
        if !new_zoom.is_finite() || new_zoom <= 0.0 {
            return;
        }
        let anchor = self.pixel_to_world(pixel_x, pixel_y);
        self.zoom = new_zoom.clamp(self.min_zoom, self.max_zoom);
        self.pan_x = pixel_x - self.zoom * (anchor.x + self.margin);
        self.pan_y = pixel_y - self.zoom * (self.canvas_height - self.margin - anchor.y);
        self.apply_pan_policy();
    }

    /// One wheel notch at a pixel: `wheel_delta < 0` zooms in by `step`,
    /// anything else zooms out by the same factor.
    pub fn wheel_zoom(&mut self, pixel_x: f64, pixel_y: f64, wheel_delta: f64, step: f64) {
        let factor = 1.0 + step;
        let new_zoom = if wheel_delta < 0.0 {
            self.zoom * factor
        } else {
            self.zoom / factor
        };
        self.zoom_at_pixel(pixel_x, pixel_y, new_zoom);
    }

    /// With `PanPolicy::Clamped`, keeps the scaled canvas covering the
    /// visible area: each pan offset stays in `[size - size * zoom, 0]`.
    fn apply_pan_policy(&mut self) {
        if self.pan_policy != PanPolicy::Clamped {
            return;
        }
        let clamp = |pan: f64, size: f64, zoom: f64| pan.clamp((size - size * zoom).min(0.0), 0.0);
        self.pan_x = clamp(self.pan_x, self.canvas_width, self.zoom);
        self.pan_y = clamp(self.pan_y, self.canvas_height, self.zoom);
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&ViewSettings::default())
    }
}
