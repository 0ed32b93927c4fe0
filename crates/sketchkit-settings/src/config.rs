//! Editor configuration for SketchKit
//!
//! Provides the configuration consumed by the designer canvas, with file
//! handling and validation. Supports JSON and TOML files; the format is
//! chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Grid (spacing used by commit snapping, visibility)
//! - Snapping policy (axis, diagonal, square and semicircle snaps)
//! - Hit tolerances (in screen pixels)
//! - View policy (margin, zoom range, pan clamping, initial canvas size)
//! - Style tokens handed to the drawing sink

pub use sketchkit_core::units::MeasurementSystem;
pub use sketchkit_core::SnapRules;
use sketchkit_core::constants::{
    BEZIER_BIAS, CANVAS_MARGIN, CURVE_TOLERANCE, DEFAULT_GRID_SPACING, ELLIPSE_TOLERANCE,
    HANDLE_TOLERANCE, MAX_ZOOM, MIN_ZOOM, SEGMENT_TOLERANCE, ZOOM_STEP,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// Grid settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Grid spacing in mm, also the commit snap step
    pub spacing: f64,
    /// Draw grid lines
    pub visible: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_GRID_SPACING,
            visible: true,
        }
    }
}

/// Hit-test tolerances, in screen pixels.
///
/// `ellipse` is a relative band on the implicit ellipse equation and does
/// not scale with zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTolerances {
    pub handle: f64,
    pub segment: f64,
    pub curve: f64,
    pub ellipse: f64,
}

impl Default for HitTolerances {
    fn default() -> Self {
        Self {
            handle: HANDLE_TOLERANCE,
            segment: SEGMENT_TOLERANCE,
            curve: CURVE_TOLERANCE,
            ellipse: ELLIPSE_TOLERANCE,
        }
    }
}

impl HitTolerances {
    /// Converts pixel tolerances to model units at the given zoom.
    pub fn at_zoom(&self, zoom: f64) -> Self {
        let zoom = if zoom > 0.0 { zoom } else { 1.0 };
        Self {
            handle: self.handle / zoom,
            segment: self.segment / zoom,
            curve: self.curve / zoom,
            ellipse: self.ellipse,
        }
    }
}

/// How far the view may be panned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanPolicy {
    /// No limit
    #[default]
    Free,
    /// Content cannot be dragged past the canvas edges
    Clamped,
}

impl std::fmt::Display for PanPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Clamped => write!(f, "clamped"),
        }
    }
}

/// View settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Pixels between the canvas border and the model origin
    pub margin: f64,
    /// Relative scale change per wheel notch
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub pan_policy: PanPolicy,
    /// Initial canvas width in pixels
    pub canvas_width: f64,
    /// Initial canvas height in pixels
    pub canvas_height: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            margin: CANVAS_MARGIN,
            zoom_step: ZOOM_STEP,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            pan_policy: PanPolicy::default(),
            canvas_width: 1200.0,
            canvas_height: 800.0,
        }
    }
}

/// Colors for each style token. Values are passed through to the sink
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub default: String,
    pub selected: String,
    pub light: String,
    pub grid: String,
    pub axis: String,
    pub margin: String,
    pub origin: String,
    pub head: String,
    pub handle_fill: String,
    pub handle_active_fill: String,
    pub text: String,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            default: "#222222".to_string(),
            selected: "#1e88e5".to_string(),
            light: "#9e9e9e".to_string(),
            grid: "#eeeeee".to_string(),
            axis: "blue".to_string(),
            margin: "#dddddd".to_string(),
            origin: "#000000".to_string(),
            head: "#e53935".to_string(),
            handle_fill: "white".to_string(),
            handle_active_fill: "black".to_string(),
            text: "#333333".to_string(),
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Perpendicular offset of auto-placed Bezier controls, in mm
    pub bezier_bias: f64,
    /// Show dimension and angle labels on selected shapes
    pub show_annotations: bool,
    /// Units used by annotation labels
    pub units: MeasurementSystem,
    pub grid: GridSettings,
    pub snapping: SnapRules,
    pub hit: HitTolerances,
    pub view: ViewSettings,
    pub style: StyleSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            bezier_bias: BEZIER_BIAS,
            show_annotations: true,
            units: MeasurementSystem::default(),
            grid: GridSettings::default(),
            snapping: SnapRules::default(),
            hit: HitTolerances::default(),
            view: ViewSettings::default(),
            style: StyleSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

fn format_for(path: &Path) -> SettingsResult<ConfigFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML). Missing keys take defaults.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!("Loaded editor settings from {}", path.display());
        Ok(config)
    }

    /// Load config from file, or the defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_for(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        info!("Saved editor settings to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.grid.spacing > 0.0) {
            return Err(SettingsError::invalid("grid.spacing", "must be > 0"));
        }

        let hit = &self.hit;
        for (key, value) in [
            ("hit.handle", hit.handle),
            ("hit.segment", hit.segment),
            ("hit.curve", hit.curve),
            ("hit.ellipse", hit.ellipse),
        ] {
            if !(value > 0.0) {
                return Err(SettingsError::invalid(key, "must be > 0"));
            }
        }

        let snap = &self.snapping;
        for (key, value) in [
            ("snapping.axis_tolerance", snap.axis_tolerance),
            ("snapping.square_tolerance", snap.square_tolerance),
            ("snapping.semicircle_tolerance", snap.semicircle_tolerance),
        ] {
            if !(value >= 0.0) {
                return Err(SettingsError::invalid(key, "must be >= 0"));
            }
        }
        if !(snap.diagonal_band > 0.0 && snap.diagonal_band <= 1.0) {
            return Err(SettingsError::invalid(
                "snapping.diagonal_band",
                "must be in (0, 1]",
            ));
        }

        let view = &self.view;
        if !(view.zoom_step > 0.0) {
            return Err(SettingsError::invalid("view.zoom_step", "must be > 0"));
        }
        if !(view.min_zoom > 0.0) {
            return Err(SettingsError::invalid("view.min_zoom", "must be > 0"));
        }
        if view.min_zoom > view.max_zoom {
            return Err(SettingsError::invalid(
                "view.max_zoom",
                format!("must be >= min_zoom ({})", view.min_zoom),
            ));
        }
        if !(view.margin >= 0.0) {
            return Err(SettingsError::invalid("view.margin", "must be >= 0"));
        }
        if !(view.canvas_width > 0.0 && view.canvas_height > 0.0) {
            return Err(SettingsError::invalid(
                "view.canvas_width",
                "canvas dimensions must be > 0",
            ));
        }

        if !self.bezier_bias.is_finite() {
            return Err(SettingsError::invalid("bezier_bias", "must be finite"));
        }

        Ok(())
    }

    /// Platform config directory for SketchKit.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("sketchkit"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Default settings file, `<config dir>/sketchkit/settings.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join("settings.toml"))
    }
}
