//! SketchKit Settings Crate
//!
//! Handles editor configuration: grid, snapping policy, hit tolerances, view
//! policy and style tokens, with JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{
    EditorConfig, GridSettings, HitTolerances, MeasurementSystem, PanPolicy, SnapRules,
    StyleSettings, ViewSettings,
};
pub use error::{SettingsError, SettingsResult};
