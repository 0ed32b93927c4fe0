//! Canvas type definitions: DrawingMode and the input events routed into
//! the canvas.

use serde::{Deserialize, Serialize};

use crate::model::ShapeType;

/// Editing modes for the canvas. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingMode {
    /// Select, move and edit existing shapes; drag on empty space pans.
    #[default]
    Pointer,
    RubberBandSelect,
    DrawLine,
    DrawArc,
    DrawBezier,
    DrawRectangle,
    DrawEllipse,
}

impl DrawingMode {
    /// The shape a drag creates in this mode, if any.
    pub fn shape_type(self) -> Option<ShapeType> {
        match self {
            DrawingMode::DrawLine => Some(ShapeType::Line),
            DrawingMode::DrawArc => Some(ShapeType::Arc),
            DrawingMode::DrawBezier => Some(ShapeType::Bezier),
            DrawingMode::DrawRectangle => Some(ShapeType::Rectangle),
            DrawingMode::DrawEllipse => Some(ShapeType::Ellipse),
            DrawingMode::Pointer | DrawingMode::RubberBandSelect => None,
        }
    }

    pub fn is_drawing(self) -> bool {
        self.shape_type().is_some()
    }
}

impl std::fmt::Display for DrawingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DrawingMode::Pointer => "Pointer",
            DrawingMode::RubberBandSelect => "Rubber band select",
            DrawingMode::DrawLine => "Draw line",
            DrawingMode::DrawArc => "Draw arc",
            DrawingMode::DrawBezier => "Draw Bezier",
            DrawingMode::DrawRectangle => "Draw rectangle",
            DrawingMode::DrawEllipse => "Draw ellipse",
        };
        f.write_str(name)
    }
}

/// Pointer button that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Keyboard modifiers held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Keys the canvas reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Delete,
    Backspace,
    Shift,
    Escape,
    #[serde(other)]
    Other,
}

/// Raw input in canvas pixel coordinates (origin top-left, +Y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Negative `delta_y` zooms in.
    Wheel { x: f64, y: f64, delta_y: f64 },
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_defaults() {
        let event: InputEvent =
            serde_json::from_str(r#"{"kind":"pointer_down","x":10,"y":20}"#).unwrap();
        assert_eq!(
            event,
            InputEvent::PointerDown {
                x: 10.0,
                y: 20.0,
                button: PointerButton::Primary,
                modifiers: Modifiers::default(),
            }
        );
    }

    #[test]
    fn test_unknown_key_is_other() {
        let event: InputEvent = serde_json::from_str(r#"{"kind":"key_down","key":"f5"}"#).unwrap();
        assert!(matches!(event, InputEvent::KeyDown { key: Key::Other, .. }));
    }

    #[test]
    fn test_mode_shape_types() {
        assert_eq!(DrawingMode::DrawArc.shape_type(), Some(ShapeType::Arc));
        assert!(!DrawingMode::Pointer.is_drawing());
        assert_eq!(
            serde_json::to_string(&DrawingMode::RubberBandSelect).unwrap(),
            "\"rubber_band_select\""
        );
    }
}
