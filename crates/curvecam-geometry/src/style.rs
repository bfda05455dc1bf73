//! Stroke style payload.
//!
//! Upstream extraction copies the raw presentation attributes of a drawing
//! element onto every curve it produces. Geometry never looks at them; the
//! compiler turns them into laser power and cutting speed.

use serde::{Deserialize, Serialize};

/// Raw presentation attributes attached to a curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// Raw `stroke-width` attribute, e.g. `"0.6"`
    pub stroke_width: String,
    /// Raw `stroke` attribute, e.g. `"#000000"` or `"rgb(0,0,0)"`
    pub stroke: String,
    /// Raw inline `style` attribute, e.g. `"stroke:#ff0000;stroke-width:0.2"`
    pub style: String,
}

impl StrokeStyle {
    pub fn new(
        stroke_width: impl Into<String>,
        stroke: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            stroke_width: stroke_width.into(),
            stroke: stroke.into(),
            style: style.into(),
        }
    }

    /// Whether an inline style string is present.
    pub fn has_style(&self) -> bool {
        !self.style.trim().is_empty()
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            stroke_width: "0".to_string(),
            stroke: String::new(),
            style: String::new(),
        }
    }
}
