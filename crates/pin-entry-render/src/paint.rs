//! Paint parameters for strokes and text.

use crate::types::Color;

/// Stroke style for outlined shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given color and width.
    #[inline]
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Parameters for drawing a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Fill color of the glyphs.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl TextStyle {
    /// Create a text style.
    #[inline]
    pub fn new(color: Color, size: f32) -> Self {
        Self { color, size }
    }
}
