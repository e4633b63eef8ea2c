//! A surface that records drawing calls instead of rasterizing them.

use unicode_segmentation::UnicodeSegmentation;

use crate::paint::{Stroke, TextStyle};
use crate::surface::Surface;
use crate::types::{Point, Rect};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An outlined rectangle.
    StrokeRect { rect: Rect, stroke: Stroke },
    /// A run of text with its baseline origin.
    Text {
        text: String,
        origin: Point,
        style: TextStyle,
    },
}

/// A [`Surface`] that records every call as a [`DrawCommand`].
///
/// Text is measured with fixed-advance metrics: every grapheme cluster is
/// `size * advance_ratio` pixels wide.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    advance_ratio: f32,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Advance ratio used by [`new`](Self::new), typical of a monospace face.
    pub const DEFAULT_ADVANCE_RATIO: f32 = 0.6;

    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::with_advance_ratio(Self::DEFAULT_ADVANCE_RATIO)
    }

    /// Create a recording surface with a custom glyph advance ratio.
    pub fn with_advance_ratio(advance_ratio: f32) -> Self {
        Self {
            commands: Vec::new(),
            advance_ratio,
        }
    }

    /// All commands recorded so far, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Discard recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded rectangles, in call order.
    pub fn stroked_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokeRect { rect, .. } => Some(*rect),
                DrawCommand::Text { .. } => None,
            })
            .collect()
    }

    /// Recorded text runs, in call order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                DrawCommand::StrokeRect { .. } => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: *stroke,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            origin,
            style: *style,
        });
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        text.graphemes(true).count() as f32 * style.size * self.advance_ratio
    }
}
