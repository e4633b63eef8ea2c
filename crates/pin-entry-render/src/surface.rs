//! The drawing interface a host provides to the PIN field.

use crate::paint::{Stroke, TextStyle};
use crate::types::{Point, Rect};

/// A 2D drawing target.
///
/// This is the subset of a full renderer the PIN field needs. Implementations
/// wrap a concrete backend; all coordinates are in device pixels.
///
/// # Frame Lifecycle
///
/// The host owns the frame. It clears or prepares the target, hands the
/// surface to the field for one draw call, then presents:
///
/// ```ignore
/// renderer.begin_frame(Color::WHITE, viewport);
/// pin_edit.render(&mut renderer, bounds);
/// renderer.end_frame();
/// ```
pub trait Surface {
    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Draw a run of text with its baseline starting at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    /// Measure the advance width of `text` in pixels.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f32;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        (**self).stroke_rect(rect, stroke);
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        (**self).draw_text(text, origin, style);
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> f32 {
        (**self).measure_text(text, style)
    }
}
