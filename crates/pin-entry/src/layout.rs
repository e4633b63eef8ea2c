//! Slot geometry.

use pin_entry_render::{Insets, Point, Rect};
use pin_entry_style::PinStyle;

/// Positions of the slots for one draw.
///
/// The row of slots is centred horizontally in the content rect (the bounds
/// minus padding) and fills its full height. A row wider than the content
/// rect overflows both sides equally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    content: Rect,
    start_x: f32,
    slot_width: f32,
    slot_spacing: f32,
    slot_count: usize,
}

impl SlotLayout {
    /// Compute the layout of `style`'s slots inside `bounds`.
    pub fn new(style: &PinStyle, bounds: Rect, padding: Insets) -> Self {
        let content = bounds.inset(padding);
        let start_x = content.center().x - style.content_width() / 2.0;

        Self {
            content,
            start_x,
            slot_width: style.slot_width(),
            slot_spacing: style.slot_spacing(),
            slot_count: style.slot_count(),
        }
    }

    /// The bounds after padding.
    pub fn content(&self) -> Rect {
        self.content
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Outline of slot `index`, counted from the left.
    pub fn slot_rect(&self, index: usize) -> Rect {
        let x = self.start_x + index as f32 * (self.slot_width + self.slot_spacing);
        Rect::new(x, self.content.top(), self.slot_width, self.content.height())
    }

    /// Outlines of every slot, left to right.
    pub fn slots(&self) -> impl Iterator<Item = Rect> + '_ {
        (0..self.slot_count).map(|i| self.slot_rect(i))
    }

    /// Baseline of the characters: one third of the content height above
    /// its bottom edge.
    pub fn baseline(&self) -> f32 {
        self.content.bottom() - self.content.height() / 3.0
    }

    /// Where to start a glyph `glyph_width` wide so it is centred in `slot`.
    pub fn glyph_origin(&self, slot: Rect, glyph_width: f32) -> Point {
        Point::new(slot.center().x - glyph_width / 2.0, self.baseline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pin_entry_style::{DisplayMetrics, PinStyleOverrides};

    #[test]
    fn test_default_row_is_centred() {
        let style = PinStyle::default();
        // 6 * 40 + 5 * 10 = 290
        let layout = SlotLayout::new(&style, Rect::new(0.0, 0.0, 390.0, 60.0), Insets::ZERO);

        let first = layout.slot_rect(0);
        let last = layout.slot_rect(5);
        assert_eq!(first, Rect::new(50.0, 0.0, 40.0, 60.0));
        assert_eq!(last.left(), 300.0);
        assert_eq!(last.right(), 340.0);
        assert_eq!(layout.slots().count(), 6);
    }

    #[test]
    fn test_padding_shrinks_content() {
        let style = PinStyle::resolve(
            &PinStyleOverrides::new().with_slot_count(1),
            DisplayMetrics::default(),
        );
        let bounds = Rect::new(10.0, 20.0, 100.0, 90.0);
        let layout = SlotLayout::new(&style, bounds, Insets::new(15.0, 0.0, 15.0, 20.0));

        assert_eq!(layout.content(), Rect::new(30.0, 35.0, 80.0, 60.0));
        assert_eq!(layout.slot_rect(0), Rect::new(50.0, 35.0, 40.0, 60.0));
        assert_eq!(layout.baseline(), 75.0);
    }

    #[test]
    fn test_glyph_origin_centred_in_slot() {
        let style = PinStyle::default();
        let layout = SlotLayout::new(&style, Rect::new(0.0, 0.0, 290.0, 30.0), Insets::ZERO);
        let slot = layout.slot_rect(1);

        let origin = layout.glyph_origin(slot, 10.0);
        assert_eq!(origin, Point::new(65.0, 20.0));
    }

    #[test]
    fn test_narrow_bounds_overflow_evenly() {
        let style = PinStyle::default();
        let layout = SlotLayout::new(&style, Rect::new(0.0, 0.0, 90.0, 40.0), Insets::ZERO);

        assert_eq!(layout.slot_rect(0).left(), -100.0);
        assert_eq!(layout.slot_rect(5).right(), 190.0);
    }
}
