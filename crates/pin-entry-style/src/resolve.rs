//! Resolution of style overrides into a concrete [`PinStyle`].

use std::path::Path;

use pin_entry_core::logging::{span_names, targets};
use pin_entry_render::Color;
use unicode_segmentation::UnicodeSegmentation;

use crate::rules::{PinStyleOverrides, StyleSheet};
use crate::value::{DisplayMetrics, LengthValue};

/// Default values for every PIN style attribute.
pub mod defaults {
    use super::*;

    /// Number of slots.
    pub const SLOT_COUNT: usize = 6;
    /// Largest slot count accepted from a style sheet.
    pub const MAX_SLOT_COUNT: usize = 32;
    /// Whether characters before the last one are masked.
    pub const MASK_ENABLED: bool = true;
    /// Glyph drawn in place of masked characters.
    pub const MASK_GLYPH: &str = "*";
    /// Slot border color.
    pub const BORDER_COLOR: Color = Color::BLACK;
    /// Character color.
    pub const TEXT_COLOR: Color = Color::BLACK;
    /// Slot border width. Not configurable.
    pub const BORDER_WIDTH: LengthValue = LengthValue::dp(5.0);
    /// Width of one slot.
    pub const SLOT_WIDTH: LengthValue = LengthValue::dp(40.0);
    /// Gap between adjacent slots.
    pub const SLOT_SPACING: LengthValue = LengthValue::dp(10.0);
    /// Character size.
    pub const TEXT_SIZE: LengthValue = LengthValue::dp(18.0);
}

/// A fully resolved, immutable PIN field style.
///
/// Every length is in device pixels. A `PinStyle` is produced once, when a
/// field is constructed, and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PinStyle {
    slot_count: usize,
    mask_enabled: bool,
    mask_glyph: String,
    border_color: Color,
    text_color: Color,
    border_width: f32,
    slot_width: f32,
    slot_spacing: f32,
    text_size: f32,
}

impl Default for PinStyle {
    fn default() -> Self {
        Self::with_metrics(DisplayMetrics::default())
    }
}

impl PinStyle {
    /// The default style for a display with the given metrics.
    pub fn with_metrics(metrics: DisplayMetrics) -> Self {
        Self {
            slot_count: defaults::SLOT_COUNT,
            mask_enabled: defaults::MASK_ENABLED,
            mask_glyph: defaults::MASK_GLYPH.to_owned(),
            border_color: defaults::BORDER_COLOR,
            text_color: defaults::TEXT_COLOR,
            border_width: defaults::BORDER_WIDTH.to_px(metrics),
            slot_width: defaults::SLOT_WIDTH.to_px(metrics),
            slot_spacing: defaults::SLOT_SPACING.to_px(metrics),
            text_size: defaults::TEXT_SIZE.to_px(metrics),
        }
    }

    /// Resolve overrides against the defaults.
    ///
    /// Each attribute is validated on its own. An invalid value is logged
    /// and that attribute alone falls back to its default.
    pub fn resolve(overrides: &PinStyleOverrides, metrics: DisplayMetrics) -> Self {
        let _span = tracing::debug_span!(target: targets::STYLE, span_names::STYLE_RESOLVE).entered();
        let mut style = Self::with_metrics(metrics);

        if let Some(count) = overrides.slot_count {
            match usize::try_from(count) {
                Ok(n) if (1..=defaults::MAX_SLOT_COUNT).contains(&n) => style.slot_count = n,
                _ => reject("slot-count", &count, "must be between 1 and 32"),
            }
        }

        if let Some(enabled) = overrides.mask_enabled {
            style.mask_enabled = enabled;
        }

        if let Some(glyph) = &overrides.mask_glyph {
            if is_standalone_glyph(glyph) {
                style.mask_glyph.clone_from(glyph);
            } else {
                reject("mask-glyph", glyph, "must be exactly one printable character");
            }
        }

        if let Some(color) = overrides.border_color {
            style.border_color = color;
        }
        if let Some(color) = overrides.text_color {
            style.text_color = color;
        }

        if let Some(width) = overrides.slot_width {
            match positive_px(width, metrics) {
                Some(px) => style.slot_width = px,
                None => reject("slot-width", &width, "must be a positive length"),
            }
        }

        if let Some(spacing) = overrides.slot_spacing {
            let px = spacing.to_px(metrics);
            if px.is_finite() && px >= 0.0 {
                style.slot_spacing = px;
            } else {
                reject("slot-spacing", &spacing, "must not be negative");
            }
        }

        if let Some(size) = overrides.text_size {
            match positive_px(size, metrics) {
                Some(px) => style.text_size = px,
                None => reject("text-size", &size, "must be a positive length"),
            }
        }

        tracing::debug!(
            target: targets::STYLE,
            slot_count = style.slot_count,
            mask_enabled = style.mask_enabled,
            "resolved PIN style"
        );
        style
    }

    /// Resolve the style for the field named `name` from a parsed sheet.
    pub fn from_stylesheet(sheet: &StyleSheet, name: Option<&str>, metrics: DisplayMetrics) -> Self {
        Self::resolve(&sheet.overrides_for(name), metrics)
    }

    /// Load a style sheet file and resolve the style for the field named `name`.
    ///
    /// Never fails: if the file cannot be read the error is logged and the
    /// default style is returned.
    pub fn from_file(path: impl AsRef<Path>, name: Option<&str>, metrics: DisplayMetrics) -> Self {
        match StyleSheet::from_file(path) {
            Ok(sheet) => Self::from_stylesheet(&sheet, name, metrics),
            Err(e) => {
                tracing::error!(target: targets::STYLE, "using default PIN style: {}", e);
                Self::with_metrics(metrics)
            }
        }
    }

    /// Number of slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Whether characters before the last are masked.
    #[inline]
    pub fn mask_enabled(&self) -> bool {
        self.mask_enabled
    }

    /// The mask glyph, always a single grapheme.
    #[inline]
    pub fn mask_glyph(&self) -> &str {
        &self.mask_glyph
    }

    #[inline]
    pub fn border_color(&self) -> Color {
        self.border_color
    }

    #[inline]
    pub fn text_color(&self) -> Color {
        self.text_color
    }

    /// Border width in pixels.
    #[inline]
    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    /// Slot width in pixels.
    #[inline]
    pub fn slot_width(&self) -> f32 {
        self.slot_width
    }

    /// Gap between slots in pixels.
    #[inline]
    pub fn slot_spacing(&self) -> f32 {
        self.slot_spacing
    }

    /// Text size in pixels.
    #[inline]
    pub fn text_size(&self) -> f32 {
        self.text_size
    }

    /// Width of all slots and the gaps between them.
    pub fn content_width(&self) -> f32 {
        let n = self.slot_count as f32;
        n * self.slot_width + (n - 1.0) * self.slot_spacing
    }
}

fn positive_px(length: LengthValue, metrics: DisplayMetrics) -> Option<f32> {
    let px = length.to_px(metrics);
    (px.is_finite() && px > 0.0).then_some(px)
}

/// Whether `glyph` is one printable character that stays separate when
/// repeated. Combining marks, joiners and lone regional indicators merge
/// with their neighbours and would fill several slots with one character.
fn is_standalone_glyph(glyph: &str) -> bool {
    glyph.graphemes(true).count() == 1
        && !glyph.chars().any(char::is_control)
        && glyph.repeat(2).graphemes(true).count() == 2
}

fn reject(property: &str, value: &dyn std::fmt::Debug, reason: &str) {
    tracing::warn!(
        target: targets::STYLE,
        property,
        value = ?value,
        "{}, using default",
        reason
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = PinStyle::default();
        assert_eq!(style.slot_count(), 6);
        assert!(style.mask_enabled());
        assert_eq!(style.mask_glyph(), "*");
        assert_eq!(style.border_color(), Color::BLACK);
        assert_eq!(style.text_color(), Color::BLACK);
        assert_eq!(style.border_width(), 5.0);
        assert_eq!(style.slot_width(), 40.0);
        assert_eq!(style.slot_spacing(), 10.0);
        assert_eq!(style.text_size(), 18.0);
    }

    #[test]
    fn test_defaults_scale_with_density() {
        let style = PinStyle::with_metrics(DisplayMetrics::new(2.0));
        assert_eq!(style.border_width(), 10.0);
        assert_eq!(style.slot_width(), 80.0);
        assert_eq!(style.slot_spacing(), 20.0);
        assert_eq!(style.content_width(), 6.0 * 80.0 + 5.0 * 20.0);
    }

    #[test]
    fn test_overrides_applied() {
        let overrides = PinStyleOverrides::new()
            .with_slot_count(4)
            .with_mask_enabled(false)
            .with_mask_glyph("•")
            .with_border_color(Color::RED)
            .with_text_color(Color::BLUE)
            .with_slot_width(LengthValue::px(30.0))
            .with_slot_spacing(LengthValue::dp(0.0));
        let style = PinStyle::resolve(&overrides, DisplayMetrics::new(1.5));

        assert_eq!(style.slot_count(), 4);
        assert!(!style.mask_enabled());
        assert_eq!(style.mask_glyph(), "•");
        assert_eq!(style.border_color(), Color::RED);
        assert_eq!(style.text_color(), Color::BLUE);
        assert_eq!(style.slot_width(), 30.0);
        assert_eq!(style.slot_spacing(), 0.0);
        assert_eq!(style.text_size(), 27.0);
    }

    #[test]
    fn test_invalid_values_fall_back_individually() {
        let overrides = PinStyleOverrides::new()
            .with_slot_count(0)
            .with_mask_glyph("ab")
            .with_text_color(Color::GREEN)
            .with_slot_width(LengthValue::dp(-1.0))
            .with_slot_spacing(LengthValue::px(-4.0))
            .with_text_size(LengthValue::dp(0.0));
        let style = PinStyle::resolve(&overrides, DisplayMetrics::default());

        assert_eq!(style.slot_count(), 6);
        assert_eq!(style.mask_glyph(), "*");
        assert_eq!(style.text_color(), Color::GREEN);
        assert_eq!(style.slot_width(), 40.0);
        assert_eq!(style.slot_spacing(), 10.0);
        assert_eq!(style.text_size(), 18.0);
    }

    #[test]
    fn test_slot_count_bounds() {
        let resolve = |n| PinStyle::resolve(&PinStyleOverrides::new().with_slot_count(n), DisplayMetrics::default());
        assert_eq!(resolve(1).slot_count(), 1);
        assert_eq!(resolve(32).slot_count(), 32);
        assert_eq!(resolve(33).slot_count(), 6);
        assert_eq!(resolve(-3).slot_count(), 6);
    }

    #[test]
    fn test_multi_codepoint_glyph_accepted() {
        let overrides = PinStyleOverrides::new().with_mask_glyph("e\u{301}");
        let style = PinStyle::resolve(&overrides, DisplayMetrics::default());
        assert_eq!(style.mask_glyph(), "e\u{301}");
    }

    #[test]
    fn test_merging_glyphs_rejected() {
        for glyph in ["\u{301}", "\u{200D}", "🇩", "\u{7}", "\n"] {
            let overrides = PinStyleOverrides::new().with_mask_glyph(glyph);
            let style = PinStyle::resolve(&overrides, DisplayMetrics::default());
            assert_eq!(style.mask_glyph(), "*", "glyph {glyph:?}");
        }

        let overrides = PinStyleOverrides::new().with_mask_glyph("🇩🇪");
        let style = PinStyle::resolve(&overrides, DisplayMetrics::default());
        assert_eq!(style.mask_glyph(), "🇩🇪");
    }

    #[test]
    fn test_empty_glyph_rejected() {
        let overrides = PinStyleOverrides::new().with_mask_glyph("");
        let style = PinStyle::resolve(&overrides, DisplayMetrics::default());
        assert_eq!(style.mask_glyph(), "*");
    }

    #[test]
    fn test_from_stylesheet_by_name() {
        let sheet = StyleSheet::parse("PinEntry { slot-count: 5; } #otp { slot-count: 4; }");
        let metrics = DisplayMetrics::default();

        assert_eq!(PinStyle::from_stylesheet(&sheet, None, metrics).slot_count(), 5);
        assert_eq!(PinStyle::from_stylesheet(&sheet, Some("otp"), metrics).slot_count(), 4);
    }
}
