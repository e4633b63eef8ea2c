//! Length units and display density.
//!
//! Lengths in a style sheet are written in density-independent units (`dp`)
//! or raw device pixels (`px`). They are converted once, when a style is
//! resolved, using the density of the display the field is shown on.
//!
//! ```
//! use pin_entry_style::{DisplayMetrics, LengthValue};
//!
//! let metrics = DisplayMetrics::new(2.0);
//! assert_eq!(LengthValue::dp(40.0).to_px(metrics), 80.0);
//! assert_eq!(LengthValue::px(40.0).to_px(metrics), 40.0);
//! ```

use pin_entry_core::logging::targets;

/// A length with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthValue {
    /// Device pixels, used as-is.
    Px(f32),
    /// Density-independent pixels, scaled by the display density.
    Dp(f32),
}

impl LengthValue {
    /// A length in device pixels.
    #[inline]
    pub const fn px(value: f32) -> Self {
        Self::Px(value)
    }

    /// A length in density-independent pixels.
    #[inline]
    pub const fn dp(value: f32) -> Self {
        Self::Dp(value)
    }

    /// Resolve to device pixels.
    #[inline]
    pub fn to_px(self, metrics: DisplayMetrics) -> f32 {
        match self {
            Self::Px(v) => v,
            Self::Dp(v) => v * metrics.density(),
        }
    }
}

/// Properties of the display a field is rendered on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}

impl DisplayMetrics {
    /// Create metrics for a display with the given density factor
    /// (device pixels per density-independent pixel).
    ///
    /// A non-finite or non-positive density is logged and replaced by 1.0.
    pub fn new(density: f32) -> Self {
        if density.is_finite() && density > 0.0 {
            Self { density }
        } else {
            tracing::warn!(
                target: targets::STYLE,
                density,
                "invalid display density, falling back to 1.0"
            );
            Self::default()
        }
    }

    /// The density factor.
    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }
}
