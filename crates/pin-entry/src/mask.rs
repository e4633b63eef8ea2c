//! Masking of entered characters.
//!
//! While masking is on, every character except the most recently typed one
//! is replaced by the mask glyph, so the user can check the last digit
//! without exposing the rest:
//!
//! ```
//! use pin_entry::{MaskPolicy, mask_text};
//!
//! let policy = MaskPolicy::default();
//! assert_eq!(mask_text("12345", &policy), "****5");
//! assert_eq!(mask_text("12345", &MaskPolicy::disabled()), "12345");
//! ```
//!
//! Characters are grapheme clusters, so a flag emoji or a letter with a
//! combining accent counts as one character.

use pin_entry_style::{PinStyle, defaults};
use unicode_segmentation::UnicodeSegmentation;

/// Whether and how to mask characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPolicy {
    enabled: bool,
    glyph: String,
}

impl Default for MaskPolicy {
    fn default() -> Self {
        Self {
            enabled: defaults::MASK_ENABLED,
            glyph: defaults::MASK_GLYPH.to_owned(),
        }
    }
}

impl MaskPolicy {
    /// Mask with the given glyph.
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            enabled: true,
            glyph: glyph.into(),
        }
    }

    /// Show every character verbatim.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// The policy configured by a resolved style.
    pub fn from_style(style: &PinStyle) -> Self {
        Self {
            enabled: style.mask_enabled(),
            glyph: style.mask_glyph().to_owned(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }
}

/// The displayed form of each character of `text`, one item per slot.
///
/// With masking enabled, every grapheme but the last yields the policy's
/// glyph and the last yields itself. Items are never re-segmented, so a
/// glyph that would combine with its neighbour in a joined string still
/// fills exactly one slot.
pub fn mask_graphemes<'a>(text: &'a str, policy: &'a MaskPolicy) -> impl Iterator<Item = &'a str> + 'a {
    let count = if policy.enabled {
        text.graphemes(true).count()
    } else {
        0
    };

    text.graphemes(true).enumerate().map(move |(i, grapheme)| {
        if i + 1 < count {
            policy.glyph.as_str()
        } else {
            grapheme
        }
    })
}

/// Produce the displayed form of `text`.
///
/// This is [`mask_graphemes`] joined into one string. Use the iterator when
/// the characters are placed one per slot.
pub fn mask_text(text: &str, policy: &MaskPolicy) -> String {
    mask_graphemes(text, policy).collect()
}
