//! Style rules, selectors and style sheets.

use std::fmt;
use std::path::Path;

use pin_entry_render::Color;

use crate::value::LengthValue;
use crate::{Error, Result};

/// The type selector that matches PIN entry fields.
pub const PIN_ENTRY_TYPE: &str = "PinEntry";

/// Style attributes set by a rule or a host. Unset attributes are `None`.
///
/// Values here are unvalidated: a slot count of zero or a two-character mask
/// glyph is representable and is rejected later, when a
/// [`PinStyle`](crate::PinStyle) is resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinStyleOverrides {
    pub slot_count: Option<i32>,
    pub mask_enabled: Option<bool>,
    pub mask_glyph: Option<String>,
    pub border_color: Option<Color>,
    pub text_color: Option<Color>,
    pub slot_width: Option<LengthValue>,
    pub slot_spacing: Option<LengthValue>,
    pub text_size: Option<LengthValue>,
}

impl PinStyleOverrides {
    /// Overrides with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copy every attribute set in `other` over this one.
    pub fn merge(&mut self, other: &PinStyleOverrides) {
        fn take<T: Clone>(dst: &mut Option<T>, src: &Option<T>) {
            if src.is_some() {
                dst.clone_from(src);
            }
        }

        take(&mut self.slot_count, &other.slot_count);
        take(&mut self.mask_enabled, &other.mask_enabled);
        take(&mut self.mask_glyph, &other.mask_glyph);
        take(&mut self.border_color, &other.border_color);
        take(&mut self.text_color, &other.text_color);
        take(&mut self.slot_width, &other.slot_width);
        take(&mut self.slot_spacing, &other.slot_spacing);
        take(&mut self.text_size, &other.text_size);
    }

    /// Set the slot count using builder pattern.
    pub fn with_slot_count(mut self, count: i32) -> Self {
        self.slot_count = Some(count);
        self
    }

    /// Set masking using builder pattern.
    pub fn with_mask_enabled(mut self, enabled: bool) -> Self {
        self.mask_enabled = Some(enabled);
        self
    }

    /// Set the mask glyph using builder pattern.
    pub fn with_mask_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.mask_glyph = Some(glyph.into());
        self
    }

    /// Set the border color using builder pattern.
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    /// Set the text color using builder pattern.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Set the slot width using builder pattern.
    pub fn with_slot_width(mut self, width: LengthValue) -> Self {
        self.slot_width = Some(width);
        self
    }

    /// Set the slot spacing using builder pattern.
    pub fn with_slot_spacing(mut self, spacing: LengthValue) -> Self {
        self.slot_spacing = Some(spacing);
        self
    }

    /// Set the text size using builder pattern.
    pub fn with_text_size(mut self, size: LengthValue) -> Self {
        self.text_size = Some(size);
        self
    }
}

/// A selector: `*`, `PinEntry`, `#name` or `PinEntry#name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    /// Type name, `None` for universal.
    pub type_name: Option<String>,
    /// Field name.
    pub id: Option<String>,
}

impl Selector {
    /// Whether this selector applies to a PIN field with the given name.
    pub fn matches(&self, name: Option<&str>) -> bool {
        let type_ok = self
            .type_name
            .as_deref()
            .is_none_or(|t| t == PIN_ENTRY_TYPE);
        let id_ok = match self.id.as_deref() {
            None => true,
            Some(id) => name == Some(id),
        };
        type_ok && id_ok
    }

    /// Whether the selector names a specific field.
    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.type_name, &self.id) {
            (None, None) => write!(f, "*"),
            (Some(t), None) => write!(f, "{t}"),
            (None, Some(id)) => write!(f, "#{id}"),
            (Some(t), Some(id)) => write!(f, "{t}#{id}"),
        }
    }
}

/// A selector with its declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub selector: Selector,
    pub overrides: PinStyleOverrides,
    /// Position in the source sheet.
    pub order: u32,
}

impl StyleRule {
    /// Create a new rule.
    pub fn new(selector: Selector, overrides: PinStyleOverrides, order: u32) -> Self {
        Self {
            selector,
            overrides,
            order,
        }
    }
}

/// A parsed style sheet.
///
/// Parsing is forgiving: rules and declarations that fail to parse are
/// skipped and kept as [`diagnostics`](Self::diagnostics).
#[derive(Debug, Default)]
pub struct StyleSheet {
    pub(crate) rules: Vec<StyleRule>,
    pub(crate) diagnostics: Vec<Error>,
}

impl StyleSheet {
    /// Parse a style sheet, skipping anything malformed.
    pub fn parse(css: &str) -> Self {
        crate::parser::parse_stylesheet(css)
    }

    /// Parse a style sheet, failing on the first malformed rule or declaration.
    pub fn parse_strict(css: &str) -> Result<Self> {
        let mut sheet = Self::parse(css);
        if sheet.diagnostics.is_empty() {
            Ok(sheet)
        } else {
            Err(sheet.diagnostics.remove(0))
        }
    }

    /// Read and parse a style sheet file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let css = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::parse(&css))
    }

    /// Successfully parsed rules, in source order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Problems found while parsing.
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Combine every rule that applies to the field named `name`.
    ///
    /// Rules naming the field by id win over type-only rules; among rules
    /// of equal weight the later one wins.
    pub fn overrides_for(&self, name: Option<&str>) -> PinStyleOverrides {
        let mut matching: Vec<&StyleRule> = self
            .rules
            .iter()
            .filter(|rule| rule.selector.matches(name))
            .collect();
        matching.sort_by_key(|rule| (rule.selector.has_id(), rule.order));

        let mut overrides = PinStyleOverrides::new();
        for rule in matching {
            overrides.merge(&rule.overrides);
        }
        overrides
    }
}
