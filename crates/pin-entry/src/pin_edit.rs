//! The PIN entry field.
//!
//! [`PinEdit`] shows a fixed number of bordered slots, one per character.
//! Characters before the last one are masked unless the style turns
//! masking off. Backspace and Delete wipe the whole entry rather than
//! removing one character.
//!
//! # Example
//!
//! ```
//! use pin_entry::{Drawable, KeyListener, KeyPressEvent, Key, KeyResponse, PinEdit};
//! use pin_entry_render::{Rect, RecordingSurface};
//!
//! let mut pin = PinEdit::new();
//! pin.insert_text("123");
//! assert_eq!(pin.display_text(), "**3");
//!
//! let mut surface = RecordingSurface::new();
//! pin.render(&mut surface, Rect::new(0.0, 0.0, 320.0, 48.0));
//! assert_eq!(surface.stroked_rects().len(), 6);
//!
//! assert_eq!(pin.handle_key(&KeyPressEvent::key(Key::Backspace)), KeyResponse::Consumed);
//! assert!(pin.is_empty());
//! ```

use std::fmt;
use std::path::Path;

use pin_entry_core::logging::{span_names, targets};
use pin_entry_core::{PerfSpan, Signal, pin_debug, pin_trace};
use pin_entry_render::{Insets, Rect, Size, Stroke, Surface, TextStyle};
use pin_entry_style::{DisplayMetrics, PinStyle, StyleSheet};
use unicode_segmentation::UnicodeSegmentation;

use crate::key::{Key, KeyPressEvent};
use crate::layout::SlotLayout;
use crate::mask::{MaskPolicy, mask_graphemes, mask_text};
use crate::widget::{Drawable, EditAction, KeyListener, KeyResponse, SizeHint};

/// A fixed-length PIN entry field.
///
/// The style is resolved once, when the field is created, and cannot change
/// afterwards. The entered text never holds more characters than there are
/// slots.
///
/// # Signals
///
/// - `text_changed(String)`: Emitted after the text changes
/// - `completed(String)`: Emitted when the last free slot is filled
pub struct PinEdit {
    /// Name used to pick `#name` rules from a style sheet.
    name: Option<String>,

    style: PinStyle,
    mask: MaskPolicy,

    /// Entered text. At most `style.slot_count()` graphemes.
    text: String,

    /// Space between the bounds given to `render` and the slots.
    padding: Insets,

    /// Signal emitted when text changes.
    pub text_changed: Signal<String>,

    /// Signal emitted when every slot holds a character.
    pub completed: Signal<String>,
}

impl PinEdit {
    /// Create an empty field with the default style.
    pub fn new() -> Self {
        Self::with_style(PinStyle::default())
    }

    /// Create an empty field with a resolved style.
    pub fn with_style(style: PinStyle) -> Self {
        let mask = MaskPolicy::from_style(&style);
        pin_debug!(
            slot_count = style.slot_count(),
            mask_enabled = mask.is_enabled(),
            "created PIN field"
        );

        Self {
            name: None,
            style,
            mask,
            text: String::new(),
            padding: Insets::ZERO,
            text_changed: Signal::new(),
            completed: Signal::new(),
        }
    }

    /// Create a field styled by the rules of `sheet` that apply to `name`.
    pub fn from_stylesheet(sheet: &StyleSheet, name: Option<&str>, metrics: DisplayMetrics) -> Self {
        let mut edit = Self::with_style(PinStyle::from_stylesheet(sheet, name, metrics));
        edit.name = name.map(str::to_owned);
        edit
    }

    /// Create a field styled by a style sheet file.
    ///
    /// Never fails. A file that cannot be read is logged and the default
    /// style is used.
    pub fn from_stylesheet_file(
        path: impl AsRef<Path>,
        name: Option<&str>,
        metrics: DisplayMetrics,
    ) -> Self {
        let mut edit = Self::with_style(PinStyle::from_file(path, name, metrics));
        edit.name = name.map(str::to_owned);
        edit
    }

    /// Set the padding using builder pattern.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The field's name, if it was created from a style sheet with one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The resolved style.
    pub fn style(&self) -> &PinStyle {
        &self.style
    }

    /// The masking policy from the style.
    pub fn mask_policy(&self) -> &MaskPolicy {
        &self.mask
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    /// Number of slots, which is also the maximum text length.
    pub fn capacity(&self) -> usize {
        self.style.slot_count()
    }

    // =========================================================================
    // Text Access
    // =========================================================================

    /// The entered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of entered characters.
    pub fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether every slot holds a character.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// The text as drawn, with masking applied.
    pub fn display_text(&self) -> String {
        mask_text(&self.text, &self.mask)
    }

    /// Replace the text. Characters beyond the slot count are dropped.
    ///
    /// Control characters cannot be entered and are removed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let new_text = self.fit(&text.into());
        self.replace_text(new_text);
    }

    /// Append `text` after the entered characters, up to the slot count.
    ///
    /// Returns how many characters the text grew by.
    pub fn insert_text(&mut self, text: &str) -> usize {
        if self.is_full() || text.is_empty() {
            return 0;
        }

        let before = self.len();
        let mut joined = self.text.clone();
        joined.push_str(text);

        let new_text = self.fit(&joined);
        self.replace_text(new_text);
        self.len().saturating_sub(before)
    }

    /// Remove all characters.
    pub fn clear(&mut self) {
        self.replace_text(String::new());
    }

    /// Whether `action` can be offered for this field. Clipboard and
    /// selection actions are never available.
    pub fn allows_action(&self, action: EditAction) -> bool {
        match action {
            EditAction::Copy | EditAction::Cut | EditAction::Paste | EditAction::SelectAll => false,
        }
    }

    /// Keep the printable characters of `text` that fit in the slots.
    ///
    /// The result is segmented once more after joining, because dropping a
    /// control character can let its neighbours combine.
    fn fit(&self, text: &str) -> String {
        let printable: String = text
            .graphemes(true)
            .filter(|g| !g.chars().any(char::is_control))
            .collect();

        match printable.grapheme_indices(true).nth(self.capacity()) {
            Some((end, _)) => printable[..end].to_owned(),
            None => printable,
        }
    }

    // Only lengths are logged, never the entered characters.
    fn replace_text(&mut self, new_text: String) {
        if self.text == new_text {
            return;
        }

        let was_full = self.is_full();
        self.text = new_text;
        let len = self.len();
        pin_trace!(len, capacity = self.capacity(), "PIN text changed");

        self.text_changed.emit(self.text.clone());
        if !was_full && self.is_full() {
            pin_debug!(len, "PIN complete");
            self.completed.emit(self.text.clone());
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Full key dispatch: the erase interception first, then default editing.
    ///
    /// Returns `true` if the event was handled.
    pub fn key_press(&mut self, event: &KeyPressEvent) -> bool {
        if self.handle_key(event).is_consumed() {
            return true;
        }

        let shortcut = event.modifiers.shortcut();

        match event.key {
            // Clipboard and selection shortcuts do nothing.
            Key::A | Key::C | Key::V | Key::X if shortcut => {
                pin_trace!(key = ?event.key, "ignoring clipboard shortcut");
                true
            }
            Key::Insert if shortcut || event.modifiers.shift => {
                pin_trace!(key = ?event.key, "ignoring clipboard shortcut");
                true
            }

            // Character input
            _ => {
                let printable = !event.text.is_empty() && !event.text.chars().any(char::is_control);
                if printable && !shortcut && !event.modifiers.alt {
                    self.insert_text(&event.text);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Preferred size: the slot row plus padding.
    pub fn size_hint(&self) -> SizeHint {
        let width = self.style.content_width() + self.padding.horizontal();
        let height = self.style.slot_width() + self.padding.vertical();
        SizeHint::new(Size::new(width, height)).with_minimum(Size::new(width, height))
    }
}

impl Default for PinEdit {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PinEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinEdit")
            .field("name", &self.name)
            .field("style", &self.style)
            .field("len", &self.len())
            .field("padding", &self.padding)
            .finish_non_exhaustive()
    }
}

impl Drawable for PinEdit {
    fn render(&self, surface: &mut dyn Surface, bounds: Rect) {
        let _perf = PerfSpan::new(span_names::RENDER);

        let layout = SlotLayout::new(&self.style, bounds, self.padding);
        let stroke = Stroke::new(self.style.border_color(), self.style.border_width());
        let text_style = TextStyle::new(self.style.text_color(), self.style.text_size());

        let glyphs = mask_graphemes(&self.text, &self.mask);

        let mut slots = layout.slots();
        for (slot, glyph) in slots.by_ref().zip(glyphs) {
            surface.stroke_rect(slot, &stroke);

            let width = surface.measure_text(glyph, &text_style);
            surface.draw_text(glyph, layout.glyph_origin(slot, width), &text_style);
        }
        for slot in slots {
            surface.stroke_rect(slot, &stroke);
        }

        tracing::trace!(
            target: targets::RENDER,
            slots = layout.slot_count(),
            filled = self.len(),
            "rendered PIN field"
        );
    }
}

impl KeyListener for PinEdit {
    fn handle_key(&mut self, event: &KeyPressEvent) -> KeyResponse {
        if event.key.is_erase() {
            pin_debug!(key = ?event.key, repeat = event.is_repeat, "erase key clears the PIN");
            self.clear();
            KeyResponse::Consumed
        } else {
            KeyResponse::Ignored
        }
    }
}

static_assertions::assert_impl_all!(PinEdit: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyboardModifiers;
    use pin_entry_render::RecordingSurface;
    use pin_entry_style::PinStyleOverrides;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn four_slots() -> PinEdit {
        PinEdit::with_style(PinStyle::resolve(
            &PinStyleOverrides::new().with_slot_count(4),
            DisplayMetrics::default(),
        ))
    }

    #[test]
    fn test_new_is_empty() {
        let edit = PinEdit::new();
        assert!(edit.is_empty());
        assert_eq!(edit.capacity(), 6);
        assert_eq!(edit.display_text(), "");
        assert!(edit.name().is_none());
    }

    #[test]
    fn test_insert_truncates_at_capacity() {
        let mut edit = four_slots();
        assert_eq!(edit.insert_text("12"), 2);
        assert_eq!(edit.insert_text("3456"), 2);
        assert_eq!(edit.text(), "1234");
        assert_eq!(edit.insert_text("7"), 0);
        assert_eq!(edit.text(), "1234");
    }

    #[test]
    fn test_set_text_truncates() {
        let mut edit = four_slots();
        edit.set_text("987654");
        assert_eq!(edit.text(), "9876");

        edit.set_text("🇩🇪🇫🇷🇮🇹🇪🇸🇬🇧");
        assert_eq!(edit.len(), 4);
        assert_eq!(edit.text(), "🇩🇪🇫🇷🇮🇹🇪🇸");
    }

    #[test]
    fn test_control_characters_dropped() {
        let mut edit = PinEdit::new();
        edit.set_text("1\n2\t3");
        assert_eq!(edit.text(), "123");

        assert_eq!(edit.insert_text("\r\n4"), 1);
        assert_eq!(edit.text(), "1234");
        assert_eq!(edit.insert_text("\u{7}"), 0);
        assert_eq!(edit.len(), 4);
    }

    #[test]
    fn test_one_glyph_per_stored_character() {
        let mut edit = PinEdit::new();
        edit.set_text("\n\u{301}");
        assert!(!edit.text().chars().any(char::is_control));

        let mut surface = RecordingSurface::new();
        edit.render(&mut surface, Rect::new(0.0, 0.0, 300.0, 60.0));
        assert_eq!(surface.texts().len(), edit.len());
    }

    #[test]
    fn test_display_masks_all_but_last() {
        let mut edit = PinEdit::new();
        edit.insert_text("12345");
        assert_eq!(edit.display_text(), "****5");
        edit.insert_text("6");
        assert_eq!(edit.display_text(), "*****6");
    }

    #[test]
    fn test_erase_keys_clear() {
        for key in [Key::Backspace, Key::Delete] {
            let mut edit = PinEdit::new();
            edit.insert_text("123");
            assert_eq!(edit.handle_key(&KeyPressEvent::key(key)), KeyResponse::Consumed);
            assert!(edit.is_empty());
        }
    }

    #[test]
    fn test_erase_with_modifiers_and_repeat() {
        let mut edit = PinEdit::new();
        edit.insert_text("12");
        let event = KeyPressEvent::new(Key::Backspace, KeyboardModifiers::CTRL, "", true);
        assert_eq!(edit.handle_key(&event), KeyResponse::Consumed);
        assert!(edit.is_empty());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut edit = PinEdit::new();
        edit.insert_text("12");
        for event in [
            KeyPressEvent::char('5'),
            KeyPressEvent::key(Key::Enter),
            KeyPressEvent::key(Key::ArrowLeft),
            KeyPressEvent::with_modifiers(Key::V, KeyboardModifiers::CTRL),
        ] {
            assert_eq!(edit.handle_key(&event), KeyResponse::Ignored);
            assert_eq!(edit.text(), "12");
        }
    }

    #[test]
    fn test_key_press_inserts_printable_text() {
        let mut edit = PinEdit::new();
        assert!(edit.key_press(&KeyPressEvent::char('4')));
        assert!(edit.key_press(&KeyPressEvent::char('2')));
        assert_eq!(edit.text(), "42");

        assert!(!edit.key_press(&KeyPressEvent::new(Key::Enter, KeyboardModifiers::NONE, "\r", false)));
        assert!(!edit.key_press(&KeyPressEvent::new(Key::Digit1, KeyboardModifiers::ALT, "1", false)));
        assert!(!edit.key_press(&KeyPressEvent::key(Key::ArrowLeft)));
        assert_eq!(edit.text(), "42");
    }

    #[test]
    fn test_clipboard_shortcuts_swallowed() {
        let mut edit = PinEdit::new();
        edit.insert_text("12");
        for key in [Key::A, Key::C, Key::V, Key::X] {
            let event = KeyPressEvent::new(key, KeyboardModifiers::CTRL, "", false);
            assert!(edit.key_press(&event));
            let event = KeyPressEvent::new(key, KeyboardModifiers::META, "", false);
            assert!(edit.key_press(&event));
        }
        assert!(edit.key_press(&KeyPressEvent::with_modifiers(Key::Insert, KeyboardModifiers::SHIFT)));
        assert_eq!(edit.text(), "12");
    }

    #[test]
    fn test_key_press_delete_clears() {
        let mut edit = PinEdit::new();
        edit.insert_text("1234");
        assert!(edit.key_press(&KeyPressEvent::key(Key::Delete)));
        assert!(edit.is_empty());
    }

    #[test]
    fn test_no_clipboard_actions() {
        let edit = PinEdit::new();
        for action in EditAction::ALL {
            assert!(!edit.allows_action(action));
        }
    }

    #[test]
    fn test_text_changed_signal() {
        let mut edit = PinEdit::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        edit.text_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        edit.insert_text("1");
        edit.set_text("1");
        edit.clear();
        edit.clear();
        edit.insert_text("");

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_completed_fires_once_on_fill() {
        let mut edit = four_slots();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        edit.completed.connect(move |text| {
            assert_eq!(text, "1234");
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        edit.insert_text("123");
        assert_eq!(count.load(Ordering::SeqCst), 0);
        edit.insert_text("45");
        assert_eq!(count.load(Ordering::SeqCst), 1);
        edit.insert_text("6");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_render_draws_every_slot() {
        let mut edit = PinEdit::new();
        edit.insert_text("12");

        let mut surface = RecordingSurface::new();
        edit.render(&mut surface, Rect::new(0.0, 0.0, 300.0, 60.0));

        assert_eq!(surface.stroked_rects().len(), 6);
        assert_eq!(surface.texts(), vec!["*", "2"]);
    }

    #[test]
    fn test_size_hint() {
        let edit = PinEdit::new().with_padding(Insets::uniform(4.0));
        let hint = edit.size_hint();
        assert_eq!(hint.preferred, Size::new(298.0, 48.0));
        assert_eq!(hint.minimum, Some(hint.preferred));
    }

    #[test]
    fn test_debug_hides_text() {
        let mut edit = PinEdit::new();
        edit.insert_text("9173");
        let debug = format!("{edit:?}");
        assert!(!debug.contains("9173"));
        assert!(debug.contains("len: 4"));
    }
}
