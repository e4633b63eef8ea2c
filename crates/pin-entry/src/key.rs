//! Keyboard input events.

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Whether the platform shortcut modifier (Ctrl, or Cmd on macOS) is held.
    pub fn shortcut(&self) -> bool {
        self.control || self.meta
    }
}

/// Keyboard key codes.
///
/// Follows the layout of web `KeyboardEvent.code` values. Only the keys a
/// PIN field can meaningfully react to are named; everything else arrives
/// as [`Key::Unknown`] with the host's raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Space, Escape,

    // Modifiers
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    MetaLeft, MetaRight,

    // Numpad
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadEnter,

    // Unknown/unmapped key
    Unknown(u16),
}

impl Key {
    /// Check if this key erases text.
    pub fn is_erase(&self) -> bool {
        matches!(self, Key::Backspace | Key::Delete)
    }

    /// The main-keyboard key for a digit character.
    pub fn from_digit(c: char) -> Option<Key> {
        Some(match c {
            '0' => Key::Digit0,
            '1' => Key::Digit1,
            '2' => Key::Digit2,
            '3' => Key::Digit3,
            '4' => Key::Digit4,
            '5' => Key::Digit5,
            '6' => Key::Digit6,
            '7' => Key::Digit7,
            '8' => Key::Digit8,
            '9' => Key::Digit9,
            _ => return None,
        })
    }
}

/// Key press event, sent when a key is pressed.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// The text input from this key press (if any).
    ///
    /// For printable keys, this contains the character that would be typed.
    /// For non-printable keys (modifiers, function keys, etc.), this is empty.
    pub text: String,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers, text: impl Into<String>, is_repeat: bool) -> Self {
        Self {
            key,
            modifiers,
            text: text.into(),
            is_repeat,
        }
    }

    /// A press of a key that produces no text, with no modifiers.
    pub fn key(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE, "", false)
    }

    /// A press of a key with modifiers held and no text.
    pub fn with_modifiers(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self::new(key, modifiers, "", false)
    }

    /// A press that types `c`.
    ///
    /// Digits map to their key; anything else is reported as an unmapped key
    /// carrying the text.
    pub fn char(c: char) -> Self {
        let key = Key::from_digit(c).unwrap_or(Key::Unknown(0));
        Self::new(key, KeyboardModifiers::NONE, c.to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers() {
        assert!(KeyboardModifiers::NONE.none());
        assert!(KeyboardModifiers::SHIFT.any());
        assert!(KeyboardModifiers::CTRL.shortcut());
        assert!(KeyboardModifiers::META.shortcut());
        assert!(!KeyboardModifiers::ALT.shortcut());
    }

    #[test]
    fn test_key_classes() {
        assert!(Key::Backspace.is_erase());
        assert!(Key::Delete.is_erase());
        assert!(!Key::Insert.is_erase());
        assert_eq!(Key::from_digit('7'), Some(Key::Digit7));
        assert_eq!(Key::from_digit('a'), None);
    }

    #[test]
    fn test_char_event() {
        let event = KeyPressEvent::char('4');
        assert_eq!(event.key, Key::Digit4);
        assert_eq!(event.text, "4");

        let event = KeyPressEvent::char('é');
        assert_eq!(event.key, Key::Unknown(0));
        assert_eq!(event.text, "é");
    }
}
