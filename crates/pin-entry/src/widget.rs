//! Capability interfaces a host uses to drive a field.

use pin_entry_render::{Rect, Size, Surface};

use crate::key::KeyPressEvent;

/// Something that can draw itself.
pub trait Drawable {
    /// Draw one frame into `bounds`.
    ///
    /// Implementations keep no state between frames: drawing the same
    /// state twice produces the same calls on `surface`.
    fn render(&self, surface: &mut dyn Surface, bounds: Rect);
}

/// Something that reacts to key presses.
pub trait KeyListener {
    /// Offer a key press. [`KeyResponse::Ignored`] leaves the event for the
    /// host's default handling.
    fn handle_key(&mut self, event: &KeyPressEvent) -> KeyResponse;
}

/// Result of offering a key press to a [`KeyListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyResponse {
    /// The event was handled; default processing must not run.
    Consumed,
    /// The event was not handled.
    Ignored,
}

impl KeyResponse {
    pub fn is_consumed(self) -> bool {
        self == KeyResponse::Consumed
    }
}

/// Editing actions a text field may offer through menus or shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    Copy,
    Cut,
    Paste,
    SelectAll,
}

impl EditAction {
    /// Every action, in menu order.
    pub const ALL: [EditAction; 4] = [
        EditAction::Cut,
        EditAction::Copy,
        EditAction::Paste,
        EditAction::SelectAll,
    ];
}

/// Size hints for layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHint {
    /// The preferred size.
    pub preferred: Size,

    /// The minimum acceptable size. If `None`, the field can shrink to zero.
    pub minimum: Option<Size>,
}

impl SizeHint {
    /// Create a new size hint with the specified preferred size.
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            minimum: None,
        }
    }

    /// Set the minimum size.
    pub fn with_minimum(mut self, minimum: Size) -> Self {
        self.minimum = Some(minimum);
        self
    }
}
