//! A masked, fixed-length PIN entry field.
//!
//! The field draws a row of bordered slots, one per character, and masks
//! every character except the most recently typed one. It does not depend
//! on a windowing toolkit: the host hands it a [`Surface`] to draw on and
//! forwards key presses to it.
//!
//! - **Style**: resolved once from a CSS style sheet ([`pin_entry_style`])
//! - **Rendering**: through the [`Drawable`] capability
//! - **Input**: through the [`KeyListener`] capability, with
//!   [`PinEdit::key_press`] for default editing
//! - **Notifications**: [`PinEdit::text_changed`] and [`PinEdit::completed`]
//!
//! # Example
//!
//! ```
//! use pin_entry::prelude::*;
//!
//! let sheet = StyleSheet::parse("PinEntry { slot-count: 4; }");
//! let mut pin = PinEdit::from_stylesheet(&sheet, None, DisplayMetrics::new(1.0));
//!
//! pin.completed.connect(|code| println!("entered {} digits", code.len()));
//!
//! for c in "4821".chars() {
//!     pin.key_press(&KeyPressEvent::char(c));
//! }
//! assert!(pin.is_full());
//! assert_eq!(pin.display_text(), "***1");
//!
//! let mut surface = RecordingSurface::new();
//! pin.render(&mut surface, Rect::new(0.0, 0.0, 200.0, 40.0));
//! assert_eq!(surface.texts().len(), 4);
//! ```
//!
//! [`Surface`]: pin_entry_render::Surface

mod key;
mod layout;
mod mask;
mod pin_edit;
mod widget;

pub use key::{Key, KeyPressEvent, KeyboardModifiers};
pub use layout::SlotLayout;
pub use mask::{MaskPolicy, mask_graphemes, mask_text};
pub use pin_edit::PinEdit;
pub use widget::{Drawable, EditAction, KeyListener, KeyResponse, SizeHint};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::{
        Drawable, EditAction, Key, KeyListener, KeyPressEvent, KeyResponse, KeyboardModifiers,
        MaskPolicy, PinEdit, SizeHint, mask_graphemes, mask_text,
    };
    pub use pin_entry_core::Signal;
    pub use pin_entry_render::{
        Color, DrawCommand, Insets, Point, Rect, RecordingSurface, Size, Surface,
    };
    pub use pin_entry_style::{DisplayMetrics, LengthValue, PinStyle, PinStyleOverrides, StyleSheet};
}
