//! Declarative styling for the PIN entry field.
//!
//! Styles are written in CSS syntax and resolved once into an immutable
//! [`PinStyle`]:
//!
//! - **Selectors**: `PinEntry`, `#name`, `PinEntry#name` and `*`
//! - **Cascading**: id rules override type rules, later rules override earlier ones
//! - **Lenient loading**: malformed rules and values are logged and skipped
//! - **Units**: lengths in `dp` are scaled by the display density
//!
//! # Example
//!
//! ```
//! use pin_entry_style::{DisplayMetrics, PinStyle, StyleSheet};
//!
//! let sheet = StyleSheet::parse(r#"
//!     PinEntry { slot-count: 4; mask-glyph: "•"; }
//!     #otp { slot-count: 6; }
//! "#);
//!
//! let style = PinStyle::from_stylesheet(&sheet, Some("login"), DisplayMetrics::new(2.0));
//! assert_eq!(style.slot_count(), 4);
//! assert_eq!(style.mask_glyph(), "•");
//! assert_eq!(style.slot_width(), 80.0);
//! ```

mod error;
mod parser;
mod resolve;
mod rules;
mod value;

pub use error::{Error, Result};
pub use resolve::{PinStyle, defaults};
pub use rules::{PIN_ENTRY_TYPE, PinStyleOverrides, Selector, StyleRule, StyleSheet};
pub use value::{DisplayMetrics, LengthValue};
