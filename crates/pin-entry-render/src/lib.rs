//! Drawing surface abstraction for the PIN entry field.
//!
//! The field never talks to a concrete graphics backend. It draws through the
//! [`Surface`] trait, which a host implements on top of whatever it renders
//! with (a GPU renderer, a software canvas, a terminal grid...).
//!
//! [`RecordingSurface`] is a backend-free implementation that records every
//! drawing call as a [`DrawCommand`], which makes frames easy to inspect and
//! compare in tests.
//!
//! # Example
//!
//! ```
//! use pin_entry_render::{Color, DrawCommand, Rect, RecordingSurface, Stroke, Surface};
//!
//! let mut surface = RecordingSurface::new();
//! surface.stroke_rect(Rect::new(0.0, 0.0, 40.0, 40.0), &Stroke::new(Color::BLACK, 5.0));
//!
//! assert!(matches!(surface.commands()[0], DrawCommand::StrokeRect { .. }));
//! ```

mod paint;
mod recording;
mod surface;
mod types;

pub use paint::{Stroke, TextStyle};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::Surface;
pub use types::{Color, Insets, Point, Rect, Size};
