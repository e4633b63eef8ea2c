//! Core systems for the PIN entry field.
//!
//! This crate provides the pieces every other crate in the workspace leans on:
//!
//! - **Signal/Slot System**: Type-safe change notification ([`Signal`])
//! - **Logging**: `tracing` targets, span names and convenience macros
//!
//! # Signal/Slot Example
//!
//! ```
//! use pin_entry_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("PIN now has {} characters", text.chars().count());
//! });
//!
//! text_changed.emit("12".to_string());
//! text_changed.disconnect(conn_id);
//! ```

pub mod logging;
mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
