//! Logging facilities for the PIN entry field.
//!
//! All crates in the workspace log through the `tracing` crate. Nothing is
//! printed unless the host application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("pin_entry=debug,pin_entry_style=warn")
//!         .init();
//! }
//! ```
//!
//! The constants in [`targets`] and [`span_names`] can be used to build
//! filter directives for a single subsystem.

/// Span names used for tracing.
pub mod span_names {
    /// One draw cycle of a PIN field.
    pub const RENDER: &str = "pin_entry::render";
    /// Resolution of a style snapshot.
    pub const STYLE_RESOLVE: &str = "pin_entry_style::resolve";
    /// Signal emission.
    pub const SIGNAL: &str = "pin_entry_core::signal";
}

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "pin_entry_core::signal";
    /// Style sheet parsing and resolution target.
    pub const STYLE: &str = "pin_entry_style";
    /// Text editing and key handling target.
    pub const EDIT: &str = "pin_entry::edit";
    /// Drawing target.
    pub const RENDER: &str = "pin_entry::render";
    /// Performance spans.
    pub const PERF: &str = "pin_entry::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a single operation such as one draw cycle.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event on the edit target.
#[macro_export]
macro_rules! pin_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::EDIT, $($arg)*)
    };
}

/// Debug-level event on the edit target.
#[macro_export]
macro_rules! pin_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::EDIT, $($arg)*)
    };
}
