//! Problems found while reading a PIN style sheet.
//!
//! Most of these never reach the caller as a hard failure: a lenient parse
//! keeps them as diagnostics next to the rules it could read, and the field
//! falls back to default attributes. [`StyleSheet::parse_strict`] and
//! [`StyleSheet::from_file`] return the first one instead.
//!
//! [`StyleSheet::parse_strict`]: crate::StyleSheet::parse_strict
//! [`StyleSheet::from_file`]: crate::StyleSheet::from_file

use std::path::PathBuf;

/// Result type alias for style sheet loading.
pub type Result<T> = std::result::Result<T, Error>;

/// A problem in a PIN style sheet, or in reading one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Text that is not a rule at all, such as a selector without a block.
    #[error("malformed PIN style sheet at {line}:{column}: {message}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// A selector other than `*`, a type name, `#name` or `Type#name`.
    /// The whole rule is dropped.
    #[error("rule '{selector}' skipped: {message}")]
    InvalidSelector { selector: String, message: String },

    /// A declaration naming something that is not a PIN attribute.
    #[error("'{property}' is not a PIN field attribute")]
    UnknownProperty { property: String },

    /// A PIN attribute whose value does not parse. Only that declaration
    /// is dropped.
    #[error("'{property}' ignored: {message}")]
    InvalidValue { property: String, message: String },

    /// The style sheet file could not be read.
    #[error("cannot read PIN style sheet {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// `line` is 1-based.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    pub fn unknown_property(property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            property: property.into(),
        }
    }

    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The attribute a declaration error is about, if any.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::UnknownProperty { property } | Self::InvalidValue { property, .. } => {
                Some(property)
            }
            Self::Parse { .. } | Self::InvalidSelector { .. } | Self::Io { .. } => None,
        }
    }
}
