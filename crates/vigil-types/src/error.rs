//! Error types for the vigil-types crate.

use thiserror::Error;

/// Errors raised while parsing model values from their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The string is not a valid record identifier.
    #[error("invalid {kind}: {value}")]
    InvalidId {
        /// The identifier kind that was expected.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The string does not name a known enum variant.
    #[error("unknown {kind}: {value}")]
    UnknownVariant {
        /// The enum that was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
