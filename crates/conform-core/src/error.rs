//! # Error Types
//!
//! Errors raised by the foundational helpers. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

use crate::kind::Kind;

/// Top-level error type for `conform-core`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A path expression could not be parsed.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// A string could not be interpreted as a date.
    #[error("invalid date value: {0:?}")]
    InvalidDate(String),
}

/// Error while tokenizing a path expression.
///
/// Readers and writers in [`crate::path`] swallow these and treat the
/// access as missing / a no-op; only [`crate::path::tokenize`] surfaces them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A `[` was never closed.
    #[error("unclosed bracket at offset {offset} in {path:?}")]
    UnclosedBracket {
        /// The full expression.
        path: String,
        /// Byte offset of the opening bracket.
        offset: usize,
    },

    /// A quoted bracket segment was not terminated by its quote.
    #[error("unterminated quote at offset {offset} in {path:?}")]
    UnterminatedQuote {
        /// The full expression.
        path: String,
        /// Byte offset of the opening quote.
        offset: usize,
    },

    /// A `]` appeared without a matching `[`.
    #[error("unexpected ']' at offset {offset} in {path:?}")]
    UnexpectedBracket {
        /// The full expression.
        path: String,
        /// Byte offset of the stray bracket.
        offset: usize,
    },

    /// An empty bracket pair (`[]`) is only meaningful when reading.
    #[error("wildcard '[]' is not allowed here: {path:?}")]
    Wildcard {
        /// The full expression.
        path: String,
    },

    /// The expression has no segments.
    #[error("empty path expression")]
    Empty,

    /// A write reached a value that cannot hold `token`.
    #[error("cannot write key {token:?} into {kind} value")]
    Unwritable {
        /// The segment that could not be written.
        token: String,
        /// Kind of the value that was reached.
        kind: Kind,
    },

    /// An index lies too far past the end of its array to be padded.
    #[error("index {token} is out of reach for an array of length {len}")]
    IndexOutOfReach {
        /// The index segment.
        token: String,
        /// Length of the array at that position (0 for a new array).
        len: usize,
    },
}
