//! Custom error types for the bmod-reader crate.
//!
//! Only [`BmodError`] aborts a decode. [`UnresolvableKey`] is decode-local:
//! the record that carried the key is skipped and decoding continues.

use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum BmodError {
    /// The source file could not be opened or read.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A positional layout is unusable (zero stride, no groups).
    #[error("Invalid positional layout: {0}")]
    InvalidLayout(String),

    /// The file extension does not name a known module kind.
    #[error("Unsupported module file: {0}")]
    UnsupportedModule(String),

    /// The sink rejected a record. Surfaced as-is, never retried.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Raised by a [`RecordSink`](crate::bmod::sink::RecordSink) that could not accept a record.
#[derive(Debug, Error)]
#[error("Sink rejected record: {message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// A hexadecimal identifier that could not be resolved to an integer key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnresolvableKey {
    #[error("empty key")]
    Empty,

    #[error("invalid character {found:?} in key {key:?}")]
    InvalidCharacter { key: String, found: char },

    #[error("key {0:?} does not fit in 32 bits")]
    Overflow(String),

    #[error("malformed range {0:?}")]
    MalformedRange(String),

    #[error("inverted range {start:#x}-{end:#x}")]
    InvertedRange { start: u32, end: u32 },
}

/// A convenience `Result` type alias using the crate's `BmodError` type.
pub type Result<T> = std::result::Result<T, BmodError>;
