//! Error types for record encoding, decoding, and storage.

use std::io;

use hexweave_core::IdError;
use hexweave_space::PatternError;
use thiserror::Error;

/// Errors that can occur while reading or writing per-world records.
#[derive(Debug, Error)]
pub enum SaveError {
    /// An I/O error occurred during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The data does not start with the expected `b"HXPW"` magic bytes.
    #[error("invalid magic bytes (expected b\"HXPW\")")]
    InvalidMagic,
    /// The format version is not supported by this build.
    #[error("unsupported format version {found}")]
    UnsupportedVersion {
        /// The version found in the data.
        found: u8,
    },
    /// The record could not be decoded (truncated or corrupt data).
    #[error("malformed record: {detail}")]
    Malformed {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A stored start direction ordinal is out of range.
    #[error("direction ordinal {value} out of range 0..6")]
    DirectionOutOfRange {
        /// The ordinal found.
        value: u32,
    },
    /// A stored operator id does not parse.
    #[error("invalid operator id: {0}")]
    InvalidOperatorId(#[from] IdError),
    /// A stored pattern does not decode.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),
}
