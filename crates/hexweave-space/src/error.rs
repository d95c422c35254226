//! Error types for pattern construction and decoding.

use thiserror::Error;

/// Why a stroke could not be appended to a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum AppendRejection {
    /// The stroke would reverse straight back along the previous one.
    #[error("reverses the previous stroke")]
    Backtrack,
    /// The stroke would redraw a segment already in the pattern, in
    /// either orientation.
    #[error("retraces an existing stroke")]
    Retrace,
}

/// The specific defect found while decoding a signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MalformedCause {
    /// A character outside the `wedsaq` alphabet.
    #[error("unknown angle character {0:?}")]
    UnknownCharacter(char),
    /// The decoded stroke breaks a drawing rule.
    #[error("{0}")]
    Rejected(#[from] AppendRejection),
}

/// Errors arising from decoding patterns.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The signature could never have been drawn.
    #[error("malformed pattern '{signature}' at index {index}: {cause}")]
    MalformedPattern {
        /// The full signature being decoded.
        signature: String,
        /// Character index of the first offending step.
        index: usize,
        /// What was wrong with it.
        cause: MalformedCause,
    },
    /// A stored ordinal does not name a direction or angle.
    #[error("{kind} ordinal {value} out of range 0..6")]
    OrdinalOutOfRange {
        /// `"direction"` or `"angle"`.
        kind: &'static str,
        /// The byte found.
        value: u8,
    },
    /// A stored record ended before its start direction.
    #[error("empty pattern record")]
    EmptyRecord,
}
