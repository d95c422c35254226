//! Ordinal byte record for storing patterns.
//!
//! The start direction is one ordinal byte; the angles are one ordinal byte
//! each, in drawing order. Decoding is the exact inverse of encoding: it
//! rejects out-of-range ordinals but does not re-check drawability.

use crate::error::PatternError;
use crate::hex::{Angle, Direction};
use crate::pattern::Pattern;

/// A pattern in its stored form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternRecord {
    /// [`Direction::ordinal`] of the start direction.
    pub start_dir: u8,
    /// [`Angle::ordinal`] of each angle.
    pub angles: Vec<u8>,
}

impl PatternRecord {
    /// Flatten to `[start_dir, angles...]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.angles.len() + 1);
        out.push(self.start_dir);
        out.extend_from_slice(&self.angles);
        out
    }

    /// Split `[start_dir, angles...]` back into a record. Ordinals are not
    /// range-checked until [`Pattern::from_record`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PatternError> {
        let (&start_dir, angles) = bytes.split_first().ok_or(PatternError::EmptyRecord)?;
        Ok(Self {
            start_dir,
            angles: angles.to_vec(),
        })
    }
}

impl Pattern {
    /// Encode as a [`PatternRecord`].
    pub fn to_record(&self) -> PatternRecord {
        PatternRecord {
            start_dir: self.start_direction().ordinal(),
            angles: self.angles().iter().map(|a| a.ordinal()).collect(),
        }
    }

    /// Decode a [`PatternRecord`], rejecting out-of-range ordinals.
    pub fn from_record(record: &PatternRecord) -> Result<Self, PatternError> {
        let start = Direction::from_ordinal(record.start_dir).ok_or(
            PatternError::OrdinalOutOfRange {
                kind: "direction",
                value: record.start_dir,
            },
        )?;
        let angles = record
            .angles
            .iter()
            .map(|&b| {
                Angle::from_ordinal(b).ok_or(PatternError::OrdinalOutOfRange {
                    kind: "angle",
                    value: b,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Pattern::from_parts(start, angles))
    }
}
