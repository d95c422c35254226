//! Hex-grid geometry and the pattern codec.
//!
//! A pattern is a walk on an unbounded hexagonal lattice: a starting
//! [`Direction`] followed by a sequence of relative [`Angle`] turns. This
//! crate defines the lattice primitives, the well-formedness rules a walk
//! must obey while it is being drawn, and the two encodings of a pattern:
//! the compact signature string (`"qaq"`) used as a lookup key, and the
//! ordinal byte record used for storage.
//!
//! # Geometry
//!
//! - [`Direction`]: six compass headings, clockwise from north-east
//! - [`Angle`]: six relative turns, each with a signature character
//! - [`HexCoord`]: axial lattice coordinates
//! - [`DirectedEdge`]: one stroke of a pattern, with its reverse
//!
//! # Codec
//!
//! - [`Pattern::try_append`] extends a pattern under the no-retrace and
//!   no-backtrack rules; [`PatternTracer`] does the same incrementally
//! - [`Pattern::signature`] / [`Pattern::from_signature`]
//! - [`PatternRecord`] byte encoding

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
pub mod hex;
pub mod pattern;
pub mod record;

pub use edge::DirectedEdge;
pub use error::{AppendRejection, MalformedCause, PatternError};
pub use hex::{Angle, Direction, HexCoord};
pub use pattern::{Pattern, PatternTracer};
pub use record::PatternRecord;
