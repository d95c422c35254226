//! Persisted per-world pattern tables.
//!
//! Each world gets one [`PerWorldRecord`]: the obfuscated signatures
//! derived for that world's seed, each mapped to the operator it unlocks
//! and the direction it is drawn from. The record is small, derived data;
//! if it is lost the registry regenerates it byte-for-byte from the seed.
//!
//! # Architecture
//!
//! - [`codec`] encodes records and patterns to any `Write` sink
//! - [`WorldStore`] is the load/save seam to the host's save system
//! - [`MemoryStore`] keeps encoded records in memory; [`NullStore`]
//!   persists nothing
//! - All I/O uses a custom binary codec (no serde dependency)
//!
//! # Format
//!
//! ```text
//! [MAGIC "HXPW"] [VERSION u8] [seed u64] [entry_count u32]
//! [Entry 1] [Entry 2] ... [Entry N]
//! ```
//!
//! Each entry is the signature and operator id as length-prefixed UTF-8,
//! followed by the start direction ordinal as a `u32`. All integers are
//! little-endian.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod store;
pub mod types;

pub use codec::{record_from_bytes, record_to_bytes};
pub use error::SaveError;
pub use store::{MemoryStore, NullStore, WorldStore};
pub use types::{PerWorldEntry, PerWorldRecord};

/// Magic bytes at the start of every per-world record.
pub const MAGIC: [u8; 4] = *b"HXPW";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
