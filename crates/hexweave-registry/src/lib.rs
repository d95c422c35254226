//! Gesture resolution for hexweave.
//!
//! A [`RegistryBuilder`] collects operators during a single-threaded
//! bootstrap phase, then freezes into a [`Registry`] that can be shared
//! across threads. Resolution tries three tiers in order:
//!
//! 1. special handlers, which recognise whole families of shapes (such as
//!    numeral literals, see [`NumeralHandler`]);
//! 2. the global table, keyed by signature;
//! 3. the per-world table, holding obfuscated stand-ins for secret
//!    prototypes, derived from the world seed by the [`Obfuscator`].
//!
//! Per-world tables are built lazily, at most once per world, and are
//! persisted through a [`WorldStore`](hexweave_save::WorldStore).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
mod hash;
pub mod numeral;
pub mod obfuscate;
pub mod registry;
pub mod special;
mod world;

pub use config::{ObfuscatorConfig, RegistryConfig};
pub use error::{ConfigError, LookupError, ObfuscationError, RegisterError, ResolveError};
pub use numeral::{decode_numeral, NumeralHandler};
pub use obfuscate::Obfuscator;
pub use registry::{PatternEntry, Registry, RegistryBuilder, RegistryEntry, Resolution, ResolvedBy};
pub use special::SpecialHandler;
