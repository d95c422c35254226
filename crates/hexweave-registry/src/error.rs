//! Error types for registration, resolution, lookup, and derivation.

use hexweave_core::OperatorId;
use hexweave_space::{Pattern, PatternError};
use thiserror::Error;

/// Errors from [`RegistryBuilder::register`](crate::RegistryBuilder::register).
///
/// A failed registration leaves every table unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// The operator id is already registered.
    #[error("operator {id} is already registered")]
    DuplicateOperator {
        /// The id registered twice.
        id: OperatorId,
    },
    /// Another global pattern already uses this signature.
    #[error("signature \"{signature}\" for {id} is already bound to {existing}")]
    SignatureConflict {
        /// The contested signature.
        signature: String,
        /// The operator that holds it.
        existing: OperatorId,
        /// The operator that was refused.
        id: OperatorId,
    },
    /// The pattern retraces a segment or doubles back on itself.
    #[error("pattern \"{signature}\" for {id} is not drawable")]
    MalformedPattern {
        /// The operator that was refused.
        id: OperatorId,
        /// Signature of the rejected pattern.
        signature: String,
    },
    /// A per-world prototype has no angles, so it has no alternates.
    #[error("per-world prototype for {id} has no angles")]
    EmptyPrototype {
        /// The operator that was refused.
        id: OperatorId,
    },
}

/// Errors from [`Registry::resolve`](crate::Registry::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No special handler, global entry, or per-world entry matched.
    #[error("unrecognized pattern {pattern}")]
    UnrecognizedPattern {
        /// The drawing, with its start direction.
        pattern: Pattern,
    },
}

/// Errors from reverse lookups by operator id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The id is not registered, or has no entry in the requested world.
    #[error("unknown operator {id}")]
    UnknownOperator {
        /// The id looked up.
        id: OperatorId,
    },
    /// A stored per-world entry cannot be drawn.
    #[error("stored pattern is invalid: {0}")]
    InvalidPattern(#[from] PatternError),
}

/// Errors from [`Obfuscator::derive_alternate`](crate::Obfuscator::derive_alternate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObfuscationError {
    /// Every attempt dead-ended or produced a taken signature.
    #[error("no free alternate for \"{signature}\" after {attempts} attempts")]
    Exhausted {
        /// Signature of the prototype.
        signature: String,
        /// Number of walks tried.
        attempts: u32,
    },
}

/// Invalid registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `max_walk_steps` is zero, so no walk could take a single step.
    #[error("obfuscator max_walk_steps must be at least 1")]
    ZeroWalkBudget,
}
