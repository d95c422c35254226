//! Error types shared across the hexweave workspace.
//!
//! Organized by subsystem: identifier parsing, operator execution, and
//! dispatch. Registry- and codec-specific errors live in their own crates.

use thiserror::Error;

/// Errors from parsing or constructing identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IdError {
    /// An [`OperatorId`](crate::OperatorId) half was empty or contained a
    /// character outside the allowed set.
    #[error("invalid operator id '{id}': {reason}")]
    InvalidOperatorId {
        /// The rejected id, in `namespace:path` form.
        id: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// Errors raised by an operator while executing.
///
/// Callers type-check stack values before dispatch, so these are
/// reserved for conditions only the operator itself can detect.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OperatorError {
    /// An argument had an acceptable kind but an unusable value.
    #[error("invalid argument {index}: {reason}")]
    InvalidArgument {
        /// Position of the argument, 0 being the deepest consumed value.
        index: usize,
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The operator failed for a reason unrelated to a single argument.
    #[error("execution failed: {reason}")]
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

/// Errors from dispatching a resolved operator against stack values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The caller supplied a different number of values than the
    /// operator declares.
    #[error("operator expects {expected} argument(s), got {found}")]
    ArityMismatch {
        /// The operator's declared arity.
        expected: usize,
        /// Number of values actually supplied.
        found: usize,
    },
    /// The operator itself failed.
    #[error("operator failed: {0}")]
    Operator(#[from] OperatorError),
}
