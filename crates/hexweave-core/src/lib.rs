//! Core types and traits for the hexweave gesture engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers shared across the workspace (operators, worlds,
//! actors), the error types raised while executing operators, and the
//! [`CastEnv`] trait through which deferred effects see their caster.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod traits;

pub use error::{DispatchError, IdError, OperatorError};
pub use id::{ActorId, OperatorId, WorldId, WorldInfo};
pub use traits::CastEnv;
