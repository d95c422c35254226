//! Hexweave: hex-grid gesture recognition and operator resolution.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all hexweave sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use hexweave::prelude::*;
//!
//! struct Add;
//! impl Operator<f64> for Add {
//!     fn arity(&self) -> usize { 2 }
//!     fn execute(&self, args: Vec<f64>, _env: &dyn CastEnv) -> Result<OperatorResult<f64>, OperatorError> {
//!         Ok(OperatorResult::Pure(vec![args[0] + args[1]]))
//!     }
//! }
//!
//! let mut builder = RegistryBuilder::<f64>::new();
//! builder.add_special_handler("numeral", NumeralHandler::new(|n| n));
//! let add = Pattern::from_signature("waaw", Direction::NorthEast).unwrap();
//! builder.register(add, "add".parse().unwrap(), Arc::new(Add), false).unwrap();
//! let registry = builder.build().unwrap();
//!
//! let world = WorldInfo::new(0, 42);
//! let drawn = Pattern::from_signature("waaw", Direction::West).unwrap();
//! let resolved = registry.resolve(&drawn, &world).unwrap();
//! assert_eq!(resolved.operator.arity(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `hexweave-core` | ids, world info, cast context, shared errors |
//! | [`space`] | `hexweave-space` | hex geometry, patterns, signatures |
//! | [`operator`] | `hexweave-operator` | operator trait, effects, dispatch |
//! | [`save`] | `hexweave-save` | per-world record format and stores |
//! | [`registry`] | `hexweave-registry` | registry, special handlers, obfuscation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifiers, world info, and the cast context (`hexweave-core`).
pub use hexweave_core as types;

/// Hex geometry and the pattern codec (`hexweave-space`).
///
/// [`space::Pattern`] is the central type: a start direction plus the
/// turns drawn from it.
pub use hexweave_space as space;

/// The operator contract and arity-checked dispatch (`hexweave-operator`).
pub use hexweave_operator as operator;

/// Per-world record format and storage (`hexweave-save`).
///
/// Implement [`save::WorldStore`] to persist per-world tables in a host
/// save system.
pub use hexweave_save as save;

/// Pattern registry and per-world obfuscation (`hexweave-registry`).
pub use hexweave_registry as registry;

/// Common imports for typical hexweave usage.
pub mod prelude {
    // Core types and traits
    pub use hexweave_core::{ActorId, CastEnv, OperatorId, WorldId, WorldInfo};

    // Errors
    pub use hexweave_core::{DispatchError, OperatorError};
    pub use hexweave_registry::{LookupError, RegisterError, ResolveError};

    // Geometry
    pub use hexweave_space::{Angle, Direction, HexCoord, Pattern, PatternTracer};

    // Operators
    pub use hexweave_operator::{apply_to_stack, dispatch, Operator, OperatorResult, ScheduledEffect};

    // Registry
    pub use hexweave_registry::{
        NumeralHandler, Registry, RegistryBuilder, RegistryConfig, ResolvedBy, SpecialHandler,
    };

    // Storage
    pub use hexweave_save::{MemoryStore, WorldStore};
}
