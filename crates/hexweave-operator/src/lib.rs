//! Operator trait and dispatch contract.
//!
//! An [`Operator`] consumes a fixed number of stack values and either
//! replaces them ([`OperatorResult::Pure`]) or schedules a deferred
//! [`Effect`] with a cost and visual hints ([`OperatorResult::Effect`]).
//! [`dispatch`] arity-checks a call at the boundary with the external VM.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dispatch;
pub mod operator;

pub use dispatch::{apply_to_stack, dispatch};
pub use operator::{Constant, Effect, Operator, OperatorResult, ScheduledEffect, VisualHint};
