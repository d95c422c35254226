//! Core abstraction traits for the execution context.

use crate::id::{ActorId, WorldInfo};

/// Environment facts available to operators and their deferred effects.
///
/// Implemented by the evaluation VM that owns the stack. The gesture
/// engine never inspects it; it is passed through to `Operator::execute`
/// and later to the scheduled effect, which is where world mutation
/// happens.
pub trait CastEnv {
    /// The actor that drew the pattern being executed.
    fn caster(&self) -> ActorId;

    /// The world the pattern was drawn in.
    fn world(&self) -> &WorldInfo;
}
