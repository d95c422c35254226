//! The [`Operator`] trait and its result shapes.
//!
//! Operators are stateless units of dispatch. They declare an arity once
//! and are then handed exactly that many values per call, already
//! type-checked by the VM that owns the stack.

use std::fmt;

use hexweave_core::{CastEnv, OperatorError};

/// An executable action bound to a pattern.
///
/// `V` is the VM's stack value type; the gesture engine never looks
/// inside it.
///
/// # Contract
///
/// - `arity()` is constant for the lifetime of the operator.
/// - `execute()` receives exactly `arity()` values, deepest first.
/// - `execute()` MUST NOT mutate world state. World mutation belongs in
///   the [`Effect`] it returns, which the caller runs later (or never).
///
/// # Object safety
///
/// This trait is object-safe; the registry stores operators as
/// `Arc<dyn Operator<V>>`.
///
/// # Examples
///
/// ```
/// use hexweave_core::{CastEnv, OperatorError};
/// use hexweave_operator::{Operator, OperatorResult};
///
/// struct Sub;
///
/// impl Operator<f64> for Sub {
///     fn arity(&self) -> usize { 2 }
///
///     fn execute(
///         &self,
///         args: Vec<f64>,
///         _env: &dyn CastEnv,
///     ) -> Result<OperatorResult<f64>, OperatorError> {
///         Ok(OperatorResult::Pure(vec![args[0] - args[1]]))
///     }
/// }
///
/// assert_eq!(Sub.arity(), 2);
/// ```
pub trait Operator<V>: Send + Sync {
    /// Number of stack values consumed. Zero is valid.
    fn arity(&self) -> usize;

    /// Run the operator on its arguments.
    fn execute(&self, args: Vec<V>, env: &dyn CastEnv) -> Result<OperatorResult<V>, OperatorError>;
}

/// What an operator hands back to the VM.
#[derive(Debug)]
pub enum OperatorResult<V> {
    /// Values pushed in place of the consumed ones. No other effect.
    Pure(Vec<V>),
    /// A deferred world effect, to be run once its cost is paid.
    Effect(ScheduledEffect),
}

/// A deferred effect together with its price and its visuals.
pub struct ScheduledEffect {
    /// The action itself. Not run during dispatch.
    pub effect: Box<dyn Effect>,
    /// Resource cost the caller must pay before casting.
    pub cost: u64,
    /// Particles and similar cosmetic hints for observers.
    pub hints: Vec<VisualHint>,
}

impl ScheduledEffect {
    /// Bundle an effect with its cost and hints.
    pub fn new(effect: impl Effect + 'static, cost: u64, hints: Vec<VisualHint>) -> Self {
        Self {
            effect: Box::new(effect),
            cost,
            hints,
        }
    }

    /// Run the effect, consuming it.
    pub fn cast(self, env: &mut dyn CastEnv) {
        self.effect.cast(env);
    }
}

impl fmt::Debug for ScheduledEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledEffect")
            .field("cost", &self.cost)
            .field("hints", &self.hints)
            .finish_non_exhaustive()
    }
}

/// A world mutation deferred until the caller decides to pay for it.
///
/// Implemented for any `FnOnce(&mut dyn CastEnv) + Send` closure.
pub trait Effect: Send {
    /// Perform the effect.
    fn cast(self: Box<Self>, env: &mut dyn CastEnv);
}

impl<F> Effect for F
where
    F: FnOnce(&mut dyn CastEnv) + Send,
{
    fn cast(self: Box<Self>, env: &mut dyn CastEnv) {
        (*self)(env)
    }
}

/// A cosmetic descriptor sent to observers alongside an effect.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualHint {
    /// A cone of particles.
    Particles {
        /// World-space emission point.
        origin: [f64; 3],
        /// Axis of the cone.
        direction: [f64; 3],
        /// Random jitter of the origin.
        fuzziness: f64,
        /// Angular spread of the cone, in radians.
        spread: f64,
    },
}

/// A zero-arity operator that pushes a fixed value.
///
/// Produced by special handlers that read literals straight out of a
/// pattern's shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Constant<V>(pub V);

impl<V> Operator<V> for Constant<V>
where
    V: Clone + Send + Sync,
{
    fn arity(&self) -> usize {
        0
    }

    fn execute(&self, _args: Vec<V>, _env: &dyn CastEnv) -> Result<OperatorResult<V>, OperatorError> {
        Ok(OperatorResult::Pure(vec![self.0.clone()]))
    }
}
