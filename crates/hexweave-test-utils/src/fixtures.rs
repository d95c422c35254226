//! Reusable operator fixtures over `f64` stack values.
//!
//! - [`AddOperator`] pops two values and pushes their sum.
//! - [`FailingOperator`] always rejects its first argument.
//! - [`CountingEffectOperator`] schedules an effect that bumps a shared
//!   counter when cast.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hexweave_core::{CastEnv, OperatorError};
use hexweave_operator::{Operator, OperatorResult, ScheduledEffect, VisualHint};

/// `a b -> a+b`.
pub struct AddOperator;

impl Operator<f64> for AddOperator {
    fn arity(&self) -> usize {
        2
    }

    fn execute(&self, args: Vec<f64>, _env: &dyn CastEnv) -> Result<OperatorResult<f64>, OperatorError> {
        Ok(OperatorResult::Pure(vec![args[0] + args[1]]))
    }
}

/// Fails with `InvalidArgument { index: 0 }` for any input.
pub struct FailingOperator {
    pub arity: usize,
}

impl Operator<f64> for FailingOperator {
    fn arity(&self) -> usize {
        self.arity
    }

    fn execute(&self, _args: Vec<f64>, _env: &dyn CastEnv) -> Result<OperatorResult<f64>, OperatorError> {
        Err(OperatorError::InvalidArgument {
            index: 0,
            reason: "fixture always fails".into(),
        })
    }
}

/// Consumes one value and schedules an effect costing that many units.
/// Casting the effect increments `casts`.
pub struct CountingEffectOperator {
    pub casts: Arc<AtomicUsize>,
}

impl CountingEffectOperator {
    pub fn new() -> Self {
        Self {
            casts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn cast_count(&self) -> usize {
        self.casts.load(Ordering::SeqCst)
    }
}

impl Default for CountingEffectOperator {
    fn default() -> Self {
        Self::new()
    }
}

impl Operator<f64> for CountingEffectOperator {
    fn arity(&self) -> usize {
        1
    }

    fn execute(&self, args: Vec<f64>, _env: &dyn CastEnv) -> Result<OperatorResult<f64>, OperatorError> {
        if args[0] < 0.0 {
            return Err(OperatorError::InvalidArgument {
                index: 0,
                reason: format!("negative cost {}", args[0]),
            });
        }
        let casts = Arc::clone(&self.casts);
        let hint = VisualHint::Particles {
            origin: [0.0, 64.0, 0.0],
            direction: [0.0, 1.0, 0.0],
            fuzziness: 0.5,
            spread: 0.3,
        };
        Ok(OperatorResult::Effect(ScheduledEffect::new(
            move |_env: &mut dyn CastEnv| {
                casts.fetch_add(1, Ordering::SeqCst);
            },
            args[0] as u64,
            vec![hint],
        )))
    }
}
