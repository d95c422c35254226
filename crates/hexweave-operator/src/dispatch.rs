//! Arity-checked invocation of operators.

use hexweave_core::{CastEnv, DispatchError};

use crate::operator::{Operator, OperatorResult, ScheduledEffect};

/// Invoke `op` on `args`.
///
/// Checks only that `args.len()` matches the declared arity; value kinds
/// are the caller's responsibility. The returned effect, if any, has not
/// been run.
pub fn dispatch<V, O>(
    op: &O,
    args: Vec<V>,
    env: &dyn CastEnv,
) -> Result<OperatorResult<V>, DispatchError>
where
    O: Operator<V> + ?Sized,
{
    let expected = op.arity();
    if args.len() != expected {
        return Err(DispatchError::ArityMismatch {
            expected,
            found: args.len(),
        });
    }
    Ok(op.execute(args, env)?)
}

/// Pop `op.arity()` values off `stack`, dispatch, and push the pure
/// result back. An effectful result is returned for the caller to pay
/// for and cast.
///
/// The stack is untouched if it holds fewer values than the arity. If the
/// operator itself fails, the consumed values are dropped.
pub fn apply_to_stack<V, O>(
    op: &O,
    stack: &mut Vec<V>,
    env: &dyn CastEnv,
) -> Result<Option<ScheduledEffect>, DispatchError>
where
    O: Operator<V> + ?Sized,
{
    let arity = op.arity();
    if stack.len() < arity {
        return Err(DispatchError::ArityMismatch {
            expected: arity,
            found: stack.len(),
        });
    }
    let args = stack.split_off(stack.len() - arity);
    match dispatch(op, args, env)? {
        OperatorResult::Pure(values) => {
            stack.extend(values);
            Ok(None)
        }
        OperatorResult::Effect(effect) => Ok(Some(effect)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{Constant, VisualHint};
    use hexweave_core::{ActorId, OperatorError, WorldInfo};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Env {
        world: WorldInfo,
    }

    impl CastEnv for Env {
        fn caster(&self) -> ActorId {
            ActorId(1)
        }

        fn world(&self) -> &WorldInfo {
            &self.world
        }
    }

    fn env() -> Env {
        Env {
            world: WorldInfo::new(0, 42),
        }
    }

    struct Sub;

    impl Operator<i64> for Sub {
        fn arity(&self) -> usize {
            2
        }

        fn execute(&self, args: Vec<i64>, _env: &dyn CastEnv) -> Result<OperatorResult<i64>, OperatorError> {
            Ok(OperatorResult::Pure(vec![args[0] - args[1]]))
        }
    }

    struct Div;

    impl Operator<i64> for Div {
        fn arity(&self) -> usize {
            2
        }

        fn execute(&self, args: Vec<i64>, _env: &dyn CastEnv) -> Result<OperatorResult<i64>, OperatorError> {
            if args[1] == 0 {
                return Err(OperatorError::InvalidArgument {
                    index: 1,
                    reason: "division by zero".into(),
                });
            }
            Ok(OperatorResult::Pure(vec![args[0] / args[1]]))
        }
    }

    /// Schedules an effect that bumps a shared counter.
    struct Bump(Arc<AtomicUsize>);

    impl Operator<i64> for Bump {
        fn arity(&self) -> usize {
            1
        }

        fn execute(&self, args: Vec<i64>, _env: &dyn CastEnv) -> Result<OperatorResult<i64>, OperatorError> {
            let counter = Arc::clone(&self.0);
            let by = args[0] as usize;
            let hint = VisualHint::Particles {
                origin: [0.0; 3],
                direction: [0.0, 1.0, 0.0],
                fuzziness: 0.0,
                spread: 0.1,
            };
            Ok(OperatorResult::Effect(ScheduledEffect::new(
                move |_env: &mut dyn CastEnv| {
                    counter.fetch_add(by, Ordering::SeqCst);
                },
                10 * by as u64,
                vec![hint],
            )))
        }
    }

    #[test]
    fn dispatch_checks_arity() {
        let err = dispatch(&Sub, vec![1], &env()).unwrap_err();
        assert_eq!(
            err,
            DispatchError::ArityMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn dispatch_pure() {
        match dispatch(&Sub, vec![5, 3], &env()).unwrap() {
            OperatorResult::Pure(v) => assert_eq!(v, vec![2]),
            other => panic!("expected pure result, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_wraps_operator_error() {
        let err = dispatch(&Div, vec![5, 0], &env()).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Operator(OperatorError::InvalidArgument { index: 1, .. })
        ));
    }

    #[test]
    fn zero_arity_constant() {
        let op = Constant(7i64);
        let mut stack = vec![1, 2];
        assert!(apply_to_stack(&op, &mut stack, &env()).unwrap().is_none());
        assert_eq!(stack, vec![1, 2, 7]);
    }

    #[test]
    fn stack_application_consumes_top_values() {
        let mut stack = vec![100, 10, 4];
        apply_to_stack(&Sub, &mut stack, &env()).unwrap();
        assert_eq!(stack, vec![100, 6]);
    }

    #[test]
    fn stack_underflow_leaves_stack_untouched() {
        let mut stack = vec![3];
        let err = apply_to_stack(&Sub, &mut stack, &env()).unwrap_err();
        assert!(matches!(err, DispatchError::ArityMismatch { expected: 2, found: 1 }));
        assert_eq!(stack, vec![3]);
    }

    #[test]
    fn effect_is_deferred_until_cast() {
        let counter = Arc::new(AtomicUsize::new(0));
        let op = Bump(Arc::clone(&counter));
        let mut stack = vec![3];
        let scheduled = apply_to_stack(&op, &mut stack, &env())
            .unwrap()
            .expect("effectful operator");
        assert!(stack.is_empty());
        assert_eq!(scheduled.cost, 30);
        assert_eq!(scheduled.hints.len(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 0, "dispatch must not run effects");

        let mut e = env();
        scheduled.cast(&mut e);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
