//! Handlers consulted before any table lookup.

use std::sync::Arc;

use hexweave_operator::Operator;
use hexweave_space::Pattern;

/// Recognises a family of patterns by shape and builds an operator for
/// them on the fly.
///
/// Handlers run in registration order and the first `Some` wins, ahead of
/// both the global and the per-world tables. Any
/// `Fn(&Pattern) -> Option<Arc<dyn Operator<V>>>` closure is a handler.
pub trait SpecialHandler<V>: Send + Sync {
    /// Return an operator if `pattern` belongs to this handler.
    fn try_handle(&self, pattern: &Pattern) -> Option<Arc<dyn Operator<V>>>;
}

impl<V, F> SpecialHandler<V> for F
where
    F: Fn(&Pattern) -> Option<Arc<dyn Operator<V>>> + Send + Sync,
{
    fn try_handle(&self, pattern: &Pattern) -> Option<Arc<dyn Operator<V>>> {
        self(pattern)
    }
}
