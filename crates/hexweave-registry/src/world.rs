//! Compute-once cache of per-world tables.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use hexweave_core::WorldId;
use hexweave_save::PerWorldRecord;

type Slot = Arc<OnceLock<Arc<PerWorldRecord>>>;

/// One slot per world. The map lock is held only to fetch or insert a
/// slot; construction runs under the slot's `OnceLock`, so racing first
/// accesses to one world block on a single build while other worlds
/// proceed.
#[derive(Debug, Default)]
pub(crate) struct WorldCache {
    slots: Mutex<HashMap<WorldId, Slot>>,
}

impl WorldCache {
    pub(crate) fn get_or_build(
        &self,
        world: WorldId,
        build: impl FnOnce() -> PerWorldRecord,
    ) -> Arc<PerWorldRecord> {
        let slot = Arc::clone(self.lock().entry(world).or_default());
        Arc::clone(slot.get_or_init(|| Arc::new(build())))
    }

    /// Drop the slot for `world`. Holders of the old table keep it.
    pub(crate) fn remove(&self, world: WorldId) -> bool {
        self.lock().remove(&world).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<WorldId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn builds_once_and_shares() {
        let cache = WorldCache::default();
        let builds = AtomicUsize::new(0);
        let build = || {
            builds.fetch_add(1, Ordering::SeqCst);
            PerWorldRecord::new(5)
        };
        let a = cache.get_or_build(WorldId(1), build);
        let b = cache.get_or_build(WorldId(1), build);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn racing_first_access_builds_once() {
        let cache = WorldCache::default();
        let builds = AtomicUsize::new(0);
        let barrier = Barrier::new(8);
        let tables: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        cache.get_or_build(WorldId(9), || {
                            builds.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(std::time::Duration::from_millis(20));
                            PerWorldRecord::new(9)
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
    }

    #[test]
    fn remove_forces_rebuild() {
        let cache = WorldCache::default();
        let first = cache.get_or_build(WorldId(2), || PerWorldRecord::new(1));
        assert!(cache.remove(WorldId(2)));
        assert!(!cache.remove(WorldId(2)));
        assert_eq!(cache.len(), 0);
        let second = cache.get_or_build(WorldId(2), || PerWorldRecord::new(1));
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }
}
