//! Integration test: racing first access to per-world tables.
//!
//! Many threads resolve through a shared registry at once. Each world's
//! table must be built exactly once, and every thread must observe the
//! same table instance.

use std::sync::{Arc, Barrier};
use std::thread;

use hexweave_core::WorldInfo;
use hexweave_operator::{Constant, Operator};
use hexweave_registry::{Registry, RegistryBuilder, ResolvedBy};
use hexweave_space::Direction;
use hexweave_test_utils::{op_id, pattern, CountingStore};

const THREADS: usize = 16;

fn shared_registry(store: &Arc<CountingStore>) -> Arc<Registry<f64>> {
    let mut b = RegistryBuilder::<f64>::new();
    for (i, sig) in ["qaq", "wqwq", "eeeee", "aqaaw"].iter().enumerate() {
        let op: Arc<dyn Operator<f64>> = Arc::new(Constant(i as f64));
        b.register(pattern(sig, Direction::East), op_id(&format!("s{i}")), op, true)
            .unwrap();
    }
    Arc::new(b.with_store(store.clone()).build().unwrap())
}

#[test]
fn one_build_per_world_under_contention() {
    let store = Arc::new(CountingStore::new());
    let reg = shared_registry(&store);
    let world = WorldInfo::new(5, 42);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let reg = Arc::clone(&reg);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                reg.per_world_table(&world)
            })
        })
        .collect();
    let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(store.loads(), 1);
    assert_eq!(store.saves(), 1);
    assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
}

#[test]
fn distinct_worlds_build_independently() {
    let store = Arc::new(CountingStore::new());
    let reg = shared_registry(&store);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let reg = Arc::clone(&reg);
            let barrier = Arc::clone(&barrier);
            // Four worlds, four threads each.
            let world = WorldInfo::new((i % 4) as u64, 1000 + (i % 4) as u64);
            thread::spawn(move || {
                barrier.wait();
                let secret = reg.per_world_pattern(&world, &op_id("s2")).unwrap();
                reg.resolve(&secret, &world).unwrap().resolved_by
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), ResolvedBy::PerWorld(op_id("s2")));
    }

    assert_eq!(reg.cached_worlds(), 4);
    assert_eq!(store.saves(), 4);
    assert_eq!(store.inner.len(), 4);
}
