//! Integration test: per-world tables and the world store.
//!
//! Tables are loaded when a usable record exists and regenerated (and
//! written back) when the record is missing, corrupt, derived from another
//! seed, or out of date with the registered prototypes.

use std::sync::Arc;

use hexweave_core::{WorldId, WorldInfo};
use hexweave_operator::{Constant, Operator};
use hexweave_registry::{LookupError, NumeralHandler, Registry, RegistryBuilder, ResolveError, ResolvedBy};
use hexweave_save::{record_to_bytes, PerWorldEntry, PerWorldRecord, WorldStore};
use hexweave_space::Direction;
use hexweave_test_utils::{op_id, pattern, CountingStore};

fn constant(v: f64) -> Arc<dyn Operator<f64>> {
    Arc::new(Constant(v))
}

fn builder() -> RegistryBuilder<f64> {
    let mut b = RegistryBuilder::<f64>::new();
    b.register(pattern("ww", Direction::East), op_id("x"), constant(1.0), false)
        .unwrap();
    b.register(pattern("qaq", Direction::NorthEast), op_id("y"), constant(2.0), true)
        .unwrap();
    b.register(pattern("aqaae", Direction::East), op_id("z"), constant(3.0), true)
        .unwrap();
    b
}

fn registry(store: &Arc<CountingStore>) -> Registry<f64> {
    builder().with_store(store.clone()).build().unwrap()
}

const WORLD: WorldInfo = WorldInfo {
    id: WorldId(7),
    seed: 42,
};

// ── Fresh worlds ────────────────────────────────────────────────

#[test]
fn first_access_derives_and_saves() {
    let store = Arc::new(CountingStore::new());
    let reg = registry(&store);
    let table = reg.per_world_table(&WORLD);
    assert_eq!(table.len(), 2);
    assert_eq!(table.seed(), 42);
    assert_eq!(store.loads(), 1);
    assert_eq!(store.saves(), 1);
    assert_eq!(*table, reg.derive_world_table(42));

    // Cached: no further store traffic.
    reg.per_world_table(&WORLD);
    assert_eq!(store.loads(), 1);
    assert_eq!(store.saves(), 1);
    assert_eq!(reg.cached_worlds(), 1);
}

#[test]
fn saved_bytes_match_the_table() {
    let store = Arc::new(CountingStore::new());
    let reg = registry(&store);
    let table = reg.per_world_table(&WORLD);
    let bytes = store.inner.bytes(WorldId(7)).unwrap();
    assert_eq!(bytes, record_to_bytes(&table).unwrap());
}

// ── Reload ──────────────────────────────────────────────────────

#[test]
fn reload_uses_stored_record() {
    let store = Arc::new(CountingStore::new());
    let first = registry(&store).per_world_table(&WORLD);

    let reg = registry(&store);
    let second = reg.per_world_table(&WORLD);
    assert_eq!(first, second);
    assert_eq!(store.loads(), 2);
    assert_eq!(store.saves(), 1, "a usable record is not rewritten");
}

#[test]
fn unload_then_access_reloads() {
    let store = Arc::new(CountingStore::new());
    let reg = registry(&store);
    let first = reg.per_world_table(&WORLD);
    assert!(reg.unload_world(WORLD.id));
    assert!(!reg.unload_world(WORLD.id));
    let second = reg.per_world_table(&WORLD);
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert_eq!(store.loads(), 2);
    assert_eq!(store.saves(), 1);
}

#[test]
fn hand_edited_record_is_honoured() {
    // A valid record for the right seed wins over derivation, so tables
    // survive changes to the derivation itself.
    let store = Arc::new(CountingStore::new());
    let mut record = PerWorldRecord::new(42);
    record.insert(
        "eee".into(),
        PerWorldEntry {
            operator: op_id("y"),
            start_dir: Direction::West,
        },
    );
    record.insert(
        "qqqqq".into(),
        PerWorldEntry {
            operator: op_id("z"),
            start_dir: Direction::East,
        },
    );
    store.inner.save(WORLD.id, &record).unwrap();

    let reg = registry(&store);
    assert_eq!(*reg.per_world_table(&WORLD), record);
    let y = reg.per_world_pattern(&WORLD, &op_id("y")).unwrap();
    assert_eq!(y, pattern("eee", Direction::West));
    assert_eq!(store.saves(), 0);
}

// ── Regeneration ────────────────────────────────────────────────

#[test]
fn lost_record_regenerates_identically() {
    let store = Arc::new(CountingStore::new());
    let first = registry(&store).per_world_table(&WORLD);
    assert!(store.inner.remove(WORLD.id));

    let second = registry(&store).per_world_table(&WORLD);
    assert_eq!(first, second);
    assert_eq!(store.saves(), 2);
    assert!(store.inner.bytes(WORLD.id).is_some());
}

#[test]
fn corrupt_record_regenerates_and_is_overwritten() {
    let store = Arc::new(CountingStore::new());
    let expected = registry(&store).per_world_table(&WORLD);
    store.inner.put_bytes(WORLD.id, b"HXPW\x01garbage".to_vec());

    let table = registry(&store).per_world_table(&WORLD);
    assert_eq!(table, expected);
    assert_eq!(
        store.inner.bytes(WORLD.id).unwrap(),
        record_to_bytes(&expected).unwrap()
    );
}

#[test]
fn record_from_another_seed_is_replaced() {
    let store = Arc::new(CountingStore::new());
    let reg = registry(&store);
    store.inner.save(WORLD.id, &reg.derive_world_table(1)).unwrap();

    let table = reg.per_world_table(&WORLD);
    assert_eq!(table.seed(), 42);
    assert_eq!(*table, reg.derive_world_table(42));
    assert_eq!(store.inner.load(WORLD.id).unwrap().unwrap().seed(), 42);
}

#[test]
fn record_missing_a_prototype_is_stale() {
    let store = Arc::new(CountingStore::new());
    let mut old = RegistryBuilder::<f64>::new();
    old.register(pattern("qaq", Direction::NorthEast), op_id("y"), constant(2.0), true)
        .unwrap();
    let old = old.with_store(store.clone()).build().unwrap();
    let partial = old.per_world_table(&WORLD);
    assert_eq!(partial.len(), 1);

    let reg = registry(&store);
    let table = reg.per_world_table(&WORLD);
    assert_eq!(table.len(), 2);
    assert_eq!(store.saves(), 2);
}

#[test]
fn record_claimed_by_new_global_is_stale() {
    let store = Arc::new(CountingStore::new());
    let table = registry(&store).per_world_table(&WORLD);
    let (claimed, _) = table.signature_of(&op_id("y")).unwrap();

    let mut b = builder();
    b.register(pattern(claimed, Direction::East), op_id("late"), constant(9.0), false)
        .unwrap();
    let reg = b.with_store(store.clone()).build().unwrap();
    let fresh = reg.per_world_table(&WORLD);
    assert!(!fresh.contains_signature(claimed));
    assert_eq!(store.saves(), 2);
}

#[test]
fn record_binding_one_operator_twice_is_stale() {
    let store = Arc::new(CountingStore::new());
    let mut record = PerWorldRecord::new(42);
    for sig in ["eee", "qqqqq"] {
        record.insert(
            sig.into(),
            PerWorldEntry {
                operator: op_id("y"),
                start_dir: Direction::East,
            },
        );
    }
    store.inner.save(WORLD.id, &record).unwrap();

    let reg = registry(&store);
    let table = reg.per_world_table(&WORLD);
    assert_ne!(*table, record);
    assert_eq!(*table, reg.derive_world_table(42));
    assert!(reg.per_world_pattern(&WORLD, &op_id("z")).is_ok());
    assert_eq!(store.saves(), 1);
}

#[test]
fn record_claimed_by_a_handler_is_stale() {
    let store = Arc::new(CountingStore::new());
    let mut record = PerWorldRecord::new(42);
    record.insert(
        "aqaaw".into(),
        PerWorldEntry {
            operator: op_id("y"),
            start_dir: Direction::East,
        },
    );
    record.insert(
        "qqqqq".into(),
        PerWorldEntry {
            operator: op_id("z"),
            start_dir: Direction::East,
        },
    );
    store.inner.save(WORLD.id, &record).unwrap();

    let mut b = builder();
    b.add_special_handler("numeral", NumeralHandler::new(|n| n));
    let reg = b.with_store(store.clone()).build().unwrap();
    let table = reg.per_world_table(&WORLD);
    assert!(!table.contains_signature("aqaaw"));
    let y = reg.per_world_pattern(&WORLD, &op_id("y")).unwrap();
    assert_eq!(
        reg.resolve(&y, &WORLD).unwrap().resolved_by,
        ResolvedBy::PerWorld(op_id("y"))
    );
    assert_eq!(store.saves(), 1);
}

// ── Prototypes with no free alternate ───────────────────────────

/// Every one-angle drawing other than `w` is global, so the per-world
/// prototype `w` never gets an alternate.
fn crowded_registry(store: &Arc<CountingStore>) -> Registry<f64> {
    let mut b = RegistryBuilder::<f64>::new();
    for (i, sig) in ["e", "d", "a", "q"].iter().enumerate() {
        b.register(pattern(sig, Direction::East), op_id(&format!("g{i}")), constant(i as f64), false)
            .unwrap();
    }
    b.register(pattern("w", Direction::East), op_id("lost"), constant(8.0), true)
        .unwrap();
    b.register(pattern("qaq", Direction::NorthEast), op_id("y"), constant(2.0), true)
        .unwrap();
    b.with_store(store.clone()).build().unwrap()
}

#[test]
fn exhausted_prototype_is_left_out() {
    let store = Arc::new(CountingStore::new());
    let reg = crowded_registry(&store);
    let table = reg.per_world_table(&WORLD);
    assert_eq!(table.len(), 1);

    let y = reg.per_world_pattern(&WORLD, &op_id("y")).unwrap();
    assert_eq!(
        reg.resolve(&y, &WORLD).unwrap().resolved_by,
        ResolvedBy::PerWorld(op_id("y"))
    );
    assert!(matches!(
        reg.per_world_pattern(&WORLD, &op_id("lost")),
        Err(LookupError::UnknownOperator { .. })
    ));
    let drawn = pattern("w", Direction::East);
    assert_eq!(
        reg.resolve(&drawn, &WORLD).unwrap_err(),
        ResolveError::UnrecognizedPattern { pattern: drawn }
    );
}

#[test]
fn record_without_exhausted_prototype_is_not_rewritten() {
    let store = Arc::new(CountingStore::new());
    let first = crowded_registry(&store).per_world_table(&WORLD);
    for _ in 0..2 {
        let again = crowded_registry(&store).per_world_table(&WORLD);
        assert_eq!(again, first);
    }
    assert_eq!(store.loads(), 3);
    assert_eq!(store.saves(), 1);
}

#[test]
fn save_failure_is_not_fatal() {
    let store = Arc::new(CountingStore::new());
    store.fail_saves(true);
    let reg = registry(&store);
    let table = reg.per_world_table(&WORLD);
    assert_eq!(table.len(), 2);
    assert!(store.inner.is_empty());

    let secret = reg.per_world_pattern(&WORLD, &op_id("z")).unwrap();
    assert!(reg.resolve(&secret, &WORLD).is_ok());
}
