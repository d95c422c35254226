//! Criterion benchmarks for resolution and per-world derivation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hexweave_bench::{numbered_pattern, reference_registry};
use hexweave_core::WorldInfo;
use hexweave_registry::Obfuscator;
use hexweave_space::Pattern;

/// Benchmark: resolve a global pattern in a 500-entry registry.
fn bench_resolve_global(c: &mut Criterion) {
    let reg = reference_registry(500, 20);
    let world = WorldInfo::new(1, 42);
    reg.per_world_table(&world);
    let drawn = numbered_pattern(250);

    c.bench_function("resolve_global_500", |b| {
        b.iter(|| black_box(reg.resolve(black_box(&drawn), &world).unwrap()));
    });
}

/// Benchmark: resolve through a warm per-world table.
fn bench_resolve_per_world(c: &mut Criterion) {
    let reg = reference_registry(500, 20);
    let world = WorldInfo::new(1, 42);
    let (sig, entry) = {
        let table = reg.per_world_table(&world);
        let (sig, entry) = table.iter().next().unwrap();
        (sig.to_owned(), entry.clone())
    };
    let drawn = hexweave_space::Pattern::from_signature(&sig, entry.start_dir).unwrap();

    c.bench_function("resolve_per_world_500", |b| {
        b.iter(|| black_box(reg.resolve(black_box(&drawn), &world).unwrap()));
    });
}

/// Benchmark: derive one alternate for a 11-angle prototype.
fn bench_derive_alternate(c: &mut Criterion) {
    let ob = Obfuscator::default();
    let proto = numbered_pattern(777);
    c.bench_function("derive_alternate_11", |b| {
        b.iter(|| black_box(ob.derive_alternate(&proto, black_box(42), |_: &Pattern| false).unwrap()));
    });
}

/// Benchmark: derive a full table of 20 secrets against 500 globals.
fn bench_derive_world_table(c: &mut Criterion) {
    let reg = reference_registry(500, 20);
    let mut seed = 0u64;
    c.bench_function("derive_world_table_20", |b| {
        b.iter(|| {
            seed += 1;
            black_box(reg.derive_world_table(seed))
        });
    });
}

criterion_group!(
    benches,
    bench_resolve_global,
    bench_resolve_per_world,
    bench_derive_alternate,
    bench_derive_world_table
);
criterion_main!(benches);
