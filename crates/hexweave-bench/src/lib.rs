//! Benchmark profiles for the hexweave gesture engine.
//!
//! - [`staircase`]: a drawable pattern of any length
//! - [`numbered_pattern`]: a distinct drawable pattern per index
//! - [`reference_registry`]: a registry shaped like a modest mod pack, with
//!   mostly global entries and a handful of per-world secrets

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use hexweave_core::OperatorId;
use hexweave_operator::{Constant, Operator};
use hexweave_registry::{NumeralHandler, Registry, RegistryBuilder};
use hexweave_space::{Angle, Direction, Pattern};

/// Number of index bits spelled out by [`numbered_pattern`].
pub const INDEX_BITS: usize = 10;

/// `len` angles alternating right and left: `eqeq...`.
///
/// Headings alternate east and south-east, so the path never returns to a
/// vertex and is always drawable.
pub fn staircase(len: usize) -> Pattern {
    let turns = [Angle::Right, Angle::Left];
    Pattern::from_parts(Direction::East, (0..len).map(|i| turns[i % 2]))
}

/// A drawable pattern unique to `index` (for `index < 2^INDEX_BITS`).
///
/// Each bit of `index`, low bit first, either keeps the heading (`w`) or
/// swaps between east and south-east (`e`/`q`). Every stroke moves one
/// step further along the same diagonal, so nothing is retraced. Patterns
/// are padded with `w` to `INDEX_BITS + index % 4` angles so lengths vary.
pub fn numbered_pattern(index: usize) -> Pattern {
    let len = INDEX_BITS + index % 4;
    let mut heading = Direction::East;
    let angles = (0..len).map(|bit| {
        if bit < INDEX_BITS && (index >> bit) & 1 == 1 {
            let turn = if heading == Direction::East {
                Angle::Right
            } else {
                Angle::Left
            };
            heading += turn;
            turn
        } else {
            Angle::Forward
        }
    });
    Pattern::from_parts(Direction::East, angles.collect::<Vec<_>>())
}

/// Build a reference registry: `globals` global entries, `secrets`
/// per-world prototypes, and the numeral handler.
///
/// Numbered patterns never contain `a` or `d`, so none of them is
/// mistaken for a numeral.
pub fn reference_registry(globals: usize, secrets: usize) -> Registry<f64> {
    let mut b = RegistryBuilder::new();
    b.add_special_handler("numeral", NumeralHandler::new(|n| n));
    for i in 0..globals + secrets {
        let per_world = i >= globals;
        let prefix = if per_world { "secret" } else { "global" };
        let id = bench_id(prefix, i);
        if let Err(e) = b.register(numbered_pattern(i), id, constant(i as f64), per_world) {
            panic!("reference registry entry {i}: {e}");
        }
    }
    match b.build() {
        Ok(reg) => reg,
        Err(e) => panic!("default config is valid: {e}"),
    }
}

fn bench_id(prefix: &str, i: usize) -> OperatorId {
    match OperatorId::new("bench", format!("{prefix}_{i}")) {
        Ok(id) => id,
        Err(e) => panic!("bench ids are lowercase: {e}"),
    }
}

fn constant(v: f64) -> Arc<dyn Operator<f64>> {
    Arc::new(Constant(v))
}
