//! Test utilities and mock types for hexweave development.
//!
//! Provides a mock [`CastEnv`], an instrumented [`WorldStore`], and
//! shorthand constructors for ids and patterns. Reusable operators live in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use hexweave_core::{ActorId, CastEnv, OperatorId, WorldId, WorldInfo};
use hexweave_save::{MemoryStore, PerWorldRecord, SaveError, WorldStore};
use hexweave_space::{Direction, Pattern};

/// Parse an operator id, panicking on bad input.
pub fn op_id(s: &str) -> OperatorId {
    s.parse().unwrap()
}

/// Decode a signature from `start`, panicking if it is not drawable.
pub fn pattern(signature: &str, start: Direction) -> Pattern {
    Pattern::from_signature(signature, start).unwrap()
}

/// Mock casting context: a fixed caster in a fixed world.
#[derive(Clone, Debug)]
pub struct MockCastEnv {
    pub caster: ActorId,
    pub world: WorldInfo,
}

impl MockCastEnv {
    pub fn new(world: WorldInfo) -> Self {
        Self {
            caster: ActorId(1),
            world,
        }
    }
}

impl CastEnv for MockCastEnv {
    fn caster(&self) -> ActorId {
        self.caster
    }

    fn world(&self) -> &WorldInfo {
        &self.world
    }
}

/// A [`MemoryStore`] that counts calls and can be told to fail saves.
#[derive(Debug, Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    loads: AtomicUsize,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every subsequent `save` return an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl WorldStore for CountingStore {
    fn load(&self, world: WorldId) -> Result<Option<PerWorldRecord>, SaveError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(world)
    }

    fn save(&self, world: WorldId, record: &PerWorldRecord) -> Result<(), SaveError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(SaveError::Io(std::io::Error::other("disk full")));
        }
        self.inner.save(world, record)
    }
}
