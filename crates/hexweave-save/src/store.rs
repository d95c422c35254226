//! Load/save seam between the registry and the host's save system.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use hexweave_core::WorldId;

use crate::codec::{record_from_bytes, record_to_bytes};
use crate::error::SaveError;
use crate::types::PerWorldRecord;

/// Persistent storage for per-world records.
///
/// Implementations must be thread-safe: the registry may load and save
/// records for different worlds concurrently. Per world, it calls `save`
/// at most once per table build.
pub trait WorldStore: Send + Sync {
    /// Load the record for `world`.
    ///
    /// `Ok(None)` means nothing was ever saved. An `Err` means something
    /// was saved but could not be read back; the registry treats both as
    /// "regenerate".
    fn load(&self, world: WorldId) -> Result<Option<PerWorldRecord>, SaveError>;

    /// Persist the record for `world`, replacing any previous one.
    fn save(&self, world: WorldId, record: &PerWorldRecord) -> Result<(), SaveError>;
}

/// Keeps encoded records in memory.
///
/// Records go through the binary codec on every save and load, so this
/// store exercises the same path a file-backed one would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<WorldId, Vec<u8>>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw encoded bytes stored for `world`.
    pub fn bytes(&self, world: WorldId) -> Option<Vec<u8>> {
        self.lock().get(&world).cloned()
    }

    /// Overwrite the raw bytes for `world`, bypassing the encoder.
    pub fn put_bytes(&self, world: WorldId, bytes: Vec<u8>) {
        self.lock().insert(world, bytes);
    }

    /// Forget the record for `world`. Returns whether one existed.
    pub fn remove(&self, world: WorldId) -> bool {
        self.lock().remove(&world).is_some()
    }

    /// Number of worlds with a stored record.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<WorldId, Vec<u8>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WorldStore for MemoryStore {
    fn load(&self, world: WorldId) -> Result<Option<PerWorldRecord>, SaveError> {
        match self.bytes(world) {
            Some(bytes) => record_from_bytes(&bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, world: WorldId, record: &PerWorldRecord) -> Result<(), SaveError> {
        let bytes = record_to_bytes(record)?;
        self.put_bytes(world, bytes);
        Ok(())
    }
}

/// Persists nothing. Every world is regenerated on first access.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl WorldStore for NullStore {
    fn load(&self, _world: WorldId) -> Result<Option<PerWorldRecord>, SaveError> {
        Ok(None)
    }

    fn save(&self, _world: WorldId, _record: &PerWorldRecord) -> Result<(), SaveError> {
        Ok(())
    }
}
