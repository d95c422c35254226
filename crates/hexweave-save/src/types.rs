//! Data types for the per-world record.

use indexmap::IndexMap;

use hexweave_core::OperatorId;
use hexweave_space::{Direction, Pattern, PatternError};

/// What an obfuscated signature unlocks in one world.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PerWorldEntry {
    /// The operator the signature resolves to.
    pub operator: OperatorId,
    /// Direction the obfuscated drawing starts in.
    pub start_dir: Direction,
}

/// A world's obfuscated pattern table, keyed by signature.
///
/// Entries keep insertion order (the registry inserts in prototype
/// registration order), which makes encoding stable: a record that is
/// saved, loaded, and saved again produces identical bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerWorldRecord {
    seed: u64,
    entries: IndexMap<String, PerWorldEntry>,
}

impl PerWorldRecord {
    /// An empty record for a world with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            entries: IndexMap::new(),
        }
    }

    /// The world seed this record was derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Add an entry, returning the one it replaced, if any.
    pub fn insert(&mut self, signature: String, entry: PerWorldEntry) -> Option<PerWorldEntry> {
        self.entries.insert(signature, entry)
    }

    /// Look up an obfuscated signature.
    pub fn get(&self, signature: &str) -> Option<&PerWorldEntry> {
        self.entries.get(signature)
    }

    /// Whether `signature` is assigned in this world.
    pub fn contains_signature(&self, signature: &str) -> bool {
        self.entries.contains_key(signature)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(signature, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PerWorldEntry)> {
        self.entries.iter().map(|(sig, e)| (sig.as_str(), e))
    }

    /// Find the signature assigned to `operator`, if any.
    pub fn signature_of(&self, operator: &OperatorId) -> Option<(&str, &PerWorldEntry)> {
        self.iter().find(|(_, e)| &e.operator == operator)
    }

    /// Rebuild the drawable pattern assigned to `operator`.
    ///
    /// Returns `None` if the operator has no entry, and an error if the
    /// stored signature cannot be drawn from its stored start direction.
    pub fn pattern_of(&self, operator: &OperatorId) -> Option<Result<Pattern, PatternError>> {
        self.signature_of(operator)
            .map(|(sig, e)| Pattern::from_signature(sig, e.start_dir))
    }
}
