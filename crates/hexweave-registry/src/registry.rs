//! The two-phase pattern registry.
//!
//! [`RegistryBuilder`] is the mutable bootstrap half: operators and
//! special handlers are added through `&mut self`, then
//! [`RegistryBuilder::build`] freezes everything into a [`Registry`].
//! The frozen registry is `Send + Sync`; its only interior mutability is
//! the per-world table cache.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

use hexweave_core::{OperatorId, WorldId, WorldInfo};
use hexweave_operator::Operator;
use hexweave_save::{NullStore, PerWorldEntry, PerWorldRecord, WorldStore};
use hexweave_space::{Angle, Direction, Pattern};

use crate::config::RegistryConfig;
use crate::error::{ConfigError, LookupError, RegisterError, ResolveError};
use crate::obfuscate::Obfuscator;
use crate::special::SpecialHandler;
use crate::world::WorldCache;

// ── Entries ─────────────────────────────────────────────────────

/// How a registered operator is reached from a drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEntry {
    /// Drawn directly: any pattern with this signature resolves to it.
    Global {
        /// The angle signature.
        signature: String,
        /// Start direction used when the pattern is shown to players.
        preferred_start: Direction,
    },
    /// Secret: only a world-specific alternate of the prototype resolves.
    PerWorld {
        /// The canonical shape, used to seed derivation.
        prototype: Pattern,
    },
}

impl RegistryEntry {
    /// The canonical pattern for this entry.
    pub fn canonical_pattern(&self) -> Pattern {
        match self {
            // The signature came from a drawable pattern at registration.
            RegistryEntry::Global {
                signature,
                preferred_start,
            } => Pattern::from_parts(*preferred_start, signature.chars().filter_map(Angle::from_char)),
            RegistryEntry::PerWorld { prototype } => prototype.clone(),
        }
    }

    /// Whether this entry lives in the per-world tier.
    pub fn is_per_world(&self) -> bool {
        matches!(self, RegistryEntry::PerWorld { .. })
    }
}

struct Registered<V> {
    entry: RegistryEntry,
    operator: Arc<dyn Operator<V>>,
}

struct NamedHandler<V> {
    name: String,
    handler: Box<dyn SpecialHandler<V>>,
}

/// Which tier answered a [`Registry::resolve`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedBy {
    /// A special handler, by the name it was added under.
    Special {
        /// Handler name.
        handler: String,
    },
    /// The global table.
    Global(OperatorId),
    /// The world's obfuscated table.
    PerWorld(OperatorId),
}

/// A successful resolution.
pub struct Resolution<V> {
    /// The operator to dispatch.
    pub operator: Arc<dyn Operator<V>>,
    /// Where it came from.
    pub resolved_by: ResolvedBy,
}

impl<V> fmt::Debug for Resolution<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("arity", &self.operator.arity())
            .field("resolved_by", &self.resolved_by)
            .finish_non_exhaustive()
    }
}

/// Result of a reverse lookup by operator id.
pub struct PatternEntry<V> {
    /// The canonical pattern: the prototype for per-world operators, the
    /// registered shape for global ones.
    pub prototype: Pattern,
    /// The registered operator.
    pub operator: Arc<dyn Operator<V>>,
    /// Whether the operator lives in the per-world tier.
    pub is_per_world: bool,
}

impl<V> fmt::Debug for PatternEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternEntry")
            .field("prototype", &self.prototype)
            .field("is_per_world", &self.is_per_world)
            .finish_non_exhaustive()
    }
}

// ── RegistryBuilder ─────────────────────────────────────────────

/// Mutable bootstrap phase of a [`Registry`].
pub struct RegistryBuilder<V> {
    config: RegistryConfig,
    store: Arc<dyn WorldStore>,
    operators: IndexMap<OperatorId, Registered<V>>,
    global: IndexMap<String, OperatorId>,
    handlers: Vec<NamedHandler<V>>,
}

impl<V: 'static> Default for RegistryBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> RegistryBuilder<V> {
    /// A builder with default configuration and no persistence.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// A builder with the given configuration and no persistence.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            store: Arc::new(NullStore),
            operators: IndexMap::new(),
            global: IndexMap::new(),
            handlers: Vec::new(),
        }
    }

    /// Persist per-world tables through `store`.
    pub fn with_store(mut self, store: Arc<dyn WorldStore>) -> Self {
        self.store = store;
        self
    }

    /// Register `operator` under `id`.
    ///
    /// Global entries resolve from any drawing with `pattern`'s signature.
    /// Per-world entries keep `pattern` as a prototype only; drawings
    /// resolve through each world's derived alternate instead.
    ///
    /// # Errors
    ///
    /// - [`RegisterError::DuplicateOperator`] if `id` is taken. The first
    ///   registration stays.
    /// - [`RegisterError::SignatureConflict`] if a global entry already
    ///   uses the signature.
    /// - [`RegisterError::MalformedPattern`] if `pattern` is not drawable.
    /// - [`RegisterError::EmptyPrototype`] if a per-world `pattern` has no
    ///   angles, since no other drawing could stand in for it.
    pub fn register(
        &mut self,
        pattern: Pattern,
        id: OperatorId,
        operator: Arc<dyn Operator<V>>,
        per_world: bool,
    ) -> Result<(), RegisterError> {
        if self.operators.contains_key(&id) {
            return Err(RegisterError::DuplicateOperator { id });
        }
        if !pattern.is_well_formed() {
            return Err(RegisterError::MalformedPattern {
                id,
                signature: pattern.signature(),
            });
        }

        let entry = if per_world {
            if pattern.is_empty() {
                return Err(RegisterError::EmptyPrototype { id });
            }
            RegistryEntry::PerWorld { prototype: pattern }
        } else {
            let signature = pattern.signature();
            if let Some(existing) = self.global.get(&signature) {
                return Err(RegisterError::SignatureConflict {
                    signature,
                    existing: existing.clone(),
                    id,
                });
            }
            self.global.insert(signature.clone(), id.clone());
            RegistryEntry::Global {
                signature,
                preferred_start: pattern.start_direction(),
            }
        };
        self.operators.insert(id, Registered { entry, operator });
        Ok(())
    }

    /// Add a special handler. Handlers are tried in the order added.
    pub fn add_special_handler(
        &mut self,
        name: impl Into<String>,
        handler: impl SpecialHandler<V> + 'static,
    ) {
        self.handlers.push(NamedHandler {
            name: name.into(),
            handler: Box::new(handler),
        });
    }

    /// Number of registered operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether no operators are registered.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Freeze the registry.
    pub fn build(self) -> Result<Registry<V>, ConfigError> {
        self.config.validate()?;
        let per_world = self
            .operators
            .values()
            .filter(|r| r.entry.is_per_world())
            .count();
        info!(
            operators = self.operators.len(),
            global = self.global.len(),
            per_world,
            handlers = self.handlers.len(),
            "registry frozen"
        );
        Ok(Registry {
            obfuscator: Obfuscator::new(self.config.obfuscator.clone()),
            config: self.config,
            store: self.store,
            operators: self.operators,
            global: self.global,
            handlers: self.handlers,
            worlds: WorldCache::default(),
        })
    }
}

// ── Registry ────────────────────────────────────────────────────

/// Frozen registry. Share it behind an `Arc`.
pub struct Registry<V> {
    config: RegistryConfig,
    obfuscator: Obfuscator,
    store: Arc<dyn WorldStore>,
    operators: IndexMap<OperatorId, Registered<V>>,
    global: IndexMap<String, OperatorId>,
    handlers: Vec<NamedHandler<V>>,
    worlds: WorldCache,
}

impl<V> Registry<V> {
    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of registered operators.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether no operators are registered.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// The entry registered under `id`.
    pub fn entry(&self, id: &OperatorId) -> Option<&RegistryEntry> {
        self.operators.get(id).map(|r| &r.entry)
    }

    /// Ids of per-world operators, in registration order.
    pub fn per_world_ids(&self) -> impl Iterator<Item = &OperatorId> {
        self.prototypes().map(|(id, _)| id)
    }

    fn prototypes(&self) -> impl Iterator<Item = (&OperatorId, &Pattern)> {
        self.operators.iter().filter_map(|(id, r)| match &r.entry {
            RegistryEntry::PerWorld { prototype } => Some((id, prototype)),
            RegistryEntry::Global { .. } => None,
        })
    }

    /// Resolve a drawn pattern.
    ///
    /// Special handlers are tried first, then the global table, then the
    /// per-world table for `world`, which is built on first use.
    pub fn resolve(&self, pattern: &Pattern, world: &WorldInfo) -> Result<Resolution<V>, ResolveError> {
        for h in &self.handlers {
            if let Some(operator) = h.handler.try_handle(pattern) {
                debug!(handler = %h.name, "resolved by special handler");
                return Ok(Resolution {
                    operator,
                    resolved_by: ResolvedBy::Special {
                        handler: h.name.clone(),
                    },
                });
            }
        }

        let signature = pattern.signature();
        if let Some(id) = self.global.get(&signature) {
            if let Some(r) = self.operators.get(id) {
                debug!(operator = %id, "resolved by global table");
                return Ok(Resolution {
                    operator: Arc::clone(&r.operator),
                    resolved_by: ResolvedBy::Global(id.clone()),
                });
            }
        }

        let table = self.per_world_table(world);
        if let Some(entry) = table.get(&signature) {
            if let Some(r) = self.operators.get(&entry.operator) {
                debug!(operator = %entry.operator, world = %world.id, "resolved by per-world table");
                return Ok(Resolution {
                    operator: Arc::clone(&r.operator),
                    resolved_by: ResolvedBy::PerWorld(entry.operator.clone()),
                });
            }
        }

        Err(ResolveError::UnrecognizedPattern {
            pattern: pattern.clone(),
        })
    }

    /// Reverse lookup: the canonical pattern and operator for `id`.
    pub fn lookup(&self, id: &OperatorId) -> Result<PatternEntry<V>, LookupError> {
        let r = self
            .operators
            .get(id)
            .ok_or_else(|| LookupError::UnknownOperator { id: id.clone() })?;
        Ok(PatternEntry {
            prototype: r.entry.canonical_pattern(),
            operator: Arc::clone(&r.operator),
            is_per_world: r.entry.is_per_world(),
        })
    }

    /// The obfuscated table for `world`, building it on first use.
    pub fn per_world_table(&self, world: &WorldInfo) -> Arc<PerWorldRecord> {
        self.worlds
            .get_or_build(world.id, || self.load_or_derive(world))
    }

    /// The drawable pattern that invokes `id` in `world`.
    pub fn per_world_pattern(&self, world: &WorldInfo, id: &OperatorId) -> Result<Pattern, LookupError> {
        match self.per_world_table(world).pattern_of(id) {
            Some(pattern) => Ok(pattern?),
            None => Err(LookupError::UnknownOperator { id: id.clone() }),
        }
    }

    /// Forget the cached table for `world`. The next access reloads or
    /// rederives it. Returns whether a table was cached.
    pub fn unload_world(&self, world: WorldId) -> bool {
        let removed = self.worlds.remove(world);
        if removed {
            debug!(world = %world, "per-world table unloaded");
        }
        removed
    }

    /// Number of worlds with a cached table.
    pub fn cached_worlds(&self) -> usize {
        self.worlds.len()
    }

    /// Derive a world's table from scratch, without touching the cache or
    /// the store.
    ///
    /// Prototypes are processed in registration order. Each alternate must
    /// avoid the global signatures, every alternate already assigned in
    /// this world, and every drawing a special handler would claim.
    /// Prototypes with no free alternate are left out.
    pub fn derive_world_table(&self, seed: u64) -> PerWorldRecord {
        let mut record = PerWorldRecord::new(seed);
        for (id, prototype) in self.prototypes() {
            let derived = self.obfuscator.derive_alternate(prototype, seed, |candidate: &Pattern| {
                let sig = candidate.signature();
                self.global.contains_key(&sig)
                    || record.contains_signature(&sig)
                    || self.claimed_by_handler(candidate)
            });
            match derived {
                Ok(alt) => {
                    record.insert(
                        alt.signature(),
                        PerWorldEntry {
                            operator: id.clone(),
                            start_dir: alt.start_direction(),
                        },
                    );
                }
                Err(e) => error!(operator = %id, seed, error = %e, "per-world pattern omitted"),
            }
        }
        record
    }

    fn load_or_derive(&self, world: &WorldInfo) -> PerWorldRecord {
        match self.store.load(world.id) {
            Ok(Some(record)) if record.seed() != world.seed => {
                warn!(
                    world = %world.id,
                    stored_seed = record.seed(),
                    seed = world.seed,
                    "stored per-world record has a different seed; regenerating"
                );
            }
            Ok(Some(record)) if !self.matches_prototypes(&record) => {
                warn!(world = %world.id, "stored per-world record is stale; regenerating");
            }
            Ok(Some(record)) => {
                debug!(world = %world.id, entries = record.len(), "per-world record loaded");
                return record;
            }
            Ok(None) => debug!(world = %world.id, "no stored per-world record"),
            Err(e) => {
                warn!(world = %world.id, error = %e, "stored per-world record is unreadable; regenerating");
            }
        }

        let record = self.derive_world_table(world.seed);
        if let Err(e) = self.store.save(world.id, &record) {
            warn!(world = %world.id, error = %e, "failed to save per-world record");
        }
        info!(world = %world.id, entries = record.len(), "per-world table built");
        record
    }

    /// Whether any special handler would answer `pattern` before the
    /// tables are consulted.
    fn claimed_by_handler(&self, pattern: &Pattern) -> bool {
        self.handlers.iter().any(|h| h.handler.try_handle(pattern).is_some())
    }

    /// A stored record is usable if every entry is drawable, reachable
    /// (not claimed by the global table or a special handler), and bound
    /// to a distinct per-world operator, and the operators it covers are
    /// the registered prototypes. Prototypes that derivation can never
    /// place for this seed may be missing.
    fn matches_prototypes(&self, record: &PerWorldRecord) -> bool {
        let reachable = record.iter().all(|(sig, e)| {
            !self.global.contains_key(sig)
                && self.entry(&e.operator).is_some_and(RegistryEntry::is_per_world)
                && Pattern::from_signature(sig, e.start_dir).is_ok_and(|p| !self.claimed_by_handler(&p))
        });
        if !reachable {
            return false;
        }

        let stored: HashSet<&OperatorId> = record.iter().map(|(_, e)| &e.operator).collect();
        if stored.len() != record.len() {
            return false;
        }
        if stored == self.per_world_ids().collect::<HashSet<_>>() {
            return true;
        }
        let derived = self.derive_world_table(record.seed());
        let placed: HashSet<&OperatorId> = derived.iter().map(|(_, e)| &e.operator).collect();
        stored == placed
    }
}
