//! Strongly-typed identifiers for operators, worlds, and actors.

use std::fmt;
use std::str::FromStr;

use crate::error::IdError;

/// Identifies a registered operator.
///
/// Operator ids are namespaced as `namespace:path`, so that add-on
/// packages can register operators without colliding with the base set.
/// The namespace may contain `[a-z0-9_.-]`; the path may additionally
/// contain `/`. The string form produced by [`Display`](fmt::Display) is
/// the form persisted in per-world records and parses back with
/// [`FromStr`].
///
/// # Examples
///
/// ```
/// use hexweave_core::OperatorId;
///
/// let id: OperatorId = "hexcasting:add".parse().unwrap();
/// assert_eq!(id.namespace(), "hexcasting");
/// assert_eq!(id.path(), "add");
/// assert_eq!(id.to_string(), "hexcasting:add");
///
/// // A bare path picks up the default namespace.
/// let bare: OperatorId = "get_caster".parse().unwrap();
/// assert_eq!(bare, OperatorId::new("hexcasting", "get_caster").unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorId {
    namespace: String,
    path: String,
}

impl OperatorId {
    /// Namespace assumed when a parsed id has no `namespace:` prefix.
    pub const DEFAULT_NAMESPACE: &'static str = "hexcasting";

    /// Build an id from its two halves, validating both.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, IdError> {
        let namespace = namespace.into();
        let path = path.into();
        validate_part(&namespace, &path, &namespace, false)?;
        validate_part(&namespace, &path, &path, true)?;
        Ok(Self { namespace, path })
    }

    /// The namespace half (before the `:`).
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The path half (after the `:`).
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn validate_part(namespace: &str, path: &str, part: &str, allow_slash: bool) -> Result<(), IdError> {
    let invalid = |reason| IdError::InvalidOperatorId {
        id: format!("{namespace}:{path}"),
        reason,
    };
    if part.is_empty() {
        return Err(invalid("empty namespace or path"));
    }
    let ok = part.chars().all(|c| {
        c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || matches!(c, '_' | '.' | '-')
            || (allow_slash && c == '/')
    });
    if !ok {
        return Err(invalid("illegal character"));
    }
    Ok(())
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for OperatorId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(Self::DEFAULT_NAMESPACE, s),
        }
    }
}

/// Identifies a world (save) whose per-world pattern table is cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldId(pub u64);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for WorldId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies the actor (player or automaton) drawing a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// The facts about a world that pattern resolution needs: its identity
/// (the per-world cache key) and its seed (the obfuscation input).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldInfo {
    /// Cache and storage key.
    pub id: WorldId,
    /// World generation seed.
    pub seed: u64,
}

impl WorldInfo {
    /// Describe a world by id and seed.
    pub fn new(id: impl Into<WorldId>, seed: u64) -> Self {
        Self {
            id: id.into(),
            seed,
        }
    }
}
