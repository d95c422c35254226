//! Registry configuration.

use crate::error::ConfigError;

// ── ObfuscatorConfig ────────────────────────────────────────────

/// Search bounds for per-world pattern derivation.
///
/// The worst case per prototype is
/// `max_walk_steps * (max_collision_retries + 1)` candidate strokes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObfuscatorConfig {
    /// Candidate strokes tried by one randomized walk before it gives up.
    /// Default: 4096.
    pub max_walk_steps: u32,
    /// Extra attempts after a walk fails or lands on a taken signature.
    /// Default: 64.
    pub max_collision_retries: u32,
}

impl Default for ObfuscatorConfig {
    fn default() -> Self {
        Self {
            max_walk_steps: 4096,
            max_collision_retries: 64,
        }
    }
}

impl ObfuscatorConfig {
    /// Check the configuration for values that make derivation impossible.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_walk_steps == 0 {
            return Err(ConfigError::ZeroWalkBudget);
        }
        Ok(())
    }
}

// ── RegistryConfig ──────────────────────────────────────────────

/// Top-level configuration handed to
/// [`RegistryBuilder::with_config`](crate::RegistryBuilder::with_config).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Per-world derivation bounds.
    pub obfuscator: ObfuscatorConfig,
}

impl RegistryConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.obfuscator.validate()
    }
}
