//! Per-world alternates for secret prototypes.
//!
//! Each attempt seeds a ChaCha8 stream from the world seed, the prototype
//! shape, and the attempt number, then walks the hex grid depth-first
//! with shuffled candidate directions until it has drawn as many angles as
//! the prototype. Walks that dead-end backtrack; walks that exceed the step
//! budget, or land on a taken signature, move on to the next attempt.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexweave_space::{Direction, Pattern, PatternTracer};

use crate::config::ObfuscatorConfig;
use crate::error::ObfuscationError;
use crate::hash::derivation_seed;

/// Derives world-specific stand-ins for per-world prototypes.
#[derive(Clone, Debug, Default)]
pub struct Obfuscator {
    config: ObfuscatorConfig,
}

impl Obfuscator {
    /// Create an obfuscator with the given search bounds.
    pub fn new(config: ObfuscatorConfig) -> Self {
        Self { config }
    }

    /// The search bounds in use.
    pub fn config(&self) -> &ObfuscatorConfig {
        &self.config
    }

    /// Derive a drawable pattern with the same angle count as `prototype`.
    ///
    /// The result depends only on `prototype`, `seed`, the configuration,
    /// and the answers given by `is_taken`. Its signature never equals the
    /// prototype's, and `is_taken` returned `false` for it.
    pub fn derive_alternate(
        &self,
        prototype: &Pattern,
        seed: u64,
        is_taken: impl Fn(&Pattern) -> bool,
    ) -> Result<Pattern, ObfuscationError> {
        let own = prototype.signature();
        for attempt in 0..=self.config.max_collision_retries {
            let mut rng = ChaCha8Rng::seed_from_u64(derivation_seed(seed, prototype, attempt));
            let Some(candidate) = self.walk(prototype.len(), &mut rng) else {
                continue;
            };
            if candidate.signature() != own && !is_taken(&candidate) {
                return Ok(candidate);
            }
        }
        Err(ObfuscationError::Exhausted {
            signature: own,
            attempts: self.config.max_collision_retries.saturating_add(1),
        })
    }

    /// One randomized depth-first walk of `len` angles.
    ///
    /// `frames[i]` holds the untried directions for the stroke after
    /// angle `i`, so `frames.len() == tracer.len() + 1` between steps.
    fn walk(&self, len: usize, rng: &mut ChaCha8Rng) -> Option<Pattern> {
        let start = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        let mut tracer = PatternTracer::new(start);
        let mut frames = vec![shuffled_directions(rng)];
        let mut steps = 0u32;

        while tracer.len() < len {
            let frame = frames.last_mut()?;
            match frame.pop() {
                Some(next) => {
                    steps += 1;
                    if steps > self.config.max_walk_steps {
                        return None;
                    }
                    if tracer.try_append(next) {
                        frames.push(shuffled_directions(rng));
                    }
                }
                None => {
                    frames.pop();
                    tracer.pop()?;
                }
            }
        }
        Some(tracer.into_pattern())
    }
}

fn shuffled_directions(rng: &mut ChaCha8Rng) -> Vec<Direction> {
    let mut dirs = Direction::ALL.to_vec();
    dirs.shuffle(rng);
    dirs
}
