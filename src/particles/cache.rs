use std::{
    any::Any,
    collections::HashMap,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use crate::particles::{EffectKind, ParticleEffect};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: EffectKind,
    seed: i64,
    // serde_json writes f64 in shortest round-trip form, so equal params give equal text.
    params: String,
}

type Entry = Arc<dyn Any + Send + Sync>;

/// Memoized particle arrays, shared read-only across frames and threads.
///
/// Purely an optimization: a miss regenerates, and regeneration always yields the
/// same array.
#[derive(Default)]
pub struct ParticleCache {
    entries: Mutex<HashMap<CacheKey, Entry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for ParticleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleCache")
            .field("len", &self.len())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}

impl ParticleCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Particles of `effect` for `seed`, generated on first use.
    pub fn get_or_generate<E>(&self, effect: &E, seed: i64) -> Arc<Vec<E::Particle>>
    where
        E: ParticleEffect,
    {
        let params = match serde_json::to_string(effect) {
            Ok(p) => p,
            Err(err) => {
                tracing::debug!(%err, "particle params not hashable; generating uncached");
                return Arc::new(effect.generate(seed));
            }
        };
        let key = CacheKey {
            kind: E::KIND,
            seed,
            params,
        };

        let cached = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(entry) = cached {
            if let Ok(particles) = entry.downcast::<Vec<E::Particle>>() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(kind = ?E::KIND, seed, "particle cache hit");
                return particles;
            }
        }

        // Generate outside the lock; a racing thread produces the same array.
        self.misses.fetch_add(1, Ordering::Relaxed);
        let particles = Arc::new(effect.generate(seed));
        let entry: Entry = particles.clone();
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
        particles
    }

    /// Number of cached arrays.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Return `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached array. Arrays already handed out stay valid.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that generated.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/cache.rs"]
mod tests;
