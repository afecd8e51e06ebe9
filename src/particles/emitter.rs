use std::sync::Arc;

use crate::{
    foundation::core::{FrameIndex, Vec2},
    particles::{
        EffectKind, ParticleEffect, ParticleState,
        ambient::{AmbientParams, AmbientParticle},
        cache::ParticleCache,
        confetti::{ConfettiParams, ConfettiParticle},
        shapes::{FloatingShape, FloatingShapeParams},
        sparkle::{SparkleParams, SparkleParticle},
    },
};

/// A particle effect invocation as it appears in a scene document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum EmitterSpec {
    /// Ambient dust.
    Ambient(AmbientParams),
    /// Confetti burst.
    Confetti(ConfettiParams),
    /// Sparkles.
    Sparkle(SparkleParams),
    /// Floating shapes.
    FloatingShapes(FloatingShapeParams),
}

impl EmitterSpec {
    /// Effect family of this invocation.
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Ambient(_) => EffectKind::Ambient,
            Self::Confetti(_) => EffectKind::Confetti,
            Self::Sparkle(_) => EffectKind::Sparkle,
            Self::FloatingShapes(_) => EffectKind::FloatingShapes,
        }
    }

    /// Generate (or fetch from `cache`) the particles for `seed`.
    pub fn generate(&self, seed: i64, cache: &ParticleCache) -> ParticleSet {
        match self {
            Self::Ambient(p) => ParticleSet::Ambient(cache.get_or_generate(p, seed)),
            Self::Confetti(p) => ParticleSet::Confetti(cache.get_or_generate(p, seed)),
            Self::Sparkle(p) => ParticleSet::Sparkle(cache.get_or_generate(p, seed)),
            Self::FloatingShapes(p) => {
                ParticleSet::FloatingShapes(cache.get_or_generate(p, seed))
            }
        }
    }
}

/// Generated particles for one emitter.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "effect", content = "particles", rename_all = "snake_case")]
pub enum ParticleSet {
    /// Ambient particles.
    Ambient(Arc<Vec<AmbientParticle>>),
    /// Confetti particles.
    Confetti(Arc<Vec<ConfettiParticle>>),
    /// Sparkle particles.
    Sparkle(Arc<Vec<SparkleParticle>>),
    /// Floating shapes.
    FloatingShapes(Arc<Vec<FloatingShape>>),
}

impl ParticleSet {
    /// Number of particles.
    pub fn len(&self) -> usize {
        match self {
            Self::Ambient(v) => v.len(),
            Self::Confetti(v) => v.len(),
            Self::Sparkle(v) => v.len(),
            Self::FloatingShapes(v) => v.len(),
        }
    }

    /// Return `true` when the set holds no particles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// States for every particle, in generation order. `spec` must be the spec the
    /// set was generated from; a mismatched pair yields no states.
    pub fn evaluate(
        &self,
        spec: &EmitterSpec,
        frame: FrameIndex,
        anchor: Vec2,
    ) -> Vec<ParticleState> {
        match (self, spec) {
            (Self::Ambient(v), EmitterSpec::Ambient(p)) => p.evaluate_all(v, frame, anchor),
            (Self::Confetti(v), EmitterSpec::Confetti(p)) => p.evaluate_all(v, frame, anchor),
            (Self::Sparkle(v), EmitterSpec::Sparkle(p)) => p.evaluate_all(v, frame, anchor),
            (Self::FloatingShapes(v), EmitterSpec::FloatingShapes(p)) => {
                p.evaluate_all(v, frame, anchor)
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/emitter.rs"]
mod tests;
