//! Deterministic decorative particles.
//!
//! Generation runs once per `(effect, seed, params)` and yields an immutable array;
//! animation is a pure function of one particle, a frame, and an anchor offset.

pub(crate) mod ambient;
pub(crate) mod cache;
pub(crate) mod confetti;
pub(crate) mod emitter;
pub(crate) mod shapes;
pub(crate) mod sparkle;

use crate::foundation::core::{FrameIndex, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Particle effect family.
pub enum EffectKind {
    /// Slowly rising background dust.
    Ambient,
    /// One-shot burst under gravity.
    Confetti,
    /// Short-lived twinkles.
    Sparkle,
    /// Large faint drifting shapes.
    FloatingShapes,
}

/// Where one particle is and how it looks at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ParticleState {
    /// Canvas x.
    pub x: f64,
    /// Canvas y.
    pub y: f64,
    /// Scale factor.
    pub scale: f64,
    /// Degrees.
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// `false` outside the particle's lifetime; the other fields are then zero.
    pub visible: bool,
}

impl ParticleState {
    /// State of a particle that is not on screen.
    pub fn hidden() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 0.0,
            rotation: 0.0,
            opacity: 0.0,
            visible: false,
        }
    }
}

/// A seeded particle generator paired with its closed-form evaluator.
pub trait ParticleEffect: serde::Serialize {
    /// Immutable per-particle record produced by [`ParticleEffect::generate`].
    type Particle: Clone + Send + Sync + serde::Serialize + 'static;

    /// Effect family, part of the cache key.
    const KIND: EffectKind;

    /// Generate every particle for `seed`. The same seed always yields the same array.
    fn generate(&self, seed: i64) -> Vec<Self::Particle>;

    /// State of one particle at `frame`, offset by `anchor`.
    fn evaluate(&self, particle: &Self::Particle, frame: FrameIndex, anchor: Vec2)
    -> ParticleState;

    /// [`ParticleEffect::evaluate`] for every particle, in order.
    fn evaluate_all(
        &self,
        particles: &[Self::Particle],
        frame: FrameIndex,
        anchor: Vec2,
    ) -> Vec<ParticleState> {
        particles
            .iter()
            .map(|p| self.evaluate(p, frame, anchor))
            .collect()
    }
}
