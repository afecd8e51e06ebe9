use crate::{
    foundation::core::{FrameIndex, Rect, Vec2},
    particles::{EffectKind, ParticleEffect, ParticleState},
    random::seeded::SeededSequence,
};

const MAX_DELAY: f64 = 30.0;
const MIN_DURATION: f64 = 20.0;
const MAX_DURATION: f64 = 40.0;
// Fade-in is shorter than fade-out.
const FADE_IN: f64 = 0.2;
const FADE_OUT: f64 = 0.4;

/// Twinkles that burst and fade once each, staggered by a seeded delay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SparkleParams {
    /// Spawn region.
    pub region: Rect,
    /// Number of sparkles.
    pub count: usize,
    /// Scene-local frame the delays count from.
    #[serde(default)]
    pub start_frame: u64,
}

impl SparkleParams {
    /// `count` sparkles in `region`, starting at frame 0.
    pub fn new(region: Rect, count: usize) -> Self {
        Self {
            region,
            count,
            start_frame: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Generated sparkle.
pub struct SparkleParticle {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Peak size in px.
    pub size: f64,
    /// Frames after `start_frame`.
    pub delay: f64,
    /// Frames.
    pub duration: f64,
    /// Degrees/frame.
    pub rotation_speed: f64,
}

impl ParticleEffect for SparkleParams {
    type Particle = SparkleParticle;

    const KIND: EffectKind = EffectKind::Sparkle;

    fn generate(&self, seed: i64) -> Vec<SparkleParticle> {
        let seq = SeededSequence::new(seed);
        (0..self.count as u64)
            .map(|i| {
                let r = seq.fork(i);
                SparkleParticle {
                    x: r.range(0, self.region.x0, self.region.x1),
                    y: r.range(1, self.region.y0, self.region.y1),
                    size: r.range(2, 8.0, 20.0),
                    delay: (r.at(3) * MAX_DELAY).floor(),
                    duration: r.range(4, MIN_DURATION, MAX_DURATION).floor(),
                    rotation_speed: r.range(5, 2.0, 6.0),
                }
            })
            .collect()
    }

    fn evaluate(&self, p: &SparkleParticle, frame: FrameIndex, anchor: Vec2) -> ParticleState {
        let local = frame.0 as f64 - self.start_frame as f64 - p.delay;
        if local < 0.0 || local > p.duration {
            return ParticleState::hidden();
        }
        let t = local / p.duration;
        let scale = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
        let opacity = if t < FADE_IN {
            t / FADE_IN
        } else if t > 1.0 - FADE_OUT {
            (1.0 - t) / FADE_OUT
        } else {
            1.0
        };
        ParticleState {
            x: p.x + anchor.x,
            y: p.y + anchor.y,
            scale,
            rotation: local * p.rotation_speed,
            opacity,
            visible: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/sparkle.rs"]
mod tests;
