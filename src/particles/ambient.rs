use crate::{
    foundation::core::{FrameIndex, Rect, Vec2},
    particles::{EffectKind, ParticleEffect, ParticleState},
    random::seeded::SeededSequence,
};

const SCALE_PULSE_RATE: f64 = 0.03;
const SCALE_PULSE_DEPTH: f64 = 0.2;

/// Slowly rising dust that loops seamlessly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AmbientParams {
    /// Spawn region.
    pub region: Rect,
    /// Number of particles.
    pub count: usize,
    /// Multiplier applied to each particle's own speed, in px/frame.
    #[serde(default = "default_vertical_speed")]
    pub vertical_speed: f64,
    /// Wrap distance; defaults to the region height.
    #[serde(default)]
    pub loop_height: Option<f64>,
    /// Horizontal sway frequency, radians per frame per unit speed.
    #[serde(default = "default_sway_rate")]
    pub sway_rate: f64,
}

fn default_vertical_speed() -> f64 {
    1.0
}

fn default_sway_rate() -> f64 {
    0.02
}

impl AmbientParams {
    /// `count` particles in `region` with default motion.
    pub fn new(region: Rect, count: usize) -> Self {
        Self {
            region,
            count,
            vertical_speed: default_vertical_speed(),
            loop_height: None,
            sway_rate: default_sway_rate(),
        }
    }

    fn loop_height(&self) -> f64 {
        self.loop_height.unwrap_or_else(|| self.region.height())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Generated ambient particle.
pub struct AmbientParticle {
    /// Spawn x.
    pub x: f64,
    /// Spawn y.
    pub y: f64,
    /// Diameter in `[2, 6]` px.
    pub size: f64,
    /// Rise speed in `[0.3, 0.8]`.
    pub speed: f64,
    /// Sway phase in `[0, 2π)`.
    pub phase: f64,
    /// Sway amplitude in `[20, 50]` px.
    pub amplitude: f64,
    /// Opacity in `[0.1, 0.3]`.
    pub opacity: f64,
}

impl ParticleEffect for AmbientParams {
    type Particle = AmbientParticle;

    const KIND: EffectKind = EffectKind::Ambient;

    fn generate(&self, seed: i64) -> Vec<AmbientParticle> {
        let seq = SeededSequence::new(seed);
        (0..self.count as u64)
            .map(|i| {
                let r = seq.fork(i);
                AmbientParticle {
                    x: r.range(0, self.region.x0, self.region.x1),
                    y: r.range(1, self.region.y0, self.region.y1),
                    size: r.range(2, 2.0, 6.0),
                    speed: r.range(3, 0.3, 0.8),
                    phase: r.range(4, 0.0, std::f64::consts::TAU),
                    amplitude: r.range(5, 20.0, 50.0),
                    opacity: r.range(6, 0.1, 0.3),
                }
            })
            .collect()
    }

    fn evaluate(&self, p: &AmbientParticle, frame: FrameIndex, anchor: Vec2) -> ParticleState {
        let f = frame.0 as f64;
        let loop_h = self.loop_height();
        let rise = f * p.speed * self.vertical_speed;
        let y = if loop_h > 0.0 {
            self.region.y0 + (p.y - self.region.y0 - rise).rem_euclid(loop_h)
        } else {
            p.y
        };
        let x = p.x + (f * self.sway_rate * p.speed + p.phase).sin() * p.amplitude;
        ParticleState {
            x: x + anchor.x,
            y: y + anchor.y,
            scale: 1.0 + SCALE_PULSE_DEPTH * (f * SCALE_PULSE_RATE + p.phase).sin(),
            rotation: 0.0,
            opacity: p.opacity,
            visible: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/ambient.rs"]
mod tests;
