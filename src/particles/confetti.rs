use crate::{
    foundation::core::{FrameIndex, Point, Vec2},
    particles::{EffectKind, ParticleEffect, ParticleState},
    random::seeded::SeededSequence,
};

/// Share of the lifetime spent fading out at the end.
const FADE_TAIL: f64 = 0.3;

/// One-shot burst from `origin`, pulled down by per-particle gravity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConfettiParams {
    /// Launch point.
    pub origin: Point,
    /// Number of pieces.
    pub count: usize,
    /// Scene-local launch frame.
    #[serde(default)]
    pub start_frame: u64,
    /// Lifetime in frames.
    #[serde(default = "default_duration")]
    pub duration: u64,
    /// Center of the spread, radians; 0 points right, positive y is down.
    #[serde(default)]
    pub base_angle: f64,
    /// Total angular spread, radians.
    #[serde(default = "default_spread")]
    pub spread: f64,
    /// Max random deviation from the even spread, radians.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
    /// Number of palette colors to pick from.
    #[serde(default = "default_palette_size")]
    pub palette_size: u32,
}

fn default_duration() -> u64 {
    90
}

fn default_spread() -> f64 {
    std::f64::consts::TAU
}

fn default_jitter() -> f64 {
    0.5
}

fn default_palette_size() -> u32 {
    6
}

impl ConfettiParams {
    /// `count` pieces launched from `origin` at frame 0.
    pub fn new(origin: Point, count: usize) -> Self {
        Self {
            origin,
            count,
            start_frame: 0,
            duration: default_duration(),
            base_angle: 0.0,
            spread: default_spread(),
            jitter: default_jitter(),
            palette_size: default_palette_size(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Generated confetti piece.
pub struct ConfettiParticle {
    /// Launch x.
    pub x0: f64,
    /// Launch y.
    pub y0: f64,
    /// Radians.
    pub angle: f64,
    /// px/frame.
    pub velocity: f64,
    /// Degrees.
    pub rotation: f64,
    /// Degrees/frame.
    pub rotation_speed: f64,
    /// px/frame².
    pub gravity: f64,
    /// Palette slot in `[0, palette_size)`.
    pub color_index: u32,
    /// Edge length in px.
    pub size: f64,
}

impl ConfettiParticle {
    /// Position `t` frames after launch: `x0 + vx·t`, `y0 + vy·t + g·t²/2`.
    pub fn position_at(&self, t: f64) -> Point {
        let vx = self.velocity * self.angle.cos();
        let vy = self.velocity * self.angle.sin();
        Point::new(
            self.x0 + vx * t,
            self.y0 + vy * t + self.gravity * t * t / 2.0,
        )
    }
}

impl ParticleEffect for ConfettiParams {
    type Particle = ConfettiParticle;

    const KIND: EffectKind = EffectKind::Confetti;

    fn generate(&self, seed: i64) -> Vec<ConfettiParticle> {
        let seq = SeededSequence::new(seed);
        let n = self.count.max(1) as f64;
        (0..self.count as u64)
            .map(|i| {
                let r = seq.fork(i);
                let even = ((i as f64 + 0.5) / n - 0.5) * self.spread;
                ConfettiParticle {
                    x0: self.origin.x,
                    y0: self.origin.y,
                    angle: self.base_angle + even + (r.at(0) - 0.5) * self.jitter,
                    velocity: r.range(1, 3.0, 7.0),
                    rotation: r.range(2, 0.0, 360.0),
                    rotation_speed: r.range(3, -10.0, 10.0),
                    gravity: r.range(4, 0.08, 0.12),
                    color_index: (r.at(5) * f64::from(self.palette_size.max(1))) as u32,
                    size: r.range(6, 6.0, 12.0),
                }
            })
            .collect()
    }

    fn evaluate(&self, p: &ConfettiParticle, frame: FrameIndex, anchor: Vec2) -> ParticleState {
        let Some(t) = frame.0.checked_sub(self.start_frame) else {
            return ParticleState::hidden();
        };
        if t > self.duration {
            return ParticleState::hidden();
        }
        let t = t as f64;
        let life = if self.duration == 0 {
            1.0
        } else {
            t / self.duration as f64
        };
        let opacity = if life > 1.0 - FADE_TAIL {
            (1.0 - life) / FADE_TAIL
        } else {
            1.0
        };
        let pos = p.position_at(t);
        ParticleState {
            x: pos.x + anchor.x,
            y: pos.y + anchor.y,
            scale: 1.0,
            rotation: p.rotation + p.rotation_speed * t,
            opacity,
            visible: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/confetti.rs"]
mod tests;
