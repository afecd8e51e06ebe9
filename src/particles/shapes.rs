use smallvec::SmallVec;

use crate::{
    foundation::core::{FrameIndex, Rect, Vec2},
    particles::{EffectKind, ParticleEffect, ParticleState},
    random::seeded::SeededSequence,
};

const BLOB_POINTS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Outline of a floating shape.
pub enum ShapeKind {
    /// Circle of diameter `size`.
    Circle,
    /// Irregular closed outline from `blob_radii`.
    Blob,
    /// Stroke of length `size`.
    Line,
}

/// Large, faint background shapes drifting in place.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FloatingShapeParams {
    /// Spawn region.
    pub region: Rect,
    /// Number of shapes.
    pub count: usize,
}

impl FloatingShapeParams {
    /// `count` shapes in `region`.
    pub fn new(region: Rect, count: usize) -> Self {
        Self { region, count }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Generated floating shape.
pub struct FloatingShape {
    /// Outline kind.
    pub kind: ShapeKind,
    /// Rest x.
    pub x: f64,
    /// Rest y.
    pub y: f64,
    /// Size in px.
    pub size: f64,
    /// Drift frequency, radians per frame.
    pub drift_speed: f64,
    /// Drift distance in px.
    pub drift_amplitude: f64,
    /// Drift phase in `[0, 2π)`.
    pub phase: f64,
    /// Degrees.
    pub rotation: f64,
    /// Degrees/frame.
    pub rotation_speed: f64,
    /// Opacity in `[0.03, 0.08]`.
    pub opacity: f64,
    /// Outline radii as multiples of `size / 2`, evenly spaced in angle. Blobs only.
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub blob_radii: SmallVec<[f64; BLOB_POINTS]>,
}

impl ParticleEffect for FloatingShapeParams {
    type Particle = FloatingShape;

    const KIND: EffectKind = EffectKind::FloatingShapes;

    fn generate(&self, seed: i64) -> Vec<FloatingShape> {
        let seq = SeededSequence::new(seed);
        (0..self.count as u64)
            .map(|i| {
                let r = seq.fork(i);
                let pick = r.at(0);
                let kind = if pick < 0.4 {
                    ShapeKind::Circle
                } else if pick < 0.75 {
                    ShapeKind::Blob
                } else {
                    ShapeKind::Line
                };
                let blob_radii = match kind {
                    ShapeKind::Blob => (0..BLOB_POINTS as u64)
                        .map(|k| r.range(10 + k, 0.8, 1.2))
                        .collect(),
                    _ => SmallVec::new(),
                };
                FloatingShape {
                    kind,
                    x: r.range(1, self.region.x0, self.region.x1),
                    y: r.range(2, self.region.y0, self.region.y1),
                    size: r.range(3, 40.0, 160.0),
                    drift_speed: r.range(4, 0.005, 0.015),
                    drift_amplitude: r.range(5, 10.0, 40.0),
                    phase: r.range(6, 0.0, std::f64::consts::TAU),
                    rotation: r.range(7, 0.0, 360.0),
                    rotation_speed: r.range(8, -0.2, 0.2),
                    opacity: r.range(9, 0.03, 0.08),
                    blob_radii,
                }
            })
            .collect()
    }

    fn evaluate(&self, s: &FloatingShape, frame: FrameIndex, anchor: Vec2) -> ParticleState {
        let f = frame.0 as f64;
        let w = f * s.drift_speed + s.phase;
        ParticleState {
            x: s.x + w.sin() * s.drift_amplitude + anchor.x,
            y: s.y + (w * 0.8).cos() * s.drift_amplitude * 0.6 + anchor.y,
            scale: 1.0 + 0.08 * (w * 2.0).sin(),
            rotation: s.rotation + f * s.rotation_speed,
            opacity: s.opacity,
            visible: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/shapes.rs"]
mod tests;
