use crate::{animation::ease::Ease, foundation::core::Vec2, foundation::math};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value at `t` between `a` (`t = 0`) and `b` (`t = 1`).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        math::lerp(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(math::lerp(a.x, b.x, t), math::lerp(a.y, b.y, t))
    }
}

/// What happens to input values outside `input_range`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the output range ends.
    #[default]
    Clamp,
    /// Keep following the line through the range ends. Easing is not applied outside.
    Extend,
}

/// Maps `value` from `input_range` onto `output_range` through `ease`.
///
/// A degenerate input range acts as a step at `input_range[0]`.
pub fn interpolate(
    value: f64,
    input_range: [f64; 2],
    output_range: [f64; 2],
    ease: Ease,
    extrapolate: Extrapolate,
) -> f64 {
    let [i0, i1] = input_range;
    let [o0, o1] = output_range;
    let span = i1 - i0;
    if span == 0.0 {
        return if value < i0 { o0 } else { o1 };
    }
    let t = (value - i0) / span;
    let te = match extrapolate {
        Extrapolate::Clamp => ease.apply(t),
        Extrapolate::Extend if (0.0..=1.0).contains(&t) => ease.apply(t),
        Extrapolate::Extend => t,
    };
    math::lerp(o0, o1, te)
}

/// Linear progress of `frame` through `[start, start + duration]`, clamped to `[0, 1]`.
///
/// Zero-length windows jump from 0 to 1 at `start`.
pub fn window_progress(frame: f64, start: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if frame < start { 0.0 } else { 1.0 };
    }
    ((frame - start) / duration).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
