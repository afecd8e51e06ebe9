//! Builders for preset invocations with their customary easing.

use crate::animation::{
    ease::Ease,
    preset::{AnimationConfig, Preset},
    spring::SpringConfig,
};
use crate::foundation::core::Vec2;

/// [`Preset::FadeUpIn`] over `duration_s`, eased `power3.out`.
pub fn fade_up_in(start_s: f64, duration_s: f64, distance: f64) -> AnimationConfig {
    AnimationConfig {
        start_s,
        duration_s,
        ease: Ease::OutCubic,
        preset: Preset::FadeUpIn { distance },
    }
}

/// [`Preset::PopInSpring`]; opacity reaches 1 after `fade_s`.
pub fn pop_in_spring(start_s: f64, fade_s: f64, spring: SpringConfig) -> AnimationConfig {
    AnimationConfig {
        start_s,
        duration_s: fade_s,
        ease: Ease::Linear,
        preset: Preset::PopInSpring { spring },
    }
}

/// [`Preset::PulseEmphasis`], eased `sine.in_out`.
pub fn pulse_emphasis(start_s: f64, duration_s: f64, delta: f64) -> AnimationConfig {
    AnimationConfig {
        start_s,
        duration_s,
        ease: Ease::InOutSine,
        preset: Preset::PulseEmphasis { delta },
    }
}

/// [`Preset::ShrinkToCorner`], eased `power3.in_out`.
pub fn shrink_to_corner(
    start_s: f64,
    duration_s: f64,
    target_scale: f64,
    target: Vec2,
) -> AnimationConfig {
    AnimationConfig {
        start_s,
        duration_s,
        ease: Ease::InOutCubic,
        preset: Preset::ShrinkToCorner {
            target_scale,
            target,
        },
    }
}

/// [`Preset::Breathe`] starting at `start_s`.
pub fn breathe(start_s: f64, amplitude: f64, period_s: f64) -> AnimationConfig {
    AnimationConfig {
        start_s,
        duration_s: 0.0,
        ease: Ease::Linear,
        preset: Preset::Breathe {
            amplitude,
            period_s,
        },
    }
}

/// Copy of `config` with another curve.
pub fn with_ease(config: AnimationConfig, ease: Ease) -> AnimationConfig {
    AnimationConfig { ease, ..config }
}

/// Copy of `config` starting `by_s` seconds later.
pub fn delay(config: AnimationConfig, by_s: f64) -> AnimationConfig {
    AnimationConfig {
        start_s: config.start_s + by_s,
        ..config
    }
}

/// `count` copies of `config`, the i-th starting `i * step_s` later.
pub fn stagger(config: AnimationConfig, count: usize, step_s: f64) -> Vec<AnimationConfig> {
    (0..count)
        .map(|i| delay(config, step_s * i as f64))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
