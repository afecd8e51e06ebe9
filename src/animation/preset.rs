//! Named animation contracts evaluated as pure functions of `(frame, fps, config)`.

use crate::{
    animation::{
        ease::Ease,
        interp::{Lerp, window_progress},
        spring::SpringConfig,
    },
    foundation::core::{Fps, FrameIndex, Vec2},
    foundation::error::{BeatframeError, BeatframeResult},
    foundation::math::clamp01,
};

/// Visual state of one element at one frame. Absent fields are left untouched by the
/// preset that produced the state.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationState {
    /// Opacity in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Horizontal offset in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    /// Vertical offset in pixels; positive is down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    /// Uniform scale factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl AnimationState {
    /// Layers `other` on top of `self`: opacity and scale multiply, translation and
    /// rotation add. A field stays absent only when both sides lack it.
    pub fn compose(self, other: Self) -> Self {
        fn merge(a: Option<f64>, b: Option<f64>, op: fn(f64, f64) -> f64) -> Option<f64> {
            match (a, b) {
                (Some(a), Some(b)) => Some(op(a, b)),
                (a, None) => a,
                (None, b) => b,
            }
        }
        let mul = |a: f64, b: f64| a * b;
        let add = |a: f64, b: f64| a + b;
        Self {
            opacity: merge(self.opacity, other.opacity, mul).map(clamp01),
            translate_x: merge(self.translate_x, other.translate_x, add),
            translate_y: merge(self.translate_y, other.translate_y, add),
            scale: merge(self.scale, other.scale, mul),
            rotation: merge(self.rotation, other.rotation, add),
        }
    }

    /// Return `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "preset", rename_all = "snake_case")]
/// Built-in animation contract.
pub enum Preset {
    /// Fade in while rising `distance` px into place.
    FadeUpIn {
        /// Starting offset below the resting position, in pixels.
        distance: f64,
    },
    /// Spring-driven scale from 0 to 1; opacity ramps over the window.
    PopInSpring {
        /// Spring parameters.
        #[serde(default)]
        spring: SpringConfig,
    },
    /// Scale out to `1 + delta` and back within the window.
    PulseEmphasis {
        /// Peak scale increase.
        delta: f64,
    },
    /// Scale toward `target_scale` while moving by `target`.
    ShrinkToCorner {
        /// Final scale.
        target_scale: f64,
        /// Final translation in pixels.
        target: Vec2,
    },
    /// Endless scale oscillation from the start time on. Ignores the window length.
    Breathe {
        /// Peak scale increase.
        amplitude: f64,
        /// Seconds per cycle.
        period_s: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One preset invocation on a time window.
pub struct AnimationConfig {
    /// Window start in seconds from scene start.
    pub start_s: f64,
    /// Window length in seconds.
    pub duration_s: f64,
    /// Curve applied to window progress.
    #[serde(default)]
    pub ease: Ease,
    /// Preset and its parameters.
    #[serde(flatten)]
    pub preset: Preset,
}

impl AnimationConfig {
    /// Validate timing and preset parameters.
    pub fn validate(&self) -> BeatframeResult<()> {
        if !self.start_s.is_finite() {
            return Err(BeatframeError::invalid_config(
                "animation start must be finite",
            ));
        }
        if !self.duration_s.is_finite() || self.duration_s < 0.0 {
            return Err(BeatframeError::invalid_config(format!(
                "animation duration must be >= 0, got {}",
                self.duration_s
            )));
        }
        match self.preset {
            Preset::FadeUpIn { distance } => finite("fade_up_in.distance", distance),
            Preset::PopInSpring { spring } => spring.validate(),
            Preset::PulseEmphasis { delta } => finite("pulse_emphasis.delta", delta),
            Preset::ShrinkToCorner {
                target_scale,
                target,
            } => {
                finite("shrink_to_corner.target.x", target.x)?;
                finite("shrink_to_corner.target.y", target.y)?;
                if !(target_scale.is_finite() && target_scale >= 0.0) {
                    return Err(BeatframeError::invalid_config(
                        "shrink_to_corner.target_scale must be >= 0",
                    ));
                }
                Ok(())
            }
            Preset::Breathe {
                amplitude,
                period_s,
            } => {
                finite("breathe.amplitude", amplitude)?;
                if !(period_s.is_finite() && period_s > 0.0) {
                    return Err(BeatframeError::invalid_config(
                        "breathe.period_s must be > 0",
                    ));
                }
                Ok(())
            }
        }
    }
}

fn finite(field: &str, v: f64) -> BeatframeResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(BeatframeError::invalid_config(format!(
            "{field} must be finite"
        )))
    }
}

/// Samples `config` at `frame`. Assumes `config` passed [`AnimationConfig::validate`].
pub fn evaluate(frame: FrameIndex, fps: Fps, config: &AnimationConfig) -> AnimationState {
    let f = frame.0 as f64;
    let start = fps.secs_to_frames_f64(config.start_s);
    let dur = fps.secs_to_frames_f64(config.duration_s.max(0.0));
    let p = window_progress(f, start, dur);
    let ease = config.ease;

    match config.preset {
        Preset::FadeUpIn { distance } => {
            let e = ease.apply(p);
            AnimationState {
                opacity: Some(clamp01(e)),
                translate_y: Some(distance * (1.0 - e)),
                ..AnimationState::default()
            }
        }
        Preset::PopInSpring { spring } => {
            if f < start {
                return AnimationState {
                    opacity: Some(0.0),
                    scale: Some(0.0),
                    ..AnimationState::default()
                };
            }
            let elapsed = fps.frames_to_secs(f - start);
            AnimationState {
                opacity: Some(clamp01(ease.apply(p))),
                scale: Some(spring.value(elapsed)),
                ..AnimationState::default()
            }
        }
        Preset::PulseEmphasis { delta } => {
            let scale = if dur <= 0.0 || f < start || f > start + dur {
                1.0
            } else {
                let bump = if p <= 0.5 {
                    ease.apply(p * 2.0)
                } else {
                    ease.apply((1.0 - p) * 2.0)
                };
                1.0 + delta * bump
            };
            AnimationState {
                scale: Some(scale),
                ..AnimationState::default()
            }
        }
        Preset::ShrinkToCorner {
            target_scale,
            target,
        } => {
            let e = ease.apply(p);
            let t = <Vec2 as Lerp>::lerp(&Vec2::ZERO, &target, e);
            AnimationState {
                translate_x: Some(t.x),
                translate_y: Some(t.y),
                scale: Some(<f64 as Lerp>::lerp(&1.0, &target_scale, e)),
                ..AnimationState::default()
            }
        }
        Preset::Breathe {
            amplitude,
            period_s,
        } => {
            let scale = if f < start {
                1.0
            } else {
                let phase = fps.frames_to_secs(f - start) / period_s;
                1.0 + amplitude * (1.0 - (std::f64::consts::TAU * phase).cos()) / 2.0
            };
            AnimationState {
                scale: Some(scale),
                ..AnimationState::default()
            }
        }
    }
}

/// Evaluates every config and layers the results in order.
pub fn evaluate_stack(
    frame: FrameIndex,
    fps: Fps,
    configs: &[AnimationConfig],
) -> AnimationState {
    configs
        .iter()
        .map(|c| evaluate(frame, fps, c))
        .fold(AnimationState::default(), AnimationState::compose)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/preset.rs"]
mod tests;
