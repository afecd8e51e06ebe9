//! Easing curves mapping linear progress to eased progress.

use std::str::FromStr;

use crate::foundation::error::{BeatframeError, BeatframeResult};

/// Easing curve. Parsed from names such as `"power2.out"` or `"ease_in_out_sine"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// Smoothstep, `3t^2 - 2t^3`.
    Smooth,
    /// Quadratic ease-in (`power2.in`).
    InQuad,
    /// Quadratic ease-out (`power2.out`).
    OutQuad,
    /// Quadratic ease-in-out (`power2.in_out`).
    InOutQuad,
    /// Cubic ease-in (`power3.in`).
    InCubic,
    /// Cubic ease-out (`power3.out`).
    OutCubic,
    /// Cubic ease-in-out (`power3.in_out`).
    InOutCubic,
    /// Sine ease-in.
    InSine,
    /// Sine ease-out.
    OutSine,
    /// Sine ease-in-out.
    InOutSine,
    /// Overshoots past 1.0 before settling.
    OutBack,
}

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

impl Ease {
    /// Every curve, in declaration order.
    pub const ALL: [Ease; 12] = [
        Ease::Linear,
        Ease::Smooth,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
        Ease::OutBack,
    ];

    /// Eased value for progress `t`; `t` is clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => t * t * (3.0 - 2.0 * t),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InSine => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - (t * std::f64::consts::FRAC_PI_2).cos()
                }
            }
            Self::OutSine => {
                if t == 1.0 {
                    1.0
                } else {
                    (t * std::f64::consts::FRAC_PI_2).sin()
                }
            }
            Self::InOutSine => {
                if t == 1.0 {
                    1.0
                } else {
                    -((std::f64::consts::PI * t).cos() - 1.0) / 2.0
                }
            }
            Self::OutBack => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    let u = t - 1.0;
                    1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
                }
            }
        }
    }

    /// Canonical name, the form written back out when serializing.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Smooth => "smooth",
            Self::InQuad => "power2.in",
            Self::OutQuad => "power2.out",
            Self::InOutQuad => "power2.in_out",
            Self::InCubic => "power3.in",
            Self::OutCubic => "power3.out",
            Self::InOutCubic => "power3.in_out",
            Self::InSine => "sine.in",
            Self::OutSine => "sine.out",
            Self::InOutSine => "sine.in_out",
            Self::OutBack => "back.out",
        }
    }

    /// Parse a curve name. Case, `_`, `-`, `.` and spaces are ignored.
    pub fn parse(name: &str) -> BeatframeResult<Self> {
        let key: String = name
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | '.' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let ease = match key.as_str() {
            "linear" | "none" => Self::Linear,
            "smooth" | "smoothstep" | "ease" => Self::Smooth,
            "power2in" | "quadin" | "easeinquad" => Self::InQuad,
            "power2out" | "quadout" | "easeoutquad" | "easeout" => Self::OutQuad,
            "power2inout" | "quadinout" | "easeinoutquad" | "easeinout" => Self::InOutQuad,
            "power3in" | "cubicin" | "easeincubic" | "easein" => Self::InCubic,
            "power3out" | "cubicout" | "easeoutcubic" => Self::OutCubic,
            "power3inout" | "cubicinout" | "easeinoutcubic" => Self::InOutCubic,
            "sinein" | "easeinsine" => Self::InSine,
            "sineout" | "easeoutsine" => Self::OutSine,
            "sineinout" | "easeinoutsine" => Self::InOutSine,
            "backout" | "easeoutback" | "overshoot" => Self::OutBack,
            _ => {
                return Err(BeatframeError::invalid_config(format!(
                    "unknown easing '{}'",
                    name.trim()
                )));
            }
        };
        Ok(ease)
    }
}

impl FromStr for Ease {
    type Err = BeatframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Ease {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for Ease {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
