use crate::foundation::error::{BeatframeError, BeatframeResult};

/// Below this distance from the target the spring reports exactly `1.0`.
const REST_EPSILON: f64 = 1e-4;

/// Damped harmonic oscillator driving a value from 0 to 1.
///
/// Sampled in closed form, so any time can be evaluated without stepping through
/// earlier frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Moving mass; must be positive.
    pub mass: f64,
    /// Spring constant; must be positive.
    pub stiffness: f64,
    /// Damping coefficient; must be positive so the spring comes to rest.
    pub damping: f64,
    /// Clamp the response at 1.0 instead of overshooting.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Reject parameters that would not settle.
    pub fn validate(&self) -> BeatframeResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(BeatframeError::invalid_config("spring mass must be > 0"));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(BeatframeError::invalid_config(
                "spring stiffness must be > 0",
            ));
        }
        if !(self.damping.is_finite() && self.damping > 0.0) {
            return Err(BeatframeError::invalid_config("spring damping must be > 0"));
        }
        Ok(())
    }

    fn omega0(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio; `< 1` overshoots, `>= 1` approaches monotonically.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Spring position at `t` seconds after release, starting at rest at 0.
    pub fn value(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let w0 = self.omega0();
        let zeta = self.damping_ratio();

        let (x, envelope) = if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * w0 * t).exp();
            let k = zeta * w0 / wd;
            let x = 1.0 - decay * ((wd * t).cos() + k * (wd * t).sin());
            (x, decay * (1.0 + k * k).sqrt())
        } else if zeta == 1.0 {
            let env = (-w0 * t).exp() * (1.0 + w0 * t);
            (1.0 - env, env)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let a = r2 * (r1 * t).exp();
            let b = r1 * (r2 * t).exp();
            let x = 1.0 + (a - b) / (r1 - r2);
            (x, (a.abs() + b.abs()) / (r1 - r2).abs())
        };

        if envelope < REST_EPSILON {
            return 1.0;
        }
        if self.overshoot_clamping {
            x.min(1.0)
        } else {
            x
        }
    }

    /// First whole frame (at `fps`) from which [`SpringConfig::value`] is exactly 1.0,
    /// searched up to `max_frames`.
    pub fn settle_frame(&self, fps: f64, max_frames: u64) -> Option<u64> {
        (0..=max_frames).find(|&f| {
            (f..f.saturating_add(4)).all(|g| self.value(g as f64 / fps) == 1.0)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
