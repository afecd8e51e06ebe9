use crate::foundation::error::{BeatframeError, BeatframeResult};
use crate::foundation::math::{round_half_up, snap};

/// Fractional frame positions are snapped to this many steps per frame before rounding.
const FRAME_SNAP: f64 = 1e9;

pub use kurbo::{Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Zero-based frame index.
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open frame range `[start, end)`.
pub struct FrameRange {
    /// Inclusive start frame.
    pub start: FrameIndex,
    /// Exclusive end frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated frame range.
    pub fn new(start: FrameIndex, end: FrameIndex) -> BeatframeResult<Self> {
        if start.0 > end.0 {
            return Err(BeatframeError::invalid_config(
                "FrameRange start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of frames in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range contains no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` if `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Rational frame rate. Both terms must be non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator.
    pub den: u32,
}

impl Fps {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> BeatframeResult<Self> {
        let fps = Self { num, den };
        fps.validate()?;
        Ok(fps)
    }

    /// Builds a frame rate from a plain number such as `30` or `29.97`.
    ///
    /// Non-integral rates are kept to three decimals (`29.97 -> 29970/1000`).
    pub fn from_rate(rate: f64) -> BeatframeResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(BeatframeError::invalid_config(format!(
                "fps must be a finite number > 0, got {rate}"
            )));
        }
        if rate.fract() == 0.0 && rate <= f64::from(u32::MAX) {
            return Self::new(rate as u32, 1);
        }
        let milli = (rate * 1000.0).round();
        if milli < 1.0 || milli > f64::from(u32::MAX) {
            return Err(BeatframeError::invalid_config(format!(
                "fps {rate} is out of range"
            )));
        }
        Self::new(milli as u32, 1000)
    }

    /// Validate both terms.
    pub fn validate(self) -> BeatframeResult<()> {
        if self.den == 0 {
            return Err(BeatframeError::invalid_config("fps den must be > 0"));
        }
        if self.num == 0 {
            return Err(BeatframeError::invalid_config("fps must be > 0"));
        }
        Ok(())
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Seconds covered by `frames` frames.
    pub fn frames_to_secs(self, frames: f64) -> f64 {
        frames * f64::from(self.den) / f64::from(self.num)
    }

    /// Fractional frame position of `secs`; used by presets, which never round.
    pub fn secs_to_frames_f64(self, secs: f64) -> f64 {
        secs * self.as_f64()
    }

    /// Whole frame for `secs`, rounding halves up. Negative times land on frame 0.
    ///
    /// The fractional position is snapped to 1e-9 frames first, so a sum that lands a
    /// few ulps below a half frame still rounds up.
    pub fn secs_to_frame(self, secs: f64) -> FrameIndex {
        let pos = snap(self.secs_to_frames_f64(secs), FRAME_SNAP);
        FrameIndex(round_half_up(pos).max(0) as u64)
    }
}

/// Output canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas rectangle with its origin at the top-left corner.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
