//! Named beats authored in seconds, resolved to absolute frames.

use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{BeatframeError, BeatframeResult};
use crate::foundation::math::snap;

/// Beat times are kept to whole microseconds so chained relative offsets land on the same
/// value as the equivalent absolute time.
const BEAT_SNAP: f64 = 1e6;

/// A beat time as authored: absolute seconds from scene start, or seconds after the
/// previous beat in canonical order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BeatValue {
    /// Seconds from scene start.
    At(f64),
    /// Seconds after the previous beat.
    After(f64),
}

impl BeatValue {
    fn seconds(self) -> f64 {
        match self {
            Self::At(s) | Self::After(s) => s,
        }
    }
}

impl serde::Serialize for BeatValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap as _;
        match *self {
            Self::At(s) => serializer.serialize_f64(s),
            Self::After(s) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("after", &s)?;
                map.end()
            }
        }
    }
}

impl<'de> serde::Deserialize<'de> for BeatValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            // "+0.5" is relative, "1.2" absolute.
            Str(String),
            At { at: f64 },
            After { after: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(s) | Repr::At { at: s } => Ok(Self::At(s)),
            Repr::After { after } => Ok(Self::After(after)),
            Repr::Str(raw) => {
                let s = raw.trim();
                let (relative, body) = match s.strip_prefix('+') {
                    Some(rest) => (true, rest.trim()),
                    None => (false, s),
                };
                let secs: f64 = body.trim_end_matches('s').parse().map_err(|_| {
                    serde::de::Error::custom(format!("invalid beat time \"{raw}\""))
                })?;
                Ok(if relative {
                    Self::After(secs)
                } else {
                    Self::At(secs)
                })
            }
        }
    }
}

/// Beat times keyed by beat name.
pub type BeatMap = BTreeMap<String, BeatValue>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Where a resolved beat time came from.
pub enum BeatSource {
    /// The scene's own beat map.
    Authored,
    /// The defaults table.
    Default,
    /// Not part of the canonical order; resolved as-is.
    PassThrough,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One beat after resolution.
pub struct ResolvedBeat {
    /// Beat name.
    pub name: String,
    /// Seconds from scene start, snapped to microseconds.
    pub seconds: f64,
    /// Scene-local frame, rounding halves up.
    pub frame: FrameIndex,
    /// Origin of the time.
    pub source: BeatSource,
    /// Set when an absolute time earlier than its predecessor was moved forward.
    pub clamped: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// All beats of one scene.
pub struct ResolvedBeats {
    /// Frame rate the frames were computed with.
    pub fps: Fps,
    /// Canonical beats first, in order, then pass-through beats by name.
    pub beats: Vec<ResolvedBeat>,
}

impl ResolvedBeats {
    /// Beat named `name`.
    pub fn get(&self, name: &str) -> Option<&ResolvedBeat> {
        self.beats.iter().find(|b| b.name == name)
    }

    /// Frame of the beat named `name`.
    pub fn frame(&self, name: &str) -> Option<FrameIndex> {
        self.get(name).map(|b| b.frame)
    }

    /// Seconds of the beat named `name`.
    pub fn seconds(&self, name: &str) -> Option<f64> {
        self.get(name).map(|b| b.seconds)
    }

    /// Frame for `name`, or `fallback_s` converted with the same rounding.
    pub fn frame_or(&self, name: &str, fallback_s: f64) -> FrameIndex {
        self.frame(name).unwrap_or_else(|| self.fps.secs_to_frame(fallback_s))
    }

    /// Every beat's frame by name.
    pub fn frames(&self) -> BTreeMap<String, FrameIndex> {
        self.beats
            .iter()
            .map(|b| (b.name.clone(), b.frame))
            .collect()
    }

    /// Beats that were moved forward.
    pub fn clamped(&self) -> impl Iterator<Item = &ResolvedBeat> {
        self.beats.iter().filter(|b| b.clamped)
    }
}

/// Resolves beat maps against a canonical order and a table of fallback times.
#[derive(Clone, Debug, Default)]
pub struct BeatScheduler {
    order: Vec<String>,
    defaults: BeatMap,
}

impl BeatScheduler {
    /// Scheduler over a canonical beat order with no defaults.
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: order.into_iter().map(Into::into).collect(),
            defaults: BeatMap::new(),
        }
    }

    /// Add one default.
    pub fn with_default(mut self, name: impl Into<String>, value: BeatValue) -> Self {
        self.defaults.insert(name.into(), value);
        self
    }

    /// Add a table of defaults.
    pub fn with_defaults(mut self, defaults: BeatMap) -> Self {
        self.defaults.extend(defaults);
        self
    }

    /// Canonical beat order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    #[tracing::instrument(skip(self, beats), fields(beats = beats.len()))]
    /// Resolve `beats` to frames at `fps`.
    pub fn resolve(&self, beats: &BeatMap, fps: Fps) -> BeatframeResult<ResolvedBeats> {
        fps.validate()?;

        let mut seen = BTreeSet::new();
        for name in &self.order {
            if !seen.insert(name.as_str()) {
                return Err(BeatframeError::invalid_config(format!(
                    "beat '{name}' appears twice in the canonical order"
                )));
            }
        }
        for (name, value) in beats.iter().chain(self.defaults.iter()) {
            if !value.seconds().is_finite() {
                return Err(BeatframeError::invalid_config(format!(
                    "beat '{name}' must be a finite number of seconds"
                )));
            }
        }

        let mut out = Vec::with_capacity(self.order.len() + beats.len());
        let mut cursor = 0.0f64;
        for name in &self.order {
            let (value, source) = match (beats.get(name), self.defaults.get(name)) {
                (Some(v), _) => (*v, BeatSource::Authored),
                (None, Some(v)) => {
                    tracing::debug!(beat = %name, "beat missing, using default");
                    (*v, BeatSource::Default)
                }
                (None, None) => continue,
            };
            let wanted = snap(
                match value {
                    BeatValue::At(s) => s,
                    BeatValue::After(d) => cursor + d,
                },
                BEAT_SNAP,
            );
            let clamped = wanted < cursor;
            if clamped {
                tracing::warn!(
                    beat = %name,
                    wanted,
                    previous = cursor,
                    "beat precedes the previous beat; clamped"
                );
            }
            let seconds = wanted.max(cursor);
            cursor = seconds;
            out.push(ResolvedBeat {
                name: name.clone(),
                seconds,
                frame: fps.secs_to_frame(seconds),
                source,
                clamped,
            });
        }

        let canonical: BTreeSet<&str> = self.order.iter().map(String::as_str).collect();
        let mut extra: BTreeMap<&str, BeatValue> = BTreeMap::new();
        for (name, value) in self.defaults.iter().chain(beats.iter()) {
            if !canonical.contains(name.as_str()) {
                extra.insert(name, *value);
            }
        }
        for (name, value) in extra {
            // Relative values have no predecessor here; they count from scene start.
            let seconds = snap(value.seconds(), BEAT_SNAP);
            out.push(ResolvedBeat {
                name: name.to_owned(),
                seconds,
                frame: fps.secs_to_frame(seconds),
                source: BeatSource::PassThrough,
                clamped: false,
            });
        }

        Ok(ResolvedBeats { fps, beats: out })
    }
}

/// One-shot form of [`BeatScheduler::resolve`].
pub fn resolve_beats(
    beats: &BeatMap,
    fps: Fps,
    defaults: &BeatMap,
    order: &[&str],
) -> BeatframeResult<ResolvedBeats> {
    BeatScheduler::new(order.iter().copied())
        .with_defaults(defaults.clone())
        .resolve(beats, fps)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/beats.rs"]
mod tests;
