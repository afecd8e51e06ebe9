//! Stitches independently-timed scenes into one timeline with overlapping transitions.

use std::collections::BTreeSet;

use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{BeatframeError, BeatframeResult},
    timeline::transitions::{TransitionKind, TransitionSpec, parse_transition},
};

/// One scene as handed to the composer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSlot {
    /// Scene identifier.
    pub id: String,
    /// Scene length in frames.
    pub duration: u64,
    /// Transition into the next scene; its length is the overlap. Ignored on the last scene.
    #[serde(default)]
    pub transition_out: Option<TransitionSpec>,
}

impl SceneSlot {
    /// Slot with a linear crossfade of `overlap` frames into the next scene.
    pub fn new(id: impl Into<String>, duration: u64, overlap: u64) -> Self {
        Self {
            id: id.into(),
            duration,
            transition_out: (overlap > 0).then(|| TransitionSpec::crossfade(overlap)),
        }
    }

    fn overlap(&self) -> u64 {
        self.transition_out
            .as_ref()
            .map_or(0, |t| t.duration_frames)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Validated transition out of a composed scene.
pub struct ComposedTransition {
    /// Transition kind.
    pub kind: TransitionKind,
    /// Curve applied to the overlap progress.
    pub ease: Ease,
    /// Frames shared with the next scene.
    pub overlap: u64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Scene placed on the composed timeline.
pub struct ComposedScene {
    /// Scene identifier.
    pub id: String,
    /// Offset of the scene's first frame on the composed timeline.
    pub start: FrameIndex,
    /// Scene length in frames, without tail padding.
    pub duration: u64,
    /// Transition into the next scene, if any.
    pub transition_out: Option<ComposedTransition>,
}

impl ComposedScene {
    /// Global frames covered by the scene itself.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: self.start,
            end: FrameIndex(self.start.0 + self.duration),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Side of a transition a scene is on.
pub enum TransitionRole {
    /// The scene is being replaced.
    Outgoing,
    /// The scene is coming in.
    Incoming,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Transition progress seen from one active scene.
pub struct TransitionState {
    /// Side of the transition.
    pub role: TransitionRole,
    /// Transition kind.
    pub kind: TransitionKind,
    /// Linear progress through the overlap, in `[0, 1)`.
    pub raw_progress: f64,
    /// `raw_progress` through the transition's ease.
    pub progress: f64,
    /// Scene opacity implied by the transition kind.
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A scene visible at some global frame.
pub struct ActiveScene {
    /// Scene position in the timeline.
    pub index: usize,
    /// Frame relative to the scene start.
    pub local_frame: FrameIndex,
    /// Set while the scene overlaps a neighbour.
    pub transition: Option<TransitionState>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Scenes laid out on one global frame axis.
pub struct Timeline {
    /// Total frames, tail padding included.
    pub total_duration: u64,
    /// Frames appended after the last scene.
    pub tail_padding: u64,
    /// Scenes in playback order.
    pub scenes: Vec<ComposedScene>,
}

impl Timeline {
    /// Start frame of every scene.
    pub fn offsets(&self) -> Vec<u64> {
        self.scenes.iter().map(|s| s.start.0).collect()
    }

    /// Position and placement of the scene named `id`.
    pub fn scene(&self, id: &str) -> Option<(usize, &ComposedScene)> {
        self.scenes.iter().enumerate().find(|(_, s)| s.id == id)
    }

    /// Scenes visible at `frame`, earliest first. Two scenes are returned while a
    /// transition overlap is running; the last scene stays active through tail padding.
    pub fn active_at(&self, frame: FrameIndex) -> SmallVec<[ActiveScene; 2]> {
        let mut out = SmallVec::new();
        if frame.0 >= self.total_duration {
            return out;
        }
        let last = self.scenes.len().saturating_sub(1);
        let upper = self.scenes.partition_point(|s| s.start.0 <= frame.0);
        let lower = upper.saturating_sub(2);
        for index in lower..upper {
            let scene = &self.scenes[index];
            let end = if index == last {
                self.total_duration
            } else {
                scene.start.0 + scene.duration
            };
            if frame.0 >= end {
                continue;
            }
            let local_frame = FrameIndex(frame.0 - scene.start.0);
            out.push(ActiveScene {
                index,
                local_frame,
                transition: self.transition_state(index, frame),
            });
        }
        out
    }

    fn transition_state(&self, index: usize, frame: FrameIndex) -> Option<TransitionState> {
        // Outgoing: the overlap with the next scene.
        if let (Some(t), Some(next)) = (
            self.scenes[index].transition_out.as_ref(),
            self.scenes.get(index + 1),
        ) {
            if frame.0 >= next.start.0 {
                return Some(state(TransitionRole::Outgoing, t, frame.0 - next.start.0));
            }
        }
        // Incoming: the previous scene's overlap with this one.
        let prev = index.checked_sub(1).map(|i| &self.scenes[i])?;
        let t = prev.transition_out.as_ref()?;
        let scene = &self.scenes[index];
        let into = frame.0 - scene.start.0;
        (into < t.overlap).then(|| state(TransitionRole::Incoming, t, into))
    }
}

fn state(role: TransitionRole, t: &ComposedTransition, into: u64) -> TransitionState {
    let raw_progress = into as f64 / t.overlap as f64;
    let progress = t.ease.apply(raw_progress);
    let (out_opacity, in_opacity) = t.kind.opacities(progress);
    TransitionState {
        role,
        kind: t.kind.clone(),
        raw_progress,
        progress,
        opacity: match role {
            TransitionRole::Outgoing => out_opacity,
            TransitionRole::Incoming => in_opacity,
        },
    }
}

/// Lays scenes end to end, pulling each one back by the previous scene's overlap.
///
/// `offset(i) = sum(durations before i) - sum(overlaps before i)`.
#[tracing::instrument(skip(scenes), fields(scenes = scenes.len()))]
pub fn compose(scenes: &[SceneSlot], tail_padding: u64) -> BeatframeResult<Timeline> {
    let mut ids = BTreeSet::new();
    for s in scenes {
        if s.duration == 0 {
            return Err(BeatframeError::invalid_config(format!(
                "scene '{}' must have a duration > 0",
                s.id
            )));
        }
        if !ids.insert(s.id.as_str()) {
            return Err(BeatframeError::invalid_config(format!(
                "duplicate scene id '{}'",
                s.id
            )));
        }
    }

    let overlaps: Vec<u64> = scenes
        .iter()
        .enumerate()
        .map(|(i, s)| if i + 1 < scenes.len() { s.overlap() } else { 0 })
        .collect();

    for (i, pair) in scenes.windows(2).enumerate() {
        let ov = overlaps[i];
        if ov > pair[0].duration || ov > pair[1].duration {
            return Err(BeatframeError::invalid_config(format!(
                "transition between '{}' and '{}' ({ov} frames) is longer than one of the scenes",
                pair[0].id, pair[1].id
            )));
        }
    }
    for i in 1..scenes.len() {
        if overlaps[i - 1] + overlaps[i] > scenes[i].duration {
            return Err(BeatframeError::invalid_config(format!(
                "scene '{}' is shorter than its incoming and outgoing transitions combined",
                scenes[i].id
            )));
        }
    }

    let mut composed = Vec::with_capacity(scenes.len());
    let mut cursor = 0u64;
    for (i, s) in scenes.iter().enumerate() {
        let transition_out = match (&s.transition_out, overlaps[i]) {
            (Some(spec), ov) if ov > 0 => Some(ComposedTransition {
                kind: parse_transition(spec)?,
                ease: spec.ease,
                overlap: ov,
            }),
            _ => None,
        };
        composed.push(ComposedScene {
            id: s.id.clone(),
            start: FrameIndex(cursor),
            duration: s.duration,
            transition_out,
        });
        cursor += s.duration - overlaps[i];
    }

    tracing::debug!(total = cursor + tail_padding, "timeline composed");
    Ok(Timeline {
        total_duration: cursor + tail_padding,
        tail_padding,
        scenes: composed,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/composer.rs"]
mod tests;
