//! Serde boundary for project documents. Nothing here is validated; [`crate::prepare`]
//! turns these into runtime structures.

use serde::{Deserialize, Serialize};

use crate::{
    animation::preset::Preset,
    foundation::core::{Canvas, Vec2},
    foundation::error::BeatframeResult,
    layout::collision::{BoundingBox, LayoutOptions},
    particles::emitter::EmitterSpec,
    timeline::beats::BeatMap,
};

/// Frame rate as a plain number (`30`, `29.97`) or an exact ratio (`{"num": 30000, "den": 1001}`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FpsDef {
    /// Frames per second.
    Rate(f64),
    /// Exact `num / den` frames per second.
    Ratio {
        /// Numerator.
        num: u32,
        /// Denominator.
        den: u32,
    },
}

impl<'de> Deserialize<'de> for FpsDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Obj { num: u32, den: u32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(rate) => Ok(Self::Rate(rate)),
            Repr::Obj { num, den } => Ok(Self::Ratio { num, den }),
        }
    }
}

/// Root of a project document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectDef {
    /// Frame rate.
    pub fps: FpsDef,
    /// Output size; defaults to 1920x1080.
    #[serde(default = "default_canvas")]
    pub canvas: Canvas,
    /// Seed for emitters that do not set their own.
    #[serde(default)]
    pub seed: i64,
    /// Canonical beat order; relative beats chain along it.
    #[serde(default)]
    pub beat_order: Vec<String>,
    /// Fallback times for beats a scene leaves out.
    #[serde(default)]
    pub beat_defaults: BeatMap,
    /// Frames the last scene keeps running after its nominal end.
    #[serde(default)]
    pub tail_padding_frames: u64,
    /// Scenes in playback order.
    pub scenes: Vec<SceneDef>,
}

fn default_canvas() -> Canvas {
    Canvas {
        width: 1920,
        height: 1080,
    }
}

impl ProjectDef {
    /// Parse a document from JSON text.
    pub fn from_json_str(s: &str) -> BeatframeResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a document from a JSON value.
    pub fn from_json_value(v: serde_json::Value) -> BeatframeResult<Self> {
        Ok(serde_json::from_value(v)?)
    }
}

/// One scene.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDef {
    /// Scene identifier, unique in the project.
    pub id: String,
    /// Exactly one of `duration_s` and `duration_frames` must be set.
    #[serde(default)]
    pub duration_s: Option<f64>,
    /// Length in frames.
    #[serde(default)]
    pub duration_frames: Option<u64>,
    /// Transition into the next scene.
    #[serde(default)]
    pub transition: Option<TransitionDef>,
    /// Beat times for this scene.
    #[serde(default)]
    pub beats: BeatMap,
    /// Animated elements.
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    /// Particle emitters.
    #[serde(default)]
    pub emitters: Vec<EmitterDef>,
    /// Layout boxes and options.
    #[serde(default)]
    pub layout: LayoutDef,
    /// Lines between layout boxes.
    #[serde(default)]
    pub connectors: Vec<ConnectorDef>,
}

/// Transition into the following scene.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionDef {
    /// Kind name; defaults to crossfade.
    #[serde(default)]
    pub kind: Option<String>,
    /// Overlap with the next scene, in frames.
    pub duration_frames: u64,
    /// Easing name; parsed during preparation.
    #[serde(default)]
    pub ease: Option<String>,
    /// Kind-specific parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// An animated element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementDef {
    /// Element identifier; matches a layout box id to pick up its position.
    pub id: String,
    /// Presets layered in order.
    #[serde(default)]
    pub animations: Vec<AnimationDef>,
}

/// One preset invocation on an element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimationDef {
    /// Window start.
    pub start: StartDef,
    /// Window length in seconds.
    #[serde(default)]
    pub duration_s: f64,
    /// Easing name; the preset's default when unset.
    #[serde(default)]
    pub ease: Option<String>,
    /// Preset and its parameters.
    #[serde(flatten)]
    pub preset: Preset,
}

/// Animation start: seconds from scene start, or a beat name plus an offset.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StartDef {
    /// Seconds from scene start.
    Seconds(f64),
    /// A resolved beat plus an offset.
    Beat {
        /// Beat name.
        beat: String,
        /// Seconds added to the beat time.
        offset_s: f64,
    },
}

impl<'de> Deserialize<'de> for StartDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Name(String),
            Obj {
                beat: String,
                #[serde(default)]
                offset_s: f64,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(s) => Ok(Self::Seconds(s)),
            Repr::Name(beat) => Ok(Self::Beat {
                beat,
                offset_s: 0.0,
            }),
            Repr::Obj { beat, offset_s } => Ok(Self::Beat { beat, offset_s }),
        }
    }
}

/// A particle emitter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmitterDef {
    /// Emitter identifier.
    pub id: String,
    /// Defaults to the project seed.
    #[serde(default)]
    pub seed: Option<i64>,
    /// Offset added to every particle position.
    #[serde(default)]
    pub anchor: Vec2,
    /// Layout box whose resolved center is added to `anchor`.
    #[serde(default)]
    pub attach_to: Option<String>,
    /// Effect and its parameters.
    #[serde(flatten)]
    pub spec: EmitterSpec,
}

/// Layout section of a scene.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LayoutDef {
    /// Placement tuning.
    #[serde(default)]
    pub options: LayoutOptions,
    /// Use the canvas as bounds when `options.bounds` is unset.
    #[serde(default = "default_clip_to_canvas")]
    pub clip_to_canvas: bool,
    /// Boxes to place.
    #[serde(default)]
    pub boxes: Vec<BoundingBox>,
}

impl Default for LayoutDef {
    fn default() -> Self {
        Self {
            options: LayoutOptions::default(),
            clip_to_canvas: default_clip_to_canvas(),
            boxes: Vec::new(),
        }
    }
}

fn default_clip_to_canvas() -> bool {
    true
}

/// A line drawn between two layout boxes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectorDef {
    /// Connector identifier.
    pub id: String,
    /// Start box id.
    pub from: String,
    /// End box id.
    pub to: String,
    /// Presets layered in order.
    #[serde(default)]
    pub animations: Vec<AnimationDef>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
