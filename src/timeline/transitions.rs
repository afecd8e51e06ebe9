//! Scene-to-scene transition kinds and their parameters.

use crate::{
    animation::ease::Ease,
    foundation::error::{BeatframeError, BeatframeResult},
};

/// Transition between a scene and the one after it, as authored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Kind name, such as `"crossfade"` or `"wipe"`.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Frames during which both scenes are active.
    pub duration_frames: u64,
    /// Curve applied to the overlap progress.
    #[serde(default)]
    pub ease: Ease,
    /// Kind-specific parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

fn default_kind() -> String {
    "crossfade".to_owned()
}

impl TransitionSpec {
    /// Linear crossfade lasting `duration_frames`.
    pub fn crossfade(duration_frames: u64) -> Self {
        Self {
            kind: default_kind(),
            duration_frames,
            ease: Ease::Linear,
            params: serde_json::Value::Null,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
/// Direction a wipe edge travels.
pub enum WipeDir {
    /// From the left edge to the right.
    LeftToRight,
    /// From the right edge to the left.
    RightToLeft,
    /// From the top edge down.
    TopToBottom,
    /// From the bottom edge up.
    BottomToTop,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Parsed transition kind.
pub enum TransitionKind {
    /// Outgoing fades out while incoming fades in.
    Crossfade,
    /// Incoming is revealed behind a moving edge.
    Wipe {
        /// Edge direction.
        dir: WipeDir,
        /// Edge softness as a fraction of the canvas, in `[0, 1]`.
        soft_edge: f32,
    },
}

impl TransitionKind {
    /// Scene opacity for the outgoing and incoming scene at eased `progress`.
    /// Wipes keep both scenes opaque and leave the reveal to the compositor.
    pub fn opacities(&self, progress: f64) -> (f64, f64) {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Crossfade => (1.0 - p, p),
            Self::Wipe { .. } => (1.0, 1.0),
        }
    }
}

/// Parse a kind name and its JSON parameters.
pub fn parse_transition_kind_params(
    kind: &str,
    params: &serde_json::Value,
) -> BeatframeResult<TransitionKind> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(BeatframeError::invalid_config(
            "transition kind must be non-empty",
        ));
    }

    match kind.as_str() {
        "crossfade" | "fade" | "dissolve" => Ok(TransitionKind::Crossfade),
        "wipe" => {
            let params = if params.is_null() {
                None
            } else {
                Some(params.as_object().ok_or_else(|| {
                    BeatframeError::invalid_config("wipe params must be an object")
                })?)
            };

            let dir = match params.and_then(|p| p.get("dir")).and_then(|v| v.as_str()) {
                None => WipeDir::LeftToRight,
                Some(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "left_to_right" | "lefttoright" | "ltr" => WipeDir::LeftToRight,
                    "right_to_left" | "righttoleft" | "rtl" => WipeDir::RightToLeft,
                    "top_to_bottom" | "toptobottom" | "ttb" => WipeDir::TopToBottom,
                    "bottom_to_top" | "bottomtotop" | "btt" => WipeDir::BottomToTop,
                    other => {
                        return Err(BeatframeError::invalid_config(format!(
                            "unknown wipe.dir '{other}'"
                        )));
                    }
                },
            };

            let soft_edge = match params
                .and_then(|p| p.get("soft_edge"))
                .and_then(|v| v.as_f64())
            {
                None => 0.0,
                Some(v) => {
                    let f = v as f32;
                    if !f.is_finite() {
                        return Err(BeatframeError::invalid_config(
                            "wipe.soft_edge must be finite when set",
                        ));
                    }
                    f.clamp(0.0, 1.0)
                }
            };

            Ok(TransitionKind::Wipe { dir, soft_edge })
        }
        _ => Err(BeatframeError::invalid_config(format!(
            "unknown transition kind '{kind}'"
        ))),
    }
}

/// Parse the kind of an authored transition.
pub fn parse_transition(spec: &TransitionSpec) -> BeatframeResult<TransitionKind> {
    parse_transition_kind_params(&spec.kind, &spec.params)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/transitions.rs"]
mod tests;
