use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    animation::preset::{AnimationState, evaluate_stack},
    foundation::core::{FrameIndex, FrameRange, Point},
    foundation::error::{BeatframeError, BeatframeResult},
    layout::collision::ResolvedPosition,
    particles::{EffectKind, ParticleState},
    scene::prepare::{PreparedProject, PreparedScene},
    timeline::composer::{ActiveScene, TransitionState},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything visible at one global frame.
pub struct FrameState {
    /// Global frame index.
    pub frame: FrameIndex,
    /// Active scenes, earliest first. Two entries during a transition overlap.
    pub scenes: Vec<SceneFrameState>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One active scene at one frame.
pub struct SceneFrameState {
    /// Scene identifier.
    pub scene: String,
    /// Scene position in the timeline.
    pub index: usize,
    /// Frame relative to the scene start.
    pub local_frame: FrameIndex,
    /// Set during a transition overlap.
    pub transition: Option<TransitionState>,
    /// Element states in document order.
    pub elements: Vec<ElementFrame>,
    /// Particle states per emitter.
    pub emitters: Vec<EmitterFrame>,
    /// Connector endpoints and states.
    pub connectors: Vec<ConnectorFrame>,
    /// Resolved layout of the scene.
    pub layout: BTreeMap<String, ResolvedPosition>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Animated element at one frame.
pub struct ElementFrame {
    /// Element identifier.
    pub id: String,
    /// Layout center, when the element has a box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Layered animation state.
    pub state: AnimationState,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Particles of one emitter at one frame.
pub struct EmitterFrame {
    /// Emitter identifier.
    pub id: String,
    /// Effect family.
    pub kind: EffectKind,
    /// One state per particle, in generation order.
    pub particles: Vec<ParticleState>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Connector endpoints follow the translation of the elements they join.
pub struct ConnectorFrame {
    /// Connector identifier.
    pub id: String,
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Layered animation state.
    pub state: AnimationState,
}

/// How [`eval_frames`] schedules work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Threading {
    /// On the calling thread, in order.
    #[default]
    Serial,
    /// Frames fan out over a dedicated rayon pool. `None` uses rayon's default size.
    Parallel {
        /// Worker count; must be at least 1 when set.
        threads: Option<usize>,
    },
}

/// Stateless evaluator from a prepared project to per-frame state.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(project))]
    /// Evaluate one global frame. Frames past the timeline are an error.
    pub fn eval_frame(
        project: &PreparedProject,
        frame: FrameIndex,
    ) -> BeatframeResult<FrameState> {
        if frame.0 >= project.total_frames() {
            return Err(BeatframeError::evaluation(format!(
                "frame {} is out of bounds (total {})",
                frame.0,
                project.total_frames()
            )));
        }

        let active = project.timeline.active_at(frame);
        let mut scenes = Vec::with_capacity(active.len());
        for a in active {
            let scene = project.scenes.get(a.index).ok_or_else(|| {
                BeatframeError::evaluation("internal error: active scene index out of range")
            })?;
            scenes.push(eval_scene(project, scene, a));
        }
        Ok(FrameState { frame, scenes })
    }
}

fn eval_scene(
    project: &PreparedProject,
    scene: &PreparedScene,
    active: ActiveScene,
) -> SceneFrameState {
    let local = active.local_frame;
    let fps = project.fps;

    let elements: Vec<ElementFrame> = scene
        .elements
        .iter()
        .map(|e| ElementFrame {
            id: e.id.clone(),
            position: e.position,
            state: evaluate_stack(local, fps, &e.animations),
        })
        .collect();

    let emitters = scene
        .emitters
        .iter()
        .map(|e| EmitterFrame {
            id: e.id.clone(),
            kind: e.spec.kind(),
            particles: e.particles.evaluate(&e.spec, local, e.anchor),
        })
        .collect();

    let translation = |id: &str| {
        elements
            .iter()
            .find(|e| e.id == id)
            .map_or((0.0, 0.0), |e| {
                (
                    e.state.translate_x.unwrap_or(0.0),
                    e.state.translate_y.unwrap_or(0.0),
                )
            })
    };
    let connectors = scene
        .connectors
        .iter()
        .map(|c| {
            let (fx, fy) = translation(&c.from);
            let (tx, ty) = translation(&c.to);
            ConnectorFrame {
                id: c.id.clone(),
                from: Point::new(c.from_point.x + fx, c.from_point.y + fy),
                to: Point::new(c.to_point.x + tx, c.to_point.y + ty),
                state: evaluate_stack(local, fps, &c.animations),
            }
        })
        .collect();

    SceneFrameState {
        scene: scene.id.clone(),
        index: active.index,
        local_frame: local,
        transition: active.transition,
        elements,
        emitters,
        connectors,
        layout: scene.layout.positions.clone(),
    }
}

/// Evaluates every frame of `range` (exclusive end), in order.
pub fn eval_frames(
    project: &PreparedProject,
    range: FrameRange,
    threading: Threading,
) -> BeatframeResult<Vec<FrameState>> {
    match threading {
        Threading::Serial => (range.start.0..range.end.0)
            .map(|f| Evaluator::eval_frame(project, FrameIndex(f)))
            .collect(),
        Threading::Parallel { threads } => {
            let pool = build_thread_pool(threads)?;
            pool.install(|| {
                (range.start.0..range.end.0)
                    .into_par_iter()
                    .map(|f| Evaluator::eval_frame(project, FrameIndex(f)))
                    .collect()
            })
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> BeatframeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BeatframeError::invalid_config(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BeatframeError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
