//! Beatframe is a deterministic animation and timeline engine for short, template-driven
//! video scenes.
//!
//! A project is a declarative JSON document. For any requested frame the engine computes
//! an exact, reproducible state record: per-element animation values, particle states,
//! resolved layout, connectors, and the transition progress between scenes. Painting
//! those records is left to the caller.
//!
//! # Pipeline overview
//!
//! 1. **Prepare**: `ProjectDef -> PreparedProject` (validation, beats, layout, particle generation)
//! 2. **Compose**: scenes are laid end to end with overlapping transitions (`Timeline`)
//! 3. **Evaluate**: `PreparedProject + FrameIndex -> FrameState`, a pure function
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same document and frame always give bit-identical output,
//!   on any thread and in any evaluation order (see [`fingerprint_frame`]).
//! - **Errors up front**: every fatal problem surfaces from [`prepare`]; recoverable ones
//!   are reported as [`SceneWarning`]s.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod animation;
mod eval;
mod foundation;
mod layout;
mod particles;
mod random;
mod scene;
mod timeline;

pub use animation::ease::Ease;
pub use animation::interp::{Extrapolate, Lerp, interpolate, window_progress};
pub use animation::ops::{
    breathe, delay, fade_up_in, pop_in_spring, pulse_emphasis, shrink_to_corner, stagger,
    with_ease,
};
pub use animation::preset::{AnimationConfig, AnimationState, Preset, evaluate, evaluate_stack};
pub use animation::spring::SpringConfig;
pub use eval::evaluator::{
    ConnectorFrame, ElementFrame, EmitterFrame, Evaluator, FrameState, SceneFrameState,
    Threading, eval_frames,
};
pub use eval::fingerprint::fingerprint_frame;
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Vec2};
pub use foundation::error::{BeatframeError, BeatframeResult};
pub use layout::collision::{
    BoundingBox, BoxShape, LayoutOptions, LayoutResult, LayoutWarning, ResolvedPosition, place,
};
pub use particles::ambient::{AmbientParams, AmbientParticle};
pub use particles::cache::ParticleCache;
pub use particles::confetti::{ConfettiParams, ConfettiParticle};
pub use particles::emitter::{EmitterSpec, ParticleSet};
pub use particles::shapes::{FloatingShape, FloatingShapeParams, ShapeKind};
pub use particles::sparkle::{SparkleParams, SparkleParticle};
pub use particles::{EffectKind, ParticleEffect, ParticleState};
pub use random::seeded::{
    DECORRELATION_STRIDE, SeedAlgorithm, SeededSequence, seeded_random, stream,
};
pub use scene::model::{
    AnimationDef, ConnectorDef, ElementDef, EmitterDef, FpsDef, LayoutDef, ProjectDef, SceneDef,
    StartDef, TransitionDef,
};
pub use scene::prepare::{
    PreparedConnector, PreparedElement, PreparedEmitter, PreparedProject, PreparedScene,
    SceneWarning, prepare, prepare_with_cache,
};
pub use timeline::beats::{
    BeatMap, BeatScheduler, BeatSource, BeatValue, ResolvedBeat, ResolvedBeats, resolve_beats,
};
pub use timeline::composer::{
    ActiveScene, ComposedScene, ComposedTransition, SceneSlot, Timeline, TransitionRole,
    TransitionState, compose,
};
pub use timeline::transitions::{
    TransitionKind, TransitionSpec, WipeDir, parse_transition, parse_transition_kind_params,
};
