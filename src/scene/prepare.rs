//! Validation and normalization of a [`ProjectDef`] into a [`PreparedProject`].
//!
//! Every fatal problem surfaces here, before any frame is evaluated. Problems that only
//! affect one element become [`SceneWarning`]s and the element is left out.

use std::collections::BTreeMap;

use crate::{
    animation::{ease::Ease, preset::AnimationConfig},
    foundation::core::{Canvas, Fps, Point, Vec2},
    foundation::error::{BeatframeError, BeatframeResult},
    layout::collision::{LayoutResult, LayoutWarning, ResolvedPosition, place},
    particles::{
        cache::ParticleCache,
        emitter::{EmitterSpec, ParticleSet},
    },
    scene::model::{
        AnimationDef, ConnectorDef, ElementDef, EmitterDef, FpsDef, ProjectDef, SceneDef,
        StartDef, TransitionDef,
    },
    timeline::{
        beats::{BeatScheduler, ResolvedBeats},
        composer::{SceneSlot, Timeline, compose},
        transitions::TransitionSpec,
    },
};

/// Recoverable problem found while preparing a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneWarning {
    /// `item` names something (`reference`) that does not exist; `item` was skipped.
    UnresolvedReference {
        /// Scene id.
        scene: String,
        /// Skipped element, emitter or connector.
        item: String,
        /// Missing beat or box.
        reference: String,
    },
    /// No free spot was found for a layout box.
    LayoutOverflow {
        /// Scene id.
        scene: String,
        /// Box id.
        id: String,
        /// Overlap left at the kept position.
        overlap_area: f64,
    },
    /// No position inside the canvas fit a layout box; it kept its requested spot.
    LayoutOutOfBounds {
        /// Scene id.
        scene: String,
        /// Box id.
        id: String,
        /// Overlap at the requested position.
        overlap_area: f64,
    },
    /// A layout box was dropped before placement.
    SkippedLayoutBox {
        /// Scene id.
        scene: String,
        /// Box id.
        id: String,
        /// Why the box was dropped.
        reason: String,
    },
    /// An absolute beat earlier than its predecessor was moved forward.
    ClampedBeat {
        /// Scene id.
        scene: String,
        /// Beat name.
        beat: String,
    },
}

/// Element with resolved animation windows.
#[derive(Clone, Debug)]
pub struct PreparedElement {
    /// Element identifier.
    pub id: String,
    /// Validated animations, beat references resolved to seconds.
    pub animations: Vec<AnimationConfig>,
    /// Center from the layout box with the same id, if any.
    pub position: Option<Point>,
}

/// Emitter with its generated particles.
#[derive(Clone, Debug)]
pub struct PreparedEmitter {
    /// Emitter identifier.
    pub id: String,
    /// Effect parameters.
    pub spec: EmitterSpec,
    /// Seed the particles were generated from.
    pub seed: i64,
    /// Final offset, attached box center included.
    pub anchor: Vec2,
    /// Generated particles.
    pub particles: ParticleSet,
}

/// Connector with resolved endpoints.
#[derive(Clone, Debug)]
pub struct PreparedConnector {
    /// Connector identifier.
    pub id: String,
    /// Start box id.
    pub from: String,
    /// End box id.
    pub to: String,
    /// Resolved center of the start box.
    pub from_point: Point,
    /// Resolved center of the end box.
    pub to_point: Point,
    /// Validated animations.
    pub animations: Vec<AnimationConfig>,
}

/// Scene ready for evaluation.
#[derive(Clone, Debug)]
pub struct PreparedScene {
    /// Scene identifier.
    pub id: String,
    /// Frames.
    pub duration: u64,
    /// Resolved beats.
    pub beats: ResolvedBeats,
    /// Elements that resolved cleanly.
    pub elements: Vec<PreparedElement>,
    /// Emitters that resolved cleanly.
    pub emitters: Vec<PreparedEmitter>,
    /// Layout result.
    pub layout: LayoutResult,
    /// Connectors that resolved cleanly.
    pub connectors: Vec<PreparedConnector>,
}

impl PreparedScene {
    /// Element named `id`.
    pub fn element(&self, id: &str) -> Option<&PreparedElement> {
        self.elements.iter().find(|e| e.id == id)
    }
}

/// A validated project, ready for frame evaluation.
#[derive(Debug)]
pub struct PreparedProject {
    /// Frame rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
    /// Project seed.
    pub seed: i64,
    /// Composed scene timeline.
    pub timeline: Timeline,
    /// Scenes in timeline order.
    pub scenes: Vec<PreparedScene>,
    /// Recoverable problems, in document order.
    pub warnings: Vec<SceneWarning>,
}

impl PreparedProject {
    /// Total frames, tail padding included.
    pub fn total_frames(&self) -> u64 {
        self.timeline.total_duration
    }
}

/// Prepares `def` with a private particle cache.
pub fn prepare(def: &ProjectDef) -> BeatframeResult<PreparedProject> {
    prepare_with_cache(def, &ParticleCache::new())
}

/// Prepares `def`, drawing generated particle arrays from `cache`.
#[tracing::instrument(skip_all, fields(scenes = def.scenes.len()))]
pub fn prepare_with_cache(
    def: &ProjectDef,
    cache: &ParticleCache,
) -> BeatframeResult<PreparedProject> {
    let fps = match def.fps {
        FpsDef::Rate(rate) => Fps::from_rate(rate)?,
        FpsDef::Ratio { num, den } => Fps::new(num, den)?,
    };
    if def.canvas.width == 0 || def.canvas.height == 0 {
        return Err(BeatframeError::invalid_config(
            "canvas width/height must be > 0",
        ));
    }
    if def.scenes.is_empty() {
        return Err(BeatframeError::invalid_config(
            "project must contain at least one scene",
        ));
    }

    let scheduler = BeatScheduler::new(def.beat_order.iter().cloned())
        .with_defaults(def.beat_defaults.clone());

    let mut slots = Vec::with_capacity(def.scenes.len());
    let mut scenes = Vec::with_capacity(def.scenes.len());
    let mut warnings = Vec::new();
    for scene in &def.scenes {
        let duration = scene_duration(scene, fps)?;
        slots.push(SceneSlot {
            id: scene.id.clone(),
            duration,
            transition_out: scene
                .transition
                .as_ref()
                .map(transition_spec)
                .transpose()?,
        });
        scenes.push(prepare_scene(
            def,
            scene,
            duration,
            fps,
            &scheduler,
            cache,
            &mut warnings,
        )?);
    }

    let timeline = compose(&slots, def.tail_padding_frames)?;
    tracing::debug!(
        total_frames = timeline.total_duration,
        warnings = warnings.len(),
        "project prepared"
    );
    Ok(PreparedProject {
        fps,
        canvas: def.canvas,
        seed: def.seed,
        timeline,
        scenes,
        warnings,
    })
}

fn scene_duration(scene: &SceneDef, fps: Fps) -> BeatframeResult<u64> {
    match (scene.duration_s, scene.duration_frames) {
        (Some(_), Some(_)) => Err(BeatframeError::invalid_config(format!(
            "scene '{}' sets both duration_s and duration_frames",
            scene.id
        ))),
        (None, None) => Err(BeatframeError::invalid_config(format!(
            "scene '{}' needs duration_s or duration_frames",
            scene.id
        ))),
        (None, Some(frames)) => Ok(frames),
        (Some(s), None) => {
            if !s.is_finite() || s < 0.0 {
                return Err(BeatframeError::invalid_config(format!(
                    "scene '{}' duration must be >= 0 seconds, got {s}",
                    scene.id
                )));
            }
            Ok(fps.secs_to_frame(s).0)
        }
    }
}

fn parse_ease(name: Option<&str>) -> BeatframeResult<Ease> {
    name.map_or(Ok(Ease::default()), Ease::parse)
}

fn transition_spec(def: &TransitionDef) -> BeatframeResult<TransitionSpec> {
    let mut spec = TransitionSpec::crossfade(def.duration_frames);
    if let Some(kind) = &def.kind {
        spec.kind = kind.clone();
    }
    spec.ease = parse_ease(def.ease.as_deref())?;
    spec.params = def.params.clone();
    Ok(spec)
}

fn prepare_scene(
    project: &ProjectDef,
    scene: &SceneDef,
    duration: u64,
    fps: Fps,
    scheduler: &BeatScheduler,
    cache: &ParticleCache,
    warnings: &mut Vec<SceneWarning>,
) -> BeatframeResult<PreparedScene> {
    let beats = scheduler.resolve(&scene.beats, fps)?;
    for b in beats.clamped() {
        warnings.push(SceneWarning::ClampedBeat {
            scene: scene.id.clone(),
            beat: b.name.clone(),
        });
    }

    let mut options = scene.layout.options.clone();
    if options.bounds.is_none() && scene.layout.clip_to_canvas {
        options.bounds = Some(project.canvas.bounds());
    }
    let layout = place(&scene.layout.boxes, &options);
    for w in &layout.warnings {
        warnings.push(match w {
            LayoutWarning::Overflow { id, overlap_area } => SceneWarning::LayoutOverflow {
                scene: scene.id.clone(),
                id: id.clone(),
                overlap_area: *overlap_area,
            },
            LayoutWarning::OutOfBounds { id, overlap_area } => SceneWarning::LayoutOutOfBounds {
                scene: scene.id.clone(),
                id: id.clone(),
                overlap_area: *overlap_area,
            },
            LayoutWarning::DuplicateId { id } => SceneWarning::SkippedLayoutBox {
                scene: scene.id.clone(),
                id: id.clone(),
                reason: "duplicate id".to_owned(),
            },
            LayoutWarning::DegenerateBox { id } => SceneWarning::SkippedLayoutBox {
                scene: scene.id.clone(),
                id: id.clone(),
                reason: "degenerate geometry".to_owned(),
            },
        });
    }

    let mut ctx = SceneCtx {
        scene: &scene.id,
        beats: &beats,
        positions: &layout.positions,
        warnings,
    };

    let mut elements = Vec::with_capacity(scene.elements.len());
    for e in &scene.elements {
        if let Some(el) = ctx.element(e)? {
            elements.push(el);
        }
    }

    let mut emitters = Vec::with_capacity(scene.emitters.len());
    for e in &scene.emitters {
        if let Some(em) = ctx.emitter(e, project.seed, cache) {
            emitters.push(em);
        }
    }

    let mut connectors = Vec::with_capacity(scene.connectors.len());
    for c in &scene.connectors {
        if let Some(conn) = ctx.connector(c)? {
            connectors.push(conn);
        }
    }

    Ok(PreparedScene {
        id: scene.id.clone(),
        duration,
        beats,
        elements,
        emitters,
        layout,
        connectors,
    })
}

struct SceneCtx<'a> {
    scene: &'a str,
    beats: &'a ResolvedBeats,
    positions: &'a BTreeMap<String, ResolvedPosition>,
    warnings: &'a mut Vec<SceneWarning>,
}

impl SceneCtx<'_> {
    fn unresolved(&mut self, item: &str, reference: &str) {
        tracing::warn!(
            scene = %self.scene,
            item,
            reference,
            "unresolved reference; skipping"
        );
        self.warnings.push(SceneWarning::UnresolvedReference {
            scene: self.scene.to_owned(),
            item: item.to_owned(),
            reference: reference.to_owned(),
        });
    }

    fn position(&self, id: &str) -> Option<Point> {
        self.positions.get(id).map(|p| Point::new(p.x, p.y))
    }

    /// `Ok(None)` when a beat reference is missing; the warning is already recorded.
    fn animations(
        &mut self,
        item: &str,
        defs: &[AnimationDef],
    ) -> BeatframeResult<Option<Vec<AnimationConfig>>> {
        let mut out = Vec::with_capacity(defs.len());
        for a in defs {
            let start_s = match &a.start {
                StartDef::Seconds(s) => *s,
                StartDef::Beat { beat, offset_s } => match self.beats.seconds(beat) {
                    Some(s) => s + offset_s,
                    None => {
                        self.unresolved(item, beat);
                        return Ok(None);
                    }
                },
            };
            let config = AnimationConfig {
                start_s,
                duration_s: a.duration_s,
                ease: parse_ease(a.ease.as_deref())?,
                preset: a.preset,
            };
            config.validate()?;
            out.push(config);
        }
        Ok(Some(out))
    }

    fn element(&mut self, def: &ElementDef) -> BeatframeResult<Option<PreparedElement>> {
        let Some(animations) = self.animations(&def.id, &def.animations)? else {
            return Ok(None);
        };
        Ok(Some(PreparedElement {
            id: def.id.clone(),
            animations,
            position: self.position(&def.id),
        }))
    }

    fn emitter(
        &mut self,
        def: &EmitterDef,
        project_seed: i64,
        cache: &ParticleCache,
    ) -> Option<PreparedEmitter> {
        let mut anchor = def.anchor;
        if let Some(target) = &def.attach_to {
            let Some(p) = self.position(target) else {
                self.unresolved(&def.id, target);
                return None;
            };
            anchor += p.to_vec2();
        }
        let seed = def.seed.unwrap_or(project_seed);
        Some(PreparedEmitter {
            id: def.id.clone(),
            spec: def.spec.clone(),
            seed,
            anchor,
            particles: def.spec.generate(seed, cache),
        })
    }

    fn connector(&mut self, def: &ConnectorDef) -> BeatframeResult<Option<PreparedConnector>> {
        let (Some(from_point), Some(to_point)) = (self.position(&def.from), self.position(&def.to))
        else {
            let missing = if self.positions.contains_key(&def.from) {
                &def.to
            } else {
                &def.from
            };
            self.unresolved(&def.id, missing);
            return Ok(None);
        };
        let Some(animations) = self.animations(&def.id, &def.animations)? else {
            return Ok(None);
        };
        Ok(Some(PreparedConnector {
            id: def.id.clone(),
            from: def.from.clone(),
            to: def.to.clone(),
            from_point,
            to_point,
            animations,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/prepare.rs"]
mod tests;
