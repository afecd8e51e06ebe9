//! Collision-free placement of labelled boxes.

use std::collections::{BTreeMap, HashSet};

use crate::foundation::core::{Point, Rect, Vec2};

// Sampling grid used to measure overlap when an ellipse is involved.
const OVERLAP_SAMPLES: usize = 24;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Footprint geometry of a [`BoundingBox`].
pub enum BoxShape {
    /// Axis-aligned rectangle.
    #[default]
    Rect,
    /// Ellipse inscribed in the box.
    Ellipse,
}

/// A labelled region that must not overlap its neighbours.
///
/// `position` is the requested center. Fixed boxes (`flexible: false`) are placed exactly
/// where requested; flexible ones may be nudged or moved to one of their `anchors`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Box identifier, unique within one layout pass.
    pub id: String,
    /// Footprint geometry.
    #[serde(default)]
    pub shape: BoxShape,
    /// Requested center.
    pub position: Point,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Higher priorities are placed first.
    #[serde(default)]
    pub priority: i32,
    /// Whether the box may move away from `position`.
    #[serde(default = "default_flexible")]
    pub flexible: bool,
    /// Alternative centers, tried in order after nudging fails.
    #[serde(default)]
    pub anchors: Vec<Point>,
}

fn default_flexible() -> bool {
    true
}

impl BoundingBox {
    /// Flexible rectangle centered on `position`.
    pub fn rect(id: impl Into<String>, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            shape: BoxShape::Rect,
            position,
            width,
            height,
            priority: 0,
            flexible: true,
            anchors: Vec::new(),
        }
    }

    /// Flexible ellipse centered on `position`.
    pub fn ellipse(id: impl Into<String>, position: Point, width: f64, height: f64) -> Self {
        Self {
            shape: BoxShape::Ellipse,
            ..Self::rect(id, position, width, height)
        }
    }

    /// Set the placement priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Pin the box to its requested position.
    pub fn fixed(mut self) -> Self {
        self.flexible = false;
        self
    }

    /// Set the alternative centers.
    pub fn with_anchors(mut self, anchors: impl IntoIterator<Item = Point>) -> Self {
        self.anchors = anchors.into_iter().collect();
        self
    }

    fn is_degenerate(&self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
            && self.position.x.is_finite()
            && self.position.y.is_finite())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tuning for [`place`].
pub struct LayoutOptions {
    /// Candidates whose footprint leaves these bounds are rejected.
    pub bounds: Option<Rect>,
    /// Distance between nudge rings, in pixels.
    pub nudge_step: f64,
    /// Largest nudge distance tried, in pixels.
    pub max_nudge: f64,
    /// Number of evenly spaced directions per nudge ring, starting to the right.
    pub directions: u32,
    /// Minimum gap kept between two footprints.
    pub margin: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            bounds: None,
            nudge_step: 8.0,
            max_nudge: 240.0,
            directions: 16,
            margin: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Final placement of one box.
pub struct ResolvedPosition {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// True when the box ended up away from its requested position.
    pub displaced: bool,
    /// Set when one of the alternative anchors was used.
    pub anchor_index: Option<usize>,
    /// Remaining overlap with earlier boxes; zero unless the layout overflowed.
    pub overlap_area: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Recoverable problem found by [`place`].
pub enum LayoutWarning {
    /// No free candidate existed; the least-overlapping one was kept.
    Overflow {
        /// Box identifier.
        id: String,
        /// Overlap left at the kept position.
        overlap_area: f64,
    },
    /// No candidate fit inside the bounds; the requested position was kept.
    OutOfBounds {
        /// Box identifier.
        id: String,
        /// Overlap at the requested position, often zero.
        overlap_area: f64,
    },
    /// A second box reused an id and was skipped.
    DuplicateId {
        /// Box identifier.
        id: String,
    },
    /// A box with non-positive or non-finite geometry was skipped.
    DegenerateBox {
        /// Box identifier.
        id: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Output of [`place`].
pub struct LayoutResult {
    /// Placement per box id.
    pub positions: BTreeMap<String, ResolvedPosition>,
    /// Problems found while placing, in placement order.
    pub warnings: Vec<LayoutWarning>,
}

#[derive(Clone, Copy, Debug)]
struct Footprint {
    shape: BoxShape,
    rect: Rect,
}

impl Footprint {
    fn new(b: &BoundingBox, center: Point, margin: f64) -> Self {
        let half = Vec2::new(b.width / 2.0, b.height / 2.0);
        let rect =
            Rect::from_points(center - half, center + half).inflate(margin / 2.0, margin / 2.0);
        Self {
            shape: b.shape,
            rect,
        }
    }

    fn contains(&self, p: Point) -> bool {
        match self.shape {
            BoxShape::Rect => {
                p.x >= self.rect.x0
                    && p.x <= self.rect.x1
                    && p.y >= self.rect.y0
                    && p.y <= self.rect.y1
            }
            BoxShape::Ellipse => {
                let c = self.rect.center();
                let rx = self.rect.width() / 2.0;
                let ry = self.rect.height() / 2.0;
                let dx = (p.x - c.x) / rx;
                let dy = (p.y - c.y) / ry;
                dx * dx + dy * dy <= 1.0
            }
        }
    }

    fn inside(&self, bounds: Rect) -> bool {
        self.rect.x0 >= bounds.x0
            && self.rect.y0 >= bounds.y0
            && self.rect.x1 <= bounds.x1
            && self.rect.y1 <= bounds.y1
    }
}

/// Shared area of two footprints. Exact for two rects, sampled otherwise.
fn overlap_area(a: &Footprint, b: &Footprint) -> f64 {
    let inter = a.rect.intersect(b.rect);
    let area = inter.area();
    if area <= 0.0 {
        return 0.0;
    }
    if a.shape == BoxShape::Rect && b.shape == BoxShape::Rect {
        return area;
    }
    let n = OVERLAP_SAMPLES;
    let cw = inter.width() / n as f64;
    let ch = inter.height() / n as f64;
    let mut hits = 0usize;
    for i in 0..n {
        for j in 0..n {
            let p = Point::new(
                inter.x0 + (i as f64 + 0.5) * cw,
                inter.y0 + (j as f64 + 0.5) * ch,
            );
            if a.contains(p) && b.contains(p) {
                hits += 1;
            }
        }
    }
    area * hits as f64 / (n * n) as f64
}

fn total_overlap(fp: &Footprint, placed: &[Footprint]) -> f64 {
    placed.iter().map(|other| overlap_area(fp, other)).sum()
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    center: Point,
    anchor_index: Option<usize>,
}

/// Default position, then nudge rings ordered by distance, then the anchors.
fn candidates(b: &BoundingBox, opts: &LayoutOptions) -> Vec<Candidate> {
    let mut out = vec![Candidate {
        center: b.position,
        anchor_index: None,
    }];
    if opts.nudge_step > 0.0 && opts.directions > 0 {
        let rings = (opts.max_nudge / opts.nudge_step).floor().max(0.0) as u32;
        for ring in 1..=rings {
            let dist = f64::from(ring) * opts.nudge_step;
            for d in 0..opts.directions {
                let angle = std::f64::consts::TAU * f64::from(d) / f64::from(opts.directions);
                out.push(Candidate {
                    center: b.position + Vec2::from_angle(angle) * dist,
                    anchor_index: None,
                });
            }
        }
    }
    out.extend(b.anchors.iter().enumerate().map(|(i, &center)| Candidate {
        center,
        anchor_index: Some(i),
    }));
    out
}

/// Places every box without overlap where possible.
///
/// Fixed boxes go first, then flexible boxes; within each group higher priority goes
/// first and ties keep input order. Identical input always gives identical output.
#[tracing::instrument(skip_all, fields(boxes = boxes.len()))]
pub fn place(boxes: &[BoundingBox], opts: &LayoutOptions) -> LayoutResult {
    let mut result = LayoutResult::default();
    let mut seen = HashSet::<&str>::new();
    let mut accepted = Vec::<&BoundingBox>::with_capacity(boxes.len());
    for b in boxes {
        if b.is_degenerate() {
            tracing::warn!(id = %b.id, "skipping degenerate layout box");
            result.warnings.push(LayoutWarning::DegenerateBox { id: b.id.clone() });
            continue;
        }
        if !seen.insert(b.id.as_str()) {
            tracing::warn!(id = %b.id, "skipping duplicate layout box");
            result.warnings.push(LayoutWarning::DuplicateId { id: b.id.clone() });
            continue;
        }
        accepted.push(b);
    }

    // Stable sort keeps input order among equal keys.
    accepted.sort_by_key(|b| (b.flexible, std::cmp::Reverse(b.priority)));

    let mut placed = Vec::<Footprint>::with_capacity(accepted.len());
    for b in accepted {
        let (pos, fp) = if b.flexible {
            place_flexible(b, opts, &placed, &mut result.warnings)
        } else {
            let fp = Footprint::new(b, b.position, opts.margin);
            let pos = ResolvedPosition {
                x: b.position.x,
                y: b.position.y,
                displaced: false,
                anchor_index: None,
                overlap_area: total_overlap(&fp, &placed),
            };
            (pos, fp)
        };
        placed.push(fp);
        result.positions.insert(b.id.clone(), pos);
    }
    result
}

fn place_flexible(
    b: &BoundingBox,
    opts: &LayoutOptions,
    placed: &[Footprint],
    warnings: &mut Vec<LayoutWarning>,
) -> (ResolvedPosition, Footprint) {
    let resolved = |c: Candidate, fp: Footprint, overlap: f64| {
        let pos = ResolvedPosition {
            x: c.center.x,
            y: c.center.y,
            displaced: c.center != b.position,
            anchor_index: c.anchor_index,
            overlap_area: overlap,
        };
        (pos, fp)
    };

    let mut best: Option<(Candidate, Footprint, f64)> = None;
    for c in candidates(b, opts) {
        let fp = Footprint::new(b, c.center, opts.margin);
        if opts.bounds.is_some_and(|bounds| !fp.inside(bounds)) {
            continue;
        }
        let overlap = total_overlap(&fp, placed);
        if overlap == 0.0 {
            return resolved(c, fp, 0.0);
        }
        if best.as_ref().is_none_or(|(_, _, o)| overlap < *o) {
            best = Some((c, fp, overlap));
        }
    }

    if let Some((c, fp, overlap)) = best {
        tracing::warn!(id = %b.id, overlap, "layout overflow; keeping least-overlapping position");
        warnings.push(LayoutWarning::Overflow {
            id: b.id.clone(),
            overlap_area: overlap,
        });
        return resolved(c, fp, overlap);
    }

    let c = Candidate {
        center: b.position,
        anchor_index: None,
    };
    let fp = Footprint::new(b, c.center, opts.margin);
    let overlap = total_overlap(&fp, placed);
    tracing::warn!(id = %b.id, overlap, "no position fits inside the bounds; keeping requested");
    warnings.push(LayoutWarning::OutOfBounds {
        id: b.id.clone(),
        overlap_area: overlap,
    });
    resolved(c, fp, overlap)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/collision.rs"]
mod tests;
