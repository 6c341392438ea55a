//! Seeded breadth-first flood growth over the comparator set.
use std::collections::{HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::options::SegmentationOptions;
use super::FrameInputs;
use crate::compare::{
    angular_dissimilarity, color_dissimilarity, positional_dissimilarity, Accumulator, Comparator,
};
use crate::error::SegmentationError;
use crate::grid::{ColorGrid, LabelGrid, NormalGrid, PointGrid, EMPTY_LABEL};

/// A comparator resolved against the field it reads, so scoring needs no
/// per-edge field lookups.
enum BoundComparator<'a> {
    Angular { normals: &'a NormalGrid, scale: f32 },
    Positional { points: &'a PointGrid, scale: f32 },
    Color { color: &'a ColorGrid, scale: f32 },
}

impl BoundComparator<'_> {
    #[inline]
    fn score(&self, a: usize, b: usize) -> f32 {
        match self {
            BoundComparator::Angular { normals, scale } => {
                angular_dissimilarity(&normals.data[a], &normals.data[b], *scale)
            }
            BoundComparator::Positional { points, scale } => {
                positional_dissimilarity(&points.data[a], &points.data[b], *scale)
            }
            BoundComparator::Color { color, scale } => {
                color_dissimilarity(color.data[a], color.data[b], *scale)
            }
        }
    }
}

/// Resolve each configured comparator against its input field and validate
/// that every present grid agrees on the frame dimensions.
fn bind_comparators<'a>(
    inputs: &'a FrameInputs,
    comparators: &[Comparator],
) -> Result<(Vec<BoundComparator<'a>>, usize, usize), SegmentationError> {
    if comparators.is_empty() {
        return Err(SegmentationError::NoComparators);
    }

    let mut bound = Vec::with_capacity(comparators.len());
    for cmp in comparators {
        let b = match cmp {
            Comparator::Angular { scale } => BoundComparator::Angular {
                normals: inputs
                    .normals
                    .as_ref()
                    .ok_or(SegmentationError::MissingField { field: "normals" })?,
                scale: *scale,
            },
            Comparator::Positional { scale } => BoundComparator::Positional {
                points: inputs
                    .points
                    .as_ref()
                    .ok_or(SegmentationError::MissingField { field: "points" })?,
                scale: *scale,
            },
            Comparator::Color { scale } => BoundComparator::Color {
                color: inputs
                    .color
                    .as_ref()
                    .ok_or(SegmentationError::MissingField { field: "color" })?,
                scale: *scale,
            },
        };
        bound.push(b);
    }

    // Frame dimensions come from the first field; every other present field
    // must match, whether a comparator reads it or not.
    let (w, h) = inputs.dims().unwrap_or((0, 0));
    if w == 0 || h == 0 {
        return Err(SegmentationError::EmptyFrame { w, h });
    }
    let checks: [(&'static str, Option<(usize, usize)>); 3] = [
        ("points", inputs.points.as_ref().map(|g| (g.w, g.h))),
        ("normals", inputs.normals.as_ref().map(|g| (g.w, g.h))),
        ("color", inputs.color.as_ref().map(|g| (g.w, g.h))),
    ];
    for (field, dims) in checks {
        if let Some((gw, gh)) = dims {
            if gw != w || gh != h {
                return Err(SegmentationError::DimensionMismatch {
                    field,
                    got_w: gw,
                    got_h: gh,
                    w,
                    h,
                });
            }
        }
    }

    Ok((bound, w, h))
}

/// Seed, grow and return the raw (unsmoothed) label field plus the number
/// of segments grown.
pub(super) fn run_pass(
    inputs: &FrameInputs,
    opts: &SegmentationOptions,
) -> Result<(LabelGrid, usize), SegmentationError> {
    let (bound, w, h) = bind_comparators(inputs, &opts.comparators)?;
    let mut grower = Grower {
        width: w,
        height: h,
        bound,
        accumulator: opts.accumulator,
        threshold: opts.threshold,
        labels: LabelGrid::filled(w, h, EMPTY_LABEL),
        closed: vec![0u8; w * h],
        open: VecDeque::with_capacity(256),
        scores: Vec::with_capacity(opts.comparators.len()),
        used_tags: HashSet::new(),
        rng: StdRng::seed_from_u64(opts.label_seed),
        segments: 0,
    };
    grower.run(opts.seed_stride.max(1));
    Ok((grower.labels, grower.segments))
}

struct Grower<'a> {
    width: usize,
    height: usize,
    bound: Vec<BoundComparator<'a>>,
    accumulator: Accumulator,
    threshold: f32,
    labels: LabelGrid,
    /// Pass-wide destination gate: an edge destination is evaluated once.
    closed: Vec<u8>,
    /// BFS queue private to the segment currently growing.
    open: VecDeque<usize>,
    scores: Vec<f32>,
    used_tags: HashSet<[u8; 3]>,
    rng: StdRng,
    segments: usize,
}

impl Grower<'_> {
    fn run(&mut self, stride: usize) {
        for y in (0..self.height).step_by(stride) {
            for x in (0..self.width).step_by(stride) {
                self.grow_segment(y * self.width + x);
            }
        }
    }

    fn grow_segment(&mut self, seed: usize) {
        if self.labels.data[seed] != EMPTY_LABEL {
            return;
        }
        let tag = self.fresh_tag();
        self.segments += 1;
        self.open.clear();
        self.open.push_back(seed);

        while let Some(idx) = self.open.pop_front() {
            if self.labels.data[idx] != EMPTY_LABEL {
                continue;
            }
            self.labels.data[idx] = tag;

            let x = idx % self.width;
            let y = idx / self.width;
            if x + 1 < self.width {
                self.try_edge(idx, idx + 1);
            }
            if x > 0 {
                self.try_edge(idx, idx - 1);
            }
            if y > 0 {
                self.try_edge(idx, idx - self.width);
            }
            if y + 1 < self.height {
                self.try_edge(idx, idx + self.width);
            }
        }
    }

    /// Closed-set gate, then the acceptance rule: combined dissimilarity of
    /// the configured modalities strictly below the threshold.
    fn try_edge(&mut self, src: usize, dst: usize) {
        if self.closed[dst] != 0 {
            return;
        }
        self.closed[dst] = 1;

        self.scores.clear();
        for cmp in &self.bound {
            self.scores.push(cmp.score(src, dst));
        }
        if self.accumulator.combine(&self.scores) < self.threshold {
            self.open.push_back(dst);
        }
    }

    /// Random non-zero tag, distinct from every tag already handed out in
    /// this pass.
    fn fresh_tag(&mut self) -> [u8; 3] {
        loop {
            let tag: [u8; 3] = [self.rng.random(), self.rng.random(), self.rng.random()];
            if tag != EMPTY_LABEL && self.used_tags.insert(tag) {
                return tag;
            }
        }
    }
}
