//! Multimodal region-growing segmentation.
//!
//! This module partitions a frame into spatially-connected, feature-coherent
//! regions. The algorithm performs:
//!
//! - Seeding on a fixed-stride regular lattice covering the whole frame, in
//!   row-major order. Growing from a lattice rather than from every pixel
//!   bounds queue churn and still guarantees full-frame coverage when early
//!   regions fail to propagate.
//! - Breadth-first flood growth per seed: a pixel is labeled when popped
//!   from the open queue, and each of its 4 axis-aligned neighbors is tested
//!   through the configured comparator set. An edge is accepted when the
//!   accumulated dissimilarity stays below the global threshold; the
//!   accepted neighbor is pushed even if not yet labeled, and labeling on
//!   pop deduplicates naturally.
//! - Closed-set gating per destination pixel across the whole pass (not per
//!   segment), so the same boundary edge is never re-evaluated as different
//!   segments approach it from different sides. Comparator evaluation is the
//!   dominant cost.
//! - Optional per-channel median smoothing of the label field to remove
//!   speckle before it is handed to the caller.
//!
//! Labels are random non-zero color triplets, distinct within a pass;
//! uniqueness carries the segmentation, not the values. Passes with equal
//! inputs, options and label seed produce identical partitions.
//!
//! Failure semantics: mismatched grid dimensions, an empty frame, or a
//! comparator whose field was never delivered abort the pass with an error
//! before any growth happens. No partial label field is ever published.
//!
//! Complexity
//! - Each pixel is labeled at most once and each destination evaluated at
//!   most once, giving O(W·H · modalities) per pass.

mod engine;
mod median;
mod options;

pub use median::median_filter_labels;
pub use options::SegmentationOptions;

use log::debug;
use std::time::Instant;

use crate::error::SegmentationError;
use crate::grid::{ColorGrid, LabelGrid, NormalGrid, PointGrid};

/// Immutable per-frame input snapshot handed over to a pass.
///
/// Each field is owned by the pass for its duration; producers hand in a
/// copy at ingestion so nothing can mutate a grid mid-pass.
#[derive(Clone, Debug, Default)]
pub struct FrameInputs {
    pub points: Option<PointGrid>,
    pub normals: Option<NormalGrid>,
    pub color: Option<ColorGrid>,
}

impl FrameInputs {
    /// Dimensions of the first field present, if any.
    pub fn dims(&self) -> Option<(usize, usize)> {
        if let Some(g) = &self.points {
            Some((g.w, g.h))
        } else if let Some(g) = &self.normals {
            Some((g.w, g.h))
        } else {
            self.color.as_ref().map(|g| (g.w, g.h))
        }
    }
}

/// Run one segmentation pass over a frame.
///
/// Seeds, grows and finalizes as configured, returning the label field.
/// Any structural failure leaves no output behind.
pub fn segment_frame(
    inputs: &FrameInputs,
    opts: &SegmentationOptions,
) -> Result<LabelGrid, SegmentationError> {
    let start = Instant::now();
    let (labels, segments) = engine::run_pass(inputs, opts)?;

    let labels = match opts.median_aperture {
        Some(aperture) => median_filter_labels(&labels, aperture),
        None => labels,
    };

    debug!(
        "Segmentation: {} segments over {}x{} in {:.3} ms",
        segments,
        labels.w,
        labels.h,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(labels)
}

#[cfg(test)]
mod tests;
