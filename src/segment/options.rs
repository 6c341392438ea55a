use serde::{Deserialize, Serialize};

use crate::compare::{Accumulator, Comparator};

/// Options controlling one segmentation pass.
///
/// Scales live inside each [`Comparator`]; after normalization the combined
/// score is unit-agnostic and compared against the single `threshold`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentationOptions {
    /// Stride of the regular seed lattice in pixels (both axes).
    pub seed_stride: usize,
    /// Global acceptance threshold on the combined dissimilarity.
    pub threshold: f32,
    /// Strategy combining the per-modality scores.
    pub accumulator: Accumulator,
    /// Ordered modalities evaluated on every candidate edge.
    pub comparators: Vec<Comparator>,
    /// Aperture of the per-channel label median filter; `None` skips the
    /// smoothing pass.
    pub median_aperture: Option<usize>,
    /// Seed of the label-tag generator. Two passes over identical inputs
    /// with the same options reproduce the identical label field.
    pub label_seed: u64,
}

impl Default for SegmentationOptions {
    fn default() -> Self {
        Self {
            seed_stride: 10,
            threshold: 1.0,
            accumulator: Accumulator::Sum,
            comparators: vec![
                Comparator::Angular { scale: 5.0 },
                Comparator::Positional { scale: 0.05 },
            ],
            median_aperture: Some(3),
            label_seed: 0x5eed,
        }
    }
}
