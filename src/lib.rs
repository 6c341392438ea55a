#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod compare;
pub mod error;
pub mod grid;
pub mod normals;
pub mod pipeline;
pub mod segment;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the per-frame pipeline and the two stages it drives.
pub use crate::normals::{estimate_normals_bilateral, estimate_normals_cross, NormalEstimation};
pub use crate::pipeline::{FramePipeline, InputSet};
pub use crate::segment::{segment_frame, FrameInputs, SegmentationOptions};

// Acceptance-rule building blocks.
pub use crate::compare::{Accumulator, Comparator};
pub use crate::error::{NormalEstimationError, SegmentationError};

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::compare::{Accumulator, Comparator};
    pub use crate::grid::{ColorGrid, LabelGrid, NormalGrid, PointGrid};
    pub use crate::normals::{BilateralOptions, CrossProductOptions, NormalEstimation};
    pub use crate::pipeline::{FramePipeline, InputSet};
    pub use crate::segment::{segment_frame, FrameInputs, SegmentationOptions};
}
