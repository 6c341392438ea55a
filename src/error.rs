//! Structural failure types.
//!
//! Per-pixel numeric degeneracy (singular system, zero-length cross product,
//! out-of-range depth) is never an error: those pixels receive sentinel
//! values locally. The variants here cover the structural failures that
//! abort a whole frame: mismatched grid dimensions, empty buffers, or a
//! comparator whose input field was never delivered.
use thiserror::Error;

/// Errors aborting a normal-estimation frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalEstimationError {
    /// Input point field has a zero dimension.
    #[error("point field is empty ({w}x{h})")]
    EmptyInput { w: usize, h: usize },
}

/// Errors aborting a segmentation pass. No partial label field is ever
/// published alongside one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentationError {
    /// Frame has a zero dimension.
    #[error("frame is empty ({w}x{h})")]
    EmptyFrame { w: usize, h: usize },

    /// Two input grids disagree on the pixel lattice.
    #[error("grid dimension mismatch: {field} is {got_w}x{got_h}, frame is {w}x{h}")]
    DimensionMismatch {
        field: &'static str,
        got_w: usize,
        got_h: usize,
        w: usize,
        h: usize,
    },

    /// A configured comparator needs a field the frame never delivered.
    #[error("comparator requires the {field} field but it was not provided")]
    MissingField { field: &'static str },

    /// No comparator configured; acceptance would be vacuous.
    #[error("no comparators configured")]
    NoComparators,
}
