//! Surface-normal estimation from a dense point field.
//!
//! Two estimators produce a [`NormalGrid`](crate::grid::NormalGrid) matching
//! the input dimensions:
//!
//! - [`estimate_normals_cross`]: accumulates discontinuity-gated row/column
//!   derivatives over a square window, weighting each neighbor by its 3D
//!   proximity to the center point, and crosses the two sums.
//! - [`estimate_normals_bilateral`]: fits a 2-parameter depth plane through
//!   8 ring samples with bilateral gating on the depth difference, solving
//!   the 2×2 normal equations in closed form.
//!
//! Both emit unit normals in the z ≥ 0 hemisphere. Per-pixel degeneracy
//! (no support, singular system, unmeasured center) yields the
//! [`INVALID_NORMAL`](crate::grid::INVALID_NORMAL) sentinel; the border
//! margin stays at the zero vector. Rows are processed in parallel; the
//! per-pixel work is independent and the output deterministic.
//!
//! Complexity
//! - Cross-product: O(W·H·window²) plus one O(W·H) derivative pass.
//! - Bilateral: O(W·H) with 8 samples per pixel.

mod bilateral;
mod cross;
mod options;

pub use bilateral::estimate_normals_bilateral;
pub use cross::estimate_normals_cross;
pub use options::{BilateralOptions, CrossProductOptions};

use serde::{Deserialize, Serialize};

use crate::error::NormalEstimationError;
use crate::grid::{NormalGrid, PointGrid};

/// Estimator selection with its options, for callers configuring the stage
/// once and running it per frame.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalEstimation {
    CrossProduct(CrossProductOptions),
    Bilateral(BilateralOptions),
}

impl Default for NormalEstimation {
    fn default() -> Self {
        NormalEstimation::Bilateral(BilateralOptions::default())
    }
}

impl NormalEstimation {
    /// Run the configured estimator over one frame.
    pub fn estimate(&self, points: &PointGrid) -> Result<NormalGrid, NormalEstimationError> {
        match self {
            NormalEstimation::CrossProduct(opts) => estimate_normals_cross(points, opts),
            NormalEstimation::Bilateral(opts) => estimate_normals_bilateral(points, opts),
        }
    }
}
