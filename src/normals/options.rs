use serde::{Deserialize, Serialize};

/// Options for the weighted cross-product estimator.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CrossProductOptions {
    /// Half-width of the square accumulation window in pixels; also the
    /// untouched border margin.
    pub window: usize,
    /// Neighborhood radius in meters. A neighbor's derivatives contribute
    /// with weight `1 - d/dist` when its 3D distance `d` from the center
    /// point is within this radius, and are excluded otherwise.
    pub dist: f32,
    /// Depth-discontinuity bound in meters. Row/column derivatives whose
    /// |Δz| exceeds this are zeroed so no derivative bridges a depth edge.
    pub max_depth_step: f32,
}

impl Default for CrossProductOptions {
    fn default() -> Self {
        Self {
            window: 5,
            dist: 0.02,
            max_depth_step: 0.02,
        }
    }
}

/// Options for the bilateral least-squares estimator.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BilateralOptions {
    /// Ring radius in pixels of the 8 sample offsets; also the untouched
    /// border margin.
    pub radius: usize,
    /// Depth validity bound in meters; pixels at or beyond it receive the
    /// invalid-normal sentinel.
    pub distance_threshold: f32,
    /// Bilateral gate in meters: a ring sample contributes only when its
    /// depth difference from the center stays below this.
    pub difference_threshold: f32,
    /// Focal-length scale applied to the fitted depth gradients.
    pub focal: f32,
}

impl Default for BilateralOptions {
    fn default() -> Self {
        Self {
            radius: 5,
            distance_threshold: 2.0,
            difference_threshold: 0.02,
            focal: 530.0,
        }
    }
}
