//! Pairwise dissimilarity scores for the segmentation modalities.
//!
//! Each modality maps the values at two adjacent pixels to a non-negative
//! score, pre-normalized by a caller-supplied scale so scores from different
//! modalities share one unit and can be combined against a single threshold:
//!
//! - angular: angle in degrees between two unit normals;
//! - positional: Euclidean distance between two 3D points;
//! - color: Euclidean distance between two color triplets, normalized to
//!   the triplet's full-scale range.
//!
//! The scoring functions are pure and independently callable; [`Comparator`]
//! tags one of them with its scale so the engine can carry an arbitrary
//! ordered list of modalities and dispatch via `match`.
//!
//! Notes
//! - Sentinel inputs degrade to a zero score rather than an error: an
//!   out-of-[0°,180°] (NaN) angle and a point distance at or beyond the
//!   sanity bound both read as "no evidence against merging". Gating out
//!   invalid pixels is the caller's concern.

mod accumulate;

pub use accumulate::Accumulator;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Point distances at or beyond this are assumed to involve a sentinel or
/// unmeasured point and score zero.
const DISTANCE_SANITY_BOUND: f32 = 10.0;

/// Largest possible Euclidean distance between two 8-bit color triplets.
const COLOR_FULL_SCALE: f32 = 441.672_94; // 255 * sqrt(3)

/// Angle in degrees between two unit normals, divided by `scale`.
///
/// Values outside [0°, 180°] (the `acos` fallback on degenerate input)
/// are treated as zero.
#[inline]
pub fn angular_dissimilarity(na: &Vector3<f32>, nb: &Vector3<f32>, scale: f32) -> f32 {
    let deg = na.dot(nb).acos().to_degrees();
    if !(0.0..=180.0).contains(&deg) {
        return 0.0;
    }
    deg / scale
}

/// Euclidean distance between two 3D points, divided by `scale`.
///
/// Distances at or beyond the sanity bound score zero.
#[inline]
pub fn positional_dissimilarity(pa: &Vector3<f32>, pb: &Vector3<f32>, scale: f32) -> f32 {
    let d = (pa - pb).norm();
    if d >= DISTANCE_SANITY_BOUND {
        return 0.0;
    }
    d / scale
}

/// Euclidean distance between two color triplets, normalized to the
/// full-scale range and divided by `scale`.
#[inline]
pub fn color_dissimilarity(ca: [u8; 3], cb: [u8; 3], scale: f32) -> f32 {
    let dr = ca[0] as f32 - cb[0] as f32;
    let dg = ca[1] as f32 - cb[1] as f32;
    let db = ca[2] as f32 - cb[2] as f32;
    let d = (dr * dr + dg * dg + db * db).sqrt() / COLOR_FULL_SCALE;
    d / scale
}

/// One modality of the segmentation acceptance rule, tagged with its
/// normalization scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Normal-orientation difference; `scale` in degrees.
    Angular { scale: f32 },
    /// 3D point distance; `scale` in meters.
    Positional { scale: f32 },
    /// Color distance; `scale` in full-scale units.
    Color { scale: f32 },
}
