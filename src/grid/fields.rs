//! Concrete field types and their reserved sentinel values.
use nalgebra::Vector3;

use super::buffer::Grid;

/// Per-pixel 3D coordinates in meters, as delivered by the range sensor.
pub type PointGrid = Grid<Vector3<f32>>;

/// Per-pixel unit surface normals. Undetermined pixels hold [`INVALID_NORMAL`].
pub type NormalGrid = Grid<Vector3<f32>>;

/// Per-pixel 8-bit color triplets.
pub type ColorGrid = Grid<[u8; 3]>;

/// Per-pixel segment tags; value equality means same segment.
pub type LabelGrid = Grid<[u8; 3]>;

/// Maximum coordinate magnitude of a measured point (meters). Anything at or
/// beyond this marks the pixel as unmeasured.
pub const MAX_RANGE: f32 = 10.0;

/// Reserved normal for pixels where estimation failed or had no support.
/// Not a unit vector, and its direction lies outside the z ≥ 0 hemisphere
/// the estimators emit, so it never collides with a real normal.
pub const INVALID_NORMAL: Vector3<f32> = Vector3::new(-1.0, -1.0, -1.0);

/// Label value of pixels no segment claimed.
pub const EMPTY_LABEL: [u8; 3] = [0, 0, 0];

/// True when the point is a real measurement: finite and within [`MAX_RANGE`]
/// on every axis.
#[inline]
pub fn is_measured_point(p: &Vector3<f32>) -> bool {
    p.x.is_finite()
        && p.y.is_finite()
        && p.z.is_finite()
        && p.x.abs() < MAX_RANGE
        && p.y.abs() < MAX_RANGE
        && p.z.abs() < MAX_RANGE
}

/// True when the normal is a real estimate rather than [`INVALID_NORMAL`]
/// or the untouched zero border.
#[inline]
pub fn is_valid_normal(n: &Vector3<f32>) -> bool {
    *n != INVALID_NORMAL && n.norm_squared() > 0.0
}
