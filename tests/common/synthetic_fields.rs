use depth_segmenter::prelude::*;
use nalgebra::Vector3;

/// Pixel pitch in meters used by the synthetic scenes.
pub const PITCH: f32 = 0.001;

/// Point field sampling a fronto-parallel plane at depth `z`.
pub fn flat_plane(width: usize, height: usize, z: f32) -> PointGrid {
    assert!(width > 0 && height > 0, "frame dimensions must be positive");
    let mut points = PointGrid::filled(width, height, Vector3::zeros());
    for y in 0..height {
        for x in 0..width {
            points.set(x, y, Vector3::new(x as f32 * PITCH, y as f32 * PITCH, z));
        }
    }
    points
}

/// Two fronto-parallel patches split at column `split_x`: depth `z_left`
/// before it, `z_right` from it on.
pub fn stepped_planes(
    width: usize,
    height: usize,
    split_x: usize,
    z_left: f32,
    z_right: f32,
) -> PointGrid {
    let mut points = flat_plane(width, height, z_left);
    for y in 0..height {
        for x in split_x..width {
            let mut p = points.get(x, y);
            p.z = z_right;
            points.set(x, y, p);
        }
    }
    points
}

/// Uniform color frame.
pub fn uniform_color(width: usize, height: usize, rgb: [u8; 3]) -> ColorGrid {
    ColorGrid::filled(width, height, rgb)
}
