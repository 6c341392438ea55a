//! Bilateral-weighted least-squares normal estimation over a fixed ring.
//!
//! For each pixel below the depth validity bound, the depth differences at
//! 8 offsets on a square ring feed a 2×2 symmetric system `A·g = b` with
//! the offset coordinates as the regression design; a sample only
//! contributes when its depth difference stays below the bilateral gate,
//! so the fit never mixes depths across a discontinuity. The system is
//! solved by the closed-form determinant rule and the fitted gradients
//! become the normal `(f·ddx, f·ddy, −det·d)`, oriented into the z ≥ 0
//! hemisphere.
use nalgebra::Vector3;
use rayon::prelude::*;

use super::options::BilateralOptions;
use crate::error::NormalEstimationError;
use crate::grid::{is_measured_point, NormalGrid, PointGrid, INVALID_NORMAL};

/// Estimate a normal field from the depth channel of a point field.
///
/// Interior pixels (outside the `radius` margin) receive a unit normal or
/// [`INVALID_NORMAL`] when the depth is out of range or the accumulated
/// system has non-positive determinant; the border stays at zero.
pub fn estimate_normals_bilateral(
    points: &PointGrid,
    opts: &BilateralOptions,
) -> Result<NormalGrid, NormalEstimationError> {
    if points.is_empty() {
        return Err(NormalEstimationError::EmptyInput {
            w: points.w,
            h: points.h,
        });
    }

    let w = points.w;
    let h = points.h;
    let r = opts.radius as isize;
    let margin = opts.radius;
    let y_end = h.saturating_sub(margin + 1);
    let x_end = w.saturating_sub(margin + 1);

    // 8 ring offsets as (dx, dy).
    let offsets = [
        (-r, -r),
        (0, -r),
        (r, -r),
        (-r, 0),
        (r, 0),
        (-r, r),
        (0, r),
        (r, r),
    ];

    let mut normals = NormalGrid::filled(w, h, Vector3::zeros());
    normals
        .data
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out_row)| {
            if y < margin || y >= y_end {
                return;
            }
            for (x, out) in out_row.iter_mut().enumerate().take(x_end).skip(margin) {
                *out = normal_at(points, x, y, &offsets, opts);
            }
        });

    Ok(normals)
}

fn normal_at(
    points: &PointGrid,
    x: usize,
    y: usize,
    offsets: &[(isize, isize); 8],
    opts: &BilateralOptions,
) -> Vector3<f32> {
    let p = points.get(x, y);
    let d = p.z;
    if !is_measured_point(&p) || d <= 0.0 || d >= opts.distance_threshold {
        return INVALID_NORMAL;
    }

    let mut a00 = 0.0f32;
    let mut a01 = 0.0f32;
    let mut a11 = 0.0f32;
    let mut b0 = 0.0f32;
    let mut b1 = 0.0f32;
    for &(dx, dy) in offsets {
        let sx = (x as isize + dx) as usize;
        let sy = (y as isize + dy) as usize;
        let delta = points.get(sx, sy).z - d;
        if !delta.is_finite() || delta.abs() >= opts.difference_threshold {
            continue;
        }
        let i = dx as f32;
        let j = dy as f32;
        a00 += i * i;
        a01 += i * j;
        a11 += j * j;
        b0 += i * delta;
        b1 += j * delta;
    }

    let det = a00 * a11 - a01 * a01;
    if det <= 0.0 {
        return INVALID_NORMAL;
    }
    let ddx = a11 * b0 - a01 * b1;
    let ddy = -a01 * b0 + a00 * b1;

    let nx = opts.focal * ddx;
    let ny = opts.focal * ddy;
    let nz = -det * d;
    let norm = (nx * nx + ny * ny + nz * nz).sqrt();
    if !norm.is_finite() || norm <= 0.0 {
        return INVALID_NORMAL;
    }
    // Negating flips -det·d into the z ≥ 0 hemisphere.
    Vector3::new(-nx / norm, -ny / norm, -nz / norm)
}
