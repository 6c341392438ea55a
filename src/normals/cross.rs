//! Neighborhood-weighted cross-product normal estimation.
//!
//! A first pass builds two derivative fields over the point grid: the "row"
//! derivative (right neighbor minus pixel) and the "column" derivative
//! (pixel below minus pixel). A derivative spanning a depth step larger
//! than the discontinuity bound, or touching an unmeasured point, is
//! zeroed. The per-pixel pass then sums both derivative fields over a
//! square window, weighting each neighbor by `1 - d/dist` for its 3D
//! distance `d` to the center, and takes the cross product of the two sums
//! as the surface normal.
use nalgebra::Vector3;
use rayon::prelude::*;

use super::options::CrossProductOptions;
use crate::error::NormalEstimationError;
use crate::grid::{
    is_measured_point, Grid, GridView, GridViewMut, NormalGrid, PointGrid, INVALID_NORMAL,
};

/// Estimate a normal field from a point field via weighted cross products.
///
/// Interior pixels (outside the `window` margin) receive a unit normal in
/// the z ≥ 0 hemisphere or [`INVALID_NORMAL`] when the accumulated cross
/// product is degenerate; the border margin stays at the zero vector.
pub fn estimate_normals_cross(
    points: &PointGrid,
    opts: &CrossProductOptions,
) -> Result<NormalGrid, NormalEstimationError> {
    if points.is_empty() {
        return Err(NormalEstimationError::EmptyInput {
            w: points.w,
            h: points.h,
        });
    }

    let w = points.w;
    let h = points.h;
    let (der_row, der_col) = derivative_fields(points, opts.max_depth_step);

    let margin = opts.window;
    let y_end = h.saturating_sub(margin + 1);
    let x_end = w.saturating_sub(margin + 1);

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
                *out = normal_at(points, &der_row, &der_col, x, y, opts);
            }
        });

    Ok(normals)
}

/// Right-neighbor and below-neighbor differences, zeroed across depth
/// discontinuities and unmeasured endpoints. The last row/column stay zero.
fn derivative_fields(
    points: &PointGrid,
    max_depth_step: f32,
) -> (Grid<Vector3<f32>>, Grid<Vector3<f32>>) {
    let w = points.w;
    let h = points.h;
    let mut der_row = Grid::filled(w, h, Vector3::zeros());
    let mut der_col = Grid::filled(w, h, Vector3::zeros());

    for y in 0..h.saturating_sub(1) {
        let line = points.row(y);
        let line_below = points.row(y + 1);
        let out_row = der_row.row_mut(y);
        let out_col = der_col.row_mut(y);
        for x in 0..w.saturating_sub(1) {
            let p = line[x];
            if !is_measured_point(&p) {
                continue;
            }
            let right = line[x + 1];
            if is_measured_point(&right) {
                let d = right - p;
                if d.z.abs() <= max_depth_step {
                    out_row[x] = d;
                }
            }
            let below = line_below[x];
            if is_measured_point(&below) {
                let d = below - p;
                if d.z.abs() <= max_depth_step {
                    out_col[x] = d;
                }
            }
        }
    }

    (der_row, der_col)
}

fn normal_at(
    points: &PointGrid,
    der_row: &Grid<Vector3<f32>>,
    der_col: &Grid<Vector3<f32>>,
    x: usize,
    y: usize,
    opts: &CrossProductOptions,
) -> Vector3<f32> {
    let center = points.get(x, y);
    if !is_measured_point(&center) || opts.dist <= 0.0 {
        return INVALID_NORMAL;
    }

    let win = opts.window as isize;
    let mut acc_row = Vector3::zeros();
    let mut acc_col = Vector3::zeros();
    for dy in -win..=win {
        let ny = (y as isize + dy) as usize;
        for dx in -win..=win {
            let nx = (x as isize + dx) as usize;
            let d = (points.get(nx, ny) - center).norm();
            if d <= opts.dist {
                let sc = 1.0 - d / opts.dist;
                acc_row += der_row.get(nx, ny) * sc;
                acc_col += der_col.get(nx, ny) * sc;
            }
        }
    }

    let cross = acc_row.cross(&acc_col);
    let norm = cross.norm();
    if !norm.is_finite() || norm <= 0.0 {
        return INVALID_NORMAL;
    }
    let n = cross / norm;
    // Canonical hemisphere: z component non-negative.
    if n.z < 0.0 {
        -n
    } else {
        n
    }
}
