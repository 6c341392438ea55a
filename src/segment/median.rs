//! Per-channel median smoothing of the label field.
use crate::grid::{GridView, LabelGrid};

/// Median-filter each channel of the label field over an `aperture`-sized
/// square window (even apertures are widened by one). Border handling
/// clamps sample coordinates to the frame.
pub fn median_filter_labels(labels: &LabelGrid, aperture: usize) -> LabelGrid {
    let k = aperture | 1;
    if labels.is_empty() || k <= 1 {
        return labels.clone();
    }
    let r = (k / 2) as isize;
    let w = labels.w;
    let h = labels.h;

    let mut out = labels.clone();
    let mut window: Vec<u8> = Vec::with_capacity(k * k);
    for y in 0..h {
        for x in 0..w {
            let mut px = [0u8; 3];
            for (c, out_c) in px.iter_mut().enumerate() {
                window.clear();
                for dy in -r..=r {
                    let sy = (y as isize + dy).clamp(0, h as isize - 1) as usize;
                    let line = labels.row(sy);
                    for dx in -r..=r {
                        let sx = (x as isize + dx).clamp(0, w as isize - 1) as usize;
                        window.push(line[sx][c]);
                    }
                }
                window.sort_unstable();
                *out_c = window[window.len() / 2];
            }
            out.set(x, y, px);
        }
    }
    out
}
