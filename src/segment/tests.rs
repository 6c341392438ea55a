use nalgebra::Vector3;
use std::collections::{HashMap, HashSet, VecDeque};

use super::*;
use crate::compare::{Accumulator, Comparator};
use crate::grid::{ColorGrid, LabelGrid, NormalGrid, PointGrid, EMPTY_LABEL};

fn flat_points(w: usize, h: usize, z: f32) -> PointGrid {
    let mut points = PointGrid::filled(w, h, Vector3::zeros());
    for y in 0..h {
        for x in 0..w {
            points.set(x, y, Vector3::new(x as f32 * 0.001, y as f32 * 0.001, z));
        }
    }
    points
}

fn up_normals(w: usize, h: usize) -> NormalGrid {
    NormalGrid::filled(w, h, Vector3::new(0.0, 0.0, 1.0))
}

fn unfiltered(comparators: Vec<Comparator>, threshold: f32) -> SegmentationOptions {
    SegmentationOptions {
        threshold,
        comparators,
        median_aperture: None,
        ..Default::default()
    }
}

/// Count of distinct non-empty labels.
fn label_count(labels: &LabelGrid) -> usize {
    labels
        .data
        .iter()
        .filter(|&&l| l != EMPTY_LABEL)
        .collect::<HashSet<_>>()
        .len()
}

/// Number of pixels carrying the same label as (x, y).
fn segment_size(labels: &LabelGrid, x: usize, y: usize) -> usize {
    let tag = labels.get(x, y);
    labels.data.iter().filter(|&&l| l == tag).count()
}

/// Each non-empty label value must form exactly one 4-connected component.
fn assert_labels_connected(labels: &LabelGrid) {
    let w = labels.w;
    let h = labels.h;
    let mut components: HashMap<[u8; 3], usize> = HashMap::new();
    let mut visited = vec![false; w * h];
    let mut queue = VecDeque::new();
    for start in 0..w * h {
        let tag = labels.data[start];
        if visited[start] || tag == EMPTY_LABEL {
            continue;
        }
        *components.entry(tag).or_insert(0) += 1;
        visited[start] = true;
        queue.push_back(start);
        while let Some(idx) = queue.pop_front() {
            let x = idx % w;
            let y = idx / w;
            let mut neighbors = Vec::with_capacity(4);
            if x + 1 < w {
                neighbors.push(idx + 1);
            }
            if x > 0 {
                neighbors.push(idx - 1);
            }
            if y > 0 {
                neighbors.push(idx - w);
            }
            if y + 1 < h {
                neighbors.push(idx + w);
            }
            for n in neighbors {
                if !visited[n] && labels.data[n] == tag {
                    visited[n] = true;
                    queue.push_back(n);
                }
            }
        }
    }
    for (tag, count) in components {
        assert_eq!(count, 1, "label {tag:?} split into {count} components");
    }
}

#[test]
fn flat_frame_collapses_into_one_segment() {
    let inputs = FrameInputs {
        points: Some(flat_points(32, 24, 1.0)),
        normals: Some(up_normals(32, 24)),
        color: None,
    };
    let opts = unfiltered(
        vec![
            Comparator::Angular { scale: 5.0 },
            Comparator::Positional { scale: 0.05 },
        ],
        10.0,
    );
    let labels = segment_frame(&inputs, &opts).unwrap();
    assert_eq!(label_count(&labels), 1);
    assert_eq!(segment_size(&labels, 0, 0), 32 * 24);
}

#[test]
fn depth_step_splits_the_frame() {
    let mut points = flat_points(20, 16, 1.0);
    for y in 0..16 {
        for x in 10..20 {
            let mut p = points.get(x, y);
            p.z = 1.3;
            points.set(x, y, p);
        }
    }
    let inputs = FrameInputs {
        points: Some(points),
        normals: None,
        color: None,
    };
    let opts = unfiltered(vec![Comparator::Positional { scale: 0.05 }], 1.0);
    let labels = segment_frame(&inputs, &opts).unwrap();
    assert!(label_count(&labels) >= 2, "expected the step to split the frame");
    assert_ne!(labels.get(2, 8), labels.get(17, 8));
    assert_labels_connected(&labels);
}

#[test]
fn same_label_pixels_are_four_connected() {
    // Checkerboard of two depths: every segment must stay connected even
    // though equal depths reappear in disconnected cells.
    let mut points = flat_points(24, 24, 1.0);
    for y in 0..24 {
        for x in 0..24 {
            if ((x / 6) + (y / 6)) % 2 == 1 {
                let mut p = points.get(x, y);
                p.z = 1.5;
                points.set(x, y, p);
            }
        }
    }
    let inputs = FrameInputs {
        points: Some(points),
        normals: None,
        color: None,
    };
    let opts = unfiltered(vec![Comparator::Positional { scale: 0.05 }], 1.0);
    let labels = segment_frame(&inputs, &opts).unwrap();
    assert_labels_connected(&labels);
    assert!(label_count(&labels) >= 4);
}

#[test]
fn identical_passes_produce_identical_partitions() {
    let mut points = flat_points(30, 20, 1.0);
    for y in 0..20 {
        for x in 15..30 {
            let mut p = points.get(x, y);
            p.z = 1.2;
            points.set(x, y, p);
        }
    }
    let inputs = FrameInputs {
        points: Some(points),
        normals: None,
        color: None,
    };
    let opts = unfiltered(vec![Comparator::Positional { scale: 0.05 }], 1.0);
    let first = segment_frame(&inputs, &opts).unwrap();
    let second = segment_frame(&inputs, &opts).unwrap();
    assert_eq!(first, second);
}

#[test]
fn raising_the_threshold_never_shrinks_a_segment() {
    // Depth steps of increasing size at x = 10 and x = 20.
    let mut points = flat_points(30, 1, 1.0);
    for x in 10..30 {
        let mut p = points.get(x, 0);
        p.z = if x < 20 { 1.03 } else { 1.13 };
        points.set(x, 0, p);
    }
    let inputs = FrameInputs {
        points: Some(points),
        normals: None,
        color: None,
    };
    let mut sizes = Vec::new();
    for threshold in [0.5, 0.7, 2.5] {
        let opts = SegmentationOptions {
            threshold,
            accumulator: Accumulator::Sum,
            comparators: vec![Comparator::Positional { scale: 0.05 }],
            median_aperture: None,
            ..Default::default()
        };
        let labels = segment_frame(&inputs, &opts).unwrap();
        sizes.push(segment_size(&labels, 0, 0));
    }
    assert!(
        sizes.windows(2).all(|s| s[0] <= s[1]),
        "segment sizes must be monotone in the threshold, got {sizes:?}"
    );
    assert_eq!(sizes, vec![10, 20, 30]);
}

#[test]
fn uniform_color_collapses_into_one_segment() {
    let inputs = FrameInputs {
        points: None,
        normals: None,
        color: Some(ColorGrid::filled(40, 30, [128, 64, 32])),
    };
    let opts = unfiltered(vec![Comparator::Color { scale: 0.1 }], 0.5);
    let labels = segment_frame(&inputs, &opts).unwrap();
    assert_eq!(label_count(&labels), 1);
    assert_eq!(segment_size(&labels, 0, 0), 40 * 30);
}

#[test]
fn rejected_growth_leaves_only_the_seed_lattice_labeled() {
    // Alternating large depth steps reject every edge; only seeds label.
    let mut points = flat_points(25, 15, 1.0);
    for y in 0..15 {
        for x in 0..25 {
            if (x + y) % 2 == 1 {
                let mut p = points.get(x, y);
                p.z = 1.5;
                points.set(x, y, p);
            }
        }
    }
    let inputs = FrameInputs {
        points: Some(points),
        normals: None,
        color: None,
    };
    let opts = unfiltered(vec![Comparator::Positional { scale: 0.05 }], 1.0);
    let labels = segment_frame(&inputs, &opts).unwrap();
    let labeled = labels.data.iter().filter(|&&l| l != EMPTY_LABEL).count();
    assert_eq!(labeled, 6, "3x2 seed lattice at stride 10 on a 25x15 frame");
    assert_eq!(label_count(&labels), 6);
    assert_eq!(labels.get(1, 0), EMPTY_LABEL);
}

#[test]
fn missing_field_aborts_the_pass() {
    let inputs = FrameInputs {
        points: Some(flat_points(16, 16, 1.0)),
        normals: None,
        color: None,
    };
    let opts = unfiltered(vec![Comparator::Angular { scale: 5.0 }], 1.0);
    let err = segment_frame(&inputs, &opts).unwrap_err();
    assert_eq!(err, SegmentationError::MissingField { field: "normals" });
}

#[test]
fn mismatched_dimensions_abort_the_pass() {
    let inputs = FrameInputs {
        points: Some(flat_points(16, 16, 1.0)),
        normals: Some(up_normals(16, 12)),
        color: None,
    };
    let opts = unfiltered(
        vec![
            Comparator::Angular { scale: 5.0 },
            Comparator::Positional { scale: 0.05 },
        ],
        1.0,
    );
    let err = segment_frame(&inputs, &opts).unwrap_err();
    assert_eq!(
        err,
        SegmentationError::DimensionMismatch {
            field: "normals",
            got_w: 16,
            got_h: 12,
            w: 16,
            h: 16,
        }
    );
}

#[test]
fn empty_frame_aborts_the_pass() {
    let inputs = FrameInputs {
        points: Some(PointGrid::filled(0, 0, Vector3::zeros())),
        normals: None,
        color: None,
    };
    let opts = unfiltered(vec![Comparator::Positional { scale: 0.05 }], 1.0);
    let err = segment_frame(&inputs, &opts).unwrap_err();
    assert_eq!(err, SegmentationError::EmptyFrame { w: 0, h: 0 });
}

#[test]
fn no_comparators_aborts_the_pass() {
    let inputs = FrameInputs {
        points: Some(flat_points(8, 8, 1.0)),
        normals: None,
        color: None,
    };
    let opts = unfiltered(Vec::new(), 1.0);
    let err = segment_frame(&inputs, &opts).unwrap_err();
    assert_eq!(err, SegmentationError::NoComparators);
}
