use serde::{Deserialize, Serialize};

use crate::compare::Comparator;
use crate::grid::{ColorGrid, NormalGrid, PointGrid};
use crate::segment::FrameInputs;

/// Which input modalities a trigger configuration requires before a pass
/// may fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSet {
    pub points: bool,
    pub normals: bool,
    pub color: bool,
}

impl InputSet {
    /// The minimal set of fields the comparator list reads.
    pub fn for_comparators(comparators: &[Comparator]) -> Self {
        let mut set = Self::default();
        for cmp in comparators {
            match cmp {
                Comparator::Angular { .. } => set.normals = true,
                Comparator::Positional { .. } => set.points = true,
                Comparator::Color { .. } => set.color = true,
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        !(self.points || self.normals || self.color)
    }
}

/// Join gating a segmentation pass on fresh delivery of every required
/// modality.
///
/// Holds at most one pending snapshot per modality; snapshots are owned, so
/// a producer cannot mutate a buffer once handed over. [`FrameJoin::take`]
/// resets all readiness in one step.
#[derive(Debug, Default)]
pub struct FrameJoin {
    required: InputSet,
    points: Option<PointGrid>,
    normals: Option<NormalGrid>,
    color: Option<ColorGrid>,
}

impl FrameJoin {
    pub fn new(required: InputSet) -> Self {
        Self {
            required,
            points: None,
            normals: None,
            color: None,
        }
    }

    pub fn required(&self) -> InputSet {
        self.required
    }

    /// Store a fresh point-field snapshot; a frame not in the required set
    /// is dropped.
    pub fn offer_points(&mut self, points: PointGrid) {
        if self.required.points {
            self.points = Some(points);
        }
    }

    pub fn offer_normals(&mut self, normals: NormalGrid) {
        if self.required.normals {
            self.normals = Some(normals);
        }
    }

    pub fn offer_color(&mut self, color: ColorGrid) {
        if self.required.color {
            self.color = Some(color);
        }
    }

    /// True once every required modality has a pending snapshot.
    pub fn ready(&self) -> bool {
        !self.required.is_empty()
            && (!self.required.points || self.points.is_some())
            && (!self.required.normals || self.normals.is_some())
            && (!self.required.color || self.color.is_some())
    }

    /// Take the joined frame when ready, atomically resetting every
    /// readiness slot for the next cycle.
    pub fn take(&mut self) -> Option<FrameInputs> {
        if !self.ready() {
            return None;
        }
        Some(FrameInputs {
            points: self.points.take(),
            normals: self.normals.take(),
            color: self.color.take(),
        })
    }
}
