//! Per-frame pipeline wiring estimation and segmentation behind a join.
//!
//! Processing is cooperative and synchronous: each `ingest_*` call hands an
//! owned snapshot to the join, and the segmentation pass fires only once
//! every modality the configured trigger requires has delivered a fresh
//! frame for the current cycle. Ingesting a point field additionally runs
//! the configured normal estimator and publishes the derived normal field.
//!
//! A structural failure in either stage drops the frame: the error is
//! logged, no output is emitted, and the pipeline is immediately ready for
//! the next frame's trigger. Nothing is retried.

mod join;

pub use join::{FrameJoin, InputSet};

use log::{debug, error};

use crate::grid::{ColorGrid, LabelGrid, NormalGrid, PointGrid};
use crate::normals::NormalEstimation;
use crate::segment::{segment_frame, SegmentationOptions};

/// Stateful per-frame driver for the estimation + segmentation stages.
pub struct FramePipeline {
    estimation: NormalEstimation,
    options: SegmentationOptions,
    join: FrameJoin,
    published_normals: Option<NormalGrid>,
}

impl FramePipeline {
    /// Build a pipeline whose trigger is the minimal input set the
    /// configured comparators read.
    pub fn new(estimation: NormalEstimation, options: SegmentationOptions) -> Self {
        let trigger = InputSet::for_comparators(&options.comparators);
        Self::with_trigger(estimation, options, trigger)
    }

    /// Build a pipeline with an explicit activation condition.
    pub fn with_trigger(
        estimation: NormalEstimation,
        options: SegmentationOptions,
        trigger: InputSet,
    ) -> Self {
        Self {
            estimation,
            options,
            join: FrameJoin::new(trigger),
            published_normals: None,
        }
    }

    /// Ingest a point-field frame: estimates and publishes the normal
    /// field, feeds the join, and runs a pass when the trigger is met.
    pub fn ingest_points(&mut self, points: PointGrid) -> Option<LabelGrid> {
        match self.estimation.estimate(&points) {
            Ok(normals) => {
                if self.join.required().normals {
                    self.join.offer_normals(normals.clone());
                }
                self.published_normals = Some(normals);
            }
            Err(err) => {
                error!("NormalEstimation: frame dropped: {err}");
            }
        }
        self.join.offer_points(points);
        self.try_pass()
    }

    /// Ingest an externally produced normal field.
    pub fn ingest_normals(&mut self, normals: NormalGrid) -> Option<LabelGrid> {
        self.join.offer_normals(normals);
        self.try_pass()
    }

    /// Ingest a color frame.
    pub fn ingest_color(&mut self, color: ColorGrid) -> Option<LabelGrid> {
        self.join.offer_color(color);
        self.try_pass()
    }

    /// Normal field derived from the most recent point-field frame.
    pub fn published_normals(&self) -> Option<&NormalGrid> {
        self.published_normals.as_ref()
    }

    fn try_pass(&mut self) -> Option<LabelGrid> {
        let inputs = self.join.take()?;
        debug!("FramePipeline: trigger met, running segmentation pass");
        match segment_frame(&inputs, &self.options) {
            Ok(labels) => Some(labels),
            Err(err) => {
                error!("Segmentation: pass failed, frame dropped: {err}");
                None
            }
        }
    }
}
