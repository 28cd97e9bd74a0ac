//! Result types for the restitching pipeline.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pipeline::fragments::CollectionStats;

/// The persisted output unit: one reconstructed phrase of one image.
///
/// Serializes flat so a downstream tabular writer can export rows directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Base name of the source image.
    pub image: String,
    /// The reconstructed phrase text.
    pub text: String,
}

impl Record {
    /// Creates a record for the given image and phrase text.
    pub fn new(image: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            text: text.into(),
        }
    }
}

/// Counters describing one image's trip through the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StitchMetrics {
    /// Crops the recognizer produced no result for.
    pub crops_without_recognition: usize,
    /// Recognized spans dropped as empty after trimming.
    pub empty_spans: usize,
    /// Fragments that entered clustering.
    pub fragments: usize,
    /// Rows produced by line clustering.
    pub rows: usize,
    /// Phrase groups produced by word merging.
    pub groups: usize,
}

impl StitchMetrics {
    /// Creates zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds fragment-collection counters into the metrics.
    pub(crate) fn absorb_collection(&mut self, stats: CollectionStats) {
        self.crops_without_recognition = stats.crops_without_recognition;
        self.empty_spans = stats.empty_spans;
        self.fragments = stats.fragments;
    }

    /// Returns true if any collaborator output was dropped on the way in.
    pub fn has_dropped_input(&self) -> bool {
        self.crops_without_recognition > 0 || self.empty_spans > 0
    }
}

/// Everything the pipeline produced for one source image.
///
/// Images are processed independently; a run's record set is the caller's
/// explicit aggregation of these per-image results (see
/// [`collect_records`](crate::pipeline::collect_records)).
#[derive(Debug, Clone)]
pub struct ImageStitchResult {
    /// Base name of the source image.
    pub image_id: String,
    /// One record per reconstructed phrase, in reading order.
    pub records: Vec<Record>,
    /// Copy of the source raster with each phrase's box and text drawn on.
    /// None when the image yielded no phrases; that is a normal outcome, not
    /// an error.
    pub annotated_image: Option<RgbImage>,
    /// Per-image pipeline counters.
    pub metrics: StitchMetrics,
}

impl fmt::Display for ImageStitchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image: {}", self.image_id)?;
        writeln!(
            f,
            "Fragments: {} -> rows: {} -> groups: {}",
            self.metrics.fragments, self.metrics.rows, self.metrics.groups
        )?;
        for record in &self.records {
            writeln!(f, "  '{}'", record.text)?;
        }
        if self.metrics.has_dropped_input() {
            writeln!(
                f,
                "Dropped input: {} crops without recognition, {} empty spans",
                self.metrics.crops_without_recognition, self.metrics.empty_spans
            )?;
        }
        Ok(())
    }
}
