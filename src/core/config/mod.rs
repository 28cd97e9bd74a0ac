//! Configuration types for the restitching pipeline.
//!
//! Each pipeline component has its own small config struct with serde
//! defaults and builder-style setters; [`StitchConfig`] bundles them for a
//! whole run. The detection-stage and clustering-stage vertical thresholds
//! are deliberately independent parameters.

mod parallel;

pub use parallel::ParallelPolicy;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::constants::{
    DEFAULT_LINE_CLUSTER_THRESHOLD, DEFAULT_MIN_BOX_SIZE, DEFAULT_MIN_X_GAP,
    DEFAULT_READING_ORDER_THRESHOLD, DEFAULT_SCALE_GAP,
};
use crate::core::errors::StitchError;

/// Configuration for detection-stage reading-order sorting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingOrderConfig {
    /// Vertical distance (pixels) within which a box joins the current row.
    /// Default: 30.
    #[serde(default = "ReadingOrderConfig::default_vertical_threshold")]
    pub vertical_threshold: i32,
}

impl ReadingOrderConfig {
    /// Create a new ReadingOrderConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertical row threshold.
    pub fn with_vertical_threshold(mut self, threshold: i32) -> Self {
        self.vertical_threshold = threshold;
        self
    }

    fn default_vertical_threshold() -> i32 {
        DEFAULT_READING_ORDER_THRESHOLD
    }
}

impl Default for ReadingOrderConfig {
    fn default() -> Self {
        Self {
            vertical_threshold: Self::default_vertical_threshold(),
        }
    }
}

/// Configuration for reconstruction-stage line clustering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineClusteringConfig {
    /// Vertical distance (pixels) within which a fragment joins the current
    /// row. Default: 50. Not the same parameter as the detection-stage
    /// threshold.
    #[serde(default = "LineClusteringConfig::default_vertical_threshold")]
    pub vertical_threshold: i32,
}

impl LineClusteringConfig {
    /// Create a new LineClusteringConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertical row threshold.
    pub fn with_vertical_threshold(mut self, threshold: i32) -> Self {
        self.vertical_threshold = threshold;
        self
    }

    fn default_vertical_threshold() -> i32 {
        DEFAULT_LINE_CLUSTER_THRESHOLD
    }
}

impl Default for LineClusteringConfig {
    fn default() -> Self {
        Self {
            vertical_threshold: Self::default_vertical_threshold(),
        }
    }
}

/// Configuration for merging horizontally adjacent fragments into phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordMergeConfig {
    /// Lower bound (pixels) on the horizontal merge gap. Default: 120.
    #[serde(default = "WordMergeConfig::default_min_x_gap")]
    pub min_x_gap: i32,

    /// Multiplier applied to the row's average character width when deriving
    /// the adaptive gap threshold. Default: 2.5.
    #[serde(default = "WordMergeConfig::default_scale_gap")]
    pub scale_gap: f32,
}

impl WordMergeConfig {
    /// Create a new WordMergeConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum horizontal gap.
    pub fn with_min_x_gap(mut self, min_x_gap: i32) -> Self {
        self.min_x_gap = min_x_gap;
        self
    }

    /// Set the average-character-width multiplier.
    pub fn with_scale_gap(mut self, scale_gap: f32) -> Self {
        self.scale_gap = scale_gap;
        self
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), StitchError> {
        if !self.scale_gap.is_finite() || self.scale_gap < 0.0 {
            return Err(StitchError::validation_error(
                "WordMergeConfig",
                "scale_gap",
                "a finite non-negative number",
                &self.scale_gap.to_string(),
            ));
        }
        Ok(())
    }

    fn default_min_x_gap() -> i32 {
        DEFAULT_MIN_X_GAP
    }

    fn default_scale_gap() -> f32 {
        DEFAULT_SCALE_GAP
    }
}

impl Default for WordMergeConfig {
    fn default() -> Self {
        Self {
            min_x_gap: Self::default_min_x_gap(),
            scale_gap: Self::default_scale_gap(),
        }
    }
}

/// Top-level configuration for a restitching run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StitchConfig {
    /// Detection-stage reading-order settings.
    #[serde(default)]
    pub reading_order: ReadingOrderConfig,

    /// Reconstruction-stage line clustering settings.
    #[serde(default)]
    pub line_clustering: LineClusteringConfig,

    /// In-row phrase merging settings.
    #[serde(default)]
    pub word_merge: WordMergeConfig,

    /// Minimum width/height (pixels) for a detection box to be cropped.
    /// Applied upstream of the clustering core. Default: 20.
    #[serde(default = "StitchConfig::default_min_box_size")]
    pub min_box_size: i32,

    /// Parallelism policy for batch runs.
    #[serde(default)]
    pub parallel: ParallelPolicy,

    /// Optional wall-clock budget for the collaborator (detector/recognizer)
    /// calls of a batch run. Checked between images only; the clustering core
    /// itself is never interrupted.
    #[serde(default)]
    pub collaborator_budget: Option<Duration>,
}

impl StitchConfig {
    /// Create a new StitchConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reading-order settings.
    pub fn with_reading_order(mut self, config: ReadingOrderConfig) -> Self {
        self.reading_order = config;
        self
    }

    /// Set the line clustering settings.
    pub fn with_line_clustering(mut self, config: LineClusteringConfig) -> Self {
        self.line_clustering = config;
        self
    }

    /// Set the word merge settings.
    pub fn with_word_merge(mut self, config: WordMergeConfig) -> Self {
        self.word_merge = config;
        self
    }

    /// Set the minimum detection box size.
    pub fn with_min_box_size(mut self, min_box_size: i32) -> Self {
        self.min_box_size = min_box_size;
        self
    }

    /// Set the parallelism policy.
    pub fn with_parallel(mut self, policy: ParallelPolicy) -> Self {
        self.parallel = policy;
        self
    }

    /// Set the collaborator wall-clock budget.
    pub fn with_collaborator_budget(mut self, budget: Option<Duration>) -> Self {
        self.collaborator_budget = budget;
        self
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), StitchError> {
        self.word_merge.validate()
    }

    fn default_min_box_size() -> i32 {
        DEFAULT_MIN_BOX_SIZE
    }
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            reading_order: ReadingOrderConfig::default(),
            line_clustering: LineClusteringConfig::default(),
            word_merge: WordMergeConfig::default(),
            min_box_size: Self::default_min_box_size(),
            parallel: ParallelPolicy::default(),
            collaborator_budget: None,
        }
    }
}
