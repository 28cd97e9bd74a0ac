//! Shared parallel processing configuration.

use serde::{Deserialize, Serialize};

use crate::core::constants::DEFAULT_PARALLEL_THRESHOLD;

/// Configuration for parallel processing behavior across a restitching run.
///
/// Per-image reconstruction is pure and independent, so a run parallelizes
/// across images. This struct centralizes how aggressively that happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Maximum number of threads to use for parallel processing.
    /// If None, rayon will use the default thread pool size (typically the
    /// number of CPU cores).
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Number of images at or below which processing stays sequential.
    /// Default: 4.
    #[serde(default = "ParallelPolicy::default_image_threshold")]
    pub image_threshold: usize,
}

impl ParallelPolicy {
    /// Create a new ParallelPolicy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of threads.
    pub fn with_max_threads(mut self, max_threads: Option<usize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Set the image-count threshold above which processing goes parallel.
    pub fn with_image_threshold(mut self, threshold: usize) -> Self {
        self.image_threshold = threshold;
        self
    }

    /// Returns true if a batch of `image_count` images should run in parallel.
    pub fn should_parallelize(&self, image_count: usize) -> bool {
        image_count > self.image_threshold
    }

    fn default_image_threshold() -> usize {
        DEFAULT_PARALLEL_THRESHOLD
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            max_threads: None,
            image_threshold: Self::default_image_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_keeps_small_batches_sequential() {
        let policy = ParallelPolicy::default();
        assert!(!policy.should_parallelize(1));
        assert!(!policy.should_parallelize(4));
        assert!(policy.should_parallelize(5));
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let policy: ParallelPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy.max_threads, None);
        assert_eq!(policy.image_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }
}
