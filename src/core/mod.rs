//! The core module of the restitching pipeline.
//!
//! This module contains the fundamental building blocks shared by the rest of
//! the crate:
//! - Configuration management
//! - Constants used throughout the pipeline
//! - Error handling
//! - Traits defining the collaborator seams (detector, recognizer)
//!
//! It also re-exports commonly used types for convenience.

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;

pub use config::{
    LineClusteringConfig, ParallelPolicy, ReadingOrderConfig, StitchConfig, WordMergeConfig,
};
pub use constants::*;
pub use errors::{PipelineStage, StitchError, StitchResult};
pub use traits::{TextDetector, TextRecognizer};

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter and formatting
/// layer. Typically called once at application start.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
