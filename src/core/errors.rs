//! Error types for the restitching pipeline.
//!
//! This module defines the error enum shared across the crate, a stage enum
//! identifying where in the pipeline a failure happened, and constructor
//! helpers for building errors with context.

use thiserror::Error;

/// Enum identifying the pipeline stage an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Error occurred while invoking the text detector.
    Detection,
    /// Error occurred while extracting crops from the source image.
    Cropping,
    /// Error occurred while invoking the text recognizer.
    Recognition,
    /// Error occurred while assembling fragments from collaborator output.
    FragmentCollection,
    /// Error occurred while emitting records or visualizations.
    Emission,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Detection => write!(f, "detection"),
            PipelineStage::Cropping => write!(f, "cropping"),
            PipelineStage::Recognition => write!(f, "recognition"),
            PipelineStage::FragmentCollection => write!(f, "fragment collection"),
            PipelineStage::Emission => write!(f, "emission"),
            PipelineStage::Generic => write!(f, "processing"),
        }
    }
}

/// Errors produced by the restitching pipeline.
#[derive(Error, Debug)]
pub enum StitchError {
    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred while saving an image.
    #[error("image save")]
    ImageSave(#[source] image::ImageError),

    /// Error occurred during a pipeline stage.
    #[error("{stage} failed: {context}")]
    Stage {
        /// The pipeline stage where the error occurred.
        stage: PipelineStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// The collaborator wall-clock budget ran out before an image was
    /// processed.
    #[error("collaborator budget exhausted before processing '{image}'")]
    BudgetExhausted {
        /// The image that was skipped.
        image: String,
    },

    /// Error from serializing or deserializing a mapping artifact.
    #[error("mapping artifact")]
    Mapping(#[from] serde_json::Error),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl StitchError {
    /// Creates a StitchError for a pipeline stage failure.
    pub fn stage(
        stage: PipelineStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Stage {
            stage,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a StitchError for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a StitchError for configuration errors.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a StitchError for an image skipped by the collaborator budget.
    pub fn budget_exhausted(image: impl Into<String>) -> Self {
        Self::BudgetExhausted {
            image: image.into(),
        }
    }

    /// Creates a StitchError for a validation failure with field context.
    pub fn validation_error(component: &str, field: &str, expected: &str, actual: &str) -> Self {
        Self::InvalidInput {
            message: format!(
                "Validation failed in {}: field '{}' expected {}, but got '{}'",
                component, field, expected, actual
            ),
        }
    }
}

impl From<image::ImageError> for StitchError {
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

/// Convenience alias for results produced by this crate.
pub type StitchResult<T> = Result<T, StitchError>;
