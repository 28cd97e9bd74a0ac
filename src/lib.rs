//! # Restitch
//!
//! A Rust library that reconstructs coherent, ordered text from fragmented
//! OCR output. Detection collaborators over-segment documents into many
//! small boxes; this crate reassembles those fragments into complete phrases
//! in natural reading order.
//!
//! ## Features
//!
//! - Deterministic reading-order sorting of detection boxes
//! - Crop extraction with a stable, ordinal-based naming scheme
//! - Spatial line clustering of recognized fragments
//! - Adaptive gap-based merging of fragments into phrases
//! - Annotated raster output showing each reconstructed phrase in place
//! - Batch processing support
//!
//! ## Components
//!
//! - **Reading-Order Sorting**: assign stable ordinals to detection boxes
//! - **Cropping**: cut recognizer-ready crops and record their placement
//! - **Fragment Collection**: join crop placements with recognized text
//! - **Line Clustering**: group fragments lying on the same visual line
//! - **Word Merging**: fuse horizontally adjacent fragments into phrases
//! - **Emission**: produce ordered records and annotated images
//!
//! ## Modules
//!
//! * [`core`] - Configuration, constants, errors, and collaborator traits
//! * [`artifacts`] - Crop mappings and recognition results
//! * [`pipeline`] - The restitching stages and their orchestration
//! * [`processors`] - Geometry primitives
//! * [`utils`] - Image I/O and visualization helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use restitch::prelude::*;
//! use std::path::Path;
//!
//! # struct MyDetector;
//! # impl restitch::core::TextDetector for MyDetector {
//! #     fn detect(
//! #         &self,
//! #         _image: &image::RgbImage,
//! #     ) -> Result<Vec<restitch::processors::Polygon>, StitchError> {
//! #         Ok(Vec::new())
//! #     }
//! # }
//! # struct MyRecognizer;
//! # impl restitch::core::TextRecognizer for MyRecognizer {
//! #     fn recognize(
//! #         &self,
//! #         _crop: &image::RgbImage,
//! #     ) -> Result<Vec<restitch::artifacts::RecognizedSpan>, StitchError> {
//! #         Ok(Vec::new())
//! #     }
//! # }
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = RestitchPipeline::new(MyDetector, MyRecognizer, StitchConfig::default())?;
//!
//! let image = load_image(Path::new("document.jpg"))?;
//! let result = pipeline.process_image("document.jpg", &image)?;
//! for record in &result.records {
//!     println!("{}", record.text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The reconstruction half of the pipeline is pure: given a crop mapping and
//! recognition results produced earlier, `process_mapped_image` rebuilds the
//! records without touching detector, recognizer, or filesystem.

// Core modules
pub mod artifacts;
pub mod core;

pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use restitch::prelude::*;
/// ```
///
/// Included items focus on the most common tasks:
/// - The pipeline (`RestitchPipeline`, `collect_records`) and its results
///   (`ImageStitchResult`, `Record`)
/// - Configuration (`StitchConfig`)
/// - Essential error and result types (`StitchError`, `StitchResult`)
/// - Basic image loading (`load_image`)
///
/// For individual stages, artifacts, or drawing helpers, import directly
/// from the respective modules (e.g. `restitch::pipeline`,
/// `restitch::artifacts`, `restitch::utils`).
pub mod prelude {
    pub use crate::pipeline::{
        ImageStitchResult, Record, RestitchPipeline, StitchMetrics, collect_records,
    };

    pub use crate::core::{StitchConfig, StitchError, StitchResult};

    pub use crate::utils::{load_image, load_images_batch};
}
