//! Artifacts exchanged between the detection and reconstruction stages.
//!
//! The detection stage writes one mapping record per source image describing
//! where each crop sits in original-image coordinates; the reconstruction
//! stage reads it back as its geometric source of truth. Recognition output
//! is carried alongside as an in-memory map keyed by crop identifier.

pub mod mapping;
pub mod recognition;

pub use mapping::{CropEntry, CropMapping, crop_file_name};
pub use recognition::{RecognitionResults, RecognizedSpan};
