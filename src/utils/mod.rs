//! Utility functions for the restitching pipeline.
//!
//! This module provides image I/O helpers and the drawing utilities used for
//! detection-stage debug overlays and final annotated rasters.

pub mod image;
pub mod visualization;

pub use image::{
    dynamic_to_rgb, load_image, load_images_batch, load_images_batch_with_threshold, save_image,
};
pub use visualization::{
    VisualizationConfig, draw_detection_ordinals, draw_phrase_box, draw_phrase_text,
};
