//! Utility functions for image I/O.
//!
//! This module provides functions for loading and saving the images the
//! pipeline handles: source images on the way in, crops and annotated
//! rasters on the way out. Batch loading goes parallel past a threshold.

use crate::core::StitchError;
use crate::core::constants::DEFAULT_PARALLEL_THRESHOLD;
use image::{DynamicImage, RgbImage};
use std::path::Path;

/// Converts a DynamicImage to an RgbImage.
///
/// This function takes a DynamicImage (which can be in any format) and
/// converts it to an RgbImage (8-bit RGB format).
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// # Arguments
///
/// * `path` - A reference to the path of the image file to load
///
/// # Returns
///
/// * `Ok(RgbImage)` - The loaded and converted RGB image
/// * `Err(StitchError)` - An error if the image could not be loaded
///
/// # Errors
///
/// This function will return a `StitchError::ImageLoad` error if the image
/// cannot be loaded from the specified path.
pub fn load_image(path: &Path) -> Result<RgbImage, StitchError> {
    let img = image::open(path).map_err(StitchError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

/// Saves an image to a file path, inferring the format from the extension.
///
/// # Errors
///
/// This function will return a `StitchError::ImageSave` error if the image
/// cannot be written to the specified path.
pub fn save_image(img: &RgbImage, path: &Path) -> Result<(), StitchError> {
    img.save(path).map_err(StitchError::ImageSave)
}

/// Loads a batch of images from file paths.
///
/// Uses parallel loading when the number of images exceeds the default
/// parallel threshold.
///
/// # Errors
///
/// This function will return a `StitchError` if any image cannot be loaded
/// from its specified path.
pub fn load_images_batch<P: AsRef<Path> + Send + Sync>(
    paths: &[P],
) -> Result<Vec<RgbImage>, StitchError> {
    load_images_batch_with_threshold(paths, None)
}

/// Loads a batch of images with a custom parallel threshold.
///
/// # Arguments
///
/// * `paths` - A slice of paths to the image files to load
/// * `parallel_threshold` - An optional threshold for parallel loading.
///   If `None`, `DEFAULT_PARALLEL_THRESHOLD` is used.
///
/// # Errors
///
/// This function will return a `StitchError` if any image cannot be loaded
/// from its specified path.
pub fn load_images_batch_with_threshold<P: AsRef<Path> + Send + Sync>(
    paths: &[P],
    parallel_threshold: Option<usize>,
) -> Result<Vec<RgbImage>, StitchError> {
    let threshold = parallel_threshold.unwrap_or(DEFAULT_PARALLEL_THRESHOLD);

    if paths.len() > threshold {
        use rayon::prelude::*;
        paths.par_iter().map(|p| load_image(p.as_ref())).collect()
    } else {
        paths.iter().map(|p| load_image(p.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_conversion_preserves_dimensions() {
        let img = DynamicImage::new_rgba8(32, 16);
        let rgb = dynamic_to_rgb(img);
        assert_eq!(rgb.dimensions(), (32, 16));
    }

    #[test]
    fn loading_a_missing_file_is_an_image_load_error() {
        let result = load_image(Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(StitchError::ImageLoad(_))));
    }

    #[test]
    fn batch_load_propagates_the_first_failure() {
        let paths = [Path::new("/nonexistent/a.png"), Path::new("/nonexistent/b.png")];
        assert!(load_images_batch(&paths).is_err());
    }
}
