//! Extraction of per-box crops from a source image.
//!
//! Crops are cut along each detection polygon's axis-aligned bounding
//! rectangle and named after the source image plus the box's 1-based
//! reading-order ordinal. Boxes below the minimum size are skipped but still
//! consume their ordinal, so crop file names can have gaps; the mapping
//! artifact is the authoritative link between a crop file and its placement
//! polygon.

use image::RgbImage;
use image::imageops;
use tracing::debug;

use crate::artifacts::{CropEntry, CropMapping, crop_file_name};
use crate::core::errors::StitchError;
use crate::processors::Polygon;

/// One extracted crop, ready to hand to a recognizer.
#[derive(Debug, Clone)]
pub struct Crop {
    /// The crop's file name, which keys its recognition results.
    pub file: String,
    /// The cropped pixels.
    pub image: RgbImage,
}

/// Cuts recognizer-ready crops out of a source image along detection boxes.
#[derive(Debug, Clone)]
pub struct CropExtractor {
    min_box_size: i32,
}

impl CropExtractor {
    /// Creates an extractor that skips boxes narrower or shorter than
    /// `min_box_size` pixels.
    pub fn new(min_box_size: i32) -> Self {
        Self { min_box_size }
    }

    /// Extracts crops for the given polygons, in order, and builds the
    /// mapping artifact that records each kept crop's placement polygon.
    ///
    /// `image_name` is the source image's file name; its stem prefixes every
    /// crop file name. Polygons are expected in reading order, as their
    /// position assigns the 1-based ordinal. Boxes smaller than the minimum
    /// in either dimension, and boxes that fall entirely outside the image,
    /// are skipped without giving up their ordinal.
    pub fn extract(
        &self,
        image_name: &str,
        image: &RgbImage,
        polygons: &[Polygon],
    ) -> Result<(Vec<Crop>, CropMapping), StitchError> {
        let mut mapping = CropMapping::new(image_name);
        let stem = mapping.image_stem().to_string();
        let mut crops = Vec::new();

        let (img_width, img_height) = (image.width() as i32, image.height() as i32);

        for (i, polygon) in polygons.iter().enumerate() {
            let ordinal = i + 1;
            let rect = polygon.bounding_rect();

            if rect.width < self.min_box_size || rect.height < self.min_box_size {
                debug!(
                    image = image_name,
                    ordinal,
                    width = rect.width,
                    height = rect.height,
                    "skipping undersized box"
                );
                continue;
            }

            let x = rect.x.clamp(0, img_width);
            let y = rect.y.clamp(0, img_height);
            let right = rect.right().clamp(0, img_width);
            let bottom = rect.bottom().clamp(0, img_height);
            if right <= x || bottom <= y {
                debug!(image = image_name, ordinal, "skipping out-of-bounds box");
                continue;
            }

            let file = crop_file_name(&stem, ordinal);
            let crop = imageops::crop_imm(
                image,
                x as u32,
                y as u32,
                (right - x) as u32,
                (bottom - y) as u32,
            )
            .to_image();

            crops.push(Crop {
                file: file.clone(),
                image: crop,
            });
            mapping.crops.push(CropEntry {
                file,
                polygon: polygon.clone(),
                index: ordinal,
            });
        }

        debug!(
            image = image_name,
            kept = crops.len(),
            total = polygons.len(),
            "extracted crops"
        );

        Ok((crops, mapping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::DEFAULT_MIN_BOX_SIZE;

    fn extractor() -> CropExtractor {
        CropExtractor::new(DEFAULT_MIN_BOX_SIZE)
    }

    #[test]
    fn crop_dimensions_match_the_box() {
        let image = RgbImage::new(200, 100);
        let polygons = vec![Polygon::from_coords(10, 20, 90, 60)];

        let (crops, mapping) = extractor().extract("page.jpg", &image, &polygons).unwrap();
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].image.dimensions(), (80, 40));
        assert_eq!(mapping.crops[0].file, "page_box001.jpg");
        assert_eq!(mapping.crops[0].index, 1);
    }

    #[test]
    fn undersized_boxes_keep_their_ordinal() {
        let image = RgbImage::new(200, 100);
        let polygons = vec![
            Polygon::from_coords(0, 0, 60, 30),
            Polygon::from_coords(0, 40, 10, 60),
            Polygon::from_coords(0, 70, 60, 95),
        ];

        let (crops, mapping) = extractor().extract("page.jpg", &image, &polygons).unwrap();
        assert_eq!(crops.len(), 2);
        assert_eq!(crops[0].file, "page_box001.jpg");
        assert_eq!(crops[1].file, "page_box003.jpg");
        assert_eq!(mapping.crops.len(), 2);
        assert_eq!(mapping.crops[1].index, 3);
    }

    #[test]
    fn boxes_are_clamped_to_the_image() {
        let image = RgbImage::new(100, 100);
        let polygons = vec![Polygon::from_coords(60, 60, 160, 160)];

        let (crops, _) = extractor().extract("page.jpg", &image, &polygons).unwrap();
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].image.dimensions(), (40, 40));
    }

    #[test]
    fn fully_outside_boxes_are_skipped() {
        let image = RgbImage::new(100, 100);
        let polygons = vec![Polygon::from_coords(200, 200, 300, 300)];

        let (crops, mapping) = extractor().extract("page.jpg", &image, &polygons).unwrap();
        assert!(crops.is_empty());
        assert!(mapping.crops.is_empty());
    }

    #[test]
    fn mapping_polygon_is_the_original_not_the_clamped_rect() {
        let image = RgbImage::new(100, 100);
        let polygons = vec![Polygon::from_coords(-10, 10, 90, 60)];

        let (_, mapping) = extractor().extract("page.jpg", &image, &polygons).unwrap();
        assert_eq!(mapping.crops[0].polygon, polygons[0]);
    }
}
