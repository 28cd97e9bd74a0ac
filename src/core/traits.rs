//! Traits defining the collaborator seams of the pipeline.
//!
//! Text detection and recognition are opaque collaborators: the restitching
//! core only consumes their outputs. Implementations typically wrap an
//! inference runtime or a remote service; the crate itself ships none.

use image::RgbImage;

use crate::artifacts::RecognizedSpan;
use crate::core::errors::StitchError;
use crate::processors::Polygon;

/// A text detector: finds candidate text regions in a full image.
///
/// Returned polygons are unordered; the reading-order sorter assigns
/// deterministic ordinals afterwards. Detectors reporting sub-pixel corners
/// should ingest them through [`Polygon::from_f32_points`] so non-finite
/// coordinates are caught at the seam.
pub trait TextDetector {
    /// Detects text region polygons in the given image.
    fn detect(&self, image: &RgbImage) -> Result<Vec<Polygon>, StitchError>;
}

/// A text recognizer: reads text from one cropped region.
///
/// A crop may yield zero or more spans. Only spans with non-empty trimmed
/// text become fragments; a span's own polygon is ignored in favor of the
/// crop's placement polygon recorded at detection time.
pub trait TextRecognizer {
    /// Recognizes text spans within the given cropped image.
    fn recognize(&self, crop: &RgbImage) -> Result<Vec<RecognizedSpan>, StitchError>;
}
