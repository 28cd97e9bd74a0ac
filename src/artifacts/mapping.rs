//! The crop mapping artifact produced by the detection stage.
//!
//! One [`CropMapping`] per source image records, for every crop that was cut
//! out for recognition, the crop's file name, its placement polygon in
//! original-image coordinates, and its detection ordinal. The JSON layout
//! matches the `*_mapping.json` files the detection stage writes, so either
//! side of the pipeline can be replaced independently.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::core::errors::StitchError;
use crate::processors::Polygon;

/// Returns the deterministic crop file name for a detection ordinal.
///
/// Ordinals are 1-based and assigned in reading order before recognition, so
/// the same image always yields the same crop names. Boxes dropped by the
/// minimum-size filter still consume their ordinal, which means the sequence
/// may have gaps.
pub fn crop_file_name(stem: &str, ordinal: usize) -> String {
    format!("{stem}_box{ordinal:03}.jpg")
}

/// One crop of a source image, with its authoritative placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropEntry {
    /// File name of the crop image; also the key recognition results are
    /// joined on.
    pub file: String,
    /// Placement polygon in original-image coordinates. This box, not the
    /// recognizer's, positions the crop's text during reconstruction.
    #[serde(rename = "box")]
    pub polygon: Polygon,
    /// 1-based detection ordinal in reading order.
    pub index: usize,
}

/// Mapping artifact for one source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropMapping {
    /// File name of the source image.
    pub image: String,
    /// Crops cut from the image, in reading order.
    pub crops: Vec<CropEntry>,
}

impl CropMapping {
    /// Creates an empty mapping for the given source image.
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            crops: Vec::new(),
        }
    }

    /// The source image's file stem (name without extension).
    pub fn image_stem(&self) -> &str {
        Path::new(&self.image)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.image)
    }

    /// Reads a mapping from a JSON file.
    pub fn load(path: &Path) -> Result<Self, StitchError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the mapping to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), StitchError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::Polygon;

    #[test]
    fn crop_names_are_zero_padded() {
        assert_eq!(crop_file_name("receipt", 1), "receipt_box001.jpg");
        assert_eq!(crop_file_name("receipt", 42), "receipt_box042.jpg");
        assert_eq!(crop_file_name("receipt", 120), "receipt_box120.jpg");
    }

    #[test]
    fn mapping_matches_detection_stage_json() {
        let json = r#"{
            "image": "invoice.jpg",
            "crops": [
                {
                    "file": "invoice_box001.jpg",
                    "box": [[0, 0], [60, 0], [60, 20], [0, 20]],
                    "index": 1
                }
            ]
        }"#;

        let mapping: CropMapping = serde_json::from_str(json).unwrap();
        assert_eq!(mapping.image, "invoice.jpg");
        assert_eq!(mapping.image_stem(), "invoice");
        assert_eq!(mapping.crops.len(), 1);
        assert_eq!(mapping.crops[0].file, "invoice_box001.jpg");
        assert_eq!(mapping.crops[0].index, 1);
        assert_eq!(mapping.crops[0].polygon, Polygon::from_coords(0, 0, 60, 20));
    }

    #[test]
    fn mapping_round_trips_through_serde() {
        let mut mapping = CropMapping::new("page.png");
        mapping.crops.push(CropEntry {
            file: crop_file_name("page", 1),
            polygon: Polygon::from_coords(5, 5, 80, 25),
            index: 1,
        });

        let json = serde_json::to_string(&mapping).unwrap();
        let back: CropMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mapping);
    }
}
