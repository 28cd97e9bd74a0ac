//! Fragments and their assembly from collaborator output.
//!
//! A fragment pairs one crop's authoritative placement polygon with one
//! non-empty recognized text span. Fragments are created once per image and
//! consumed exactly once by the clustering pass.

use tracing::debug;

use crate::artifacts::{CropMapping, RecognitionResults};
use crate::core::errors::StitchError;
use crate::processors::{Polygon, Rect};

/// One recognized text span with its placement polygon and confidence.
///
/// Immutable once created. The constructor validates the polygon so that
/// malformed artifacts are rejected before clustering rather than producing
/// silently wrong geometry.
#[derive(Debug, Clone)]
pub struct Fragment {
    polygon: Polygon,
    text: String,
    confidence: f32,
}

impl Fragment {
    /// Creates a fragment from a placement polygon and recognized text.
    ///
    /// The text is trimmed; an empty result is rejected, as callers are
    /// expected to have filtered unusable spans already. The polygon must
    /// have exactly four corner points.
    pub fn new(
        polygon: Polygon,
        text: impl Into<String>,
        confidence: f32,
    ) -> Result<Self, StitchError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(StitchError::invalid_input(
                "fragment text is empty after trimming",
            ));
        }
        if !polygon.is_quad() {
            return Err(StitchError::validation_error(
                "Fragment",
                "polygon",
                "4 corner points",
                &polygon.points.len().to_string(),
            ));
        }
        Ok(Self {
            polygon,
            text,
            confidence,
        })
    }

    /// The placement polygon in original-image coordinates.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// The recognized text (non-empty, trimmed).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The recognizer's confidence for this fragment.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// The axis-aligned bounding rectangle of the placement polygon.
    pub fn rect(&self) -> Rect {
        self.polygon.bounding_rect()
    }
}

/// Counters describing what fragment collection kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionStats {
    /// Crops the recognizer produced no result for at all.
    pub crops_without_recognition: usize,
    /// Spans dropped because their trimmed text was empty.
    pub empty_spans: usize,
    /// Fragments kept.
    pub fragments: usize,
}

/// Pairs each crop's placement polygon with its recognized, non-empty spans.
///
/// A crop with no recognition result, or whose spans are all empty after
/// trimming, silently contributes no fragment; neither case is an error.
/// Every surviving span of a crop becomes its own fragment sharing the
/// crop's placement polygon.
#[derive(Debug, Clone, Default)]
pub struct FragmentCollector;

impl FragmentCollector {
    /// Creates a new collector.
    pub fn new() -> Self {
        Self
    }

    /// Collects fragments for one image from its mapping and recognition
    /// results.
    ///
    /// Fails only on malformed placement polygons in the mapping; missing or
    /// empty recognition output is counted, not raised.
    pub fn collect(
        &self,
        mapping: &CropMapping,
        recognition: &RecognitionResults,
    ) -> Result<(Vec<Fragment>, CollectionStats), StitchError> {
        let mut fragments = Vec::new();
        let mut stats = CollectionStats::default();

        for crop in &mapping.crops {
            let Some(spans) = recognition.spans_for(&crop.file) else {
                stats.crops_without_recognition += 1;
                continue;
            };

            for span in spans {
                if span.text.trim().is_empty() {
                    stats.empty_spans += 1;
                    continue;
                }
                fragments.push(Fragment::new(
                    crop.polygon.clone(),
                    span.text.as_str(),
                    span.confidence,
                )?);
            }
        }

        stats.fragments = fragments.len();
        debug!(
            image = %mapping.image,
            fragments = stats.fragments,
            missing = stats.crops_without_recognition,
            empty = stats.empty_spans,
            "collected fragments"
        );

        Ok((fragments, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{CropEntry, RecognizedSpan, crop_file_name};
    use crate::processors::{Point, Polygon};

    fn mapping_with_crops(boxes: &[(i32, i32, i32, i32)]) -> CropMapping {
        let mut mapping = CropMapping::new("page.jpg");
        for (i, &(x1, y1, x2, y2)) in boxes.iter().enumerate() {
            mapping.crops.push(CropEntry {
                file: crop_file_name("page", i + 1),
                polygon: Polygon::from_coords(x1, y1, x2, y2),
                index: i + 1,
            });
        }
        mapping
    }

    #[test]
    fn fragment_trims_text_and_rejects_empty() {
        let polygon = Polygon::from_coords(0, 0, 10, 10);
        let fragment = Fragment::new(polygon.clone(), "  hello  ", 0.9).unwrap();
        assert_eq!(fragment.text(), "hello");

        assert!(Fragment::new(polygon, "   ", 0.9).is_err());
    }

    #[test]
    fn fragment_rejects_degenerate_point_count() {
        let triangle = Polygon::new(vec![Point::new(0, 0), Point::new(10, 0), Point::new(5, 5)]);
        assert!(Fragment::new(triangle, "text", 0.9).is_err());
    }

    #[test]
    fn missing_recognition_is_counted_not_raised() {
        let mapping = mapping_with_crops(&[(0, 0, 60, 20), (0, 30, 60, 50)]);
        let mut recognition = RecognitionResults::new();
        recognition.insert("page_box001.jpg", vec![RecognizedSpan::new("kept", 0.8)]);

        let (fragments, stats) = FragmentCollector::new()
            .collect(&mapping, &recognition)
            .unwrap();

        assert_eq!(fragments.len(), 1);
        assert_eq!(stats.crops_without_recognition, 1);
        assert_eq!(stats.fragments, 1);
    }

    #[test]
    fn whitespace_spans_are_dropped() {
        let mapping = mapping_with_crops(&[(0, 0, 60, 20)]);
        let mut recognition = RecognitionResults::new();
        recognition.insert(
            "page_box001.jpg",
            vec![
                RecognizedSpan::new("   ", 0.8),
                RecognizedSpan::new(" value ", 0.7),
            ],
        );

        let (fragments, stats) = FragmentCollector::new()
            .collect(&mapping, &recognition)
            .unwrap();

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text(), "value");
        assert_eq!(stats.empty_spans, 1);
    }

    #[test]
    fn multiple_spans_share_the_crop_polygon() {
        let mapping = mapping_with_crops(&[(10, 10, 70, 30)]);
        let mut recognition = RecognitionResults::new();
        recognition.insert(
            "page_box001.jpg",
            vec![
                RecognizedSpan::new("first", 0.9),
                RecognizedSpan::new("second", 0.9),
            ],
        );

        let (fragments, _) = FragmentCollector::new()
            .collect(&mapping, &recognition)
            .unwrap();

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].polygon(), fragments[1].polygon());
    }

    #[test]
    fn malformed_mapping_polygon_is_an_error() {
        let mut mapping = CropMapping::new("page.jpg");
        mapping.crops.push(CropEntry {
            file: crop_file_name("page", 1),
            polygon: Polygon::new(vec![Point::new(0, 0)]),
            index: 1,
        });
        let mut recognition = RecognitionResults::new();
        recognition.insert("page_box001.jpg", vec![RecognizedSpan::new("text", 0.9)]);

        let result = FragmentCollector::new().collect(&mapping, &recognition);
        assert!(result.is_err());
    }
}
