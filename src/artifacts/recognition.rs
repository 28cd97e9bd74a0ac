//! Recognition output keyed by crop identifier.
//!
//! The recognizer runs per crop and reports zero or more text spans. Results
//! are held in an in-memory map keyed by crop file name rather than matched
//! back through the filesystem, so the reconstruction stage never touches
//! recognizer output files directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::processors::Polygon;

/// One recognized text span inside a crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedSpan {
    /// The recognized text, as reported (untrimmed).
    pub text: String,
    /// The recognizer's confidence for this span.
    pub confidence: f32,
    /// The span's position as reported by the recognizer, in crop-local
    /// coordinates. Kept for fidelity with recognizer output but never used
    /// for placement; the mapping's polygon is authoritative.
    #[serde(default, rename = "box")]
    pub polygon: Option<Polygon>,
}

impl RecognizedSpan {
    /// Creates a span without a recognizer-reported box.
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
            polygon: None,
        }
    }
}

/// Recognition results for all crops of one source image, keyed by crop file
/// name.
#[derive(Debug, Clone, Default)]
pub struct RecognitionResults {
    spans: HashMap<String, Vec<RecognizedSpan>>,
}

impl RecognitionResults {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the spans recognized for a crop. Replaces any previous entry
    /// for the same crop.
    pub fn insert(&mut self, crop_id: impl Into<String>, spans: Vec<RecognizedSpan>) {
        self.spans.insert(crop_id.into(), spans);
    }

    /// The spans recognized for a crop, if the crop was processed at all.
    pub fn spans_for(&self, crop_id: &str) -> Option<&[RecognizedSpan]> {
        self.spans.get(crop_id).map(Vec::as_slice)
    }

    /// Number of crops with recorded results.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns true if no crop has recorded results.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_crop_yields_none() {
        let results = RecognitionResults::new();
        assert!(results.spans_for("page_box001.jpg").is_none());
        assert!(results.is_empty());
    }

    #[test]
    fn insert_replaces_previous_spans() {
        let mut results = RecognitionResults::new();
        results.insert("page_box001.jpg", vec![RecognizedSpan::new("first", 0.9)]);
        results.insert("page_box001.jpg", vec![RecognizedSpan::new("second", 0.8)]);

        let spans = results.spans_for("page_box001.jpg").unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "second");
    }

    #[test]
    fn span_deserializes_recognizer_json() {
        let json = r#"{
            "text": "Invoice",
            "confidence": 0.97,
            "box": [[0, 0], [50, 0], [50, 18], [0, 18]]
        }"#;
        let span: RecognizedSpan = serde_json::from_str(json).unwrap();
        assert_eq!(span.text, "Invoice");
        assert!(span.polygon.is_some());

        // The box is optional; bare text/confidence rows parse too.
        let bare: RecognizedSpan = serde_json::from_str(r#"{"text":"x","confidence":0.5}"#).unwrap();
        assert!(bare.polygon.is_none());
    }
}
