//! Emission of records and annotated rasters from phrase groups.

use image::RgbImage;
use tracing::info;

use crate::pipeline::result::Record;
use crate::pipeline::word_merge::Group;
use crate::utils::visualization::{VisualizationConfig, draw_phrase_box, draw_phrase_text};

/// Converts each phrase group into a persisted record and draws it onto a
/// per-image copy of the original raster.
///
/// The text drawn into the visualization is the very `String` stored in the
/// record, never a separately formatted copy.
pub struct RecordEmitter {
    viz: VisualizationConfig,
}

impl Default for RecordEmitter {
    fn default() -> Self {
        Self {
            viz: VisualizationConfig::default(),
        }
    }
}

impl RecordEmitter {
    /// Creates an emitter with the given visualization configuration.
    pub fn new(viz: VisualizationConfig) -> Self {
        Self { viz }
    }

    /// Emits records and an annotated image for one source image's groups.
    ///
    /// Zero groups yield zero records and no visualization; that is a normal
    /// outcome, logged for observability only.
    pub fn emit(
        &self,
        image_id: &str,
        groups: &[Group],
        source: &RgbImage,
    ) -> (Vec<Record>, Option<RgbImage>) {
        if groups.is_empty() {
            info!(image = image_id, "no phrase groups, nothing to emit");
            return (Vec::new(), None);
        }

        let mut annotated = source.clone();
        let mut records = Vec::with_capacity(groups.len());

        for group in groups {
            let bbox = group.bounding_rect();
            let merged_text = group.merged_text();

            draw_phrase_box(&mut annotated, &bbox, &self.viz);
            draw_phrase_text(&mut annotated, &bbox, &merged_text, &self.viz);

            records.push(Record::new(image_id, merged_text));
        }

        (records, Some(annotated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{LineClusteringConfig, WordMergeConfig};
    use crate::pipeline::fragments::Fragment;
    use crate::pipeline::line_cluster::LineClusterer;
    use crate::pipeline::word_merge::WordMerger;
    use crate::processors::Polygon;

    fn groups_for(fragments: Vec<Fragment>) -> Vec<Group> {
        let clusterer = LineClusterer::new(LineClusteringConfig::default());
        let merger = WordMerger::new(WordMergeConfig::default());
        clusterer
            .cluster(fragments)
            .into_iter()
            .flat_map(|row| merger.merge(row))
            .collect()
    }

    fn fragment(text: &str, x: i32, y: i32, w: i32, h: i32) -> Fragment {
        Fragment::new(Polygon::from_coords(x, y, x + w, y + h), text, 0.9).unwrap()
    }

    #[test]
    fn zero_groups_emit_nothing() {
        let emitter = RecordEmitter::default();
        let source = RgbImage::new(100, 100);

        let (records, annotated) = emitter.emit("page", &[], &source);
        assert!(records.is_empty());
        assert!(annotated.is_none());
    }

    #[test]
    fn one_record_per_group_in_reading_order() {
        let emitter = RecordEmitter::default();
        let source = RgbImage::new(1200, 200);
        let groups = groups_for(vec![
            fragment("Invoice", 0, 0, 60, 20),
            fragment("No:", 70, 0, 30, 20),
            fragment("Total", 0, 100, 60, 20),
        ]);

        let (records, annotated) = emitter.emit("page", &groups, &source);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::new("page", "Invoice No:"));
        assert_eq!(records[1], Record::new("page", "Total"));
        assert!(annotated.is_some());
    }

    #[test]
    fn annotated_image_has_group_boxes_drawn() {
        let emitter = RecordEmitter::default();
        let source = RgbImage::new(400, 100);
        let groups = groups_for(vec![fragment("hello", 10, 10, 80, 20)]);

        let (_, annotated) = emitter.emit("page", &groups, &source);
        let annotated = annotated.unwrap();
        assert_ne!(annotated, source);
    }

    #[test]
    fn record_text_matches_group_text_exactly() {
        let emitter = RecordEmitter::default();
        let source = RgbImage::new(400, 100);
        let groups = groups_for(vec![
            fragment("a", 0, 0, 30, 20),
            fragment("b", 40, 0, 30, 20),
        ]);

        let (records, _) = emitter.emit("page", &groups, &source);
        assert_eq!(records[0].text, groups[0].merged_text());
    }
}
