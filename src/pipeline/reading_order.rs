//! Reading-order sorting of detection polygons.
//!
//! Runs at the detection stage, before cropping and recognition, so that
//! every crop gets a stable, deterministic ordinal no matter what order the
//! detector emitted its polygons in.

use tracing::debug;

use crate::core::config::ReadingOrderConfig;
use crate::processors::Polygon;

/// Orders detection polygons top-to-bottom across rows, left-to-right within
/// a row.
///
/// Rows are formed greedily over the y-sorted boxes: a box joins the current
/// row when its `y` is within `vertical_threshold` of the row's FIRST
/// member's `y`. The anchor is deliberately the first member rather than a
/// rolling mean; on tall or tilted lines this can drift row boundaries, and
/// downstream thresholds are tuned against exactly this behavior.
#[derive(Debug, Clone, Default)]
pub struct ReadingOrderSorter {
    config: ReadingOrderConfig,
}

impl ReadingOrderSorter {
    /// Creates a sorter with the given configuration.
    pub fn new(config: ReadingOrderConfig) -> Self {
        Self { config }
    }

    /// Sorts polygons into reading order.
    ///
    /// Empty input yields empty output. Degenerate (zero-extent) polygons are
    /// passed through unfiltered; size filtering is the cropping stage's
    /// responsibility, not this component's. Sorting is stable, so re-sorting
    /// an already ordered list yields an identical sequence.
    pub fn sort(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        if polygons.is_empty() {
            return polygons;
        }

        let threshold = self.config.vertical_threshold;

        let mut annotated: Vec<(i32, i32, Polygon)> = polygons
            .into_iter()
            .map(|polygon| {
                let rect = polygon.bounding_rect();
                (rect.x, rect.y, polygon)
            })
            .collect();

        // Top to bottom; stable, so ties keep detector order.
        annotated.sort_by_key(|&(_, y, _)| y);

        let mut rows: Vec<Vec<(i32, i32, Polygon)>> = Vec::new();
        let mut current_row: Vec<(i32, i32, Polygon)> = Vec::new();

        for item in annotated {
            match current_row.first() {
                None => current_row.push(item),
                Some(&(_, anchor_y, _)) => {
                    if (item.1 - anchor_y).abs() <= threshold {
                        current_row.push(item);
                    } else {
                        rows.push(std::mem::take(&mut current_row));
                        current_row.push(item);
                    }
                }
            }
        }
        if !current_row.is_empty() {
            rows.push(current_row);
        }

        debug!("reading order: {} rows", rows.len());

        let mut sorted = Vec::new();
        for mut row in rows {
            row.sort_by_key(|&(x, _, _)| x);
            sorted.extend(row.into_iter().map(|(_, _, polygon)| polygon));
        }
        sorted
    }
}
