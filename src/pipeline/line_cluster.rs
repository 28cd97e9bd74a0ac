//! Clustering fragments into visual lines.

use tracing::debug;

use crate::core::config::LineClusteringConfig;
use crate::pipeline::fragments::Fragment;

/// An ordered run of fragments judged to lie on the same visual line,
/// sorted left-to-right.
#[derive(Debug, Clone)]
pub struct Row {
    fragments: Vec<Fragment>,
}

impl Row {
    /// The fragments of this row, left-to-right.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Consumes the row, yielding its fragments left-to-right.
    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }

    /// Number of fragments in the row.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if the row holds no fragments. Clustering never produces
    /// an empty row.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Groups fragments into rows by vertical proximity.
///
/// Same greedy algorithm as the detection-stage reading-order sorter, but
/// over fragments carrying recognized text and with its own, independently
/// configured threshold (default 50 px vs. the sorter's 30 px). A fragment
/// joins the current row when its `y` is within the threshold of the row's
/// FIRST member's `y` — anchoring to the first member, not a rolling mean,
/// is a documented quirk that can drift on tall or tilted lines and is kept
/// because downstream thresholds are tuned against it.
#[derive(Debug, Clone, Default)]
pub struct LineClusterer {
    config: LineClusteringConfig,
}

impl LineClusterer {
    /// Creates a clusterer with the given configuration.
    pub fn new(config: LineClusteringConfig) -> Self {
        Self { config }
    }

    /// Clusters fragments into rows, top-to-bottom, each sorted
    /// left-to-right.
    ///
    /// The output is a partition of the input: every fragment lands in
    /// exactly one row.
    pub fn cluster(&self, fragments: Vec<Fragment>) -> Vec<Row> {
        if fragments.is_empty() {
            return Vec::new();
        }

        let threshold = self.config.vertical_threshold;

        let mut annotated: Vec<(i32, i32, Fragment)> = fragments
            .into_iter()
            .map(|fragment| {
                let rect = fragment.rect();
                (rect.x, rect.y, fragment)
            })
            .collect();

        annotated.sort_by_key(|&(_, y, _)| y);

        let mut rows: Vec<Vec<(i32, i32, Fragment)>> = Vec::new();
        let mut current_row: Vec<(i32, i32, Fragment)> = Vec::new();

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

        debug!("clustered fragments into {} rows", rows.len());

        rows.into_iter()
            .map(|mut row| {
                row.sort_by_key(|&(x, _, _)| x);
                Row {
                    fragments: row.into_iter().map(|(_, _, fragment)| fragment).collect(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::Polygon;

    fn fragment(text: &str, x: i32, y: i32, w: i32, h: i32) -> Fragment {
        Fragment::new(Polygon::from_coords(x, y, x + w, y + h), text, 0.9).unwrap()
    }

    fn texts(row: &Row) -> Vec<&str> {
        row.fragments().iter().map(|f| f.text()).collect()
    }

    #[test]
    fn empty_input_yields_no_rows() {
        let clusterer = LineClusterer::default();
        assert!(clusterer.cluster(Vec::new()).is_empty());
    }

    #[test]
    fn sixty_pixel_offset_splits_rows_regardless_of_x() {
        // dy = 60 under a 50 px threshold means two rows even when the boxes
        // overlap horizontally.
        let clusterer = LineClusterer::default();
        let rows = clusterer.cluster(vec![
            fragment("upper", 0, 0, 60, 20),
            fragment("lower", 0, 60, 60, 20),
        ]);

        assert_eq!(rows.len(), 2);
        assert_eq!(texts(&rows[0]), vec!["upper"]);
        assert_eq!(texts(&rows[1]), vec!["lower"]);
    }

    #[test]
    fn threshold_tie_keeps_fragments_in_one_row() {
        let clusterer = LineClusterer::default();
        let rows = clusterer.cluster(vec![
            fragment("a", 100, 0, 40, 20),
            fragment("b", 0, 50, 40, 20),
        ]);

        assert_eq!(rows.len(), 1);
        assert_eq!(texts(&rows[0]), vec!["b", "a"]);
    }

    #[test]
    fn rows_are_sorted_left_to_right() {
        let clusterer = LineClusterer::default();
        let rows = clusterer.cluster(vec![
            fragment("third", 400, 2, 60, 20),
            fragment("first", 0, 0, 60, 20),
            fragment("second", 200, 4, 60, 20),
        ]);

        assert_eq!(rows.len(), 1);
        assert_eq!(texts(&rows[0]), vec!["first", "second", "third"]);
    }

    #[test]
    fn anchor_is_first_member_not_rolling_mean() {
        // y = 0, 40, 80: 80 is within 50 of 40 but not of the anchor at 0.
        let clusterer = LineClusterer::default();
        let rows = clusterer.cluster(vec![
            fragment("a", 0, 0, 40, 20),
            fragment("b", 50, 40, 40, 20),
            fragment("c", 100, 80, 40, 20),
        ]);

        assert_eq!(rows.len(), 2);
        assert_eq!(texts(&rows[0]), vec!["a", "b"]);
        assert_eq!(texts(&rows[1]), vec!["c"]);
    }

    #[test]
    fn clustering_partitions_the_input() {
        let clusterer = LineClusterer::default();
        let input: Vec<Fragment> = (0..20)
            .map(|i| fragment(&format!("f{i}"), (i % 5) * 100, (i / 5) * 70, 60, 20))
            .collect();
        let expected: usize = input.len();

        let rows = clusterer.cluster(input);
        let total: usize = rows.iter().map(Row::len).sum();
        assert_eq!(total, expected);
        assert!(rows.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn raising_the_threshold_never_adds_rows() {
        let make_input = || {
            vec![
                fragment("a", 0, 0, 40, 20),
                fragment("b", 50, 35, 40, 20),
                fragment("c", 100, 90, 40, 20),
                fragment("d", 150, 140, 40, 20),
            ]
        };

        let mut previous = usize::MAX;
        for threshold in [10, 40, 60, 150] {
            let clusterer =
                LineClusterer::new(LineClusteringConfig::new().with_vertical_threshold(threshold));
            let count = clusterer.cluster(make_input()).len();
            assert!(count <= previous);
            previous = count;
        }
    }
}
