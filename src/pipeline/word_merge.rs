//! Merging horizontally adjacent fragments into phrases.
//!
//! Within one row, typical inter-word spacing should merge while larger
//! structural gaps (a label and a separate value on the same line) should
//! split. The merge distance adapts to the row's local character pitch,
//! bounded below by a fixed minimum.

use crate::core::config::WordMergeConfig;
use crate::pipeline::fragments::Fragment;
use crate::pipeline::line_cluster::Row;
use crate::processors::Rect;

/// A maximal run of horizontally-close fragments within one row; one
/// reconstructed phrase.
#[derive(Debug, Clone)]
pub struct Group {
    fragments: Vec<Fragment>,
}

impl Group {
    /// The member fragments, left-to-right.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The member texts joined by a single space, in left-to-right order.
    pub fn merged_text(&self) -> String {
        let mut text = String::new();
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(fragment.text());
        }
        text
    }

    /// The smallest axis-aligned rectangle enclosing every point of every
    /// member polygon.
    pub fn bounding_rect(&self) -> Rect {
        Rect::from_points(
            self.fragments
                .iter()
                .flat_map(|f| f.polygon().points.iter().copied()),
        )
    }

    /// Number of member fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if the group holds no fragments. Merging never produces
    /// an empty group.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Merges horizontally adjacent fragments of a row into phrase groups.
#[derive(Debug, Clone, Default)]
pub struct WordMerger {
    config: WordMergeConfig,
}

impl WordMerger {
    /// Creates a merger with the given configuration.
    pub fn new(config: WordMergeConfig) -> Self {
        Self { config }
    }

    /// The adaptive gap threshold for a row.
    ///
    /// `max(min_x_gap, trunc(avg_char_width * scale_gap))`, where the
    /// average character width is the mean of each fragment's box width
    /// divided by its character count (floored at one character). The
    /// product is truncated, not rounded.
    fn gap_threshold(&self, fragments: &[Fragment]) -> i32 {
        let sum: f32 = fragments
            .iter()
            .map(|f| {
                let chars = f.text().chars().count().max(1);
                f.rect().width as f32 / chars as f32
            })
            .sum();
        let avg_char_width = sum / fragments.len() as f32;

        self.config
            .min_x_gap
            .max((avg_char_width * self.config.scale_gap) as i32)
    }

    /// Splits a row into groups, preserving order.
    ///
    /// Greedy left-to-right: the gap between a fragment and the PREVIOUS
    /// fragment's right edge decides membership. A gap equal to the
    /// threshold merges; this tie-break is load-bearing for reproducibility.
    /// The output partitions the row.
    pub fn merge(&self, row: Row) -> Vec<Group> {
        let fragments = row.into_fragments();
        if fragments.is_empty() {
            return Vec::new();
        }

        let threshold = self.gap_threshold(&fragments);

        let mut groups: Vec<Group> = Vec::new();
        let mut current: Vec<Fragment> = Vec::new();
        let mut prev_edge: Option<i32> = None;

        for fragment in fragments {
            let rect = fragment.rect();
            match prev_edge {
                None => current.push(fragment),
                Some(edge) => {
                    let gap = rect.x - edge;
                    if gap <= threshold {
                        current.push(fragment);
                    } else {
                        groups.push(Group {
                            fragments: std::mem::take(&mut current),
                        });
                        current.push(fragment);
                    }
                }
            }
            // The next gap is measured against this fragment, not the
            // group's right edge.
            prev_edge = Some(rect.x + rect.width);
        }

        if !current.is_empty() {
            groups.push(Group { fragments: current });
        }

        groups
    }
}
