//! Constants used throughout the restitching pipeline.
//!
//! The two vertical thresholds intentionally differ: detection-stage reading
//! order and reconstruction-stage line clustering are tuned independently and
//! must never share a value.

/// Default vertical threshold (pixels) for detection-stage reading order.
pub const DEFAULT_READING_ORDER_THRESHOLD: i32 = 30;

/// Default vertical threshold (pixels) for reconstruction-stage line clustering.
pub const DEFAULT_LINE_CLUSTER_THRESHOLD: i32 = 50;

/// Default lower bound (pixels) on the horizontal merge gap within a row.
pub const DEFAULT_MIN_X_GAP: i32 = 120;

/// Default multiplier applied to the average character width when deriving
/// the adaptive horizontal merge gap.
pub const DEFAULT_SCALE_GAP: f32 = 2.5;

/// Default minimum width/height (pixels) for a detection box to be cropped.
/// Smaller boxes are treated as detector noise upstream of the clustering core.
pub const DEFAULT_MIN_BOX_SIZE: i32 = 20;

/// Default number of items above which batch operations switch to parallel
/// processing.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;
