//! Low-level processing primitives.
//!
//! Currently the integer geometry the pipeline operates on: points, detection
//! polygons, and axis-aligned rectangles.

pub mod geometry;

pub use geometry::{Point, Polygon, Rect};
