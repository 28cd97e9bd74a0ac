//! Geometric primitives for fragment restitching.
//!
//! This module provides the integer-pixel geometry the restitching pipeline
//! operates on: points, four-point detection polygons, and axis-aligned
//! rectangles. Polygons serialize as arrays of `[x, y]` pairs so that mapping
//! artifacts written by the detection stage stay readable by the
//! reconstruction stage.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 2D point with integer pixel coordinates in original-image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// X-coordinate of the point.
    pub x: i32,
    /// Y-coordinate of the point.
    pub y: i32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// Points serialize as `[x, y]` pairs, matching the mapping JSON produced by
// the detection stage.
impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.x)?;
        tuple.serialize_element(&self.y)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PointVisitor;

        impl<'de> Visitor<'de> for PointVisitor {
            type Value = Point;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a two-element [x, y] array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Point, A::Error> {
                let x = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let y = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                Ok(Point::new(x, y))
            }
        }

        deserializer.deserialize_tuple(2, PointVisitor)
    }
}

/// A detection polygon: corner points of one detected text region.
///
/// Detection collaborators produce four-point quadrilaterals. The polygon
/// itself does not enforce the point count; `Fragment` construction does,
/// because degenerate artifacts must be rejected before clustering while the
/// reading-order sorter deliberately passes everything through unfiltered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    /// The corner points of the polygon.
    pub points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from a vector of points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Creates an axis-aligned rectangular polygon from corner coordinates.
    pub fn from_coords(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            points: vec![
                Point::new(x1, y1),
                Point::new(x2, y1),
                Point::new(x2, y2),
                Point::new(x1, y2),
            ],
        }
    }

    /// Builds a polygon from floating-point corners, rejecting non-finite
    /// coordinates.
    ///
    /// Detection models report sub-pixel box corners; this is the ingestion
    /// point where they are rounded into integer image space. Returns `None`
    /// if any coordinate is NaN or infinite.
    pub fn from_f32_points(points: &[(f32, f32)]) -> Option<Self> {
        let converted = points
            .iter()
            .map(|&(x, y)| {
                (x.is_finite() && y.is_finite())
                    .then(|| Point::new(x.round() as i32, y.round() as i32))
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(converted))
    }

    /// Returns true if the polygon has the expected four corner points.
    pub fn is_quad(&self) -> bool {
        self.points.len() == 4
    }

    /// Computes the axis-aligned bounding rectangle of the polygon.
    ///
    /// Returns a zero-sized rectangle at the origin for an empty polygon.
    /// Width and height are `max - min`, so a polygon whose points share a
    /// coordinate yields a degenerate (zero-extent) rectangle rather than
    /// being filtered out.
    pub fn bounding_rect(&self) -> Rect {
        Rect::from_points(self.points.iter().copied())
    }
}

/// An axis-aligned rectangle in integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// X-coordinate of the left edge.
    pub x: i32,
    /// Y-coordinate of the top edge.
    pub y: i32,
    /// Width of the rectangle.
    pub width: i32,
    /// Height of the rectangle.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extent.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Computes the bounding rectangle of a set of points.
    ///
    /// Returns a zero-sized rectangle at the origin when the iterator is
    /// empty.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Rect::new(0, 0, 0, 0);
        };

        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        for p in iter {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// X-coordinate of the right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Y-coordinate of the bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns the smallest rectangle enclosing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Returns true if `other` lies entirely within `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Returns true if the rectangle has zero width or height.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
