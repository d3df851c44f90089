//! Axis-aligned bounding boxes as (top-left, bottom-right) corner pairs.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::coord::Point;

/// Smallest width or height, in pixels, of a box the drawing surface accepts.
pub const MIN_EXTENT_PX: f64 = 10.0;

/// An axis-aligned rectangle in image-pixel space.
///
/// Serialized as `[[x0, y0], [x1, y1]]`.
///
/// Note: the constructor does NOT enforce `top_left <= bottom_right`, so that
/// a malformed box read from a document can still be represented and then
/// reported by validation instead of being rejected during parsing.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl BoundingBox {
    /// Creates a new bounding box from its two corners.
    #[inline]
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Builds an ordered box from two arbitrary corners, e.g. the press and
    /// release points of a drag in any direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    /// The same rectangle with its corners swapped into top-left and
    /// bottom-right order.
    pub fn normalized(&self) -> Self {
        Self::from_corners(self.top_left, self.bottom_right)
    }

    /// Like [`from_corners`](Self::from_corners), but returns `None` when the
    /// resulting box is narrower or shorter than [`MIN_EXTENT_PX`].
    pub fn from_drag(start: Point, end: Point) -> Option<Self> {
        let bbox = Self::from_corners(start, end);
        bbox.meets_min_extent().then_some(bbox)
    }

    #[inline]
    pub fn x0(&self) -> f64 {
        self.top_left.x
    }

    #[inline]
    pub fn y0(&self) -> f64 {
        self.top_left.y
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.bottom_right.x
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.bottom_right.y
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is malformed (x1 < x0).
    #[inline]
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is malformed (y1 < y0).
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.top_left.is_finite() && self.bottom_right.is_finite()
    }

    /// Returns true if the box is properly ordered (x0 <= x1 and y0 <= y1).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.top_left.x <= self.bottom_right.x && self.top_left.y <= self.bottom_right.y
    }

    /// Returns true if both extents reach [`MIN_EXTENT_PX`].
    pub fn meets_min_extent(&self) -> bool {
        self.width().abs() >= MIN_EXTENT_PX && self.height().abs() >= MIN_EXTENT_PX
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.top_left.min(other.top_left),
            self.bottom_right.max(other.bottom_right),
        )
    }

    /// Union over an iterator of boxes; `None` when the iterator is empty.
    pub fn union_all<'a, I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, b| match acc {
                Some(u) => Some(u.union(b)),
                None => Some(*b),
            })
    }
}

impl fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundingBox")
            .field("x0", &self.top_left.x)
            .field("y0", &self.top_left.y)
            .field("x1", &self.bottom_right.x)
            .field("y1", &self.bottom_right.y)
            .finish()
    }
}

/// Rounded corner caption, e.g. `[10, 10] → [200, 50]`.
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] → [{}, {}]",
            self.x0().round(),
            self.y0().round(),
            self.x1().round(),
            self.y1().round()
        )
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.top_left, self.bottom_right].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [top_left, bottom_right] = <[Point; 2]>::deserialize(deserializer)?;
        Ok(BoundingBox::new(top_left, bottom_right))
    }
}
