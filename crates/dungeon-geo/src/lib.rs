//! Integer geometry kernel for Dungeon MST.
//!
//! Everything here is a small `Copy` value type. Coordinates are screen
//! pixels: `x` grows to the right, `y` grows downwards, so a rectangle's
//! `top` is numerically smaller than its `bottom`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position on the canvas.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance. Exact, so it is what comparisons use.
    pub fn distance_squared(&self, other: &Point) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn semi_width(&self) -> i32 {
        self.width / 2
    }

    pub fn semi_height(&self) -> i32 {
        self.height / 2
    }

    /// Returns `true` if both sides are strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns `true` if `other` fits inside `self` on both axes.
    pub fn fits(&self, other: &Dimension) -> bool {
        other.width <= self.width && other.height <= self.height
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle with inclusive edges.
///
/// The fields are private so the `left <= right` and `top <= bottom`
/// invariant holds for every value; [`Rect::new`] normalises swapped edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RectRepr", from = "RectRepr")]
pub struct Rect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

/// Wire shape of a [`Rect`]. Deserialising goes through [`Rect::new`] so a
/// peer cannot smuggle in an inverted rectangle.
#[derive(Serialize, Deserialize)]
struct RectRepr {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl From<Rect> for RectRepr {
    fn from(r: Rect) -> Self {
        Self {
            left: r.left,
            top: r.top,
            right: r.right,
            bottom: r.bottom,
        }
    }
}

impl From<RectRepr> for Rect {
    fn from(r: RectRepr) -> Self {
        Rect::new(r.left, r.top, r.right, r.bottom)
    }
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Builds the rectangle of the given size whose top-left corner is
    /// `center - size / 2`.
    pub fn from_center(center: Point, size: Dimension) -> Self {
        let left = center.x - size.semi_width();
        let top = center.y - size.semi_height();
        Self::new(left, top, left + size.width, top + size.height)
    }

    /// Builds the rectangle of the given size anchored at `origin`.
    pub fn from_origin(origin: Point, size: Dimension) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Dimension {
        Dimension::new(self.width(), self.height())
    }

    pub fn cx(&self) -> i32 {
        self.left + self.width() / 2
    }

    pub fn cy(&self) -> i32 {
        self.top + self.height() / 2
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx(), self.cy())
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Closed-interval overlap: rectangles that only touch along an edge
    /// still intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    pub fn in_bounds(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.left
            && p.x <= self.right
            && p.y >= self.top
            && p.y <= self.bottom
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Grows the rectangle by `margin` on every side. A negative margin
    /// shrinks it; shrinking past the centre collapses to the centre line.
    pub fn expand(&self, margin: i32) -> Self {
        let (left, right) = if self.width() + 2 * margin < 0 {
            (self.cx(), self.cx())
        } else {
            (self.left - margin, self.right + margin)
        };
        let (top, bottom) = if self.height() + 2 * margin < 0 {
            (self.cy(), self.cy())
        } else {
            (self.top - margin, self.bottom + margin)
        };
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// A segment between two points. Endpoint order is significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Line {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }

    pub fn is_horizontal(&self) -> bool {
        self.p1.y == self.p2.y
    }

    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }

    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    /// Returns the endpoint this line has in common with `other`, if any.
    pub fn shared_endpoint(&self, other: &Line) -> Option<Point> {
        [self.p1, self.p2]
            .into_iter()
            .find(|p| *p == other.p1 || *p == other.p2)
    }
}
