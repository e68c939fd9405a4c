//! L-shaped corridors joining two room centres.

use dungeon_geo::{Line, Point, Rect};

use crate::CorridorError;

/// Two perpendicular strips of equal width meeting at a junction.
///
/// The horizontal line runs left-to-right, the vertical one top-to-bottom,
/// and one endpoint of each is the shared junction. Corridors are only
/// built through [`Corridor::new`], which enforces all of that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corridor {
    h_line: Line,
    h_rect: Rect,
    v_line: Line,
    v_rect: Rect,
}

impl Corridor {
    /// Builds a corridor from a horizontal and a vertical centre line.
    ///
    /// # Errors
    /// Returns a [`CorridorError`] when a line is degenerate, the pair is
    /// not horizontal + vertical, the lines share no endpoint, or the
    /// endpoints are out of order.
    pub fn new(h: Line, v: Line, width: i32) -> Result<Self, CorridorError> {
        if h.is_degenerate() || v.is_degenerate() {
            return Err(CorridorError::Degenerate);
        }
        if !(h.is_horizontal() && v.is_vertical()) {
            return Err(CorridorError::NotPerpendicular);
        }
        if h.shared_endpoint(&v).is_none() {
            return Err(CorridorError::Disjoint);
        }
        if h.p1.x > h.p2.x || v.p1.y > v.p2.y {
            return Err(CorridorError::Unordered);
        }

        let sw = width / 2;
        let h_rect = Rect::new(h.p1.x, h.p1.y - sw, h.p2.x, h.p1.y + sw);
        let v_rect = Rect::new(v.p1.x - sw, v.p1.y, v.p1.x + sw, v.p2.y);

        Ok(Self {
            h_line: h,
            h_rect,
            v_line: v,
            v_rect,
        })
    }

    /// Builds the corridor from `a` to `b`: horizontal at `a.y`, turning at
    /// `(b.x, a.y)`, then vertical at `b.x`.
    ///
    /// # Errors
    /// Fails with [`CorridorError::Degenerate`] when the points share an
    /// x or y coordinate.
    pub fn between(a: Point, b: Point, width: i32) -> Result<Self, CorridorError> {
        let h = Line::new(
            Point::new(a.x.min(b.x), a.y),
            Point::new(a.x.max(b.x), a.y),
        );
        let v = Line::new(
            Point::new(b.x, a.y.min(b.y)),
            Point::new(b.x, a.y.max(b.y)),
        );
        Self::new(h, v, width)
    }

    pub fn horizontal(&self) -> Rect {
        self.h_rect
    }

    pub fn vertical(&self) -> Rect {
        self.v_rect
    }

    pub fn horizontal_line(&self) -> Line {
        self.h_line
    }

    pub fn vertical_line(&self) -> Line {
        self.v_line
    }

    /// The point where the two strips meet.
    pub fn junction(&self) -> Point {
        // Checked non-empty in `new`.
        self.h_line
            .shared_endpoint(&self.v_line)
            .unwrap_or(self.h_line.p2)
    }

    /// Returns `true` if `rect` lies entirely inside one of the strips.
    pub fn in_bounds(&self, rect: &Rect) -> bool {
        self.h_rect.in_bounds(rect) || self.v_rect.in_bounds(rect)
    }
}
