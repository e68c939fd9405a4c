//! Rooms: the rectangular chambers of a layout.

use dungeon_geo::{Dimension, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::{Corridor, CorridorError};

/// Room size in multiples of the base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeFactor {
    pub width: i32,
    pub height: i32,
}

/// A placed room. Immutable once the generator accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    rect: Rect,
    factor: SizeFactor,
}

impl Room {
    /// Builds a room of `factor × unit` pixels centred on `center`.
    pub fn new(center: Point, factor: SizeFactor, unit: i32) -> Self {
        let size = Dimension::new(factor.width * unit, factor.height * unit);
        Self {
            rect: Rect::from_center(center, size),
            factor,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn factor(&self) -> SizeFactor {
        self.factor
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Returns `true` if the two rooms come within `margin` of each other
    /// (both rectangles grown by `margin` intersect).
    pub fn overlaps(&self, other: &Room, margin: i32) -> bool {
        self.overlaps_rect(&other.rect, margin)
    }

    pub fn overlaps_rect(&self, rect: &Rect, margin: i32) -> bool {
        self.rect.expand(margin).intersects(&rect.expand(margin))
    }

    /// Returns `true` if `rect` lies entirely inside this room.
    pub fn in_bounds(&self, rect: &Rect) -> bool {
        self.rect.in_bounds(rect)
    }

    /// The walkable area inside walls of the given thickness.
    pub fn interior(&self, wall: i32) -> Rect {
        self.rect.expand(-wall)
    }

    /// Builds the corridor leaving this room's centre horizontally and
    /// entering `other`'s centre vertically.
    ///
    /// # Errors
    /// Fails when the two centres share a row or a column.
    pub fn corridor_to(
        &self,
        other: &Room,
        width: i32,
    ) -> Result<Corridor, CorridorError> {
        Corridor::between(self.center(), other.center(), width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(cx: i32, cy: i32, w: i32, h: i32) -> Room {
        Room::new(
            Point::new(cx, cy),
            SizeFactor {
                width: w,
                height: h,
            },
            64,
        )
    }

    #[test]
    fn test_room_size_and_center() {
        let r = room(300, 200, 2, 3);
        assert_eq!(r.rect(), Rect::new(236, 104, 364, 296));
        assert_eq!(r.center(), Point::new(300, 200));
        assert_eq!(r.factor().height, 3);
    }

    #[test]
    fn test_overlaps_respects_margin() {
        // a spans x 0..128, b spans x 192..320: a 64px gap.
        let a = room(64, 100, 2, 1);
        let b = room(256, 100, 2, 1);
        assert!(!a.overlaps(&b, 0));
        assert!(!a.overlaps(&b, 31));
        assert!(a.overlaps(&b, 32));
    }

    #[test]
    fn test_interior_excludes_walls() {
        let r = room(100, 100, 1, 1);
        assert_eq!(r.interior(12), Rect::new(80, 80, 120, 120));
    }

    #[test]
    fn test_corridor_to_connects_centers() {
        let a = room(100, 100, 1, 1);
        let b = room(500, 400, 2, 2);
        let c = a.corridor_to(&b, 32).unwrap();
        assert!(c.horizontal().contains_point(&a.center()));
        assert!(c.vertical().contains_point(&b.center()));
    }

    #[test]
    fn test_corridor_to_aligned_room_fails() {
        let a = room(100, 100, 1, 1);
        let b = room(100, 400, 1, 1);
        assert!(a.corridor_to(&b, 32).is_err());
    }
}
