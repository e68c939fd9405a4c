//! Per-axis coordinate occupancy used to keep room walls from lining up.
//!
//! Each accepted room claims its wall and centre coordinates on both axes,
//! plus a corridor-wide band next to each one. A later candidate is refused
//! if any coordinate in its own bands is already claimed. This keeps every
//! pair of room centres apart on both axes (so corridors never degenerate)
//! and leaves room for a corridor to pass beside a wall.

use std::collections::HashSet;

use dungeon_geo::Rect;

#[derive(Debug, Default)]
pub(crate) struct Occupancy {
    band: i32,
    xs: HashSet<i32>,
    ys: HashSet<i32>,
}

impl Occupancy {
    pub(crate) fn new(band: i32) -> Self {
        Self {
            band,
            ..Default::default()
        }
    }

    /// Returns `true` if no coordinate guarded by `rect` is claimed yet.
    pub(crate) fn is_free(&self, rect: &Rect) -> bool {
        let half = self.band / 2;
        (0..=self.band).all(|i| {
            !self.xs.contains(&(rect.left() + i))
                && !self.xs.contains(&(rect.cx() - half + i))
                && !self.xs.contains(&(rect.right() - i))
                && !self.ys.contains(&(rect.top() + i))
                && !self.ys.contains(&(rect.cy() - half + i))
                && !self.ys.contains(&(rect.bottom() - i))
        })
    }

    /// Claims the walls, centre lines and their buffer bands of `rect`.
    pub(crate) fn claim(&mut self, rect: &Rect) {
        let half = self.band / 2;

        self.xs.extend([rect.left(), rect.cx(), rect.right()]);
        self.ys.extend([rect.top(), rect.cy(), rect.bottom()]);

        for i in 1..=self.band {
            self.xs.insert(rect.left() + i);
            self.xs.insert(rect.right() - i);
            self.xs.insert(rect.cx() - half + i);
            self.ys.insert(rect.top() + i);
            self.ys.insert(rect.bottom() - i);
            self.ys.insert(rect.cy() - half + i);
        }
    }

    #[cfg(test)]
    fn claimed(&self) -> (usize, usize) {
        (self.xs.len(), self.ys.len())
    }
}
