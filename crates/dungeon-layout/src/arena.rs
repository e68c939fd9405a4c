//! `Match`: one round's immutable world.

use dungeon_geo::{Point, Rect};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Corridor, Generator, Layout, LayoutConfig, LayoutError, Room};

/// Rooms, corridors and an optional pickup for a single round.
///
/// Built all at once by [`Match::random`] and never mutated afterwards;
/// a new round replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    pickup: Option<Point>,
}

impl Match {
    /// Generates a fresh layout and drops a pickup into one of its rooms.
    ///
    /// # Errors
    /// - [`LayoutError::NoRooms`] if placement accepted nothing.
    /// - [`LayoutError::Invariant`] from corridor construction.
    pub fn random<R: Rng + ?Sized>(
        generator: &Generator,
        rng: &mut R,
    ) -> Result<Self, LayoutError> {
        let Layout { rooms, corridors } = generator.generate(rng)?;
        if rooms.is_empty() {
            return Err(LayoutError::NoRooms {
                attempts: generator.config().attempts,
            });
        }
        let pickup = place_pickup(&rooms, generator.config(), rng);
        Ok(Self {
            rooms,
            corridors,
            pickup,
        })
    }

    /// Assembles a match from parts that were built elsewhere.
    pub fn from_parts(
        rooms: Vec<Room>,
        corridors: Vec<Corridor>,
        pickup: Option<Point>,
    ) -> Self {
        Self {
            rooms,
            corridors,
            pickup,
        }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Top-left corner of the pickup, if one was placed.
    pub fn pickup(&self) -> Option<Point> {
        self.pickup
    }

    /// Where new players appear: the centre of the first room.
    pub fn spawn_point(&self) -> Point {
        self.rooms
            .first()
            .map(Room::center)
            .unwrap_or(Point::ORIGIN)
    }
}

/// Finds a spot for the pickup strictly inside some room's walls.
///
/// Rooms are tried in random order; the first whose interior can hold the
/// pickup gets it at a random offset.
fn place_pickup<R: Rng + ?Sized>(
    rooms: &[Room],
    config: &LayoutConfig,
    rng: &mut R,
) -> Option<Point> {
    let size = config.pickup;
    let mut order: Vec<usize> = (0..rooms.len()).collect();
    order.shuffle(rng);

    order.into_iter().find_map(|i| {
        let interior: Rect = rooms[i].interior(config.wall());
        if !interior.size().fits(&size) {
            return None;
        }
        let x = interior.left() + rng.random_range(0..=interior.width() - size.width);
        let y = interior.top() + rng.random_range(0..=interior.height() - size.height);
        Some(Point::new(x, y))
    })
}
