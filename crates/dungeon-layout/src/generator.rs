//! Room placement by rejection sampling, and corridor construction.

use dungeon_geo::{Dimension, Point};
use rand::Rng;
use tracing::debug;

use crate::occupancy::Occupancy;
use crate::{Corridor, LayoutConfig, LayoutError, Room, SizeFactor, spanning_edges};

/// Rooms plus the corridors that connect them into a single tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
}

/// Builds layouts from a validated [`LayoutConfig`].
///
/// The generator owns no randomness: every call takes the RNG to use, so
/// the same seed always produces the same layout.
#[derive(Debug, Clone)]
pub struct Generator {
    config: LayoutConfig,
}

impl Generator {
    /// # Errors
    /// Returns [`LayoutError::InvalidConfig`] if the config cannot fit a
    /// single room.
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Places rooms and connects them.
    ///
    /// The result may hold zero or one room if sampling was unlucky; it is
    /// up to the caller to decide whether that is playable.
    ///
    /// # Errors
    /// Only [`LayoutError::Invariant`], which indicates a bug.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Layout, LayoutError> {
        let rooms = self.place_rooms(rng);
        let corridors = self.connect(&rooms)?;
        debug!(
            rooms = rooms.len(),
            corridors = corridors.len(),
            "layout generated"
        );
        Ok(Layout { rooms, corridors })
    }

    /// Runs the full attempt budget of rejection sampling.
    pub fn place_rooms<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Room> {
        let unit = self.config.unit.width;
        let margin = self.config.corridor_width;
        let max = self.config.max_room();
        let mut occupancy = Occupancy::new(self.config.corridor_width);
        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..self.config.attempts {
            let center = self.random_center(rng, max);
            let factor = self.random_factor(rng);
            let candidate = Room::new(center, factor, unit);

            if rooms.iter().any(|room| room.overlaps(&candidate, margin)) {
                continue;
            }
            if !occupancy.is_free(&candidate.rect()) {
                continue;
            }

            occupancy.claim(&candidate.rect());
            rooms.push(candidate);
        }

        rooms
    }

    /// Connects the rooms with one corridor per spanning-tree edge.
    ///
    /// # Errors
    /// [`LayoutError::Invariant`] if two connected centres share a row or
    /// column, which placement rules out.
    pub fn connect(&self, rooms: &[Room]) -> Result<Vec<Corridor>, LayoutError> {
        let centers: Vec<Point> = rooms.iter().map(Room::center).collect();
        spanning_edges(&centers)
            .into_iter()
            .map(|(a, b)| {
                rooms[a]
                    .corridor_to(&rooms[b], self.config.corridor_width)
                    .map_err(LayoutError::from)
            })
            .collect()
    }

    /// A centre for which the largest possible room still fits the canvas.
    fn random_center<R: Rng + ?Sized>(&self, rng: &mut R, max: Dimension) -> Point {
        let canvas = self.config.canvas;
        let free_w = f64::from(canvas.width - max.width);
        let free_h = f64::from(canvas.height - max.height);
        let cx = max.semi_width() + (free_w * rng.random::<f64>()) as i32;
        let cy = max.semi_height() + (free_h * rng.random::<f64>()) as i32;
        Point::new(cx, cy)
    }

    fn random_factor<R: Rng + ?Sized>(&self, rng: &mut R) -> SizeFactor {
        SizeFactor {
            width: rng.random_range(1..=self.config.max_width_factor),
            height: rng.random_range(1..=self.config.max_height_factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use dungeon_geo::Dimension;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn small_config() -> LayoutConfig {
        LayoutConfig {
            attempts: 2_000,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = LayoutConfig::with_canvas(Dimension::new(10, 10));
        assert!(Generator::new(config).is_err());
    }

    #[test]
    fn test_rooms_stay_inside_canvas() {
        let generator = Generator::new(small_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let rooms = generator.place_rooms(&mut rng);
        assert!(!rooms.is_empty());

        let canvas = dungeon_geo::Rect::new(0, 0, 1280, 720);
        for room in &rooms {
            assert!(canvas.in_bounds(&room.rect()), "{:?} escapes canvas", room);
        }
    }

    #[test]
    fn test_zero_attempts_yields_empty_layout() {
        let generator = Generator::new(LayoutConfig {
            attempts: 0,
            ..LayoutConfig::default()
        })
        .unwrap();
        let layout = generator.generate(&mut StdRng::seed_from_u64(1)).unwrap();
        assert!(layout.rooms.is_empty());
        assert!(layout.corridors.is_empty());
    }

    #[test]
    fn test_single_attempt_yields_single_room_no_corridors() {
        let generator = Generator::new(LayoutConfig {
            attempts: 1,
            ..LayoutConfig::default()
        })
        .unwrap();
        let layout = generator.generate(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(layout.rooms.len(), 1);
        assert!(layout.corridors.is_empty());
    }

    #[test]
    fn test_room_sizes_are_unit_multiples() {
        let generator = Generator::new(small_config()).unwrap();
        let rooms = generator.place_rooms(&mut StdRng::seed_from_u64(11));
        for room in rooms {
            let f = room.factor();
            assert!((1..=8).contains(&f.width));
            assert!((1..=5).contains(&f.height));
            assert_eq!(room.rect().width(), f.width * 64);
            assert_eq!(room.rect().height(), f.height * 64);
        }
    }
}
