//! Layout configuration.

use dungeon_geo::Dimension;
use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Everything the generator needs to know about the world it builds.
///
/// Passed explicitly to [`Generator::new`](crate::Generator::new) and kept
/// by it; there is no global layout state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Drawable area in pixels.
    pub canvas: Dimension,

    /// Base brick size. Rooms are sized in multiples of `unit.width` on
    /// both axes; `unit.height` is the wall thickness.
    pub unit: Dimension,

    /// Room width factors are drawn from `1..=max_width_factor`.
    pub max_width_factor: i32,

    /// Room height factors are drawn from `1..=max_height_factor`.
    pub max_height_factor: i32,

    /// Width of a corridor strip. Also used as the collision margin between
    /// rooms and as the width of the coordinate buffer bands.
    pub corridor_width: i32,

    /// How many candidate rooms to try before giving up.
    pub attempts: u32,

    /// Size of the pickup object placed inside one room.
    pub pickup: Dimension,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas: Dimension::new(1280, 720),
            unit: Dimension::new(64, 12),
            max_width_factor: 8,
            max_height_factor: 5,
            corridor_width: 32,
            attempts: 100_000,
            pickup: Dimension::new(32, 26),
        }
    }
}

impl LayoutConfig {
    /// Default configuration for a canvas of the given size.
    pub fn with_canvas(canvas: Dimension) -> Self {
        Self {
            canvas,
            ..Default::default()
        }
    }

    /// Bounding box of the largest room the factors allow.
    pub fn max_room(&self) -> Dimension {
        Dimension::new(
            self.max_width_factor * self.unit.width,
            self.max_height_factor * self.unit.width,
        )
    }

    /// Wall thickness of a room.
    pub fn wall(&self) -> i32 {
        self.unit.height
    }

    /// Checks the configuration can produce at least one room.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.canvas.is_positive() {
            return Err(LayoutError::InvalidConfig(format!(
                "canvas must be positive, got {}",
                self.canvas
            )));
        }
        if !self.unit.is_positive() {
            return Err(LayoutError::InvalidConfig(format!(
                "unit must be positive, got {}",
                self.unit
            )));
        }
        if self.max_width_factor < 1 || self.max_height_factor < 1 {
            return Err(LayoutError::InvalidConfig(
                "size factors must be at least 1".into(),
            ));
        }
        if self.corridor_width < 1 {
            return Err(LayoutError::InvalidConfig(
                "corridor width must be at least 1".into(),
            ));
        }
        let max = self.max_room();
        if !self.canvas.fits(&max) {
            return Err(LayoutError::InvalidConfig(format!(
                "canvas {} is smaller than the largest room {}",
                self.canvas, max
            )));
        }
        Ok(())
    }
}
