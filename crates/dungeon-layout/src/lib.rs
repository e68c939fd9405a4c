//! Procedural dungeon layout for Dungeon MST.
//!
//! A layout is built in two passes:
//!
//! 1. **Placement**: rejection sampling drops random rooms on the canvas,
//!    refusing any candidate that overlaps an existing room or whose walls
//!    would line up with an existing room's walls or centre lines.
//! 2. **Connectivity**: a greedy minimum spanning tree over the room
//!    centres picks `rooms - 1` edges; each edge becomes an L-shaped
//!    [`Corridor`].
//!
//! ```text
//! LayoutConfig → Generator::place_rooms → spanning_edges → Corridor::between
//!                                  ↘                      ↙
//!                                   Match::random (rooms + corridors + pickup)
//! ```
//!
//! # Key types
//!
//! - [`LayoutConfig`]: canvas, base unit, factors, corridor width, attempt budget
//! - [`Generator`]: runs placement and connectivity against a caller-supplied RNG
//! - [`Room`], [`Corridor`]: the immutable pieces of a layout
//! - [`Match`]: one round's world: rooms, corridors and an optional pickup

mod arena;
mod config;
mod corridor;
mod error;
mod generator;
mod mst;
mod occupancy;
mod room;

pub use arena::Match;
pub use config::LayoutConfig;
pub use corridor::Corridor;
pub use error::{CorridorError, LayoutError};
pub use generator::{Generator, Layout};
pub use mst::spanning_edges;
pub use room::{Room, SizeFactor};
