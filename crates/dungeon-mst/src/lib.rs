//! # Dungeon MST
//!
//! Multiplayer dungeon server. Every round the hub generates a fresh
//! layout (rooms placed by rejection sampling, joined by a minimum
//! spanning tree of L-shaped corridors) and streams it to every connected
//! client, then relays player positions until the next round.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dungeon_mst::prelude::*;
//!
//! # async fn run() -> Result<(), DungeonError> {
//! let server = DungeonServerBuilder::new()
//!     .bind("0.0.0.0:8080")
//!     .hub_config(HubConfig::default())
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::DungeonError;
pub use server::{DungeonServer, DungeonServerBuilder, JOIN_TIMEOUT};

/// Everything needed to run a server or drive one from tests.
pub mod prelude {
    pub use crate::{DungeonError, DungeonServer, DungeonServerBuilder};
    pub use dungeon_geo::{Dimension, Line, Point, Rect};
    pub use dungeon_hub::{HubConfig, HubError, HubHandle, HubInfo};
    pub use dungeon_layout::{Corridor, Generator, LayoutConfig, LayoutError, Match, Room};
    pub use dungeon_protocol::{
        Codec, Envelope, InboundUpdate, JoinRequest, JsonCodec, MatchInit,
        MatchPayload, MessageKind, PlayerId, PlayerJoin, PlayerUpdate,
        ProtocolError,
    };
    pub use dungeon_transport::TransportError;
}
