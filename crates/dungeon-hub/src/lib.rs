//! Session hub for Dungeon MST.
//!
//! The hub is a single Tokio task (actor model) that owns the current
//! [`Match`](dungeon_layout::Match), the player roster and every client's
//! outbound channel. Connection handlers talk to it through a cloneable
//! [`HubHandle`]; nothing else touches the state.
//!
//! ```text
//! handler ──register/unregister/relay──▶ ┌───────────┐ ──Envelope──▶ client outbound
//! regen timer ──────────trigger────────▶ │ hub actor │
//! diagnostics ──────────snapshot───────▶ └───────────┘
//! ```
//!
//! # Key types
//!
//! - [`spawn_hub`]: builds the first match and starts the actor
//! - [`HubHandle`]: send commands to the running actor
//! - [`HubConfig`]: layout, round length, seed, queue sizes
//! - [`HubInfo`]: diagnostic snapshot

mod config;
mod error;
mod hub;

pub use config::HubConfig;
pub use error::HubError;
pub use hub::{HubHandle, HubInfo, Outbound, match_payload, spawn_hub};
