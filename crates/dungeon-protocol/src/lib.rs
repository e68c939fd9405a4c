//! Wire protocol for Dungeon MST.
//!
//! - **Types** ([`Envelope`], [`MessageKind`], payloads): what travels on
//!   the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how it becomes bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong doing that.
//!
//! The protocol layer knows nothing about connections or the hub; it only
//! describes messages.
//!
//! ```text
//! Transport (bytes) → Protocol (Envelope / payloads) → Hub (players, match)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    CorridorPayload, Envelope, InboundUpdate, JoinRequest, MatchInit,
    MatchPayload, MessageKind, PlayerId, PlayerJoin, PlayerUpdate,
};
