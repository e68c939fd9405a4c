//! Unified error type for the server.

use dungeon_hub::HubError;
use dungeon_protocol::ProtocolError;
use dungeon_transport::TransportError;

/// Top-level error that wraps every crate-specific error.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum DungeonError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The hub failed to start or has stopped.
    #[error(transparent)]
    Hub(#[from] HubError),
}
