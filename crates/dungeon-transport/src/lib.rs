//! Connection transport for Dungeon MST.
//!
//! The hub only needs a message-framed, bidirectional channel per client
//! with a detectable close. [`Transport`] and [`Connection`] describe that
//! contract; [`WebSocketTransport`] implements it.
//!
//! # Feature Flags
//!
//! - `websocket` (default): WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Accepts new incoming connections.
pub trait Transport: Send + Sync + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;
    /// The error type for transport operations.
    type Error: std::error::Error + Send + Sync;

    /// Waits for and accepts the next incoming connection.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;

    /// Stops accepting; a pending or later `accept` fails.
    async fn shutdown(&self) -> Result<(), Self::Error>;
}

/// One client's framed channel.
///
/// Sending and receiving are independent: one task may wait in `recv`
/// while another calls `send` on the same connection.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync;

    /// Sends one frame to the peer.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Receives the next frame from the peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Closes the connection.
    async fn close(&self) -> Result<(), Self::Error>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_new_and_into_inner() {
        let id = ConnectionId::new(42);
        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId::new(7).to_string(), "conn-7");
    }

    #[test]
    fn test_connection_id_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ConnectionId::new(1), "north room");
        map.insert(ConnectionId::new(2), "south room");
        assert_eq!(map[&ConnectionId::new(2)], "south room");
    }
}
