//! `DungeonServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → hub.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dungeon_hub::{HubConfig, HubHandle, spawn_hub};
use dungeon_protocol::JsonCodec;
use dungeon_transport::{Transport, TransportError, WebSocketTransport};
use tokio::task::JoinHandle;

use crate::DungeonError;
use crate::handler::handle_connection;

/// How long a fresh connection has to send its `JoinRequest`.
pub const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState {
    pub(crate) hub: HubHandle,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a server.
pub struct DungeonServerBuilder {
    bind_addr: String,
    hub_config: HubConfig,
}

impl DungeonServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            hub_config: HubConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the hub configuration.
    pub fn hub_config(mut self, config: HubConfig) -> Self {
        self.hub_config = config;
        self
    }

    /// Binds the listener and starts the hub with its first match.
    ///
    /// # Errors
    /// - [`DungeonError::Transport`] if the address cannot be bound.
    /// - [`DungeonError::Hub`] if the first match cannot be generated.
    pub async fn build(self) -> Result<DungeonServer, DungeonError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        let (hub, hub_task) = spawn_hub(self.hub_config)?;

        let state = Arc::new(ServerState {
            hub,
            codec: JsonCodec,
        });

        Ok(DungeonServer {
            transport,
            state,
            hub_task,
        })
    }
}

impl Default for DungeonServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound server with a running hub.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct DungeonServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
    hub_task: JoinHandle<()>,
}

impl DungeonServer {
    /// Creates a new builder.
    pub fn builder() -> DungeonServerBuilder {
        DungeonServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// A handle to the hub, for diagnostics or an external shutdown.
    pub fn hub(&self) -> HubHandle {
        self.state.hub.clone()
    }

    /// Runs the accept loop.
    ///
    /// Spawns a handler task for each connection. Returns once the hub has
    /// stopped; until then, accept errors are logged and the loop goes on.
    pub async fn run(mut self) -> Result<(), DungeonError> {
        tracing::info!(addr = ?self.local_addr().ok(), "dungeon server running");

        loop {
            let accepted = tokio::select! {
                _ = &mut self.hub_task => break,
                accepted = self.transport.accept() => accepted,
            };

            match accepted {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(TransportError::Shutdown) => break,
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }

        self.transport.shutdown().await?;
        tracing::info!("dungeon server stopped");
        Ok(())
    }
}
