//! Per-connection handler: join handshake, then position relaying.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Receive `JoinRequest` → pick a display name
//!   2. Register with the hub → get a `PlayerId`
//!   3. Spawn a writer that drains the player's outbound queue
//!   4. Loop: receive `InboundUpdate`s → stamp the id → relay to the hub

use std::sync::Arc;

use dungeon_hub::HubHandle;
use dungeon_protocol::{
    Codec, Envelope, InboundUpdate, JoinRequest, JsonCodec, PlayerId,
    ProtocolError,
};
use dungeon_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::mpsc;

use crate::DungeonError;
use crate::server::{JOIN_TIMEOUT, ServerState};

/// Drop guard that unregisters a player when the handler exits.
///
/// Covers early returns through `?` as well as panics. `Drop` is
/// synchronous, so the unregister runs as a fire-and-forget task.
struct Registration {
    player_id: PlayerId,
    hub: HubHandle,
}

impl Drop for Registration {
    fn drop(&mut self) {
        let player_id = self.player_id;
        let hub = self.hub.clone();
        tokio::spawn(async move {
            if let Err(e) = hub.unregister(player_id).await {
                tracing::debug!(%player_id, error = %e, "unregister failed");
            }
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), DungeonError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    // --- Step 1: Join handshake ---
    let name = perform_join(&conn, &state.codec).await?;

    // --- Step 2: Register ---
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let player_id = state.hub.register(name.as_str(), outbound_tx).await?;
    let registration = Registration {
        player_id,
        hub: state.hub.clone(),
    };
    tracing::info!(%conn_id, %player_id, %name, "player connected");

    // --- Step 3: Writer ---
    let writer = tokio::spawn(write_loop(
        Arc::clone(&conn),
        outbound_rx,
        state.codec,
        player_id,
    ));

    // --- Step 4: Read loop ---
    let result = read_loop(&conn, &state, player_id).await;

    // The hub drops the outbound sender once the player is removed, which
    // lets the writer flush what is queued and stop.
    drop(registration);
    let _ = writer.await;
    let _ = conn.close().await;

    tracing::info!(%conn_id, %player_id, "player disconnected");
    result
}

/// Waits for the first frame and turns it into a display name.
async fn perform_join(
    conn: &WebSocketConnection,
    codec: &JsonCodec,
) -> Result<String, DungeonError> {
    let data = match tokio::time::timeout(JOIN_TIMEOUT, conn.recv()).await {
        Ok(Ok(Some(data))) => data,
        Ok(Ok(None)) => {
            return Err(ProtocolError::InvalidMessage(
                "connection closed before join".into(),
            )
            .into());
        }
        Ok(Err(e)) => return Err(DungeonError::Transport(e)),
        Err(_) => {
            return Err(ProtocolError::InvalidMessage("join timed out".into()).into());
        }
    };

    let request: JoinRequest = codec.decode(&data)?;
    Ok(display_name(&request.name, conn.id()))
}

/// Trimmed `requested` name, or `player-<n>` when it is blank.
fn display_name(requested: &str, conn_id: ConnectionId) -> String {
    let name = requested.trim();
    if name.is_empty() {
        format!("player-{}", conn_id.into_inner())
    } else {
        name.to_string()
    }
}

/// Receives position reports until the client goes away.
async fn read_loop(
    conn: &WebSocketConnection,
    state: &ServerState,
    player_id: PlayerId,
) -> Result<(), DungeonError> {
    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(%player_id, "connection closed cleanly");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "recv error");
                return Ok(());
            }
        };

        let update: InboundUpdate = match state.codec.decode(&data) {
            Ok(update) => update,
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "failed to decode update");
                continue;
            }
        };

        state.hub.relay(update.stamp(player_id)).await?;
    }
}

/// Encodes and sends every envelope the hub queues for this player.
async fn write_loop(
    conn: Arc<WebSocketConnection>,
    mut outbound: mpsc::UnboundedReceiver<Envelope>,
    codec: JsonCodec,
    player_id: PlayerId,
) {
    while let Some(envelope) = outbound.recv().await {
        let bytes = match codec.encode(&envelope) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(%player_id, kind = %envelope.kind, error = %e, "failed to encode envelope");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(%player_id, error = %e, "send failed, stopping writer");
            break;
        }
    }
}
