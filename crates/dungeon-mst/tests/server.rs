//! Integration tests for the server, handler, and full connection flow.

use std::time::Duration;

use dungeon_mst::prelude::*;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;

// =========================================================================
// Helpers
// =========================================================================

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

fn hub_config() -> HubConfig {
    HubConfig {
        layout: LayoutConfig {
            attempts: 2_000,
            ..LayoutConfig::default()
        },
        match_duration: Duration::from_secs(3600),
        seed: Some(11),
        ..HubConfig::default()
    }
}

/// Starts a server on a random port and returns its address and hub.
async fn start_server() -> (String, HubHandle) {
    let server = DungeonServerBuilder::new()
        .bind("127.0.0.1:0")
        .hub_config(hub_config())
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();
    let hub = server.hub();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    (addr, hub)
}

async fn connect(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("should connect");
    ws
}

async fn recv_envelope(ws: &mut ClientWs) -> Envelope {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out")
        .expect("stream ended")
        .expect("recv");
    assert!(msg.is_text(), "server frames are JSON text");
    serde_json::from_slice(&msg.into_data()).expect("decode envelope")
}

fn open<T: serde::de::DeserializeOwned>(env: &Envelope) -> T {
    serde_json::from_str(&env.body).expect("decode body")
}

/// Sends a `JoinRequest` and consumes the `initialization` and own
/// `player-joined` that follow.
async fn join(ws: &mut ClientWs, name: &str) -> (MatchInit, PlayerJoin) {
    let request = serde_json::json!({ "name": name }).to_string();
    ws.send(Message::Text(request.into())).await.expect("send join");

    let env = recv_envelope(ws).await;
    assert_eq!(env.kind, MessageKind::Initialization);
    let init: MatchInit = open(&env);

    let env = recv_envelope(ws).await;
    assert_eq!(env.kind, MessageKind::PlayerJoined);
    (init, open(&env))
}

async fn send_position(ws: &mut ClientWs, x: i32, y: i32) {
    let update = serde_json::json!({ "position": { "x": x, "y": y } }).to_string();
    ws.send(Message::Text(update.into())).await.expect("send update");
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_join_receives_match_and_own_join() {
    let (addr, _hub) = start_server().await;
    let mut ws = connect(&addr).await;

    let (init, me) = join(&mut ws, "alice").await;
    assert!(!init.arena.rooms.is_empty());
    assert_eq!(init.arena.corridors.len(), init.arena.rooms.len() - 1);
    assert!(init.players.is_empty());
    assert_eq!(me.name, "alice");
    assert_eq!(me.position, init.arena.rooms[0].center());
}

#[tokio::test]
async fn test_blank_name_gets_default() {
    let (addr, _hub) = start_server().await;
    let mut ws = connect(&addr).await;

    let (_, me) = join(&mut ws, "   ").await;
    assert!(me.name.starts_with("player-"), "got {}", me.name);
}

#[tokio::test]
async fn test_updates_and_departures_reach_everyone() {
    let (addr, hub) = start_server().await;
    let mut alice = connect(&addr).await;
    let mut bob = connect(&addr).await;

    let (_, a) = join(&mut alice, "alice").await;
    let (init, b) = join(&mut bob, "bob").await;
    assert_eq!(init.players.len(), 1);
    assert_eq!(init.players[0].id, a.id);

    // Alice hears about Bob.
    let env = recv_envelope(&mut alice).await;
    assert_eq!(env.kind, MessageKind::PlayerJoined);
    assert_eq!(open::<PlayerJoin>(&env).id, b.id);

    // A client-supplied id is ignored; the server stamps the sender's.
    let spoofed = serde_json::json!({ "id": 999, "position": { "x": 7, "y": 8 } }).to_string();
    alice.send(Message::Text(spoofed.into())).await.unwrap();
    for ws in [&mut alice, &mut bob] {
        let env = recv_envelope(ws).await;
        assert_eq!(env.kind, MessageKind::Update);
        let update: PlayerUpdate = open(&env);
        assert_eq!(update.id, a.id);
        assert_eq!(update.position, Point::new(7, 8));
    }

    bob.close(None).await.unwrap();
    let env = recv_envelope(&mut alice).await;
    assert_eq!(env.kind, MessageKind::PlayerLeft);
    assert_eq!(open::<PlayerId>(&env), b.id);

    assert_eq!(hub.snapshot().await.unwrap().players, 1);
}

#[tokio::test]
async fn test_malformed_update_is_skipped() {
    let (addr, _hub) = start_server().await;
    let mut ws = connect(&addr).await;
    let (_, me) = join(&mut ws, "alice").await;

    ws.send(Message::Text("not json".into())).await.unwrap();
    send_position(&mut ws, 3, 4).await;

    let env = recv_envelope(&mut ws).await;
    assert_eq!(env.kind, MessageKind::Update);
    let update: PlayerUpdate = open(&env);
    assert_eq!(update.id, me.id);
    assert_eq!(update.position, Point::new(3, 4));
}

#[tokio::test]
async fn test_bad_join_closes_connection() {
    let (addr, hub) = start_server().await;
    let mut ws = connect(&addr).await;

    ws.send(Message::Text("not json".into())).await.unwrap();

    let result = tokio::time::timeout(Duration::from_secs(2), ws.next()).await;
    match result {
        Ok(Some(Ok(Message::Close(_)))) | Ok(None) => {} // expected
        Ok(Some(Err(_))) => {}                           // also fine
        other => panic!("expected close, got {other:?}"),
    }
    assert_eq!(hub.snapshot().await.unwrap().players, 0);
}

#[tokio::test]
async fn test_hub_shutdown_stops_server() {
    let server = DungeonServerBuilder::new()
        .bind("127.0.0.1:0")
        .hub_config(hub_config())
        .build()
        .await
        .expect("server should build");
    let hub = server.hub();
    let run = tokio::spawn(server.run());

    hub.shutdown().await.unwrap();
    let result = tokio::time::timeout(Duration::from_secs(2), run)
        .await
        .expect("run should return")
        .expect("run task");
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_build_fails_on_unplayable_layout() {
    let result = DungeonServerBuilder::new()
        .bind("127.0.0.1:0")
        .hub_config(HubConfig {
            layout: LayoutConfig {
                attempts: 0,
                ..LayoutConfig::default()
            },
            ..HubConfig::default()
        })
        .build()
        .await;
    assert!(matches!(
        result,
        Err(DungeonError::Hub(HubError::Layout(LayoutError::NoRooms { .. })))
    ));
}
