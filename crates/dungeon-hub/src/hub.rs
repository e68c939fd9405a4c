//! Hub actor: the one task that owns the match and the roster.
//!
//! Each operation kind has its own bounded queue; the actor multiplexes
//! them with `tokio::select!` and handles one command at a time, so every
//! client observes events in the same global order.

use std::collections::BTreeMap;
use std::time::Duration;

use dungeon_geo::Point;
use dungeon_layout::{Generator, Match};
use dungeon_protocol::{
    CorridorPayload, Envelope, JsonCodec, MatchInit, MatchPayload, MessageKind,
    PlayerId, PlayerJoin, PlayerUpdate,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::{HubConfig, HubError};

/// Channel the hub pushes a client's envelopes into.
///
/// Unbounded so the control loop never waits on a slow client.
pub type Outbound = mpsc::UnboundedSender<Envelope>;

/// A join request waiting for its assigned id.
struct Register {
    name: String,
    outbound: Outbound,
    reply: oneshot::Sender<PlayerId>,
}

/// A snapshot of hub metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubInfo {
    /// Players currently connected.
    pub players: usize,
    /// Time left in the current round.
    pub remaining: Duration,
}

/// Handle to a running hub. Cheap to clone; one per connection handler.
#[derive(Clone)]
pub struct HubHandle {
    register: mpsc::Sender<Register>,
    unregister: mpsc::Sender<PlayerId>,
    update: mpsc::Sender<PlayerUpdate>,
    query: mpsc::Sender<oneshot::Sender<HubInfo>>,
    quit: mpsc::Sender<()>,
}

impl HubHandle {
    /// Admits a player and returns the id the hub assigned.
    ///
    /// By the time this returns, `outbound` has already received the
    /// `initialization` envelope and the player's own `player-joined`.
    pub async fn register(
        &self,
        name: impl Into<String>,
        outbound: Outbound,
    ) -> Result<PlayerId, HubError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.register
            .send(Register {
                name: name.into(),
                outbound,
                reply: reply_tx,
            })
            .await
            .map_err(|_| HubError::Unavailable)?;
        reply_rx.await.map_err(|_| HubError::Unavailable)
    }

    /// Removes a player. Unknown ids are ignored by the hub.
    pub async fn unregister(&self, id: PlayerId) -> Result<(), HubError> {
        self.unregister
            .send(id)
            .await
            .map_err(|_| HubError::Unavailable)
    }

    /// Forwards a position update to everyone (fire-and-forget).
    pub async fn relay(&self, update: PlayerUpdate) -> Result<(), HubError> {
        self.update
            .send(update)
            .await
            .map_err(|_| HubError::Unavailable)
    }

    /// Requests the current hub info.
    pub async fn snapshot(&self) -> Result<HubInfo, HubError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.query
            .send(reply_tx)
            .await
            .map_err(|_| HubError::Unavailable)?;
        reply_rx.await.map_err(|_| HubError::Unavailable)
    }

    /// Tells the hub to stop.
    pub async fn shutdown(&self) -> Result<(), HubError> {
        self.quit.send(()).await.map_err(|_| HubError::Unavailable)
    }
}

/// What the hub remembers about a connected player.
struct Player {
    name: String,
    position: Point,
    outbound: Outbound,
}

/// The internal hub state. Runs inside a Tokio task.
struct HubActor {
    generator: Generator,
    rng: StdRng,
    arena: Match,
    started: Instant,
    match_duration: Duration,
    next_id: u64,
    /// Keyed by id so rosters come out in join order.
    players: BTreeMap<PlayerId, Player>,
    codec: JsonCodec,
}

/// Queue receivers, kept apart from the state so the select loop can
/// borrow both at once.
struct Inbox {
    register: mpsc::Receiver<Register>,
    unregister: mpsc::Receiver<PlayerId>,
    update: mpsc::Receiver<PlayerUpdate>,
    regenerate: mpsc::Receiver<()>,
    query: mpsc::Receiver<oneshot::Sender<HubInfo>>,
    quit: mpsc::Receiver<()>,
}

impl HubActor {
    /// Runs the actor loop until a quit signal or every handle is gone.
    async fn run(mut self, mut inbox: Inbox) {
        tracing::info!(
            rooms = self.arena.rooms().len(),
            "hub started"
        );

        loop {
            // Biased: queued updates are applied before a departure that
            // was queued after them.
            tokio::select! {
                biased;
                _ = inbox.quit.recv() => {
                    tracing::info!("hub shutting down");
                    break;
                }
                Some(cmd) = inbox.register.recv() => {
                    let id = self.handle_register(cmd.name, cmd.outbound);
                    let _ = cmd.reply.send(id);
                }
                Some(update) = inbox.update.recv() => {
                    self.handle_update(update);
                }
                Some(id) = inbox.unregister.recv() => {
                    self.handle_unregister(id);
                }
                Some(()) = inbox.regenerate.recv() => {
                    self.handle_regenerate();
                }
                Some(reply) = inbox.query.recv() => {
                    let _ = reply.send(self.info());
                }
                else => break,
            }
        }

        tracing::info!("hub stopped");
    }

    fn handle_register(&mut self, name: String, outbound: Outbound) -> PlayerId {
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        let position = self.arena.spawn_point();

        let init = MatchInit {
            arena: match_payload(&self.arena),
            remaining_ms: millis(self.remaining()),
            players: self.roster(),
        };
        if let Some(env) = self.envelope(MessageKind::Initialization, &init) {
            let _ = outbound.send(env);
        }

        let join = PlayerJoin {
            id,
            name: name.clone(),
            position,
        };
        self.players.insert(
            id,
            Player {
                name,
                position,
                outbound,
            },
        );
        tracing::info!(
            player_id = %id,
            name = %join.name,
            players = self.players.len(),
            "player joined"
        );

        self.broadcast(MessageKind::PlayerJoined, &join);
        id
    }

    fn handle_unregister(&mut self, id: PlayerId) {
        if self.players.remove(&id).is_none() {
            tracing::debug!(player_id = %id, "unregister for unknown player, ignoring");
            return;
        }
        tracing::info!(
            player_id = %id,
            players = self.players.len(),
            "player left"
        );
        self.broadcast(MessageKind::PlayerLeft, &id);
    }

    fn handle_update(&mut self, update: PlayerUpdate) {
        let Some(player) = self.players.get_mut(&update.id) else {
            tracing::debug!(player_id = %update.id, "update from unknown player, dropping");
            return;
        };
        player.position = update.position;
        self.broadcast(MessageKind::Update, &update);
    }

    fn handle_regenerate(&mut self) {
        match Match::random(&self.generator, &mut self.rng) {
            Ok(arena) => self.arena = arena,
            Err(e) => {
                tracing::error!(error = %e, "match generation failed, keeping the previous match");
            }
        }
        self.started = Instant::now();

        let init = MatchInit {
            arena: match_payload(&self.arena),
            remaining_ms: millis(self.match_duration),
            players: self.roster(),
        };
        tracing::info!(
            rooms = self.arena.rooms().len(),
            players = self.players.len(),
            "new match"
        );
        self.broadcast(MessageKind::Initialization, &init);
    }

    fn remaining(&self) -> Duration {
        self.match_duration.saturating_sub(self.started.elapsed())
    }

    fn roster(&self) -> Vec<PlayerJoin> {
        self.players
            .iter()
            .map(|(id, p)| PlayerJoin {
                id: *id,
                name: p.name.clone(),
                position: p.position,
            })
            .collect()
    }

    fn envelope<T: Serialize>(&self, kind: MessageKind, payload: &T) -> Option<Envelope> {
        match Envelope::wrap(kind, &self.codec, payload) {
            Ok(env) => Some(env),
            Err(e) => {
                tracing::error!(%kind, error = %e, "failed to encode payload");
                None
            }
        }
    }

    /// Sends one envelope to every player. Dead outbound channels are
    /// skipped; their handler unregisters on its own.
    fn broadcast<T: Serialize>(&self, kind: MessageKind, payload: &T) {
        let Some(env) = self.envelope(kind, payload) else {
            return;
        };
        for player in self.players.values() {
            let _ = player.outbound.send(env.clone());
        }
    }

    fn info(&self) -> HubInfo {
        HubInfo {
            players: self.players.len(),
            remaining: self.remaining(),
        }
    }
}

/// Converts a match into the shape clients draw.
pub fn match_payload(arena: &Match) -> MatchPayload {
    MatchPayload {
        rooms: arena.rooms().iter().map(|r| r.rect()).collect(),
        corridors: arena
            .corridors()
            .iter()
            .map(|c| CorridorPayload {
                horizontal: c.horizontal(),
                vertical: c.vertical(),
            })
            .collect(),
        pickup: arena.pickup(),
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Sends a regeneration trigger every `period` until the hub goes away.
async fn regen_timer(period: Duration, trigger: mpsc::Sender<()>) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if trigger.send(()).await.is_err() {
            break;
        }
    }
}

/// Builds the first match, then spawns the hub actor and its regeneration
/// timer.
///
/// # Errors
/// [`HubError::Layout`] if the layout config is invalid or the first match
/// has no rooms.
pub fn spawn_hub(config: HubConfig) -> Result<(HubHandle, JoinHandle<()>), HubError> {
    let generator = Generator::new(config.layout)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let arena = Match::random(&generator, &mut rng)?;

    let size = config.channel_size.max(1);
    let (register_tx, register_rx) = mpsc::channel(size);
    let (unregister_tx, unregister_rx) = mpsc::channel(size);
    let (update_tx, update_rx) = mpsc::channel(size);
    let (regen_tx, regen_rx) = mpsc::channel(1);
    let (query_tx, query_rx) = mpsc::channel(size);
    let (quit_tx, quit_rx) = mpsc::channel(1);

    let actor = HubActor {
        generator,
        rng,
        arena,
        started: Instant::now(),
        match_duration: config.match_duration,
        next_id: 1,
        players: BTreeMap::new(),
        codec: JsonCodec,
    };
    let inbox = Inbox {
        register: register_rx,
        unregister: unregister_rx,
        update: update_rx,
        regenerate: regen_rx,
        query: query_rx,
        quit: quit_rx,
    };

    let task = tokio::spawn(actor.run(inbox));
    if !config.match_duration.is_zero() {
        tokio::spawn(regen_timer(config.match_duration, regen_tx));
    }

    let handle = HubHandle {
        register: register_tx,
        unregister: unregister_tx,
        update: update_tx,
        query: query_tx,
        quit: quit_tx,
    };
    Ok((handle, task))
}
