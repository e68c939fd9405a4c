//! Types that travel on the wire between the hub and its clients.
//!
//! Every server → client frame is an [`Envelope`]: a `type` tag plus a
//! `body` string holding the JSON of the payload for that tag. Clients
//! send bare payloads: one [`JoinRequest`] and then [`InboundUpdate`]s.

use std::fmt;

use dungeon_geo::{Point, Rect};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Codec, ProtocolError};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A hub-assigned player identifier.
///
/// Serialised as the bare number (`42`, not `{"0":42}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// What an [`Envelope`]'s body contains.
///
/// `#[serde(rename_all = "kebab-case")]` gives `"player-joined"` etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    /// A [`MatchInit`]: sent on join and on every regeneration.
    Initialization,
    /// A [`PlayerJoin`].
    PlayerJoined,
    /// The departing player's bare [`PlayerId`].
    PlayerLeft,
    /// A relayed [`PlayerUpdate`].
    Update,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initialization => "initialization",
            Self::PlayerJoined => "player-joined",
            Self::PlayerLeft => "player-left",
            Self::Update => "update",
        };
        f.write_str(name)
    }
}

/// The outer wrapper of every server → client message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: MessageKind,

    /// Serialised payload, opaque at this level.
    pub body: String,
}

impl Envelope {
    /// Encodes `payload` with `codec` and wraps it.
    ///
    /// # Errors
    /// [`ProtocolError::Encode`] if the payload cannot be serialised, or
    /// [`ProtocolError::InvalidMessage`] if the codec output is not UTF-8.
    pub fn wrap<C: Codec, T: Serialize>(
        kind: MessageKind,
        codec: &C,
        payload: &T,
    ) -> Result<Self, ProtocolError> {
        let bytes = codec.encode(payload)?;
        let body = String::from_utf8(bytes).map_err(|e| {
            ProtocolError::InvalidMessage(format!("body is not UTF-8: {e}"))
        })?;
        Ok(Self { kind, body })
    }

    /// Decodes the body as `T`.
    ///
    /// # Errors
    /// [`ProtocolError::Decode`] if the body does not match `T`.
    pub fn open<C: Codec, T: DeserializeOwned>(
        &self,
        codec: &C,
    ) -> Result<T, ProtocolError> {
        codec.decode(self.body.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// Server → client payloads
// ---------------------------------------------------------------------------

/// One corridor as the client draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorPayload {
    pub horizontal: Rect,
    pub vertical: Rect,
}

/// The geometry of a match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchPayload {
    pub rooms: Vec<Rect>,
    pub corridors: Vec<CorridorPayload>,
    /// Top-left corner of the pickup, `null` when none was placed.
    pub pickup: Option<Point>,
}

/// Body of an `initialization` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInit {
    #[serde(rename = "match")]
    pub arena: MatchPayload,

    /// Time left in the round, in milliseconds.
    pub remaining_ms: u64,

    /// Everyone else already in the arena.
    #[serde(default)]
    pub players: Vec<PlayerJoin>,
}

/// Body of a `player-joined` envelope; also the roster entry in [`MatchInit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerJoin {
    pub id: PlayerId,
    pub name: String,
    pub position: Point,
}

/// Body of a relayed `update` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub id: PlayerId,
    pub position: Point,
}

// ---------------------------------------------------------------------------
// Client → server payloads
// ---------------------------------------------------------------------------

/// First frame a client sends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub name: String,
}

/// A position report. Any `id` the client adds is ignored; the hub stamps
/// the sender's own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundUpdate {
    pub position: Point,
}

impl InboundUpdate {
    /// Attaches the sender's identity.
    pub fn stamp(self, id: PlayerId) -> PlayerUpdate {
        PlayerUpdate {
            id,
            position: self.position,
        }
    }
}
