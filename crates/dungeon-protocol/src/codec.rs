//! Codec trait and implementations for serializing/deserializing payloads.
//!
//! The hub only needs *something* that turns payloads into bytes and back.
//! [`JsonCodec`] is the only implementation; browsers read it directly.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes Rust values to bytes and decodes them back.
///
/// `Send + Sync + 'static` because one codec value is shared by the hub
/// actor and every connection task.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// ```rust
/// use dungeon_protocol::{Codec, JsonCodec, PlayerId};
///
/// let bytes = JsonCodec.encode(&PlayerId(5)).unwrap();
/// assert_eq!(bytes, b"5");
/// let back: PlayerId = JsonCodec.decode(&bytes).unwrap();
/// assert_eq!(back, PlayerId(5));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{Envelope, InboundUpdate};

    #[test]
    fn test_decode_malformed_json() {
        let result: Result<InboundUpdate, _> = JsonCodec.decode(b"{not json");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_wrong_shape() {
        let result: Result<Envelope, _> = JsonCodec.decode(br#"{"type":"teleport","body":""}"#);
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_non_string_map_keys_fails() {
        // JSON object keys must be strings.
        let mut map = HashMap::new();
        map.insert((1, 2), "pair key");
        let result = JsonCodec.encode(&map);
        assert!(matches!(result, Err(ProtocolError::Encode(_))));
    }
}
