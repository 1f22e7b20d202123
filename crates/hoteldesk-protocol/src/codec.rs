//! Codec trait and implementations for serializing/deserializing payloads.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! Everything HotelDesk moves around (request bodies, API envelopes, the
//! persisted session record) goes through a [`Codec`], so the rest of
//! the code never calls `serde_json` directly.
//!
//! The remote API speaks JSON, so [`JsonCodec`] is the only
//! implementation today.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → safe to share between tasks; the API client holds
///   one and may be used from any Tokio worker thread.
/// - `'static` → the codec owns everything it needs.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the decoded value
/// doesn't borrow from the input bytes, so the response buffer can be
/// dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use hoteldesk_protocol::{ApiEnvelope, Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let body = br#"{"success": true, "message": "ok", "data": 7}"#;
///
/// let envelope: ApiEnvelope<u32> = codec.decode(body).unwrap();
/// assert!(envelope.success);
/// assert_eq!(envelope.data, Some(7));
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl JsonCodec {
    /// Encodes a value as a JSON string instead of bytes.
    ///
    /// The persistence surface stores strings (like a browser's
    /// `localStorage`), so the session store uses this rather than
    /// [`Codec::encode`].
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    pub fn encode_str<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    /// Decodes a value from a JSON string.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` on malformed input.
    pub fn decode_str<T: DeserializeOwned>(
        &self,
        data: &str,
    ) -> Result<T, ProtocolError> {
        serde_json::from_str(data).map_err(ProtocolError::Decode)
    }

    /// Best-effort human message from an error response body.
    ///
    /// The API (and whatever sits in front of it) isn't consistent about
    /// error bodies: the envelope uses `message`, framework defaults use
    /// `error`. Returns the first non-blank one, or `None` when the body
    /// isn't a JSON object or has neither.
    pub fn error_message(&self, body: &[u8]) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        ["message", "error"]
            .iter()
            .filter_map(|field| value.get(*field)?.as_str())
            .map(str::trim)
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }
}

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
