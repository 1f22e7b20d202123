//! Error types for the protocol layer.
//!
//! Each crate in HotelDesk defines its own error enum. A `ProtocolError`
//! always means the problem is in the shape of the data (encoding,
//! decoding, or a value that breaks a wire-level rule), never in the
//! network or in session handling.

/// Errors that can occur in the protocol layer.
///
/// `#[derive(thiserror::Error)]` generates the `std::error::Error` impl.
/// The `#[error("...")]` attributes define the message shown in logs.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: malformed JSON, missing required fields, or a
    /// response body that isn't JSON at all (an HTML error page from a
    /// proxy, for instance).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The value parsed, but violates a protocol rule: an identity with
    /// an empty token, an unknown account type, an envelope that reports
    /// failure when data was expected.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
