//! Error types for the session layer.

use hoteldesk_protocol::ProtocolError;
use hoteldesk_transport::TransportError;

/// Errors that can occur during session management.
///
/// These cover the whole session lifecycle: reading and writing the
/// persisted record, exchanging credentials, and accepting the result.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The identity breaks the "fully populated" rule (empty token).
    #[error("invalid identity: {0}")]
    InvalidIdentity(#[source] ProtocolError),

    /// A storage key contains characters the backend can't represent.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Reading or writing the key-value store failed.
    #[error("storage error for key {key:?}: {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The identity (or the login request) could not be encoded.
    #[error("failed to encode session data: {0}")]
    Persist(#[source] ProtocolError),

    /// The login endpoint answered with a non-2xx status.
    /// `message` is what the server said, or a generic fallback.
    #[error("login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The login endpoint answered 2xx, but not with an envelope.
    #[error("malformed login response: {0}")]
    MalformedResponse(#[source] ProtocolError),

    /// The login request never got a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A login finished after a newer attempt (or a logout) had already
    /// been applied, so its result was discarded.
    #[error("login attempt {generation} was superseded")]
    StaleLogin { generation: u64 },
}
