//! Unified error type for HotelDesk.

use hoteldesk_protocol::ProtocolError;
use hoteldesk_router::RouterError;
use hoteldesk_session::SessionError;
use hoteldesk_transport::TransportError;

/// A non-2xx answer from the API, forwarded to the caller after any
/// session side effect (logout on 401) has run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("API error {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    /// Best-effort human message: the body's `message` (or `error`)
    /// field, else a description of the status.
    pub message: String,
    /// Raw response body, lossily decoded.
    pub body: String,
}

impl ApiError {
    /// The session was rejected. The client has already logged out.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// The session is valid but lacks the rights for this call.
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }
}

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `hoteldesk` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HotelDeskError {
    /// No response was obtained (DNS, refused connection, timeout).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response body couldn't be encoded/decoded, or an envelope said
    /// `success: false`.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Session storage or login plumbing failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Router(#[from] RouterError),

    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A call was refused locally before reaching the network.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Bad configuration (environment variable, builder input).
    #[error("configuration error: {0}")]
    Config(String),
}

impl HotelDeskError {
    /// The HTTP status, when the error came from an API answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::Unreachable("refused".into());
        let hd_err: HotelDeskError = err.into();
        assert!(matches!(hd_err, HotelDeskError::Transport(_)));
        assert!(hd_err.to_string().contains("refused"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let hd_err: HotelDeskError = err.into();
        assert!(matches!(hd_err, HotelDeskError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::StaleLogin { generation: 3 };
        let hd_err: HotelDeskError = err.into();
        assert!(matches!(hd_err, HotelDeskError::Session(_)));
    }

    #[test]
    fn test_from_router_error() {
        let err = RouterError::InvalidPath("dashboard".into());
        let hd_err: HotelDeskError = err.into();
        assert!(matches!(hd_err, HotelDeskError::Router(_)));
    }

    #[test]
    fn test_api_error_status_helpers() {
        let err = HotelDeskError::from(ApiError {
            status: 403,
            message: "Forbidden".into(),
            body: String::new(),
        });

        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "API error 403: Forbidden");
        let HotelDeskError::Api(api) = err else {
            panic!("expected Api");
        };
        assert!(api.is_forbidden());
        assert!(!api.is_unauthorized());
    }
}
