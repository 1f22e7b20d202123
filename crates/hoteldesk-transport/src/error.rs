/// Errors that can occur in the transport layer.
///
/// An HTTP response with a 4xx/5xx status is *not* a transport error:
/// the exchange worked, the server just said no. These variants only
/// cover requests that never produced a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request URL could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The server could not be reached at all.
    #[error("server unreachable: {0}")]
    Unreachable(String),

    /// Building the underlying HTTP client failed.
    #[cfg(feature = "reqwest-transport")]
    #[error("http client build failed: {0}")]
    Build(#[source] reqwest::Error),

    /// Sending the request failed (connect, timeout, TLS).
    #[cfg(feature = "reqwest-transport")]
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body could not be read.
    #[cfg(feature = "reqwest-transport")]
    #[error("reading response body failed: {0}")]
    Body(#[source] reqwest::Error),
}
