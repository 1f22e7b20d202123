//! Error types for the router layer.

/// Errors that can occur while resolving or navigating to a URL.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// The URL is not an absolute in-app path (it must start with `/`).
    #[error("invalid path {0:?}: in-app URLs must start with '/'")]
    InvalidPath(String),
}
