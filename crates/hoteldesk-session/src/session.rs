//! Session types: configuration, lifecycle state, and login results.

use std::fmt;
use std::sync::Arc;

use hoteldesk_protocol::Identity;

/// Message shown when the server gave no usable explanation for a failed
/// login (network error, HTML error page, empty message).
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed, please try again";

/// Message shown when a login succeeded server-side but a newer attempt
/// (or a logout) had already been applied locally.
pub const LOGIN_SUPERSEDED_MESSAGE: &str = "Login superseded by a newer attempt";

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for the session store.
///
/// The keys default to the ones the browser front-end always used, so a
/// store pointed at the same storage picks up an existing session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Key holding the JSON-serialized [`Identity`].
    pub storage_key: String,

    /// Key holding the UI theme preference (`"dark"` / `"light"`).
    pub theme_key: String,

    /// How many session changes a slow subscriber may fall behind before
    /// it skips straight to the latest value.
    pub change_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: "currentUser".to_string(),
            theme_key: "theme".to_string(),
            change_buffer: 16,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The session lifecycle. There are only two states:
///
/// ```text
///   Anonymous ──(login succeeds)──→ Authenticated
///       ↑                                │
///       └──────(logout / 401)────────────┘
/// ```
///
/// There is no "refreshing" state and no expiry timer: a token is valid
/// until the server answers 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

// ---------------------------------------------------------------------------
// LoginGeneration
// ---------------------------------------------------------------------------

/// Sequence number handed to each login attempt.
///
/// The store only accepts the result of an attempt newer than the last
/// one it applied, so when two logins race, the one that *started* last
/// wins regardless of which response arrives first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoginGeneration(pub(crate) u64);

impl LoginGeneration {
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoginGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "login-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// LoginOutcome
// ---------------------------------------------------------------------------

/// What a login attempt resolved to.
///
/// Login never returns `Err`: every failure (bad credentials, server
/// down, garbage response) becomes a `Failure` with a message that can
/// be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The identity is now the current session.
    Success(Arc<Identity>),

    /// Nothing changed; `message` explains why.
    Failure { message: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure message, or `None` on success.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { message } => Some(message),
        }
    }

    pub(crate) fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Failure {
                message: LOGIN_FAILED_MESSAGE.to_string(),
            }
        } else {
            Self::Failure { message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default_keys_match_browser_front_end() {
        let config = SessionConfig::default();
        assert_eq!(config.storage_key, "currentUser");
        assert_eq!(config.theme_key, "theme");
    }

    #[test]
    fn test_login_outcome_failure_blank_message_uses_fallback() {
        let outcome = LoginOutcome::failure("  ");
        assert_eq!(outcome.message(), Some(LOGIN_FAILED_MESSAGE));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_login_outcome_failure_keeps_server_message() {
        let outcome = LoginOutcome::failure("bad creds");
        assert_eq!(outcome.message(), Some("bad creds"));
    }

    #[test]
    fn test_login_generation_orders_by_sequence() {
        assert!(LoginGeneration(2) > LoginGeneration(1));
        assert_eq!(LoginGeneration(3).to_string(), "login-3");
    }
}
