//! The auth gateway: login and logout, as the UI sees them.
//!
//! ```text
//!   login(email, password, type)
//!        │
//!        ├─ store.begin_login()          ← take a generation
//!        ├─ authenticator.exchange()     ← the only await
//!        ├─ success + data?
//!        │     yes → store.accept_login() → Success(identity)
//!        │     no  → Failure(message)       (session untouched)
//!        ▼
//!   LoginOutcome
//! ```
//!
//! The gateway never navigates. Redirecting after login is the caller's
//! decision.

use std::sync::Arc;

use hoteldesk_protocol::{AccountType, LoginRequest};

use crate::{
    Authenticator, LoginOutcome, SessionError, SessionStore, LOGIN_FAILED_MESSAGE,
    LOGIN_SUPERSEDED_MESSAGE,
};

/// Logs users in and out of a [`SessionStore`].
pub struct AuthGateway<A> {
    authenticator: Arc<A>,
    store: SessionStore,
}

impl<A: Authenticator> AuthGateway<A> {
    pub fn new(authenticator: A, store: SessionStore) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            store,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Exchanges credentials and, on success, makes the returned identity
    /// the current session.
    ///
    /// Exactly one exchange is made. Every failure comes back as
    /// [`LoginOutcome::Failure`] with a message fit for display, and leaves
    /// the session as it was.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        account_type: AccountType,
    ) -> LoginOutcome {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            account_type,
        };
        let generation = self.store.begin_login();
        tracing::debug!(%generation, email, %account_type, "login started");

        let envelope = match self.authenticator.exchange(&request).await {
            Ok(envelope) => envelope,
            Err(SessionError::Rejected { status, message }) => {
                tracing::info!(%generation, status, "login rejected by server");
                return LoginOutcome::failure(message);
            }
            Err(e) => {
                tracing::warn!(%generation, error = %e, "login exchange failed");
                return LoginOutcome::failure(LOGIN_FAILED_MESSAGE);
            }
        };

        let identity = match envelope.data {
            Some(identity) if envelope.success => identity,
            _ => {
                tracing::info!(%generation, message = %envelope.message, "login refused");
                return LoginOutcome::failure(envelope.message);
            }
        };

        match self.store.accept_login(generation, identity) {
            Ok(identity) => LoginOutcome::Success(identity),
            Err(SessionError::StaleLogin { .. }) => {
                LoginOutcome::failure(LOGIN_SUPERSEDED_MESSAGE)
            }
            Err(e) => {
                tracing::warn!(%generation, error = %e, "could not store login result");
                LoginOutcome::failure(LOGIN_FAILED_MESSAGE)
            }
        }
    }

    /// Ends the session locally.
    ///
    /// The server is not told: the token stays valid there until it
    /// expires. Returns whether a session was actually ended.
    pub fn logout(&self) -> bool {
        let cleared = self.store.clear();
        if cleared {
            tracing::info!("logged out");
        }
        cleared
    }
}

impl<A> Clone for AuthGateway<A> {
    fn clone(&self) -> Self {
        Self {
            authenticator: Arc::clone(&self.authenticator),
            store: self.store.clone(),
        }
    }
}

impl<A> std::fmt::Debug for AuthGateway<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGateway")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
