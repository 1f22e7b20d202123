//! The session store: the single owner of "who is logged in".
//!
//! Everything else in HotelDesk reads the session through a
//! [`SessionStore`] handle (or subscribes to its changes). Nothing outside
//! this module can mutate the identity cell directly.
//!
//! # How publishing works
//!
//! Two Tokio channels back the store:
//!
//! - a `watch` channel holds the *latest* value. `current()` reads it
//!   synchronously, and slow subscribers fall back to it.
//! - a `broadcast` channel carries *every* change, in order, to each
//!   subscriber that existed when the change happened.
//!
//! Both are fed while holding the writer lock, and the publish happens
//! inside `set`/`clear` before they return. A subscriber created before a
//! mutation therefore sees the previous value, then the new one, never an
//! interleaving of two writers.
//!
//! # Login generations
//!
//! Login is the only mutation that crosses an `.await` (the network call),
//! so two logins can race. Each attempt takes a [`LoginGeneration`] from
//! [`SessionStore::begin_login`] *before* it goes to the network, and
//! [`SessionStore::accept_login`] refuses anything not newer than what was
//! last applied. `set` and `clear` also count as "applied", so a logout
//! can't be undone by a slow login response that was already in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::Stream;
use hoteldesk_protocol::{Identity, JsonCodec, Theme};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};

use crate::storage::KeyValueStore;
use crate::{LoginGeneration, SessionConfig, SessionError, SessionState};

/// A snapshot of the session: the identity, or `None` when anonymous.
pub type SessionSnapshot = Option<Arc<Identity>>;

/// Shared handle to the session. Cloning is cheap (one `Arc` bump) and
/// every clone sees the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    storage: Arc<dyn KeyValueStore>,
    config: SessionConfig,
    codec: JsonCodec,

    /// Latest value.
    current: watch::Sender<SessionSnapshot>,

    /// Ordered change feed.
    events: broadcast::Sender<SessionSnapshot>,

    /// Serializes writers. Held across persist + publish.
    writer: Mutex<Generations>,

    /// Highest generation handed out by `begin_login`.
    issued: AtomicU64,
}

/// Generation bookkeeping, guarded by the writer lock.
struct Generations {
    /// Highest generation whose effect is visible in the store.
    applied: u64,
}

impl SessionStore {
    /// Builds a store and loads any session left by a previous run.
    ///
    /// This never fails. A missing record, an unreadable record, a record
    /// that isn't a valid identity, or a storage read error all start the
    /// store anonymous (with a warning for the last three). A corrupt
    /// record is left in place; the next `set` or `clear` replaces it.
    pub fn restore(storage: impl KeyValueStore, config: SessionConfig) -> Self {
        let storage: Arc<dyn KeyValueStore> = Arc::new(storage);
        let codec = JsonCodec;
        let initial = load_identity(storage.as_ref(), &config.storage_key, &codec);

        match &initial {
            Some(identity) => tracing::info!(
                user = %identity.id,
                email = %identity.email,
                "session restored"
            ),
            None => tracing::debug!("no session to restore, starting anonymous"),
        }

        let (current, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(config.change_buffer.max(1));

        Self {
            inner: Arc::new(Inner {
                storage,
                config,
                codec,
                current,
                events,
                writer: Mutex::new(Generations { applied: 0 }),
                issued: AtomicU64::new(0),
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    // -----------------------------------------------------------------------
    // Readers
    // -----------------------------------------------------------------------

    /// The current identity, or `None` when anonymous.
    pub fn current(&self) -> SessionSnapshot {
        self.inner.current.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        if self.inner.current.borrow().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// The bearer token of the current identity.
    pub fn token(&self) -> Option<String> {
        self.inner
            .current
            .borrow()
            .as_ref()
            .map(|identity| identity.token.clone())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.inner
            .current
            .borrow()
            .as_ref()
            .is_some_and(|identity| identity.has_role(role))
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.inner
            .current
            .borrow()
            .as_ref()
            .is_some_and(|identity| identity.has_permission(permission))
    }

    /// Subscribes to session changes.
    ///
    /// The returned feed yields the current value first, then every later
    /// change in order. Call this as many times as needed; each call is an
    /// independent subscription.
    pub fn changes(&self) -> SessionChanges {
        // Taking the writer lock means no change can land between the
        // snapshot and the subscription.
        let _guard = self.lock_writer();
        SessionChanges {
            replay: Some(self.current()),
            rx: self.inner.events.subscribe(),
            latest: self.inner.current.subscribe(),
        }
    }

    // -----------------------------------------------------------------------
    // Writers
    // -----------------------------------------------------------------------

    /// Replaces the session with `identity`, persists it, and publishes it.
    ///
    /// Any login still in flight is superseded.
    ///
    /// # Errors
    /// - [`SessionError::InvalidIdentity`] if the identity has no token.
    /// - [`SessionError::Persist`] / [`SessionError::Storage`] if it can't
    ///   be written. The session is left unchanged.
    pub fn set(&self, identity: Identity) -> Result<Arc<Identity>, SessionError> {
        identity.validate().map_err(SessionError::InvalidIdentity)?;

        let mut generations = self.lock_writer();
        let identity = self.persist_and_publish(identity)?;
        generations.applied = self.inner.issued.load(Ordering::SeqCst);
        Ok(identity)
    }

    /// Removes the session and publishes `None`.
    ///
    /// Returns `true` if a session was actually present. Clearing an
    /// anonymous store publishes nothing, so listeners see exactly one
    /// logout however many callers race to clear. A failure to delete the
    /// persisted copy is logged and otherwise ignored: the in-memory
    /// session is gone either way.
    pub fn clear(&self) -> bool {
        let mut generations = self.lock_writer();
        self.clear_locked(&mut generations)
    }

    /// Clears the session only while it still carries `token`.
    ///
    /// Returns `true` if it did. A session that replaced `token` in the
    /// meantime is left alone, and so is any login in flight.
    pub fn clear_if_token(&self, token: &str) -> bool {
        let mut generations = self.lock_writer();
        let holds_token = self
            .inner
            .current
            .borrow()
            .as_ref()
            .is_some_and(|identity| identity.token == token);
        if !holds_token {
            return false;
        }
        self.clear_locked(&mut generations)
    }

    fn clear_locked(&self, generations: &mut Generations) -> bool {
        generations.applied = self.inner.issued.load(Ordering::SeqCst);

        if let Err(e) = self.inner.storage.remove(&self.inner.config.storage_key) {
            tracing::warn!(error = %e, "failed to remove persisted session");
        }

        let was_present = self.inner.current.borrow().is_some();
        if was_present {
            self.publish(None);
            tracing::info!("session cleared");
        }
        was_present
    }

    /// Starts a login attempt. Call this before the network exchange.
    pub fn begin_login(&self) -> LoginGeneration {
        LoginGeneration(self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Applies the result of the login attempt `generation`.
    ///
    /// # Errors
    /// - [`SessionError::StaleLogin`] if a newer login, a `set`, or a
    ///   `clear` has been applied since the attempt began.
    /// - Otherwise the same errors as [`set`](Self::set).
    pub fn accept_login(
        &self,
        generation: LoginGeneration,
        identity: Identity,
    ) -> Result<Arc<Identity>, SessionError> {
        identity.validate().map_err(SessionError::InvalidIdentity)?;

        let mut generations = self.lock_writer();
        if generation.0 <= generations.applied {
            tracing::debug!(
                %generation,
                applied = generations.applied,
                "discarding stale login"
            );
            return Err(SessionError::StaleLogin {
                generation: generation.0,
            });
        }

        let identity = self.persist_and_publish(identity)?;
        generations.applied = generation.0;
        tracing::info!(
            user = %identity.id,
            email = %identity.email,
            %generation,
            "login accepted"
        );
        Ok(identity)
    }

    // -----------------------------------------------------------------------
    // Theme preference
    // -----------------------------------------------------------------------

    /// The saved UI theme. Unknown or unreadable values read as `None`.
    pub fn theme(&self) -> Option<Theme> {
        match self.inner.storage.get(&self.inner.config.theme_key) {
            Ok(value) => value.and_then(|v| v.trim().parse().ok()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme preference");
                None
            }
        }
    }

    /// Saves the UI theme.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the write fails.
    pub fn set_theme(&self, theme: Theme) -> Result<(), SessionError> {
        self.inner
            .storage
            .set(&self.inner.config.theme_key, theme.as_str())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn lock_writer(&self) -> std::sync::MutexGuard<'_, Generations> {
        self.inner
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Caller must hold the writer lock.
    fn persist_and_publish(
        &self,
        identity: Identity,
    ) -> Result<Arc<Identity>, SessionError> {
        let text = self
            .inner
            .codec
            .encode_str(&identity)
            .map_err(SessionError::Persist)?;
        self.inner
            .storage
            .set(&self.inner.config.storage_key, &text)?;

        let identity = Arc::new(identity);
        self.publish(Some(Arc::clone(&identity)));
        Ok(identity)
    }

    fn publish(&self, value: SessionSnapshot) {
        self.inner.current.send_replace(value.clone());
        // No subscribers is fine: the watch channel still holds the value.
        let _ = self.inner.events.send(value);
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

fn load_identity(
    storage: &dyn KeyValueStore,
    key: &str,
    codec: &JsonCodec,
) -> SessionSnapshot {
    let text = match storage.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read persisted session");
            return None;
        }
    };

    let identity: Identity = match codec.decode_str(&text) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = %e, "persisted session is unreadable, ignoring it");
            return None;
        }
    };

    if let Err(e) = identity.validate() {
        tracing::warn!(error = %e, "persisted session is invalid, ignoring it");
        return None;
    }
    Some(Arc::new(identity))
}

// ---------------------------------------------------------------------------
// SessionChanges
// ---------------------------------------------------------------------------

/// A subscription to session changes, created by [`SessionStore::changes`].
pub struct SessionChanges {
    /// The value at subscription time, handed out by the first `next()`.
    replay: Option<SessionSnapshot>,
    rx: broadcast::Receiver<SessionSnapshot>,
    latest: watch::Receiver<SessionSnapshot>,
}

impl SessionChanges {
    /// Waits for the next value.
    ///
    /// The first call returns immediately with the value current at
    /// subscription time. Returns `None` once every store handle is gone.
    ///
    /// A subscriber that falls more than `change_buffer` changes behind
    /// skips the backlog and receives the latest value instead.
    pub async fn next(&mut self) -> Option<SessionSnapshot> {
        if let Some(value) = self.replay.take() {
            return Some(value);
        }

        match self.rx.recv().await {
            Ok(value) => Some(value),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "session subscriber lagged, skipping to latest");
                self.rx = self.rx.resubscribe();
                Some(self.latest.borrow_and_update().clone())
            }
            Err(RecvError::Closed) => None,
        }
    }

    /// The store's value right now, without waiting.
    pub fn latest(&self) -> SessionSnapshot {
        self.latest.borrow().clone()
    }

    /// Adapts the subscription into a `Stream`.
    pub fn into_stream(self) -> impl Stream<Item = SessionSnapshot> + Send {
        futures_util::stream::unfold(self, |mut changes| async move {
            let value = changes.next().await?;
            Some((value, changes))
        })
    }
}
