//! The navigator: where the user currently is, and where they've been.
//!
//! In the browser this was the framework router. Here it is a small
//! shared handle around a `watch` channel: the guard and the API client
//! push URLs into it, and a UI (or a test) reads or subscribes.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::routes::LOGIN_PATH;

/// Query parameter carrying the page to return to after login.
pub const RETURN_URL_PARAM: &str = "returnUrl";

/// Shared navigation state. Clones see the same current URL.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<Inner>,
}

struct Inner {
    current: watch::Sender<String>,
    log: Mutex<NavigationLog>,
}

#[derive(Default)]
struct NavigationLog {
    history: Vec<String>,
    last_redirect: Option<String>,
}

impl Navigator {
    /// Starts at `/`.
    pub fn new() -> Self {
        let (current, _) = watch::channel("/".to_string());
        Self {
            inner: Arc::new(Inner {
                current,
                log: Mutex::new(NavigationLog::default()),
            }),
        }
    }

    pub fn current_url(&self) -> String {
        self.inner.current.borrow().clone()
    }

    /// Moves to `url`.
    pub fn navigate(&self, url: &str) {
        tracing::debug!(url, "navigating");
        self.lock_log().history.push(url.to_string());
        self.inner.current.send_replace(url.to_string());
    }

    /// Moves to `target?returnUrl=<return_url>` and records it as the last
    /// redirect. Returns the URL navigated to.
    pub fn navigate_with_return(&self, target: &str, return_url: &str) -> String {
        let url = with_return_url(target, return_url);
        tracing::info!(%url, "redirecting");
        {
            let mut log = self.lock_log();
            log.history.push(url.clone());
            log.last_redirect = Some(url.clone());
        }
        self.inner.current.send_replace(url.clone());
        url
    }

    /// Sends the user to the login page, remembering `return_url`.
    pub fn redirect_to_login(&self, return_url: &str) -> String {
        self.navigate_with_return(LOGIN_PATH, return_url)
    }

    /// Whether the current location is the login page, query ignored.
    pub fn is_on_login(&self) -> bool {
        let current = self.inner.current.borrow();
        current.split(['?', '#']).next() == Some(LOGIN_PATH)
    }

    /// The most recent redirect made through this navigator, if any.
    pub fn last_redirect(&self) -> Option<String> {
        self.lock_log().last_redirect.clone()
    }

    /// Every URL navigated to, oldest first. The initial `/` is not
    /// included.
    pub fn history(&self) -> Vec<String> {
        self.lock_log().history.clone()
    }

    /// Receiver that is notified on every navigation.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.inner.current.subscribe()
    }

    fn lock_log(&self) -> std::sync::MutexGuard<'_, NavigationLog> {
        self.inner.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current_url())
            .finish_non_exhaustive()
    }
}

/// `("/login", "/dashboard?tab=1")` → `/login?returnUrl=%2Fdashboard%3Ftab%3D1`.
pub fn with_return_url(target: &str, return_url: &str) -> String {
    let separator = if target.contains('?') { '&' } else { '?' };
    format!(
        "{target}{separator}{RETURN_URL_PARAM}={}",
        urlencoding::encode(return_url)
    )
}

/// Extracts and decodes the `returnUrl` parameter from a URL.
pub fn return_url(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == RETURN_URL_PARAM)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|value| value.into_owned())
}
