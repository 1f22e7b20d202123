//! The route guard: keeps anonymous users out of protected pages.
//!
//! The guard only *reads* the session. Logging in or out is someone
//! else's job; the guard just asks "is there an identity right now?"
//! every time a protected page is opened.

use hoteldesk_session::SessionStore;

use crate::{Access, Navigator, ResolvedRoute, RouteTable, RouterError};
use crate::navigator::with_return_url;
use crate::routes::LOGIN_PATH;

/// Result of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Not allowed. `redirect` is the login URL carrying a `returnUrl`.
    Deny { redirect: String },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Checks navigations against the route table and the session.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    store: SessionStore,
    table: RouteTable,
    navigator: Navigator,
}

impl RouteGuard {
    pub fn new(store: SessionStore, table: RouteTable, navigator: Navigator) -> Self {
        Self {
            store,
            table,
            navigator,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Decides whether `url` may be opened right now.
    ///
    /// Public routes (and redirect entries) are always allowed. A
    /// protected route is allowed iff a session is present; otherwise the
    /// navigator is sent to `/login?returnUrl=<url>` and that URL is
    /// returned in the decision.
    ///
    /// # Errors
    /// Returns [`RouterError::InvalidPath`] for URLs the table can't resolve.
    pub fn check(&self, url: &str) -> Result<GuardDecision, RouterError> {
        let resolved = self.table.resolve(url)?;
        Ok(self.decide(url, &resolved))
    }

    /// Checks `url` and navigates to wherever the user ends up: the page
    /// itself, the target of a redirect entry, or the login page.
    ///
    /// Returns the URL landed on.
    ///
    /// # Errors
    /// Returns [`RouterError::InvalidPath`] for URLs the table can't resolve.
    pub fn navigate(&self, url: &str) -> Result<String, RouterError> {
        let resolved = self.table.resolve(url)?;
        match self.decide(url, &resolved) {
            // `decide` already moved the navigator to the login page.
            GuardDecision::Deny { redirect } => Ok(redirect),
            GuardDecision::Allow => {
                let landed = match resolved {
                    ResolvedRoute::Redirect { to } => to,
                    ResolvedRoute::Page { .. } => url.to_string(),
                };
                self.navigator.navigate(&landed);
                Ok(landed)
            }
        }
    }

    fn decide(&self, url: &str, resolved: &ResolvedRoute) -> GuardDecision {
        if resolved.access() == Access::Public || self.store.is_logged_in() {
            return GuardDecision::Allow;
        }

        let redirect = with_return_url(LOGIN_PATH, url);
        tracing::info!(url, %redirect, "guard denied anonymous access");
        self.navigator.navigate_with_return(LOGIN_PATH, url);
        GuardDecision::Deny { redirect }
    }
}
