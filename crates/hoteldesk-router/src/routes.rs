//! The route table: which in-app paths exist and who may open them.

use crate::RouterError;

/// Path pattern that matches anything no other route claims.
pub const WILDCARD: &str = "**";

/// Where the login page lives. Guards send anonymous users here.
pub const LOGIN_PATH: &str = "/login";

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, logged in or not.
    Public,
    /// Only while a session is present.
    Protected,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Protected => write!(f, "protected"),
        }
    }
}

/// One entry of the table.
///
/// `path` is stored without a leading slash (`"dashboard"`), the way the
/// front-end declared its routes. A route with `redirect_to` is never
/// shown; opening it lands on the redirect target instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub access: Access,
    pub redirect_to: Option<String>,
}

impl Route {
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            access: Access::Public,
            redirect_to: None,
        }
    }

    pub fn protected(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            access: Access::Protected,
            redirect_to: None,
        }
    }

    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            access: Access::Public,
            redirect_to: Some(to.into()),
        }
    }
}

/// What a URL resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRoute {
    /// A page. `path` is the normalized path (no slashes around it).
    Page { path: String, access: Access },
    /// A redirect entry. `to` is an absolute in-app URL.
    Redirect { to: String },
}

impl ResolvedRoute {
    pub fn access(&self) -> Access {
        match self {
            Self::Page { access, .. } => *access,
            Self::Redirect { .. } => Access::Public,
        }
    }
}

/// Ordered list of routes. The first exact match wins; the wildcard
/// entry (if any) only applies when nothing else matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl Default for RouteTable {
    /// The front desk's pages: a public landing page, auth pages, and the
    /// protected dashboard. Unknown paths go back to `/accueil`.
    fn default() -> Self {
        Self::new(vec![
            Route::public(""),
            Route::public("accueil"),
            Route::public("login"),
            Route::public("register"),
            Route::protected("dashboard"),
            Route::public("unauthorized"),
            Route::redirect(WILDCARD, "/accueil"),
        ])
    }
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Appends a route. It only takes effect if no earlier route has the
    /// same path.
    pub fn with(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolves an in-app URL such as `/dashboard?tab=stock`.
    ///
    /// Query string and fragment are ignored for matching.
    ///
    /// # Errors
    /// Returns [`RouterError::InvalidPath`] if `url` doesn't start with `/`.
    /// An unknown path with no wildcard route also resolves to an error.
    pub fn resolve(&self, url: &str) -> Result<ResolvedRoute, RouterError> {
        let path = normalize(url)?;

        let exact = self
            .routes
            .iter()
            .find(|route| route.path != WILDCARD && route.path == path);
        let route = match exact {
            Some(route) => route,
            None => self
                .routes
                .iter()
                .find(|route| route.path == WILDCARD)
                .ok_or_else(|| RouterError::InvalidPath(url.to_string()))?,
        };

        Ok(match &route.redirect_to {
            Some(to) => ResolvedRoute::Redirect { to: to.clone() },
            None => ResolvedRoute::Page {
                path: path.to_string(),
                access: route.access,
            },
        })
    }
}

/// `/dashboard/?tab=1#top` → `dashboard`.
fn normalize(url: &str) -> Result<&str, RouterError> {
    if !url.starts_with('/') {
        return Err(RouterError::InvalidPath(url.to_string()));
    }
    let end = url.find(['?', '#']).unwrap_or(url.len());
    Ok(url[..end].trim_matches('/'))
}
