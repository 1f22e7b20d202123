//! Navigation for HotelDesk.
//!
//! - **Routes** ([`RouteTable`], [`Route`], [`Access`]): which in-app
//!   paths exist and which need a session.
//! - **Navigator** ([`Navigator`]): the current URL and where the user
//!   has been sent.
//! - **Guard** ([`RouteGuard`]): turns anonymous visits to protected
//!   pages into a trip to `/login?returnUrl=…`.
//!
//! # How it fits in the stack
//!
//! ```text
//! API client (above)        ← redirects to login when the API says 401
//!     ↕
//! Router Layer (this crate) ← decides where the user may go
//!     ↕
//! Session Layer (below)     ← answers "is anyone logged in?"
//! ```

mod error;
mod guard;
mod navigator;
mod routes;

pub use error::RouterError;
pub use guard::{GuardDecision, RouteGuard};
pub use navigator::{return_url, with_return_url, Navigator, RETURN_URL_PARAM};
pub use routes::{Access, ResolvedRoute, Route, RouteTable, LOGIN_PATH, WILDCARD};
