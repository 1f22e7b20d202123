//! Session management for HotelDesk.
//!
//! This crate owns the answer to "who is logged in":
//!
//! 1. **Persistence**: where the session lives between runs
//!    ([`KeyValueStore`], [`MemoryStorage`], [`FileStorage`])
//! 2. **Session store**: the single observable identity cell
//!    ([`SessionStore`], [`SessionChanges`])
//! 3. **Login/logout**: exchanging credentials ([`Authenticator`],
//!    [`HttpAuthenticator`]) and applying the result ([`AuthGateway`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Router / API client (above)  ← read the session, clear it on 401
//!     ↕
//! Session Layer (this crate)   ← owns identity and its persistence
//!     ↕
//! Protocol + Transport (below) ← Identity type, HTTP for the login call
//! ```

#![allow(async_fn_in_trait)]

mod auth;
mod error;
mod gateway;
mod session;
mod storage;
mod store;

pub use auth::{Authenticator, HttpAuthenticator};
pub use error::SessionError;
pub use gateway::AuthGateway;
pub use session::{
    LoginGeneration, LoginOutcome, SessionConfig, SessionState, LOGIN_FAILED_MESSAGE,
    LOGIN_SUPERSEDED_MESSAGE,
};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::{SessionChanges, SessionSnapshot, SessionStore};
