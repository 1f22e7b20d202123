//! # HotelDesk
//!
//! Authenticated front-desk client for a hotel-management REST API.
//!
//! HotelDesk keeps track of who is logged in, signs every API call with
//! that session's bearer token, and reacts when the API says the session
//! is over. On top of that it offers typed wrappers for the room,
//! reservation and stock endpoints.
//!
//! ## Layers
//!
//! ```text
//! hoteldesk            ApiClient, services, builder    (this crate)
//! hoteldesk-router     RouteTable, Navigator, RouteGuard
//! hoteldesk-session    SessionStore, AuthGateway, storage
//! hoteldesk-transport  HttpTransport, ReqwestTransport
//! hoteldesk-protocol   Identity, ApiEnvelope, DTOs, JsonCodec
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hoteldesk::prelude::*;
//!
//! # async fn run() -> Result<(), HotelDeskError> {
//! hoteldesk::telemetry::init();
//! let desk = HotelDesk::builder().config(ClientConfig::from_env()?).build()?;
//!
//! match desk.login("reception@hotel.sn", "secret", AccountType::Hotel).await {
//!     LoginOutcome::Success(identity) => println!("welcome {}", identity.display_name()),
//!     LoginOutcome::Failure { message } => eprintln!("{message}"),
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod client;
mod config;
mod error;
pub mod services;
pub mod telemetry;

#[cfg(test)]
mod testing;

pub use builder::{HotelDesk, HotelDeskBuilder};
pub use client::ApiClient;
pub use config::{ClientConfig, ENV_API_URL, ENV_TIMEOUT_SECS};
pub use error::{ApiError, HotelDeskError};

pub use hoteldesk_protocol as protocol;
pub use hoteldesk_router as router;
pub use hoteldesk_session as session;
pub use hoteldesk_transport as transport;

/// The types most applications need.
pub mod prelude {
    pub use crate::services::{
        filter_produits, ChambreService, ReservationService, StockLevel, StockService,
        StockStatistics,
    };
    pub use crate::{ApiClient, ApiError, ClientConfig, HotelDesk, HotelDeskBuilder, HotelDeskError};

    pub use hoteldesk_protocol::{
        AccountType, ChambreDto, ClientDto, CreateReservationRequest,
        DisponibiliteChambreRequest, Identity, Produit, ReservationDto, RoomStatus, RoomType,
        StockMovementType, Theme,
    };
    pub use hoteldesk_router::{GuardDecision, Navigator, RouteGuard, RouteTable};
    pub use hoteldesk_session::{
        AuthGateway, FileStorage, KeyValueStore, LoginOutcome, MemoryStorage, SessionConfig,
        SessionStore,
    };
    pub use hoteldesk_transport::{HttpTransport, ReqwestTransport};
}
