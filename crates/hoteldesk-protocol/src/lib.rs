//! Wire protocol for HotelDesk.
//!
//! This crate defines the data the front desk exchanges with the remote
//! hotel-management API:
//!
//! - **Types** ([`Identity`], [`LoginRequest`], [`ApiEnvelope`], …)
//!   the session record and the envelope every endpoint answers with.
//! - **DTOs** ([`ChambreDto`], [`ReservationDto`], [`Produit`], …)
//!   domain payloads for the room, reservation and stock endpoints.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those values are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Architecture
//!
//! The protocol layer sits under everything else. It knows nothing about
//! HTTP or sessions, only about the shape of the data.
//!
//! ```text
//! Transport (bytes) → Protocol (Identity, envelopes) → Session (who is logged in)
//! ```

mod codec;
mod dto;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use dto::{
    ChambreDto, ClientDto, CreateReservationRequest,
    DisponibiliteChambreRequest, Produit, ReservationDto, RoomStatus,
    RoomType, StockMovementType,
};
pub use error::ProtocolError;
pub use types::{
    AccountType, ApiEnvelope, HotelId, Identity, LoginRequest, Theme, UserId,
};
