//! Typed wrappers over the API's feature endpoints.
//!
//! Each service is a thin, cloneable handle around the shared
//! [`ApiClient`](crate::ApiClient): it builds the request, lets the client
//! authenticate it, and unwraps the envelope. None of them keep state.

use std::borrow::Cow;

use crate::HotelDeskError;

mod chambres;
mod reservations;
mod stock;

pub use chambres::ChambreService;
pub use reservations::ReservationService;
pub use stock::{filter_produits, StockLevel, StockService, StockStatistics};

/// Percent-encodes a caller value used as one URL path segment, so `/`,
/// `?` and `#` stay inside it.
///
/// # Errors
/// [`HotelDeskError::Validation`] for blank or dot-only values, which URL
/// parsing would treat as a relative path step even when encoded.
fn segment(value: &str) -> Result<Cow<'_, str>, HotelDeskError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(HotelDeskError::Validation(format!(
            "{value:?} is not a valid path value"
        )));
    }
    Ok(urlencoding::encode(value))
}
