//! Reservations (`/reservations`).

use hoteldesk_protocol::{CreateReservationRequest, ReservationDto};
use hoteldesk_transport::{ApiRequest, HttpTransport};

use super::segment;
use crate::{ApiClient, HotelDeskError};

const BASE: &str = "/reservations";

/// Bookings, arrivals/departures boards, check-in/out and payments.
pub struct ReservationService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for ReservationService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: HttpTransport> ReservationService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn create(
        &self,
        request: &CreateReservationRequest,
    ) -> Result<ReservationDto, HotelDeskError> {
        self.client.post_json(BASE, request).await
    }

    pub async fn get(&self, id: u64) -> Result<ReservationDto, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/{id}")).await
    }

    /// Looks a booking up by its public number (the one on the voucher).
    ///
    /// # Errors
    /// [`HotelDeskError::Validation`] (no request sent) for a blank or
    /// dot-only number.
    pub async fn by_numero(&self, numero: &str) -> Result<ReservationDto, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/numero/{}", segment(numero)?)).await
    }

    pub async fn list(&self) -> Result<Vec<ReservationDto>, HotelDeskError> {
        self.client.get_json(BASE).await
    }

    pub async fn by_status(&self, statut: &str) -> Result<Vec<ReservationDto>, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/statut/{}", segment(statut)?)).await
    }

    pub async fn by_client(&self, client_id: u64) -> Result<Vec<ReservationDto>, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/client/{client_id}")).await
    }

    pub async fn arrivals_today(&self) -> Result<Vec<ReservationDto>, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/arrivees-aujourdhui")).await
    }

    pub async fn departures_today(&self) -> Result<Vec<ReservationDto>, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/departs-aujourdhui")).await
    }

    /// Guests currently in house.
    pub async fn in_progress(&self) -> Result<Vec<ReservationDto>, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/en-cours")).await
    }

    pub async fn upcoming(&self) -> Result<Vec<ReservationDto>, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/a-venir")).await
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<ReservationDto>, HotelDeskError> {
        let request = ApiRequest::get(self.client.url(&format!("{BASE}/search")))
            .query("keyword", keyword);
        self.client.request(request).await
    }

    pub async fn update(
        &self,
        id: u64,
        reservation: &ReservationDto,
    ) -> Result<ReservationDto, HotelDeskError> {
        self.client.put_json(&format!("{BASE}/{id}"), reservation).await
    }

    pub async fn check_in(&self, id: u64) -> Result<ReservationDto, HotelDeskError> {
        self.client
            .post_json(&format!("{BASE}/{id}/checkin"), &serde_json::json!({}))
            .await
    }

    pub async fn check_out(&self, id: u64) -> Result<ReservationDto, HotelDeskError> {
        self.client
            .post_json(&format!("{BASE}/{id}/checkout"), &serde_json::json!({}))
            .await
    }

    /// Cancels the booking. The API models cancellation as a DELETE.
    pub async fn cancel(&self, id: u64) -> Result<(), HotelDeskError> {
        self.client.delete(&format!("{BASE}/{id}")).await
    }

    /// Records a payment against the booking.
    ///
    /// # Errors
    /// [`HotelDeskError::Validation`] (no request sent) unless `montant`
    /// is a positive amount and `mode_paiement` is non-blank.
    pub async fn add_payment(
        &self,
        id: u64,
        montant: f64,
        mode_paiement: &str,
    ) -> Result<ReservationDto, HotelDeskError> {
        if !(montant.is_finite() && montant > 0.0) {
            return Err(HotelDeskError::Validation(format!(
                "payment amount must be positive, got {montant}"
            )));
        }
        if mode_paiement.trim().is_empty() {
            return Err(HotelDeskError::Validation("payment method is required".into()));
        }

        let request = ApiRequest::post(self.client.url(&format!("{BASE}/{id}/paiement")))
            .query("montant", montant)
            .query("modePaiement", mode_paiement);
        self.client.request(request).await
    }
}
