//! Rooms (`/chambres`).

use hoteldesk_protocol::{ChambreDto, DisponibiliteChambreRequest, RoomStatus, RoomType};
use hoteldesk_transport::{ApiRequest, HttpTransport};

use super::segment;
use crate::{ApiClient, HotelDeskError};

const BASE: &str = "/chambres";

/// Room management: inventory, status changes, availability search.
pub struct ChambreService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for ChambreService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: HttpTransport> ChambreService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn create(&self, chambre: &ChambreDto) -> Result<ChambreDto, HotelDeskError> {
        self.client.post_json(BASE, chambre).await
    }

    pub async fn get(&self, id: u64) -> Result<ChambreDto, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/{id}")).await
    }

    pub async fn list(&self) -> Result<Vec<ChambreDto>, HotelDeskError> {
        self.client.get_json(BASE).await
    }

    pub async fn by_status(&self, status: RoomStatus) -> Result<Vec<ChambreDto>, HotelDeskError> {
        self.client
            .get_json(&format!("{BASE}/statut/{}", segment(status.as_str())?))
            .await
    }

    pub async fn by_type(&self, room_type: RoomType) -> Result<Vec<ChambreDto>, HotelDeskError> {
        self.client
            .get_json(&format!("{BASE}/type/{}", segment(room_type.as_str())?))
            .await
    }

    /// Free-text search over room number, type and description.
    pub async fn search(&self, keyword: &str) -> Result<Vec<ChambreDto>, HotelDeskError> {
        let request = ApiRequest::get(self.client.url(&format!("{BASE}/search")))
            .query("keyword", keyword);
        self.client.request(request).await
    }

    /// Rooms free for the whole stay described by `request`.
    pub async fn available(
        &self,
        request: &DisponibiliteChambreRequest,
    ) -> Result<Vec<ChambreDto>, HotelDeskError> {
        self.client
            .post_json(&format!("{BASE}/disponibilite"), request)
            .await
    }

    pub async fn update(&self, id: u64, chambre: &ChambreDto) -> Result<ChambreDto, HotelDeskError> {
        self.client.put_json(&format!("{BASE}/{id}"), chambre).await
    }

    pub async fn update_status(&self, id: u64, status: RoomStatus) -> Result<(), HotelDeskError> {
        let request = ApiRequest::put(self.client.url(&format!("{BASE}/{id}/statut")))
            .query("statut", status.as_str());
        self.client.request_unit(request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), HotelDeskError> {
        self.client.delete(&format!("{BASE}/{id}")).await
    }
}
