//! Domain payloads for the feature endpoints.
//!
//! Rooms (`/chambres`), reservations (`/reservations`) and stock
//! (`/produits`) travel through the API client untouched; the session
//! core never looks inside them. They're typed here so the feature
//! services can offer a typed API instead of raw JSON.
//!
//! All of them use camelCase on the wire and omit `None` fields when
//! serialized, so a partially-filled DTO can be sent as an update.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{HotelId, ProtocolError, UserId};

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Simple,
    Double,
    Twin,
    Triple,
    Suite,
    SuiteJunior,
    SuiteExecutive,
    SuitePresidentielle,
    Familiale,
    Studio,
    Appartement,
}

impl RoomType {
    pub const ALL: [RoomType; 11] = [
        Self::Simple,
        Self::Double,
        Self::Twin,
        Self::Triple,
        Self::Suite,
        Self::SuiteJunior,
        Self::SuiteExecutive,
        Self::SuitePresidentielle,
        Self::Familiale,
        Self::Studio,
        Self::Appartement,
    ];

    /// Wire value, e.g. `"SUITE_JUNIOR"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Double => "DOUBLE",
            Self::Twin => "TWIN",
            Self::Triple => "TRIPLE",
            Self::Suite => "SUITE",
            Self::SuiteJunior => "SUITE_JUNIOR",
            Self::SuiteExecutive => "SUITE_EXECUTIVE",
            Self::SuitePresidentielle => "SUITE_PRESIDENTIELLE",
            Self::Familiale => "FAMILIALE",
            Self::Studio => "STUDIO",
            Self::Appartement => "APPARTEMENT",
        }
    }

    /// Human-readable label shown to front-desk staff.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Simple => "Chambre Simple",
            Self::Double => "Chambre Double",
            Self::Twin => "Chambre Twin",
            Self::Triple => "Chambre Triple",
            Self::Suite => "Suite",
            Self::SuiteJunior => "Suite Junior",
            Self::SuiteExecutive => "Suite Executive",
            Self::SuitePresidentielle => "Suite Présidentielle",
            Self::Familiale => "Chambre Familiale",
            Self::Studio => "Studio",
            Self::Appartement => "Appartement",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ProtocolError::InvalidMessage(format!("unknown room type: {s:?}"))
            })
    }
}

/// Housekeeping/occupancy state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Disponible,
    Occupee,
    MenageEnCours,
    Maintenance,
    HorsService,
    Reservee,
}

impl RoomStatus {
    pub const ALL: [RoomStatus; 6] = [
        Self::Disponible,
        Self::Occupee,
        Self::MenageEnCours,
        Self::Maintenance,
        Self::HorsService,
        Self::Reservee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disponible => "DISPONIBLE",
            Self::Occupee => "OCCUPEE",
            Self::MenageEnCours => "MENAGE_EN_COURS",
            Self::Maintenance => "MAINTENANCE",
            Self::HorsService => "HORS_SERVICE",
            Self::Reservee => "RESERVEE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Disponible => "Disponible",
            Self::Occupee => "Occupée",
            Self::MenageEnCours => "Ménage en cours",
            Self::Maintenance => "Maintenance",
            Self::HorsService => "Hors service",
            Self::Reservee => "Réservée",
        }
    }

    /// Only an available room can take a walk-in guest.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Disponible)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                ProtocolError::InvalidMessage(format!("unknown room status: {s:?}"))
            })
    }
}

/// A room as exchanged with `/chambres`.
///
/// `room_type` and `status` stay plain strings on the wire so a value
/// added server-side doesn't break decoding of the whole list; use
/// [`ChambreDto::parsed_type`] / [`ChambreDto::parsed_status`] for the
/// typed view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChambreDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub numero: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub prix_par_nuit: f64,
    pub capacite: u32,
    #[serde(default)]
    pub superficie: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "statut")]
    pub status: String,
    #[serde(default)]
    pub etage: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climatisation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub television: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minibar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coffre: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balcon: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vue_mer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<HotelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ChambreDto {
    /// The room type, if the server sent a value this client knows.
    pub fn parsed_type(&self) -> Option<RoomType> {
        self.room_type.parse().ok()
    }

    /// The room status, if the server sent a value this client knows.
    pub fn parsed_status(&self) -> Option<RoomStatus> {
        self.status.parse().ok()
    }
}

/// Body of `POST /chambres/disponibilite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisponibiliteChambreRequest {
    /// ISO date (`YYYY-MM-DD`).
    pub date_arrivee: String,
    pub date_depart: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_chambre: Option<RoomType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre_personnes: Option<u32>,
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

/// A guest record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub prenom: String,
    pub nom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub telephone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_identite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_piece: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_naissance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationalite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adresse: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ville: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pays: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /reservations`.
///
/// Either `client_id` points at an existing guest or `new_client`
/// carries one to create alongside the booking.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub chambre_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_client: Option<ClientDto>,
    pub date_arrivee: String,
    pub date_depart: String,
    pub nombre_adultes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre_enfants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demandes_speciales: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub montant_paye: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_paiement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_externe: Option<String>,
}

/// A reservation as returned by `/reservations`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numero_reservation: Option<String>,
    pub chambre_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chambre_numero: Option<String>,
    pub client_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_prenom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<HotelId>,
    pub date_arrivee: String,
    pub date_depart: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre_nuits: Option<u32>,
    pub nombre_adultes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre_enfants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prix_par_nuit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub montant_total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub montant_paye: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub montant_restant: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statut_paiement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_paiement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demandes_speciales: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_checkin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_checkout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin_by_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin_by_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_by_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_by_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_externe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

/// Direction of a stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockMovementType {
    /// Goods received.
    Entree,
    /// Goods consumed or sold.
    Sortie,
    /// Inventory correction.
    Ajustement,
    /// Goods returned.
    Retour,
}

impl StockMovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entree => "ENTREE",
            Self::Sortie => "SORTIE",
            Self::Ajustement => "AJUSTEMENT",
            Self::Retour => "RETOUR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Entree => "Entrée",
            Self::Sortie => "Sortie",
            Self::Ajustement => "Ajustement",
            Self::Retour => "Retour",
        }
    }
}

impl fmt::Display for StockMovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stocked product as exchanged with `/produits`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Produit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub code: String,
    pub nom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unite: Option<String>,
    #[serde(default)]
    pub quantite_stock: i64,
    /// Quantity at or below which the product is flagged as running low.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seuil_alerte: Option<i64>,
    #[serde(default)]
    pub prix_unitaire: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fournisseur_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fournisseur_nom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<HotelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_room_type_wire_names_match_as_str() {
        for t in RoomType::ALL {
            let json = serde_json::to_value(t).unwrap();
            assert_eq!(json, t.as_str());
            assert_eq!(t.as_str().parse::<RoomType>().unwrap(), t);
        }
    }

    #[test]
    fn test_room_status_wire_names_match_as_str() {
        for s in RoomStatus::ALL {
            assert_eq!(serde_json::to_value(s).unwrap(), s.as_str());
            assert_eq!(s.as_str().parse::<RoomStatus>().unwrap(), s);
        }
    }

    #[test]
    fn test_room_status_only_disponible_is_bookable() {
        let bookable: Vec<_> =
            RoomStatus::ALL.into_iter().filter(RoomStatus::is_bookable).collect();
        assert_eq!(bookable, vec![RoomStatus::Disponible]);
    }

    #[test]
    fn test_chambre_decodes_api_payload() {
        let chambre: ChambreDto = serde_json::from_value(json!({
            "id": 4,
            "numero": "101",
            "type": "SUITE_JUNIOR",
            "prixParNuit": 45000.0,
            "capacite": 2,
            "superficie": 32.5,
            "statut": "DISPONIBLE",
            "etage": 1,
            "vueMer": true,
            "hotelId": 12
        }))
        .unwrap();

        assert_eq!(chambre.id, Some(4));
        assert_eq!(chambre.parsed_type(), Some(RoomType::SuiteJunior));
        assert_eq!(chambre.parsed_status(), Some(RoomStatus::Disponible));
        assert_eq!(chambre.vue_mer, Some(true));
        assert_eq!(chambre.hotel_id, Some(HotelId(12)));
    }

    #[test]
    fn test_chambre_unknown_status_still_decodes() {
        let chambre: ChambreDto = serde_json::from_value(json!({
            "numero": "7",
            "type": "CABANE",
            "prixParNuit": 1.0,
            "capacite": 1,
            "statut": "EN_TRAVAUX"
        }))
        .unwrap();

        assert_eq!(chambre.parsed_type(), None);
        assert_eq!(chambre.parsed_status(), None);
    }

    #[test]
    fn test_chambre_serialization_omits_absent_fields() {
        let chambre = ChambreDto {
            numero: "12".into(),
            room_type: RoomType::Double.to_string(),
            prix_par_nuit: 30000.0,
            capacite: 2,
            status: RoomStatus::Disponible.to_string(),
            ..ChambreDto::default()
        };
        let json = serde_json::to_value(&chambre).unwrap();

        assert_eq!(json["type"], "DOUBLE");
        assert_eq!(json["statut"], "DISPONIBLE");
        assert!(json.get("id").is_none());
        assert!(json.get("wifi").is_none());
    }

    #[test]
    fn test_create_reservation_with_new_client_wire_format() {
        let request = CreateReservationRequest {
            chambre_id: 4,
            new_client: Some(ClientDto {
                prenom: "Moussa".into(),
                nom: "Fall".into(),
                telephone: "+221770000000".into(),
                ..ClientDto::default()
            }),
            date_arrivee: "2026-10-20".into(),
            date_depart: "2026-10-22".into(),
            nombre_adultes: 2,
            ..CreateReservationRequest::default()
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["chambreId"], 4);
        assert_eq!(json["newClient"]["prenom"], "Moussa");
        assert_eq!(json["nombreAdultes"], 2);
        assert!(json.get("clientId").is_none());
    }

    #[test]
    fn test_produit_decodes_with_defaults() {
        let produit: Produit = serde_json::from_value(json!({
            "code": "SAV-01",
            "nom": "Savon",
            "quantiteStock": 12,
            "seuilAlerte": 5,
            "prixUnitaire": 350.0,
            "fournisseurNom": "Sodis"
        }))
        .unwrap();

        assert_eq!(produit.quantite_stock, 12);
        assert_eq!(produit.seuil_alerte, Some(5));
        assert_eq!(produit.fournisseur_nom.as_deref(), Some("Sodis"));
        assert!(produit.id.is_none());
    }

    #[test]
    fn test_stock_movement_type_wire_names() {
        assert_eq!(
            serde_json::to_value(StockMovementType::Ajustement).unwrap(),
            "AJUSTEMENT"
        );
        assert_eq!(StockMovementType::Entree.to_string(), "ENTREE");
    }
}
