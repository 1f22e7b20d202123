//! Stock (`/produits`) and the inventory figures shown on the stock board.

use hoteldesk_protocol::{Produit, StockMovementType};
use hoteldesk_transport::{ApiRequest, HttpTransport};

use crate::{ApiClient, HotelDeskError};

const BASE: &str = "/produits";

/// Product catalogue and stock movements.
pub struct StockService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for StockService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: HttpTransport> StockService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn create(&self, produit: &Produit) -> Result<Produit, HotelDeskError> {
        self.client.post_json(BASE, produit).await
    }

    pub async fn list(&self) -> Result<Vec<Produit>, HotelDeskError> {
        self.client.get_json(BASE).await
    }

    pub async fn get(&self, id: u64) -> Result<Produit, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/{id}")).await
    }

    /// Products the server reports as out of stock.
    pub async fn out_of_stock(&self) -> Result<Vec<Produit>, HotelDeskError> {
        self.client.get_json(&format!("{BASE}/rupture")).await
    }

    pub async fn update(&self, id: u64, produit: &Produit) -> Result<Produit, HotelDeskError> {
        self.client.put_json(&format!("{BASE}/{id}"), produit).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), HotelDeskError> {
        self.client.delete(&format!("{BASE}/{id}")).await
    }

    /// Records a stock movement of `quantite` units.
    ///
    /// `motif` (the reason) is only sent when non-blank.
    ///
    /// # Errors
    /// [`HotelDeskError::Validation`] without any request when `quantite`
    /// is zero or negative. The direction comes from `movement`, not the
    /// sign.
    pub async fn adjust(
        &self,
        id: u64,
        quantite: i64,
        movement: StockMovementType,
        motif: Option<&str>,
    ) -> Result<(), HotelDeskError> {
        if quantite <= 0 {
            return Err(HotelDeskError::Validation(format!(
                "stock adjustment quantity must be positive, got {quantite}"
            )));
        }

        let mut request = ApiRequest::post(self.client.url(&format!("{BASE}/{id}/ajuster-stock")))
            .query("quantite", quantite)
            .query("type", movement.as_str());
        if let Some(motif) = motif.map(str::trim).filter(|m| !m.is_empty()) {
            request = request.query("motif", motif);
        }
        let request = self.client.json_body(request, &serde_json::json!({}))?;

        tracing::debug!(produit = id, quantite, %movement, "adjusting stock");
        self.client.request_unit(request).await
    }
}

// ---------------------------------------------------------------------------
// Stock analytics
// ---------------------------------------------------------------------------

/// Stock badge for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// Nothing left.
    OutOfStock,
    /// At or under the alert threshold.
    Low,
    Available,
}

impl StockLevel {
    /// A threshold of zero counts as "no threshold".
    pub fn of(produit: &Produit) -> Self {
        if produit.quantite_stock <= 0 {
            Self::OutOfStock
        } else if alert_threshold(produit).is_some_and(|t| produit.quantite_stock <= t) {
            Self::Low
        } else {
            Self::Available
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OutOfStock => "Rupture",
            Self::Low => "Alerte",
            Self::Available => "Disponible",
        }
    }
}

fn alert_threshold(produit: &Produit) -> Option<i64> {
    produit.seuil_alerte.filter(|t| *t > 0)
}

/// Summary figures over a product list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StockStatistics {
    pub total: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    /// Σ quantity × unit price.
    pub total_value: f64,
}

impl StockStatistics {
    pub fn compute(produits: &[Produit]) -> Self {
        produits.iter().fold(Self::default(), |mut stats, produit| {
            stats.total += 1;
            match StockLevel::of(produit) {
                StockLevel::OutOfStock => stats.out_of_stock += 1,
                StockLevel::Low => stats.low_stock += 1,
                StockLevel::Available => {}
            }
            stats.total_value += produit.quantite_stock as f64 * produit.prix_unitaire;
            stats
        })
    }
}

/// Products whose name, code or supplier contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn filter_produits<'a>(produits: &'a [Produit], query: &str) -> Vec<&'a Produit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return produits.iter().collect();
    }
    produits
        .iter()
        .filter(|p| {
            p.nom.to_lowercase().contains(&needle)
                || p.code.to_lowercase().contains(&needle)
                || p
                    .fournisseur_nom
                    .as_deref()
                    .is_some_and(|f| f.to_lowercase().contains(&needle))
        })
        .collect()
}
