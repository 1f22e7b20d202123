use std::collections::BTreeMap;

use hoteldesk::prelude::*;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

const ENV_EMAIL: &str = "HOTELDESK_EMAIL";
const ENV_PASSWORD: &str = "HOTELDESK_PASSWORD";
const ENV_ACCOUNT_TYPE: &str = "HOTELDESK_ACCOUNT_TYPE";
const ENV_STATE_DIR: &str = "HOTELDESK_STATE_DIR";

struct Credentials {
    email: String,
    password: String,
    account_type: AccountType,
}

/// `None` when no email is configured: the demo then relies on a
/// session restored from the state directory.
fn credentials(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Option<Credentials>, HotelDeskError> {
    let Some(email) = lookup(ENV_EMAIL).filter(|e| !e.trim().is_empty()) else {
        return Ok(None);
    };
    let password = lookup(ENV_PASSWORD)
        .ok_or_else(|| HotelDeskError::Config(format!("{ENV_PASSWORD} is required")))?;
    let account_type = match lookup(ENV_ACCOUNT_TYPE) {
        Some(value) => value.parse()?,
        None => AccountType::Hotel,
    };
    Ok(Some(Credentials {
        email,
        password,
        account_type,
    }))
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Room count per status label, statuses the client doesn't know
/// grouped under their raw value.
fn room_board(chambres: &[ChambreDto]) -> BTreeMap<String, usize> {
    let mut board = BTreeMap::new();
    for chambre in chambres {
        let label = chambre
            .parsed_status()
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| chambre.status.clone());
        *board.entry(label).or_insert(0) += 1;
    }
    board
}

async fn print_board<T: HttpTransport>(desk: &HotelDesk<T>) -> Result<(), HotelDeskError> {
    let chambres = desk.chambres().list().await?;
    println!("rooms ({}):", chambres.len());
    for (status, count) in room_board(&chambres) {
        println!("  {status:<20} {count}");
    }

    let arrivals = desk.reservations().arrivals_today().await?;
    let departures = desk.reservations().departures_today().await?;
    println!("arrivals today: {}, departures today: {}", arrivals.len(), departures.len());
    for reservation in &arrivals {
        println!(
            "  {} room {} ({} -> {})",
            reservation.numero_reservation.as_deref().unwrap_or("-"),
            reservation.chambre_numero.as_deref().unwrap_or("?"),
            reservation.date_arrivee,
            reservation.date_depart,
        );
    }

    let produits = desk.stock().list().await?;
    let stats = StockStatistics::compute(&produits);
    println!(
        "stock: {} products, {} out of stock, {} low, value {:.0}",
        stats.total, stats.out_of_stock, stats.low_stock, stats.total_value
    );
    for produit in produits
        .iter()
        .filter(|p| StockLevel::of(p) != StockLevel::Available)
    {
        println!("  [{}] {} ({})", StockLevel::of(produit).label(), produit.nom, produit.quantite_stock);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    hoteldesk::telemetry::init();

    let state_dir = std::env::var(ENV_STATE_DIR).unwrap_or_else(|_| ".hoteldesk".into());
    let desk = HotelDesk::builder()
        .config(ClientConfig::from_env()?)
        .storage(FileStorage::open(&state_dir)?)
        .build()?;

    if let Some(creds) = credentials(|name| std::env::var(name).ok())? {
        match desk.login(&creds.email, &creds.password, creds.account_type).await {
            LoginOutcome::Success(identity) => {
                tracing::info!(user = %identity.id, "logged in as {}", identity.display_name());
            }
            LoginOutcome::Failure { message } => {
                eprintln!("login failed: {message}");
                std::process::exit(1);
            }
        }
    }

    let landing = desk.guard().navigate("/dashboard")?;
    if !desk.store().is_logged_in() {
        eprintln!("not logged in (would show {landing}); set {ENV_EMAIL} and {ENV_PASSWORD}");
        std::process::exit(1);
    }

    if let Err(e) = print_board(&desk).await {
        // A 401 has already cleared the saved session.
        eprintln!("error: {e}");
        if e.status() == Some(401) {
            eprintln!("session expired, run again with credentials");
        }
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn chambre(numero: &str, status: &str) -> ChambreDto {
        ChambreDto {
            numero: numero.into(),
            status: status.into(),
            ..ChambreDto::default()
        }
    }

    #[test]
    fn test_credentials_absent_email_is_none() {
        assert!(credentials(lookup(&[])).unwrap().is_none());
        assert!(credentials(lookup(&[(ENV_EMAIL, "  ")])).unwrap().is_none());
    }

    #[test]
    fn test_credentials_default_to_hotel_account() {
        let creds = credentials(lookup(&[(ENV_EMAIL, "a@b.com"), (ENV_PASSWORD, "x")]))
            .unwrap()
            .unwrap();
        assert_eq!(creds.account_type, AccountType::Hotel);
        assert_eq!(creds.password, "x");
    }

    #[test]
    fn test_credentials_missing_password_is_config_error() {
        let result = credentials(lookup(&[(ENV_EMAIL, "a@b.com")]));
        assert!(matches!(result, Err(HotelDeskError::Config(_))));
    }

    #[test]
    fn test_credentials_bad_account_type_is_error() {
        let result = credentials(lookup(&[
            (ENV_EMAIL, "a@b.com"),
            (ENV_PASSWORD, "x"),
            (ENV_ACCOUNT_TYPE, "admin"),
        ]));
        assert!(matches!(result, Err(HotelDeskError::Protocol(_))));
    }

    #[test]
    fn test_room_board_groups_by_status() {
        let board = room_board(&[
            chambre("101", "DISPONIBLE"),
            chambre("102", "OCCUPEE"),
            chambre("103", "DISPONIBLE"),
            chambre("104", "EN_TRAVAUX"),
        ]);

        assert_eq!(board.len(), 3);
        assert_eq!(board[RoomStatus::Disponible.label()], 2);
        assert_eq!(board[RoomStatus::Occupee.label()], 1);
        assert_eq!(board["EN_TRAVAUX"], 1);
    }
}
