//! End-to-end tests: a full `HotelDesk` over the reqwest transport,
//! talking to a mock hotel API served by `axum` on a random port.
//!
//! The mock issues tokens `tok-1`, `tok-2`, ... for the password
//! `secret`, and answers 401 to every authorized call once the test
//! flips `expired`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use hoteldesk::prelude::*;
use serde_json::{Value, json};

// =========================================================================
// Mock API
// =========================================================================

#[derive(Default)]
struct MockApi {
    expired: AtomicBool,
    logins: AtomicUsize,
    /// Authorization header of every call after login, `None` if absent.
    seen: Mutex<Vec<Option<String>>>,
}

type Reply = (StatusCode, Json<Value>);

impl MockApi {
    fn authorize(&self, headers: &HeaderMap) -> Result<(), Reply> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen.lock().unwrap().push(header.clone());

        let valid = header
            .as_deref()
            .and_then(|h| h.strip_prefix("Bearer tok-"))
            .is_some();
        if valid && !self.expired.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "message": "Token expired"})),
            ))
        }
    }

    fn seen(&self) -> Vec<Option<String>> {
        self.seen.lock().unwrap().clone()
    }
}

fn ok(data: Value) -> Reply {
    (StatusCode::OK, Json(json!({"success": true, "message": "", "data": data})))
}

async fn login(State(api): State<Arc<MockApi>>, Json(body): Json<Value>) -> Reply {
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Email ou mot de passe incorrect"})),
        );
    }
    let n = api.logins.fetch_add(1, Ordering::SeqCst) + 1;
    ok(json!({
        "token": format!("tok-{n}"),
        "type": "Bearer",
        "id": 42,
        "email": body["email"],
        "name": "Reception",
        "accountType": body["accountType"],
        "hotelId": 7,
        "hotelName": "Hotel Teranga",
        "roles": ["RECEPTION"]
    }))
}

async fn list_chambres(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Reply {
    if let Err(reply) = api.authorize(&headers) {
        return reply;
    }
    ok(json!([
        {"id": 1, "numero": "101", "type": "DOUBLE", "prixParNuit": 45000.0,
         "capacite": 2, "statut": "DISPONIBLE", "etage": 1},
        {"id": 2, "numero": "102", "type": "SUITE", "prixParNuit": 90000.0,
         "capacite": 4, "statut": "OCCUPEE", "etage": 1}
    ]))
}

/// Receptionists may not delete rooms.
async fn delete_chambre(
    State(api): State<Arc<MockApi>>,
    headers: HeaderMap,
    Path(_id): Path<u64>,
) -> Reply {
    if let Err(reply) = api.authorize(&headers) {
        return reply;
    }
    (
        StatusCode::FORBIDDEN,
        Json(json!({"success": false, "message": "Accès refusé"})),
    )
}

async fn arrivals(State(api): State<Arc<MockApi>>, headers: HeaderMap) -> Reply {
    if let Err(reply) = api.authorize(&headers) {
        return reply;
    }
    ok(json!([{
        "id": 9, "numeroReservation": "RES-0009", "chambreId": 1, "clientId": 3,
        "dateArrivee": "2025-07-01", "dateDepart": "2025-07-03",
        "nombreAdultes": 2, "statut": "CONFIRMEE"
    }]))
}

async fn start_api() -> (String, Arc<MockApi>) {
    let api = Arc::new(MockApi::default());
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/chambres", get(list_chambres))
        .route("/api/chambres/{id}", delete(delete_chambre))
        .route("/api/reservations/arrivees-aujourdhui", get(arrivals))
        .with_state(Arc::clone(&api));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/api"), api)
}

fn config(base_url: &str) -> ClientConfig {
    let mut config = ClientConfig::default().with_base_url(base_url);
    config.timeout = Duration::from_secs(5);
    config
}

fn desk(base_url: &str) -> HotelDesk<ReqwestTransport> {
    HotelDesk::builder()
        .config(config(base_url))
        .build()
        .expect("desk should build")
}

// =========================================================================
// Login
// =========================================================================

#[tokio::test]
async fn test_login_success_signs_later_calls() {
    let (base, api) = start_api().await;
    let desk = desk(&base);

    let outcome = desk.login("reception@teranga.sn", "secret", AccountType::Hotel).await;

    let LoginOutcome::Success(identity) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(identity.token, "tok-1");
    assert_eq!(identity.email, "reception@teranga.sn");
    assert!(desk.store().has_role("RECEPTION"));
    assert_eq!(desk.guard().check("/dashboard").unwrap(), GuardDecision::Allow);

    let rooms = desk.chambres().list().await.expect("rooms should load");
    assert_eq!(rooms.len(), 2);
    assert_eq!(rooms[1].parsed_status(), Some(RoomStatus::Occupee));
    assert_eq!(api.seen(), vec![Some("Bearer tok-1".to_string())]);
}

#[tokio::test]
async fn test_login_wrong_password_reports_server_message() {
    let (base, _api) = start_api().await;
    let desk = desk(&base);

    let outcome = desk.login("reception@teranga.sn", "nope", AccountType::User).await;

    assert_eq!(outcome.message(), Some("Email ou mot de passe incorrect"));
    assert!(!desk.store().is_logged_in());
    assert!(!desk.guard().check("/dashboard").unwrap().is_allowed());
}

#[tokio::test]
async fn test_login_unreachable_api_reports_generic_failure() {
    // Bind then drop, so nothing is listening on the port.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    drop(listener);
    let desk = desk(&base);

    let outcome = desk.login("reception@teranga.sn", "secret", AccountType::Hotel).await;

    assert!(!outcome.is_success());
    assert!(!outcome.message().unwrap_or_default().is_empty());
    assert!(!desk.store().is_logged_in());
}

// =========================================================================
// Anonymous calls
// =========================================================================

#[tokio::test]
async fn test_anonymous_401_sends_no_authorization_and_redirects() {
    let (base, api) = start_api().await;
    let desk = desk(&base);
    desk.navigator().navigate("/chambres");

    let err = desk.chambres().list().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(api.seen(), vec![None]);
    assert!(!desk.store().is_logged_in());
    assert_eq!(
        desk.navigator().last_redirect().as_deref(),
        Some("/login?returnUrl=%2Fchambres")
    );
}

// =========================================================================
// Session expiry and forbidden calls
// =========================================================================

#[tokio::test]
async fn test_expired_token_logs_out_and_redirects_with_return_url() {
    let (base, api) = start_api().await;
    let desk = desk(&base);
    desk.login("reception@teranga.sn", "secret", AccountType::Hotel).await;
    desk.navigator().navigate("/reservations");
    api.expired.store(true, Ordering::SeqCst);

    let err = desk.reservations().arrivals_today().await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(!desk.store().is_logged_in());
    assert_eq!(
        desk.navigator().current_url(),
        "/login?returnUrl=%2Freservations"
    );
    assert!(!desk.guard().check("/dashboard").unwrap().is_allowed());
}

#[tokio::test]
async fn test_concurrent_401s_log_out_once() {
    let (base, api) = start_api().await;
    let desk = desk(&base);
    desk.login("reception@teranga.sn", "secret", AccountType::Hotel).await;
    desk.navigator().navigate("/dashboard");
    let mut changes = desk.store().changes();
    assert!(changes.next().await.unwrap().is_some());
    api.expired.store(true, Ordering::SeqCst);

    let (rooms, arrivals) = tokio::join!(
        desk.chambres().list(),
        desk.reservations().arrivals_today()
    );

    assert_eq!(rooms.unwrap_err().status(), Some(401));
    assert_eq!(arrivals.unwrap_err().status(), Some(401));
    let redirects = desk
        .navigator()
        .history()
        .into_iter()
        .filter(|url| url.starts_with("/login"))
        .count();
    assert_eq!(redirects, 1);
    assert_eq!(changes.next().await.unwrap(), None);
    assert_eq!(changes.latest(), None);
}

#[tokio::test]
async fn test_forbidden_keeps_session_and_location() {
    let (base, _api) = start_api().await;
    let desk = desk(&base);
    desk.login("reception@teranga.sn", "secret", AccountType::Hotel).await;
    desk.navigator().navigate("/chambres");

    let err = desk.chambres().delete(2).await.unwrap_err();

    let HotelDeskError::Api(api_error) = err else {
        panic!("expected Api error, got {err:?}");
    };
    assert!(api_error.is_forbidden());
    assert_eq!(api_error.message, "Accès refusé");
    assert_eq!(desk.store().token().as_deref(), Some("tok-1"));
    assert_eq!(desk.navigator().current_url(), "/chambres");
    assert_eq!(desk.navigator().last_redirect(), None);
}

// =========================================================================
// Restart
// =========================================================================

#[tokio::test]
async fn test_session_survives_restart_with_file_storage() {
    let (base, api) = start_api().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let desk = HotelDesk::builder()
            .config(config(&base))
            .storage(FileStorage::open(dir.path()).unwrap())
            .build()
            .unwrap();
        let outcome = desk.login("reception@teranga.sn", "secret", AccountType::Hotel).await;
        assert!(outcome.is_success());
    }

    let desk = HotelDesk::builder()
        .config(config(&base))
        .storage(FileStorage::open(dir.path()).unwrap())
        .build()
        .unwrap();

    assert!(desk.store().is_logged_in());
    assert_eq!(desk.store().token().as_deref(), Some("tok-1"));
    assert!(desk.guard().check("/dashboard").unwrap().is_allowed());
    desk.chambres().list().await.expect("restored token should work");
    assert_eq!(api.seen(), vec![Some("Bearer tok-1".to_string())]);
}

#[tokio::test]
async fn test_logout_is_remembered_across_restart() {
    let (base, _api) = start_api().await;
    let dir = tempfile::tempdir().unwrap();
    let build = || {
        HotelDesk::builder()
            .config(config(&base))
            .storage(FileStorage::open(dir.path()).unwrap())
            .build()
            .unwrap()
    };

    let desk = build();
    desk.login("reception@teranga.sn", "secret", AccountType::Hotel).await;
    assert!(desk.logout());
    drop(desk);

    let desk = build();
    assert!(!desk.store().is_logged_in());
    assert!(!desk.guard().check("/dashboard").unwrap().is_allowed());
}
