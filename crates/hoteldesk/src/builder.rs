//! `HotelDesk` builder: wires storage, session, router and client together.
//!
//! Every layer takes its collaborators as handles, so the builder is the
//! one place that knows how they fit:
//!
//! ```text
//! storage ──→ SessionStore ──┬──→ AuthGateway (login/logout)
//!                            ├──→ RouteGuard  (+ RouteTable, Navigator)
//!                            └──→ ApiClient   (+ transport, Navigator)
//!                                    └──→ Chambre / Reservation / Stock services
//! ```

use std::sync::Arc;

use hoteldesk_protocol::AccountType;
use hoteldesk_router::{Navigator, RouteGuard, RouteTable};
use hoteldesk_session::{
    AuthGateway, HttpAuthenticator, KeyValueStore, LoginOutcome, MemoryStorage,
    SessionConfig, SessionStore,
};
use hoteldesk_transport::{HttpTransport, ReqwestTransport};

use crate::services::{ChambreService, ReservationService, StockService};
use crate::{ApiClient, ClientConfig, HotelDeskError};

/// Builder for a [`HotelDesk`].
///
/// # Example
///
/// ```rust,no_run
/// use hoteldesk::prelude::*;
///
/// # async fn run() -> Result<(), HotelDeskError> {
/// let desk = HotelDesk::builder()
///     .config(ClientConfig::from_env()?)
///     .storage(FileStorage::open("./state")?)
///     .build()?;
///
/// let outcome = desk.login("reception@hotel.sn", "secret", AccountType::Hotel).await;
/// if outcome.is_success() {
///     let arrivals = desk.reservations().arrivals_today().await?;
///     println!("{} arrivals today", arrivals.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct HotelDeskBuilder {
    config: ClientConfig,
    session_config: SessionConfig,
    routes: RouteTable,
    storage: Option<Arc<dyn KeyValueStore>>,
}

impl HotelDeskBuilder {
    /// Creates a new builder with default settings and in-memory storage.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            session_config: SessionConfig::default(),
            routes: RouteTable::default(),
            storage: None,
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Where the session is persisted. Defaults to memory, which forgets
    /// the session when the process exits.
    pub fn storage(mut self, storage: impl KeyValueStore) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    /// Builds with the reqwest transport.
    ///
    /// # Errors
    /// Returns [`HotelDeskError::Transport`] if the HTTP client can't be
    /// initialised.
    pub fn build(self) -> Result<HotelDesk<ReqwestTransport>, HotelDeskError> {
        let transport = ReqwestTransport::new(
            self.config.timeout,
            self.config.connect_timeout,
            &self.config.user_agent,
        )?;
        Ok(self.build_with_transport(transport))
    }

    /// Builds with a custom transport (a mock in tests, a proxy-aware
    /// client, ...).
    pub fn build_with_transport<T: HttpTransport>(self, transport: T) -> HotelDesk<T> {
        let transport = Arc::new(transport);
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));

        let store = SessionStore::restore(storage, self.session_config);
        let navigator = Navigator::new();
        let gateway = AuthGateway::new(
            HttpAuthenticator::new(Arc::clone(&transport), &self.config.base_url),
            store.clone(),
        );
        let guard = RouteGuard::new(store.clone(), self.routes, navigator.clone());
        let client = ApiClient::new(transport, self.config, store.clone(), navigator.clone());

        tracing::debug!(
            base_url = %client.config().base_url,
            logged_in = store.is_logged_in(),
            "hoteldesk ready"
        );

        HotelDesk {
            chambres: ChambreService::new(client.clone()),
            reservations: ReservationService::new(client.clone()),
            stock: StockService::new(client.clone()),
            store,
            gateway,
            guard,
            navigator,
            client,
        }
    }
}

impl Default for HotelDeskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully wired front-desk client.
pub struct HotelDesk<T> {
    store: SessionStore,
    gateway: AuthGateway<HttpAuthenticator<Arc<T>>>,
    guard: RouteGuard,
    navigator: Navigator,
    client: ApiClient<Arc<T>>,
    chambres: ChambreService<Arc<T>>,
    reservations: ReservationService<Arc<T>>,
    stock: StockService<Arc<T>>,
}

impl HotelDesk<ReqwestTransport> {
    /// Creates a new builder.
    pub fn builder() -> HotelDeskBuilder {
        HotelDeskBuilder::new()
    }
}

impl<T: HttpTransport> HotelDesk<T> {
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn gateway(&self) -> &AuthGateway<HttpAuthenticator<Arc<T>>> {
        &self.gateway
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn client(&self) -> &ApiClient<Arc<T>> {
        &self.client
    }

    pub fn chambres(&self) -> &ChambreService<Arc<T>> {
        &self.chambres
    }

    pub fn reservations(&self) -> &ReservationService<Arc<T>> {
        &self.reservations
    }

    pub fn stock(&self) -> &StockService<Arc<T>> {
        &self.stock
    }

    /// Shortcut for [`AuthGateway::login`].
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        account_type: AccountType,
    ) -> LoginOutcome {
        self.gateway.login(email, password, account_type).await
    }

    /// Shortcut for [`AuthGateway::logout`].
    pub fn logout(&self) -> bool {
        self.gateway.logout()
    }
}
