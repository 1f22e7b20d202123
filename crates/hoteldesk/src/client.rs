//! The authenticated API client.
//!
//! Every call to the hotel-management API goes through [`ApiClient::send`],
//! which wraps the transport in two steps:
//!
//! ```text
//!   request ──→ attach bearer token (if logged in) ──→ transport
//!                                                         │
//!   Result  ←── 401: end that session + redirect to login  ←┘
//!               403: warn, keep session
//!               other non-2xx: pass through
//! ```
//!
//! Non-2xx answers always come back as `Err(HotelDeskError::Api)`, after
//! the side effect has run, so the caller's own error handling still
//! sees the failure.

use std::sync::Arc;

use hoteldesk_protocol::{ApiEnvelope, Codec, JsonCodec};
use hoteldesk_router::Navigator;
use hoteldesk_session::SessionStore;
use hoteldesk_transport::{ApiRequest, ApiResponse, HttpTransport};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::{ApiError, ClientConfig, HotelDeskError};

/// Shared, cloneable API client.
pub struct ApiClient<T> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    transport: T,
    config: ClientConfig,
    store: SessionStore,
    navigator: Navigator,
    codec: JsonCodec,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(
        transport: T,
        config: ClientConfig,
        store: SessionStore,
        navigator: Navigator,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                config,
                store,
                navigator,
                codec: JsonCodec,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &SessionStore {
        &self.inner.store
    }

    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Absolute URL for an endpoint path such as `/chambres/3`.
    pub fn url(&self, path: &str) -> String {
        self.inner.config.endpoint(path)
    }

    /// Sends a request with the session's credentials.
    ///
    /// # Errors
    /// - [`HotelDeskError::Transport`] if no response was obtained.
    /// - [`HotelDeskError::Api`] for any non-2xx status. On 401 the session
    ///   has already been cleared and the navigator sent to the login page.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HotelDeskError> {
        let (request, sent_token) = self.authorize(request);
        let request_id = request.id;
        let method = request.method;
        let url = request.url.clone();

        let response = self.inner.transport.send(request).await?;
        tracing::debug!(
            %request_id,
            %method,
            %url,
            status = response.status,
            "api call completed"
        );

        if response.is_success() {
            Ok(response)
        } else {
            Err(self.on_failure(&url, sent_token.as_deref(), response).into())
        }
    }

    /// Sends a request and unwraps the envelope's `data`.
    ///
    /// # Errors
    /// As [`send`](Self::send), plus [`HotelDeskError::Protocol`] if the
    /// body isn't an envelope of `R` or says `success: false`.
    pub async fn request<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<R, HotelDeskError> {
        let response = self.send(request).await?;
        let envelope: ApiEnvelope<R> = self.inner.codec.decode(&response.body)?;
        Ok(envelope.into_data()?)
    }

    /// Sends a request whose answer carries no data.
    ///
    /// An empty body counts as success; otherwise the envelope's
    /// `success` flag decides.
    pub async fn request_unit(&self, request: ApiRequest) -> Result<(), HotelDeskError> {
        let response = self.send(request).await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        let envelope: ApiEnvelope<IgnoredAny> = self.inner.codec.decode(&response.body)?;
        if envelope.success {
            Ok(())
        } else {
            Err(hoteldesk_protocol::ProtocolError::InvalidMessage(envelope.message).into())
        }
    }

    /// Encodes `body` as the request's JSON body.
    pub fn json_body<B: Serialize>(
        &self,
        request: ApiRequest,
        body: &B,
    ) -> Result<ApiRequest, HotelDeskError> {
        Ok(request.json_body(self.inner.codec.encode(body)?))
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, HotelDeskError> {
        self.request(ApiRequest::get(self.url(path))).await
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, HotelDeskError> {
        let request = self.json_body(ApiRequest::post(self.url(path)), body)?;
        self.request(request).await
    }

    pub async fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, HotelDeskError> {
        let request = self.json_body(ApiRequest::put(self.url(path)), body)?;
        self.request(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), HotelDeskError> {
        self.request_unit(ApiRequest::delete(self.url(path))).await
    }

    // -----------------------------------------------------------------------
    // Pipeline stages
    // -----------------------------------------------------------------------

    /// Adds `Authorization: Bearer <token>` when a session is present and
    /// returns the token used. Anonymous requests pass through untouched.
    fn authorize(&self, mut request: ApiRequest) -> (ApiRequest, Option<String>) {
        let Some(identity) = self.inner.store.current() else {
            return (request, None);
        };
        if identity.token.trim().is_empty() {
            return (request, None);
        }
        request
            .headers
            .set("Authorization", format!("Bearer {}", identity.token));
        request.headers.set("Content-Type", "application/json");
        tracing::trace!(request_id = %request.id, "attached bearer token");
        (request, Some(identity.token.clone()))
    }

    /// Ends the session the rejected request was sent with, then sends the
    /// user to the login page unless they are already there.
    ///
    /// A session that started while the request was in flight is kept:
    /// the API rejected the old credentials, not the new ones.
    fn on_unauthorized(&self, url: &str, sent_token: Option<&str>) {
        let store = &self.inner.store;
        let cleared = sent_token.is_some_and(|token| store.clear_if_token(token));
        if cleared {
            tracing::info!(%url, "session rejected by API, logged out");
        } else if store.is_logged_in() {
            tracing::debug!(%url, "401 for replaced credentials, keeping current session");
            return;
        }

        let navigator = &self.inner.navigator;
        if navigator.is_on_login() {
            tracing::debug!(%url, "401 while already on the login page");
            return;
        }
        let from = navigator.current_url();
        let to = navigator.redirect_to_login(&from);
        tracing::info!(%url, %to, "redirected to login");
    }

    fn on_failure(&self, url: &str, sent_token: Option<&str>, response: ApiResponse) -> ApiError {
        let message = self
            .inner
            .codec
            .error_message(&response.body)
            .unwrap_or_else(|| status_message(response.status).to_string());

        match response.status {
            401 => self.on_unauthorized(url, sent_token),
            403 => {
                tracing::warn!(%url, %message, "access forbidden");
            }
            status => {
                tracing::debug!(%url, status, %message, "api call failed");
            }
        }

        ApiError {
            status: response.status,
            message,
            body: response.text(),
        }
    }
}

impl<T> std::fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .finish_non_exhaustive()
    }
}

fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        401 => "Session expired, please log in again",
        403 => "Access denied",
        404 => "Not found",
        409 => "Conflict",
        500..=599 => "Server error, please try again later",
        _ => "Request failed",
    }
}
