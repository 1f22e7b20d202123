//! Credential exchange: turning email + password into an [`Identity`].
//!
//! The [`Authenticator`] trait is the seam between the login flow and the
//! network. [`HttpAuthenticator`] is the real one (it POSTs to
//! `/auth/login`); tests plug in a stub that answers from memory.
//!
//! An authenticator only *exchanges*. It never touches the session store;
//! deciding what to do with the answer is the gateway's job.

use hoteldesk_protocol::{ApiEnvelope, Codec, Identity, JsonCodec, LoginRequest};
use hoteldesk_transport::{ApiRequest, HttpTransport};

use crate::{SessionError, LOGIN_FAILED_MESSAGE};

/// Exchanges login credentials for an API envelope.
///
/// # Trait bounds
///
/// - `Send + Sync` → the gateway holding it can be shared across tasks.
/// - `'static` → it lives as long as the application.
///
/// # Example
///
/// ```rust
/// use hoteldesk_protocol::{ApiEnvelope, Identity, LoginRequest};
/// use hoteldesk_session::{Authenticator, SessionError};
///
/// /// Refuses everyone. Useful for exercising the failure path.
/// struct Closed;
///
/// impl Authenticator for Closed {
///     async fn exchange(
///         &self,
///         _request: &LoginRequest,
///     ) -> Result<ApiEnvelope<Identity>, SessionError> {
///         Ok(ApiEnvelope {
///             success: false,
///             message: "front desk closed".into(),
///             data: None,
///         })
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Sends the credentials once and returns the server's envelope.
    ///
    /// # Returns
    /// - `Ok(envelope)`: the server answered 2xx with an envelope. It may
    ///   still say `success: false`.
    /// - `Err(SessionError::Rejected)`: the server answered non-2xx.
    /// - `Err(SessionError::MalformedResponse)`: 2xx, but not an envelope.
    /// - `Err(SessionError::Transport)`: no answer at all.
    fn exchange(
        &self,
        request: &LoginRequest,
    ) -> impl std::future::Future<Output = Result<ApiEnvelope<Identity>, SessionError>> + Send;
}

// ---------------------------------------------------------------------------
// HttpAuthenticator
// ---------------------------------------------------------------------------

/// Logs in against `{base_url}/auth/login`.
#[derive(Debug, Clone)]
pub struct HttpAuthenticator<T> {
    transport: T,
    login_url: String,
    codec: JsonCodec,
}

impl<T: HttpTransport> HttpAuthenticator<T> {
    /// `base_url` is the API root, e.g. `http://localhost:8080/api`.
    /// A trailing slash is tolerated.
    pub fn new(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            login_url: format!("{}/auth/login", base_url.trim_end_matches('/')),
            codec: JsonCodec,
        }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

impl<T: HttpTransport> Authenticator for HttpAuthenticator<T> {
    async fn exchange(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiEnvelope<Identity>, SessionError> {
        let body = self.codec.encode(request).map_err(SessionError::Persist)?;

        // No Authorization header: this is how a token is obtained.
        let http_request = ApiRequest::post(self.login_url.as_str()).json_body(body);
        tracing::debug!(
            request_id = %http_request.id,
            email = %request.email,
            account_type = %request.account_type,
            "sending login request"
        );

        let response = self.transport.send(http_request).await?;

        if !response.is_success() {
            let message = self
                .codec
                .error_message(&response.body)
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string());
            tracing::info!(status = response.status, %message, "login rejected");
            return Err(SessionError::Rejected {
                status: response.status,
                message,
            });
        }

        self.codec
            .decode(&response.body)
            .map_err(SessionError::MalformedResponse)
    }
}
