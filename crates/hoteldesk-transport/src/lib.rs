//! Transport abstraction layer for HotelDesk.
//!
//! Provides the [`HttpTransport`] trait that every outbound API call goes
//! through, plus the request/response values it moves around. The rest of
//! the workspace only ever talks to the trait, so tests can swap in an
//! in-memory transport and production uses [`ReqwestTransport`].
//!
//! # Feature Flags
//!
//! - `reqwest-transport` (default): HTTP transport via `reqwest`

mod error;
#[cfg(feature = "reqwest-transport")]
mod http;

pub use error::TransportError;
#[cfg(feature = "reqwest-transport")]
pub use http::ReqwestTransport;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique request IDs.
static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for one outbound request, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// HTTP method. The API only uses these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// An ordered header list with case-insensitive names.
///
/// Setting a header that already exists replaces it, so a request never
/// carries two `Authorization` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(&name)) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Looks up a header value by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.set(name, value);
        }
        headers
    }
}

// ---------------------------------------------------------------------------
// ApiRequest / ApiResponse
// ---------------------------------------------------------------------------

/// An outbound API call that hasn't been dispatched yet.
///
/// Anything sitting between a feature service and the transport (the
/// authenticating client, for instance) may change `headers`. The body
/// is set once by whoever builds the request and is never rewritten.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub id: RequestId,
    pub method: Method,
    /// Absolute URL, without query string.
    pub url: String,
    /// Query parameters, in order. Encoding is the transport's job.
    pub query: Vec<(String, String)>,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request with no query, headers, or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            id: RequestId::next(),
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// Appends a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Sets a header, replacing any existing value.
    pub fn header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets an already-encoded JSON body and the matching content type.
    pub fn json_body(mut self, body: Vec<u8>) -> Self {
        self.headers.set("Content-Type", "application/json");
        self.body = Some(body);
        self
    }
}

/// What came back from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as text. Invalid UTF-8 is replaced, not rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// Sends one request and waits for its response.
///
/// This is the only place HotelDesk suspends on the network. A response
/// with any status code is `Ok`; `Err` means no response was obtained.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → a transport lives as long as the client
///   and can be shared across Tokio tasks.
/// - The returned future is `Send` so callers can `tokio::spawn` it.
pub trait HttpTransport: Send + Sync + 'static {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

/// Sharing a transport behind an `Arc` keeps it a transport, so the API
/// client and the login authenticator can use the same connection pool.
impl<T: HttpTransport> HttpTransport for Arc<T> {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send {
        T::send(self.as_ref(), request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_is_unique_per_request() {
        let a = ApiRequest::get("http://localhost/a");
        let b = ApiRequest::get("http://localhost/b");
        assert_ne!(a.id, b.id);
        assert!(a.id.to_string().starts_with("req-"));
    }

    #[test]
    fn test_headers_set_replaces_case_insensitively() {
        let mut headers = Headers::new();
        headers.set("authorization", "Bearer old");
        headers.set("Authorization", "Bearer new");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("AUTHORIZATION"), Some("Bearer new"));
    }

    #[test]
    fn test_headers_get_missing_returns_none() {
        let headers = Headers::new();
        assert!(headers.get("Authorization").is_none());
        assert!(!headers.contains("Authorization"));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_request_builder_collects_query_in_order() {
        let request = ApiRequest::post("http://localhost/api/reservations/3/paiement")
            .query("montant", 15000)
            .query("modePaiement", "ESPECES");

        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.query,
            vec![
                ("montant".to_string(), "15000".to_string()),
                ("modePaiement".to_string(), "ESPECES".to_string()),
            ]
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = ApiRequest::post("http://localhost/api/chambres")
            .json_body(b"{}".to_vec());

        assert_eq!(request.headers.get("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn test_response_is_success_only_for_2xx() {
        let response = |status| ApiResponse {
            status,
            headers: Headers::new(),
            body: Vec::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(302).is_success());
        assert!(!response(401).is_success());
        assert!(!response(500).is_success());
    }

    #[test]
    fn test_response_text_is_lossy() {
        let response = ApiResponse {
            status: 500,
            headers: Headers::new(),
            body: vec![b'o', b'k', 0xff],
        };
        assert!(response.text().starts_with("ok"));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
