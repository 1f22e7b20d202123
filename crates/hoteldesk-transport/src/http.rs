//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use crate::{ApiRequest, ApiResponse, Headers, HttpTransport, Method, TransportError};

/// An [`HttpTransport`] backed by a pooled `reqwest::Client`.
///
/// Cloning is cheap: `reqwest::Client` is an `Arc` around its pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with explicit timeouts and user agent.
    ///
    /// # Errors
    /// Returns [`TransportError::Build`] when the TLS backend or client
    /// cannot be initialised.
    pub fn new(
        timeout: Duration,
        connect_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self { client })
    }

    /// Wraps an already-configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse, TransportError> {
        let url = reqwest::Url::parse(&request.url).map_err(|e| {
            TransportError::InvalidUrl(format!("{}: {e}", request.url))
        })?;

        let mut builder = self.client.request(to_reqwest(request.method), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        tracing::debug!(
            id = %request.id,
            method = %request.method,
            url = %request.url,
            "dispatching request"
        );

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                TransportError::Unreachable(e.to_string())
            } else {
                TransportError::Request(e)
            }
        })?;

        let status = response.status().as_u16();
        let headers: Headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(TransportError::Body)?;

        tracing::debug!(id = %request.id, status, "response received");

        Ok(ApiResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}
