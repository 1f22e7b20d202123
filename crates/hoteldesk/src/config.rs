//! Client configuration.

use std::time::Duration;

use crate::HotelDeskError;

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_API_URL: &str = "HOTELDESK_API_URL";

/// Environment variable overriding [`ClientConfig::timeout`], in seconds.
pub const ENV_TIMEOUT_SECS: &str = "HOTELDESK_TIMEOUT_SECS";

/// Settings for the HTTP side of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root. Endpoint paths like `/chambres` are appended to it.
    pub base_url: String,

    /// Whole-request timeout.
    pub timeout: Duration,

    /// Timeout for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,

    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("hoteldesk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `HOTELDESK_API_URL` and
    /// `HOTELDESK_TIMEOUT_SECS` when set.
    ///
    /// # Errors
    /// Returns [`HotelDeskError::Config`] if a variable is set but invalid.
    pub fn from_env() -> Result<Self, HotelDeskError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through
    /// `lookup` instead of the process environment.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, HotelDeskError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(HotelDeskError::Config(format!(
                    "{ENV_API_URL} must be an http(s) URL, got {url:?}"
                )));
            }
            config.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                HotelDeskError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {secs:?}"
                ))
            })?;
            if secs == 0 {
                return Err(HotelDeskError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be greater than zero"
                )));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Sets the API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Absolute URL for an endpoint path. Absolute URLs pass through.
    ///
    /// ```rust
    /// use hoteldesk::ClientConfig;
    ///
    /// let config = ClientConfig::default();
    /// assert_eq!(config.endpoint("/chambres"), "http://localhost:8080/api/chambres");
    /// assert_eq!(config.endpoint("chambres/3"), "http://localhost:8080/api/chambres/3");
    /// ```
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
