//! HTTP client with connection pooling

use pkgprobe_errors::{Error, NetworkError};
use reqwest::{Client, Response};
use std::time::Duration;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: format!("pkgprobe/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NetConfig {
    /// Derive client settings from the application config
    #[must_use]
    pub fn from_config(config: &pkgprobe_config::NetworkConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            user_agent: config.user_agent.clone(),
            ..Self::default()
        }
    }
}

/// HTTP client wrapper
///
/// One send per call; the retry loop is the caller's concern.
#[derive(Clone)]
pub struct NetClient {
    client: Client,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to
    /// initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ConnectionRefused(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default
    /// settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// Execute a single GET request
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` for transport-level failures (DNS,
    /// connection, timeout). Non-2xx statuses are NOT errors here; the
    /// caller interprets the response.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        self.get_with_headers(url, &[]).await
    }

    /// Execute a single GET request with extra headers
    ///
    /// # Errors
    ///
    /// Same as [`NetClient::get`].
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Response, Error> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        request.send().await.map_err(Self::map_transport_error)
    }

    fn map_transport_error(e: reqwest::Error) -> Error {
        if e.is_timeout() {
            NetworkError::Timeout {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
            }
            .into()
        } else if e.is_connect() {
            NetworkError::ConnectionRefused(e.to_string()).into()
        } else if e.is_builder() {
            NetworkError::InvalidUrl(e.to_string()).into()
        } else {
            NetworkError::RequestFailed(e.to_string()).into()
        }
    }

    /// Get the underlying reqwest client for advanced usage
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
