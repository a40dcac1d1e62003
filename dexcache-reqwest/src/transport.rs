//! HTTP transport over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use dexcache_core::{ResourceKey, StoreLabel, Transport, TransportError, UpstreamResponse};
use reqwest::{Client, Url};
use tracing::debug;

use crate::Error;

/// Public REST endpoint of the upstream API.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Transport issuing `GET <base_url>/<kind>/<identifier>` with reqwest.
///
/// Cheap to clone: the underlying [`Client`] shares its connection pool.
///
/// # Error mapping
///
/// | reqwest failure                | [`TransportError`]         |
/// |--------------------------------|----------------------------|
/// | `is_timeout()`                 | `Timeout(timeout)`         |
/// | anything else (DNS, connect..) | `Unreachable(message)`     |
///
/// Any HTTP status, including 4xx and 5xx, is returned as a successful
/// [`UpstreamResponse`]; classifying it is the caller's job.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
    label: StoreLabel,
}

impl ReqwestTransport {
    /// Creates a new builder.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL of the resource identified by `key`.
    pub fn url_for(&self, key: &ResourceKey) -> String {
        format!("{}/{}", self.base_url, key.path())
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Unreachable(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, key: &ResourceKey) -> Result<UpstreamResponse, TransportError> {
        let url = self.url_for(key);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| self.classify(error))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|error| self.classify(error))?;
        debug!(%url, status, bytes = body.len(), "upstream responded");

        Ok(UpstreamResponse { status, body })
    }

    fn label(&self) -> StoreLabel {
        self.label.clone()
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct ReqwestTransportBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    client: Option<Client>,
    label: StoreLabel,
}

impl ReqwestTransportBuilder {
    /// Creates a builder pointing at [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            client: None,
            label: StoreLabel::new_static("reqwest"),
        }
    }

    /// Sets the upstream base URL, e.g. `https://pokeapi.co/api/v2`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the total per-request timeout, body download included.
    ///
    /// # Default
    ///
    /// [`DEFAULT_TIMEOUT`]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Uses a preconfigured client instead of building one.
    ///
    /// The client's own timeout applies; [`timeout`](Self::timeout) is then
    /// only used to label timeout errors.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the label reported in logs and metrics.
    pub fn label(mut self, label: impl Into<StoreLabel>) -> Self {
        self.label = label.into();
        self
    }

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBaseUrl`] if the base URL is not absolute `http(s)`,
    /// [`Error::Client`] if the client cannot be built.
    pub fn build(self) -> Result<ReqwestTransport, Error> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        let parsed =
            Url::parse(&base_url).map_err(|_| Error::InvalidBaseUrl(self.base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidBaseUrl(self.base_url));
        }

        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder().timeout(self.timeout);
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                builder.build()?
            }
        };

        Ok(ReqwestTransport {
            client,
            base_url,
            timeout: self.timeout,
            label: self.label,
        })
    }
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
