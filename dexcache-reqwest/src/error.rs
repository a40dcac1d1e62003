//! Error types for building a [`ReqwestTransport`](crate::ReqwestTransport).
//!
//! Request-time failures are not reported here: they surface as
//! [`TransportError`](dexcache_core::TransportError) from
//! [`Transport::get`](dexcache_core::Transport::get).

/// Error raised while building a transport.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reqwest client could not be constructed (e.g. TLS backend
    /// initialization failed).
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// The base URL is not an absolute `http` or `https` URL.
    #[error("invalid upstream base url `{0}`")]
    InvalidBaseUrl(String),
}
