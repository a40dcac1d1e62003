//! Transport seam for reaching the upstream API.
//!
//! A [`Transport`] performs exactly one GET for one resource and reports
//! either the raw response or a [`TransportError`]. It does not interpret
//! status codes or bodies; classification happens in the fetch layer so
//! every transport fails the same way.
//!
//! # Examples
//!
//! ```rust
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use dexcache_core::{ResourceKey, StoreLabel, Transport, TransportError, UpstreamResponse};
//!
//! struct Fixed;
//!
//! #[async_trait]
//! impl Transport for Fixed {
//!     async fn get(&self, key: &ResourceKey) -> Result<UpstreamResponse, TransportError> {
//!         let body = format!(r#"{{"id":1,"name":"{}"}}"#, key.identifier());
//!         Ok(UpstreamResponse::new(200, Bytes::from(body)))
//!     }
//!
//!     fn label(&self) -> StoreLabel {
//!         StoreLabel::new_static("fixed")
//!     }
//! }
//! ```

use async_trait::async_trait;
use bytes::Bytes;

use crate::{ResourceKey, StoreLabel, TransportError};

/// Raw upstream answer: status code and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded body.
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues upstream GET requests.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Fetches `/<kind>/<identifier>` below the upstream base URL.
    async fn get(&self, key: &ResourceKey) -> Result<UpstreamResponse, TransportError>;

    /// Label used in logs and metrics.
    fn label(&self) -> StoreLabel;
}

#[async_trait]
impl<T> Transport for std::sync::Arc<T>
where
    T: Transport + ?Sized,
{
    async fn get(&self, key: &ResourceKey) -> Result<UpstreamResponse, TransportError> {
        (**self).get(key).await
    }

    fn label(&self) -> StoreLabel {
        (**self).label()
    }
}
