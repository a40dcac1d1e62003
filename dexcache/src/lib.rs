#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Deployment configuration.
///
/// [`FetchConfig`] holds the entry TTL, the per-request timeout, the
/// optional entry cap and sweep interval, and the upstream base URL.
pub mod config;

/// Errors raised while assembling a [`FetchCache`].
pub mod error;

/// Metrics collection for cache observability.
///
/// When the `metrics` feature is enabled, this module records:
/// - Cache hits, misses and deduplicated requests
/// - Upstream requests, failures by class and their duration
pub mod metrics;

/// Typed resource models, one per [`ResourceKind`].
pub mod resource;

mod fetch;
mod getters;
mod inflight;
mod sweeper;

pub use config::{ConfigError, FetchConfig, FetchConfigBuilder};
pub use error::BuildError;
pub use fetch::{FetchCache, FetchCacheBuilder, NotSet};
pub use resource::{Link, Resource};
pub use sweeper::SweepHandle;

pub use dexcache_core::{
    CacheEntry, FetchError, InvalidKeyError, Payload, ResourceKey, ResourceKind,
    ServerErrorReason, Store, StoreLabel, Transport, TransportError, UpstreamResponse,
};

/// The `dexcache` prelude.
///
/// ```rust
/// use dexcache::prelude::*;
/// ```
///
/// This imports:
/// - [`FetchCache`] and [`FetchConfig`] to build the cache
/// - [`FetchError`] to classify failures
/// - [`ResourceKind`] for the operational methods
/// - [`Resource`] and [`Link`] for generic fetches and links
pub mod prelude {
    pub use crate::{FetchCache, FetchConfig, FetchError, Link, Resource, ResourceKind};
}
