//! The fetch cache: store lookup, in-flight deduplication and upstream
//! fetch, in that order.
//!
//! A request for a [`ResourceKey`] goes through three steps:
//!
//! 1. **Store lookup.** A fresh entry is returned without suspending.
//! 2. **Deduplication.** On a miss the key is registered in the in-flight
//!    map, or the caller attaches to the fetch already registered there.
//!    Both lookups are synchronous, so no other caller can interleave
//!    between them.
//! 3. **Upstream fetch.** The fetch runs in its own task, bounded by the
//!    request timeout. On success the payload is stored before the
//!    registration is cleared and before any caller sees the result.
//!    Failures are never stored.
//!
//! A caller dropping its future does not cancel the fetch: the task runs
//! to completion and still populates the store for later callers.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{Instrument, debug, info, info_span, warn};

use dexcache_core::{
    FetchError, InvalidKeyError, Payload, ResourceKey, ResourceKind, ServerErrorReason, Store,
    Transport, UpstreamResponse,
};
use dexcache_moka::MokaStore;
use dexcache_reqwest::ReqwestTransport;

use crate::config::{DEFAULT_REQUEST_TIMEOUT, FetchConfig};
use crate::error::BuildError;
use crate::inflight::{Flight, FlightGuard, InFlight};
use crate::metrics;
use crate::resource::{Link, Resource};

/// Request-deduplicating, TTL-cached access to upstream resources.
///
/// Cheap to clone: clones share the store, the transport and the in-flight
/// map. Construct one per process and hand clones to every consumer.
///
/// # Examples
///
/// ```no_run
/// use dexcache::{FetchCache, FetchConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let cache = FetchCache::new(FetchConfig::default())?;
///
/// let pikachu = cache.get_pokemon_detail("Pikachu").await?;
/// assert_eq!(pikachu.name, "pikachu");
///
/// // Served from the store, no upstream request.
/// let again = cache.get_pokemon_detail("pikachu").await?;
/// assert_eq!(pikachu, again);
/// # Ok(())
/// # }
/// ```
pub struct FetchCache<S = MokaStore, T = ReqwestTransport> {
    pub(crate) inner: Arc<Inner<S, T>>,
}

pub(crate) struct Inner<S, T> {
    pub(crate) store: S,
    transport: T,
    in_flight: InFlight,
    request_timeout: Duration,
    pub(crate) sweep_interval: Option<Duration>,
}

impl<S, T> Clone for FetchCache<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, T> fmt::Debug for FetchCache<S, T>
where
    S: Store,
    T: Transport,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchCache")
            .field("store", &self.inner.store.label())
            .field("transport", &self.inner.transport.label())
            .field("request_timeout", &self.inner.request_timeout)
            .field("sweep_interval", &self.inner.sweep_interval)
            .field("in_flight", &self.inner.in_flight.len())
            .finish()
    }
}

impl FetchCache {
    /// Builds the default stack from `config`: an in-memory Moka store and
    /// a reqwest transport.
    ///
    /// No sweeper is started; call [`spawn_sweeper`](Self::spawn_sweeper)
    /// from within a runtime if `sweep_interval` is set.
    pub fn new(config: FetchConfig) -> Result<Self, BuildError> {
        config.validate()?;

        let store = MokaStore::builder()
            .ttl(config.ttl)
            .max_entries_opt(config.max_cache_entries)
            .build();
        let transport = ReqwestTransport::builder()
            .base_url(config.base_url)
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()?;

        let mut builder = FetchCache::builder()
            .store(store)
            .transport(transport)
            .request_timeout(config.request_timeout);
        if let Some(interval) = config.sweep_interval {
            builder = builder.sweep_interval(interval);
        }
        Ok(builder.build())
    }

    /// Creates a builder accepting any [`Store`] and [`Transport`].
    pub fn builder() -> FetchCacheBuilder<NotSet, NotSet> {
        FetchCacheBuilder::new()
    }
}

impl<S, T> FetchCache<S, T>
where
    S: Store,
    T: Transport,
{
    /// Fetches the resource of model `R` identified by `identifier`.
    ///
    /// The identifier is a slug or a numeric ID; case and surrounding
    /// whitespace are ignored.
    pub async fn fetch<R: Resource>(
        &self,
        identifier: impl fmt::Display,
    ) -> Result<Arc<R>, FetchError> {
        let key = ResourceKey::new(R::KIND, identifier)?;
        self.fetch_key(key).await
    }

    /// Follows an upstream link through the cache.
    ///
    /// Fails with [`InvalidKeyError::KindMismatch`] if the link does not
    /// point at an `R`.
    pub async fn fetch_linked<R: Resource>(&self, link: &impl Link) -> Result<Arc<R>, FetchError> {
        let key = link.key()?;
        if key.kind() != R::KIND {
            return Err(InvalidKeyError::KindMismatch {
                expected: R::KIND,
                found: key.kind(),
            }
            .into());
        }
        self.fetch_key(key).await
    }

    /// Drops the cached entry, then fetches it again.
    ///
    /// Still deduplicated: if a fetch for the key is already outstanding,
    /// its outcome is returned.
    pub async fn refresh<R: Resource>(
        &self,
        identifier: impl fmt::Display,
    ) -> Result<Arc<R>, FetchError> {
        let key = ResourceKey::new(R::KIND, identifier)?;
        self.inner.store.invalidate(&key);
        info!(%key, "refreshing cached resource");
        self.fetch_key(key).await
    }

    /// Drops the cached entry for one resource.
    ///
    /// Returns `true` if an entry was removed. An outstanding fetch for the
    /// key is not cancelled and will store its result when it settles.
    pub fn invalidate(
        &self,
        kind: ResourceKind,
        identifier: impl fmt::Display,
    ) -> Result<bool, InvalidKeyError> {
        let key = ResourceKey::new(kind, identifier)?;
        let removed = self.inner.store.invalidate(&key);
        debug!(%key, removed, "invalidated cached resource");
        Ok(removed)
    }

    /// Drops every cached entry.
    pub fn flush(&self) {
        self.inner.store.clear();
        info!(store = %self.inner.store.label(), "flushed cache");
    }

    /// Returns `true` if a fresh entry is cached for the resource.
    ///
    /// Invalid identifiers are never cached.
    pub fn contains(&self, kind: ResourceKind, identifier: impl fmt::Display) -> bool {
        ResourceKey::new(kind, identifier)
            .is_ok_and(|key| self.inner.store.get(&key).is_some())
    }

    /// Returns `true` if an upstream fetch for the resource is outstanding.
    pub fn is_in_flight(&self, kind: ResourceKind, identifier: impl fmt::Display) -> bool {
        ResourceKey::new(kind, identifier).is_ok_and(|key| self.inner.in_flight.contains(&key))
    }

    /// Number of cached entries, expired ones not yet reclaimed included.
    pub fn entry_count(&self) -> u64 {
        self.inner.store.entry_count()
    }

    /// Number of outstanding upstream fetches.
    pub fn in_flight_count(&self) -> usize {
        self.inner.in_flight.len()
    }

    /// Drops expired entries now. Returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        self.inner.store.purge_expired()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Upper bound for a single upstream call.
    pub fn request_timeout(&self) -> Duration {
        self.inner.request_timeout
    }

    async fn fetch_key<R: Resource>(&self, key: ResourceKey) -> Result<Arc<R>, FetchError> {
        if let Some(entry) = self.inner.store.get(&key) {
            debug!(%key, fetched_at = %entry.fetched_at(), "cache hit");
            metrics::record_hit(key.kind());
            return downcast(&key, entry.into_payload());
        }

        let flight = self.inner.in_flight.get_or_start(
            &key,
            || self.inner.store.get(&key),
            |guard| self.start::<R>(key.clone(), guard),
        );

        let payload = match flight {
            Flight::Cached(entry) => {
                debug!(%key, "cache hit on recheck");
                metrics::record_hit(key.kind());
                entry.into_payload()
            }
            Flight::Joined(fetch) => {
                debug!(%key, "joined in-flight fetch");
                metrics::record_deduplicated(key.kind());
                fetch.await?
            }
            Flight::Started(fetch) => {
                debug!(%key, "cache miss");
                metrics::record_miss(key.kind());
                fetch.await?
            }
        };
        downcast(&key, payload)
    }

    /// Spawns the upstream fetch for `key`. The task stores a successful
    /// result, then hands the outcome to every caller through `guard`.
    fn start<R: Resource>(&self, key: ResourceKey, guard: FlightGuard) {
        let inner = Arc::clone(&self.inner);
        let span = info_span!("upstream_fetch", key = %key);

        tokio::spawn(
            async move {
                let started = Instant::now();
                let result = inner.load::<R>(&key).await;
                metrics::record_upstream(
                    key.kind(),
                    started.elapsed(),
                    result.as_ref().err().map(FetchError::class),
                );

                match &result {
                    Ok(payload) => inner.store.put(key, Arc::clone(payload)),
                    Err(error) => {
                        warn!(class = error.class(), %error, "upstream fetch failed");
                    }
                }
                guard.finish(result);
            }
            .instrument(span),
        );
    }
}

impl<S, T> Inner<S, T>
where
    S: Store,
    T: Transport,
{
    async fn load<R: Resource>(&self, key: &ResourceKey) -> Result<Payload, FetchError> {
        let response = tokio::time::timeout(self.request_timeout, self.transport.get(key))
            .await
            .map_err(|_| FetchError::UpstreamTimeout {
                key: key.clone(),
                timeout: self.request_timeout,
            })?
            .map_err(|error| FetchError::from_transport(key.clone(), error))?;

        let model = decode::<R>(key, &response)?;
        debug!(id = model.id(), bytes = response.body.len(), "decoded upstream payload");
        let payload: Payload = Arc::new(model);
        Ok(payload)
    }
}

/// Classifies an upstream response and decodes a successful one.
///
/// | status    | outcome                                   |
/// |-----------|-------------------------------------------|
/// | 2xx       | decoded and validated as `R`              |
/// | 4xx       | [`FetchError::UpstreamNotFound`]          |
/// | 5xx       | [`FetchError::UpstreamServer`]            |
/// | any other | [`FetchError::UpstreamServer`]            |
///
/// A 2xx body that is not valid JSON, lacks a required field or fails
/// [`Resource::validate`] is an [`FetchError::UpstreamServer`] too.
pub(crate) fn decode<R: Resource>(
    key: &ResourceKey,
    response: &UpstreamResponse,
) -> Result<R, FetchError> {
    let server = |reason| FetchError::UpstreamServer {
        key: key.clone(),
        reason,
    };

    match response.status {
        200..=299 => {}
        status @ 400..=499 => {
            return Err(FetchError::UpstreamNotFound {
                key: key.clone(),
                status,
            });
        }
        status @ 500..=599 => return Err(server(ServerErrorReason::Status(status))),
        status => return Err(server(ServerErrorReason::UnexpectedStatus(status))),
    }

    let model: R = serde_json::from_slice(&response.body)
        .map_err(|error| server(ServerErrorReason::MalformedBody(error.to_string())))?;
    model
        .validate()
        .map_err(|reason| server(ServerErrorReason::MalformedBody(reason)))?;
    Ok(model)
}

fn downcast<R: Resource>(key: &ResourceKey, payload: Payload) -> Result<Arc<R>, FetchError> {
    payload.downcast::<R>().map_err(|_| FetchError::UpstreamServer {
        key: key.clone(),
        reason: ServerErrorReason::MalformedBody(format!("cached payload is not a {}", R::KIND)),
    })
}

/// Marker for a builder field that has not been set yet.
///
/// Seeing `NotSet` in a compiler error means the corresponding builder
/// method was not called.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotSet;

/// Builder for a [`FetchCache`] over a custom store and transport.
///
/// ```
/// use std::time::Duration;
/// use dexcache::FetchCache;
/// use dexcache_moka::MokaStore;
/// use dexcache_reqwest::ReqwestTransport;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cache = FetchCache::builder()
///     .store(MokaStore::builder().ttl(Duration::from_secs(600)).build())
///     .transport(ReqwestTransport::builder().base_url("http://localhost:8000/api/v2").build()?)
///     .request_timeout(Duration::from_secs(2))
///     .build();
/// assert_eq!(cache.in_flight_count(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FetchCacheBuilder<S, T> {
    store: S,
    transport: T,
    request_timeout: Duration,
    sweep_interval: Option<Duration>,
}

impl FetchCacheBuilder<NotSet, NotSet> {
    /// Creates a builder with neither store nor transport set.
    pub fn new() -> Self {
        Self {
            store: NotSet,
            transport: NotSet,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            sweep_interval: None,
        }
    }
}

impl Default for FetchCacheBuilder<NotSet, NotSet> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> FetchCacheBuilder<S, T> {
    /// Sets the store.
    pub fn store<NewS>(self, store: NewS) -> FetchCacheBuilder<NewS, T> {
        FetchCacheBuilder {
            store,
            transport: self.transport,
            request_timeout: self.request_timeout,
            sweep_interval: self.sweep_interval,
        }
    }

    /// Sets the transport.
    pub fn transport<NewT>(self, transport: NewT) -> FetchCacheBuilder<S, NewT> {
        FetchCacheBuilder {
            store: self.store,
            transport,
            request_timeout: self.request_timeout,
            sweep_interval: self.sweep_interval,
        }
    }

    /// Sets the upper bound for a single upstream call.
    ///
    /// # Default
    ///
    /// [`DEFAULT_REQUEST_TIMEOUT`]
    pub fn request_timeout(self, request_timeout: Duration) -> Self {
        Self {
            request_timeout,
            ..self
        }
    }

    /// Sets the period used by [`FetchCache::spawn_sweeper`].
    pub fn sweep_interval(self, sweep_interval: Duration) -> Self {
        Self {
            sweep_interval: Some(sweep_interval),
            ..self
        }
    }
}

impl<S, T> FetchCacheBuilder<S, T>
where
    S: Store,
    T: Transport,
{
    /// Builds the cache. Both store and transport must be set.
    pub fn build(self) -> FetchCache<S, T> {
        FetchCache {
            inner: Arc::new(Inner {
                store: self.store,
                transport: self.transport,
                in_flight: InFlight::new(),
                request_timeout: self.request_timeout,
                sweep_interval: self.sweep_interval,
            }),
        }
    }
}
