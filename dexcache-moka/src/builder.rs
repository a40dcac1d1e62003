//! Builder for configuring [`MokaStore`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use dexcache_core::{CacheEntry, ResourceKey, StoreLabel};
use moka::Expiry;
use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use tracing::trace;

use crate::store::MokaStore;

/// Default TTL: upstream reference data is effectively static.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Lets Moka reclaim memory for entries whose TTL has elapsed.
///
/// Freshness itself is decided by [`CacheEntry::is_fresh`] on every read;
/// this only bounds how long dead entries occupy memory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Expiration;

impl Expiry<ResourceKey, CacheEntry> for Expiration {
    fn expire_after_create(
        &self,
        _key: &ResourceKey,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl())
    }

    fn expire_after_update(
        &self,
        _key: &ResourceKey,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // A replaced entry starts a new TTL window; Moka's default would
        // keep the old deadline.
        Some(value.ttl())
    }
}

/// Builder for creating and configuring a [`MokaStore`].
///
/// Use [`MokaStore::builder`] to create a new builder instance.
///
/// # Capacity
///
/// Without [`max_entries`](Self::max_entries) the store is unbounded, which
/// is fine for a catalog of a few thousand resources. With a cap, the least
/// recently read entry is evicted when an insert would exceed it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use dexcache_moka::MokaStore;
///
/// let store = MokaStore::builder()
///     .label("species")
///     .ttl(Duration::from_secs(600))
///     .max_entries(1_000)
///     .build();
/// ```
pub struct MokaStoreBuilder {
    ttl: Duration,
    max_entries: Option<u64>,
    label: StoreLabel,
    eviction_policy: Option<EvictionPolicy>,
}

impl MokaStoreBuilder {
    /// Creates a builder with the default TTL and no capacity limit.
    pub fn new() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_entries: None,
            label: StoreLabel::new_static("moka"),
            eviction_policy: None,
        }
    }

    /// Sets how long an entry stays fresh after it is stored.
    ///
    /// # Default
    ///
    /// One hour.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Caps the number of entries held at once.
    pub fn max_entries(mut self, max_entries: u64) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Same as [`max_entries`](Self::max_entries) but accepts an optional
    /// cap, as read from configuration.
    pub fn max_entries_opt(mut self, max_entries: Option<u64>) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Sets a custom label for this store.
    ///
    /// # Default
    ///
    /// `"moka"`
    pub fn label(mut self, label: impl Into<StoreLabel>) -> Self {
        self.label = label.into();
        self
    }

    /// Overrides the eviction policy used once the cap is reached.
    ///
    /// # Default
    ///
    /// [`EvictionPolicy::lru()`], so the least recently read entry goes
    /// first. [`EvictionPolicy::tiny_lfu()`] trades that predictability for
    /// a better hit rate under skewed load.
    pub fn eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.eviction_policy = Some(policy);
        self
    }

    /// Builds the [`MokaStore`].
    pub fn build(self) -> MokaStore {
        let policy = self.eviction_policy.unwrap_or_else(EvictionPolicy::lru);
        let listener_label = self.label.clone();

        let mut builder = Cache::<ResourceKey, CacheEntry>::builder()
            .name(self.label.as_str())
            .eviction_policy(policy)
            .expire_after(Expiration)
            .eviction_listener(
                move |key: Arc<ResourceKey>, _value: CacheEntry, cause: RemovalCause| {
                    trace!(store = %listener_label, key = %key, ?cause, "entry removed");
                    if matches!(cause, RemovalCause::Size | RemovalCause::Expired) {
                        crate::metrics::record_eviction(listener_label.as_str(), cause_label(cause));
                    }
                },
            );
        if let Some(max_entries) = self.max_entries {
            builder = builder.max_capacity(max_entries);
        }

        MokaStore {
            cache: builder.build(),
            ttl: self.ttl,
            label: self.label,
        }
    }
}

impl Default for MokaStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn cause_label(cause: RemovalCause) -> &'static str {
    match cause {
        RemovalCause::Expired => "expired",
        RemovalCause::Explicit => "explicit",
        RemovalCause::Replaced => "replaced",
        RemovalCause::Size => "size",
    }
}
