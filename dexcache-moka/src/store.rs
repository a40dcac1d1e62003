//! Moka store implementation.

use std::time::Duration;

use dexcache_core::{CacheEntry, Payload, ResourceKey, Store, StoreLabel};
use moka::ops::compute::Op;
use moka::sync::Cache;
use tracing::debug;

use crate::builder::MokaStoreBuilder;

/// In-memory TTL store powered by Moka.
///
/// Reads are lock-free and never suspend. Freshness is checked on every
/// read against the entry's own timestamp, so an expired entry is never
/// returned even if Moka has not reclaimed it yet.
///
/// # Caveats
///
/// - Data is **not persisted**, the store is empty after a restart
/// - Data is **not shared** across processes
/// - [`Store::entry_count`] runs Moka's pending maintenance first, which
///   costs more than a plain read
#[derive(Clone)]
pub struct MokaStore {
    pub(crate) cache: Cache<ResourceKey, CacheEntry>,
    pub(crate) ttl: Duration,
    pub(crate) label: StoreLabel,
}

impl std::fmt::Debug for MokaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaStore")
            .field("label", &self.label)
            .field("ttl", &self.ttl)
            .field("cache", &self.cache)
            .finish()
    }
}

impl MokaStore {
    /// Creates a new builder.
    pub fn builder() -> MokaStoreBuilder {
        MokaStoreBuilder::new()
    }

    /// TTL applied to every stored entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Applies pending evictions and expirations.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }

    /// Removes the entry under `key` only if it is still expired, so an
    /// entry replaced concurrently survives.
    fn remove_if_expired(&self, key: &ResourceKey) -> bool {
        let result = self
            .cache
            .entry_by_ref(key)
            .and_compute_with(|current| match current {
                Some(entry) if !entry.value().is_fresh() => Op::Remove,
                _ => Op::Nop,
            });
        matches!(result, moka::ops::compute::CompResult::Removed(_))
    }
}

impl Store for MokaStore {
    fn get(&self, key: &ResourceKey) -> Option<CacheEntry> {
        let entry = self.cache.get(key)?;
        if entry.is_fresh() {
            return Some(entry);
        }
        debug!(store = %self.label, %key, "expired entry dropped on read");
        self.remove_if_expired(key);
        None
    }

    fn put(&self, key: ResourceKey, payload: Payload) {
        self.cache.insert(key, CacheEntry::new(payload, self.ttl));
    }

    fn invalidate(&self, key: &ResourceKey) -> bool {
        self.cache.remove(key).is_some()
    }

    fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        let count = self.cache.entry_count();
        crate::metrics::record_entries(self.label.as_str(), count);
        count
    }

    fn purge_expired(&self) -> usize {
        let expired: Vec<_> = self
            .cache
            .iter()
            .filter(|(_, entry)| !entry.is_fresh())
            .map(|(key, _)| key)
            .collect();

        let removed = expired
            .iter()
            .filter(|key| self.remove_if_expired(key))
            .count();
        self.cache.run_pending_tasks();

        if removed > 0 {
            debug!(store = %self.label, removed, "purged expired entries");
        }
        removed
    }

    fn label(&self) -> StoreLabel {
        self.label.clone()
    }
}
