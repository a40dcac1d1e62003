//! Storage seam for fetched payloads.
//!
//! A [`Store`] maps [`ResourceKey`]s to [`CacheEntry`]s with lazy expiry:
//! [`Store::get`] answers `None` both for keys never stored and for entries
//! whose TTL has elapsed, and drops the latter as it finds them.
//!
//! All operations are synchronous. The fetch layer relies on this: the
//! "look up the store, then register an in-flight request" section must
//! never suspend, otherwise two callers could both miss and both go
//! upstream.

use crate::{CacheEntry, Payload, ResourceKey, StoreLabel};

/// Key/value store with per-entry TTL.
pub trait Store: Send + Sync + 'static {
    /// Returns the entry for `key` if present and fresh.
    fn get(&self, key: &ResourceKey) -> Option<CacheEntry>;

    /// Stores `payload` under `key`, replacing any existing entry with a
    /// freshly timestamped one.
    fn put(&self, key: ResourceKey, payload: Payload);

    /// Removes the entry for `key`. Returns `true` if one was present.
    fn invalidate(&self, key: &ResourceKey) -> bool;

    /// Removes every entry.
    fn clear(&self);

    /// Number of entries currently held, expired ones included until they
    /// are purged.
    fn entry_count(&self) -> u64;

    /// Removes every expired entry and returns how many were removed.
    fn purge_expired(&self) -> usize;

    /// Label used in logs and metrics.
    fn label(&self) -> StoreLabel;
}

impl<S> Store for std::sync::Arc<S>
where
    S: Store + ?Sized,
{
    fn get(&self, key: &ResourceKey) -> Option<CacheEntry> {
        (**self).get(key)
    }

    fn put(&self, key: ResourceKey, payload: Payload) {
        (**self).put(key, payload)
    }

    fn invalidate(&self, key: &ResourceKey) -> bool {
        (**self).invalidate(key)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn entry_count(&self) -> u64 {
        (**self).entry_count()
    }

    fn purge_expired(&self) -> usize {
        (**self).purge_expired()
    }

    fn label(&self) -> StoreLabel {
        (**self).label()
    }
}
