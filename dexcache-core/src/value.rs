//! Cached payloads with a freshness window.
//!
//! A [`CacheEntry`] wraps one decoded upstream payload together with the
//! instant it was stored and the TTL it was stored with. Entries are never
//! mutated: refreshing a resource replaces the whole entry.
//!
//! ## Freshness
//!
//! An entry is fresh iff `now - stored_at < ttl`. Expired entries are not
//! swept eagerly; stores treat them as absent on the next lookup.
//!
//! Freshness is measured with [`tokio::time::Instant`], which follows the
//! paused clock in tests (`#[tokio::test(start_paused = true)]`) and the
//! system monotonic clock everywhere else.
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use dexcache_core::CacheEntry;
//!
//! let entry = CacheEntry::new(Arc::new(String::from("pikachu")), Duration::from_secs(3600));
//! assert!(entry.is_fresh());
//! assert_eq!(entry.downcast::<String>().as_deref().map(String::as_str), Some("pikachu"));
//! assert!(entry.downcast::<u32>().is_none());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Type-erased decoded payload.
///
/// The store never looks inside; the typed getter that produced the payload
/// is the only place that downcasts it.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// One stored upstream payload.
#[derive(Clone)]
pub struct CacheEntry {
    payload: Payload,
    stored_at: Instant,
    fetched_at: DateTime<Utc>,
    ttl: Duration,
}

impl CacheEntry {
    /// Creates an entry stamped with the current instant.
    pub fn new(payload: Payload, ttl: Duration) -> Self {
        Self {
            payload,
            stored_at: Instant::now(),
            fetched_at: Utc::now(),
            ttl,
        }
    }

    /// The stored payload.
    #[inline]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Consumes the entry and returns the payload.
    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Typed view of the payload, `None` if it holds another type.
    pub fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        Arc::clone(&self.payload).downcast::<T>().ok()
    }

    /// Monotonic instant the entry was stored at.
    #[inline]
    pub fn stored_at(&self) -> Instant {
        self.stored_at
    }

    /// Wall-clock time the entry was stored at, for operator output.
    #[inline]
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// TTL the entry was stored with.
    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns `true` if the entry is still fresh now.
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Instant::now())
    }

    /// Returns `true` if the entry is fresh at `now`.
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) < self.ttl
    }

    /// Time left before the entry expires, `None` once it has.
    pub fn remaining(&self) -> Option<Duration> {
        let elapsed = Instant::now().saturating_duration_since(self.stored_at);
        self.ttl.checked_sub(elapsed).filter(|left| !left.is_zero())
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("payload", &"..")
            .field("stored_at", &self.stored_at)
            .field("fetched_at", &self.fetched_at)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ttl: Duration) -> CacheEntry {
        CacheEntry::new(Arc::new(7u32), ttl)
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_exactly_at_ttl() {
        let entry = entry(Duration::from_secs(60));
        assert!(entry.is_fresh());

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(entry.is_fresh());
        assert_eq!(entry.remaining(), Some(Duration::from_secs(1)));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!entry.is_fresh());
        assert_eq!(entry.remaining(), None);
    }

    #[test]
    fn zero_ttl_is_never_fresh() {
        assert!(!entry(Duration::ZERO).is_fresh());
    }

    #[test]
    fn clones_share_the_payload() {
        let entry = entry(Duration::from_secs(1));
        let clone = entry.clone();
        assert!(Arc::ptr_eq(entry.payload(), clone.payload()));
        assert_eq!(clone.downcast::<u32>().as_deref(), Some(&7));
    }

    #[test]
    fn fetched_at_records_wall_clock_time() {
        let before = Utc::now();
        let entry = entry(Duration::from_secs(1));
        let after = Utc::now();
        assert!(before <= entry.fetched_at() && entry.fetched_at() <= after);
        assert_eq!(entry.clone().fetched_at(), entry.fetched_at());
    }
}
