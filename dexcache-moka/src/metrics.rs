//! Moka store metrics.
//!
//! Enable the `metrics` feature to record them; without it every function
//! here compiles to nothing.
//!
//! ## Metrics
//!
//! - `dexcache_moka_entries` - Current number of entries in the store (gauge)
//! - `dexcache_moka_evictions_total` - Entries dropped by capacity or expiry (counter)
//!
//! Both metrics carry a `store` label to distinguish between multiple
//! stores in one process.

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Metric name for the entry count gauge.
    pub static ref MOKA_ENTRIES: &'static str = {
        metrics::describe_gauge!(
            "dexcache_moka_entries",
            "Current number of entries in the Moka store."
        );
        "dexcache_moka_entries"
    };

    /// Metric name for the eviction counter.
    pub static ref MOKA_EVICTIONS: &'static str = {
        metrics::describe_counter!(
            "dexcache_moka_evictions_total",
            "Total number of entries evicted by capacity or expiry."
        );
        "dexcache_moka_evictions_total"
    };
}

/// Record the current entry count for `store`.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_entries(store: &str, entries: u64) {
    metrics::gauge!(*MOKA_ENTRIES, "store" => store.to_string()).set(entries as f64);
}

/// No-op when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_entries(_store: &str, _entries: u64) {}

/// Record one eviction for `store` with its removal `cause`.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_eviction(store: &str, cause: &'static str) {
    metrics::counter!(*MOKA_EVICTIONS, "store" => store.to_string(), "cause" => cause).increment(1);
}

/// No-op when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_eviction(_store: &str, _cause: &'static str) {}
