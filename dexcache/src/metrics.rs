//! Metrics declaration and recording.
//!
//! Enable the `metrics` feature to record them; without it every function
//! here compiles to nothing.
//!
//! All metrics carry a `kind` label with the resource kind.

#[cfg(feature = "metrics")]
use std::time::Duration;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

use dexcache_core::ResourceKind;

#[cfg(feature = "metrics")]
lazy_static! {
    // Cache status metrics

    /// Track number of requests served from a fresh entry.
    pub static ref CACHE_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "dexcache_cache_hit_total",
            "Total number of requests served from cache."
        );
        "dexcache_cache_hit_total"
    };
    /// Track number of requests that found no fresh entry.
    pub static ref CACHE_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "dexcache_cache_miss_total",
            "Total number of requests that started an upstream fetch."
        );
        "dexcache_cache_miss_total"
    };
    /// Track number of requests that joined an in-flight fetch.
    pub static ref CACHE_DEDUPLICATED_COUNTER: &'static str = {
        metrics::describe_counter!(
            "dexcache_cache_deduplicated_total",
            "Total number of requests that joined an in-flight upstream fetch."
        );
        "dexcache_cache_deduplicated_total"
    };

    // Upstream metrics

    /// Track number of upstream requests issued.
    pub static ref UPSTREAM_REQUESTS: &'static str = {
        metrics::describe_counter!(
            "dexcache_upstream_requests_total",
            "Total number of upstream requests issued."
        );
        "dexcache_upstream_requests_total"
    };
    /// Track number of failed upstream requests, labelled by error class.
    pub static ref UPSTREAM_ERRORS: &'static str = {
        metrics::describe_counter!(
            "dexcache_upstream_errors_total",
            "Total number of failed upstream requests."
        );
        "dexcache_upstream_errors_total"
    };
    /// Histogram of upstream request duration.
    pub static ref UPSTREAM_DURATION: &'static str = {
        metrics::describe_histogram!(
            "dexcache_upstream_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of upstream requests in seconds, decoding included."
        );
        "dexcache_upstream_duration_seconds"
    };
}

/// Record a request served from cache.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_hit(kind: ResourceKind) {
    metrics::counter!(*CACHE_HIT_COUNTER, "kind" => kind.as_str()).increment(1);
}

/// No-op when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_hit(_kind: ResourceKind) {}

/// Record a request that started an upstream fetch.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_miss(kind: ResourceKind) {
    metrics::counter!(*CACHE_MISS_COUNTER, "kind" => kind.as_str()).increment(1);
}

/// No-op when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_miss(_kind: ResourceKind) {}

/// Record a request that joined an in-flight fetch.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_deduplicated(kind: ResourceKind) {
    metrics::counter!(*CACHE_DEDUPLICATED_COUNTER, "kind" => kind.as_str()).increment(1);
}

/// No-op when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_deduplicated(_kind: ResourceKind) {}

/// Record the outcome of one upstream request.
///
/// `error_class` is `None` on success, otherwise the
/// [`FetchError::class`](dexcache_core::FetchError::class) of the failure.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_upstream(kind: ResourceKind, duration: Duration, error_class: Option<&'static str>) {
    metrics::counter!(*UPSTREAM_REQUESTS, "kind" => kind.as_str()).increment(1);
    metrics::histogram!(*UPSTREAM_DURATION, "kind" => kind.as_str())
        .record(duration.as_secs_f64());
    if let Some(class) = error_class {
        metrics::counter!(*UPSTREAM_ERRORS, "kind" => kind.as_str(), "class" => class)
            .increment(1);
    }
}

/// No-op when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_upstream(
    _kind: ResourceKind,
    _duration: std::time::Duration,
    _error_class: Option<&'static str>,
) {
}
