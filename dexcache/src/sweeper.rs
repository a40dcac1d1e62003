//! Periodic removal of expired entries.
//!
//! Expiry is lazy: an expired entry is dropped when it is next read. The
//! sweeper bounds memory for entries that are never read again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{Instrument, debug, info_span};

use dexcache_core::{Store, Transport};

use crate::FetchCache;

/// Running sweeper task. Dropping the handle stops it.
#[derive(Debug)]
pub struct SweepHandle {
    handle: JoinHandle<()>,
}

impl SweepHandle {
    /// Returns `true` once the task has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the task.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for SweepHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl<S, T> FetchCache<S, T>
where
    S: Store,
    T: Transport,
{
    /// Starts the sweeper with the configured `sweep_interval`.
    ///
    /// Returns `None` if no interval is configured. Must be called from
    /// within a tokio runtime.
    pub fn spawn_sweeper(&self) -> Option<SweepHandle> {
        self.inner
            .sweep_interval
            .map(|interval| self.spawn_sweeper_every(interval))
    }

    /// Starts a sweeper purging expired entries every `interval`, the first
    /// sweep one `interval` after this call.
    ///
    /// The task holds no strong reference to the cache and stops on its
    /// own once every clone of the cache is dropped.
    pub fn spawn_sweeper_every(&self, interval: Duration) -> SweepHandle {
        let interval = interval.max(Duration::from_millis(1));
        let inner = Arc::downgrade(&self.inner);
        let span = info_span!("cache_sweeper", store = %self.inner.store.label(), ?interval);
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let handle = tokio::spawn(
            async move {
                loop {
                    ticker.tick().await;
                    let Some(inner) = inner.upgrade() else {
                        debug!("cache dropped, stopping sweeper");
                        break;
                    };
                    let purged = inner.store.purge_expired();
                    if purged > 0 {
                        debug!(purged, "swept expired entries");
                    }
                }
            }
            .instrument(span),
        );

        SweepHandle { handle }
    }
}
