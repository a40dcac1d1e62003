//! In-flight request deduplication.
//!
//! At most one upstream fetch runs per [`ResourceKey`]. The first caller to
//! miss registers a shared handle; every caller arriving while it is
//! outstanding attaches to the same handle and observes the same outcome.
//! The registration is removed by a [`FlightGuard`] owned by the fetch
//! task, so it disappears the moment the fetch settles, whatever the
//! outcome.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{BoxFuture, Shared};

use dexcache_core::{CacheEntry, FetchError, Payload, ResourceKey};

type Outcome = Result<Payload, FetchError>;

/// Pending result every caller of one key attaches to.
pub(crate) type SharedFetch = Shared<BoxFuture<'static, Outcome>>;

struct Pending {
    id: u64,
    fetch: SharedFetch,
}

/// Outcome of [`InFlight::get_or_start`].
pub(crate) enum Flight {
    /// A fresh entry appeared while registering; no fetch needed.
    Cached(CacheEntry),
    /// Another caller's fetch is outstanding.
    Joined(SharedFetch),
    /// This caller started the fetch.
    Started(SharedFetch),
}

/// Map of outstanding fetches, keyed by resource.
#[derive(Default)]
pub(crate) struct InFlight {
    requests: Arc<DashMap<ResourceKey, Pending>>,
    next_id: AtomicU64,
}

impl InFlight {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the outstanding fetch for `key`, or starts one.
    ///
    /// `recheck` runs under the entry lock before registering: a fetch that
    /// settled between the caller's cache lookup and this call has already
    /// populated the store, so its entry is returned instead. It must not
    /// suspend or touch this map.
    ///
    /// `start` runs after the lock is released and receives the guard
    /// through which the fetch reports its outcome. If the guard is dropped
    /// without reporting, every caller sees an unreachable-upstream error.
    pub(crate) fn get_or_start<R, S>(&self, key: &ResourceKey, recheck: R, start: S) -> Flight
    where
        R: FnOnce() -> Option<CacheEntry>,
        S: FnOnce(FlightGuard),
    {
        let (id, fetch, sender) = match self.requests.entry(key.clone()) {
            Entry::Occupied(pending) => return Flight::Joined(pending.get().fetch.clone()),
            Entry::Vacant(vacant) => {
                if let Some(entry) = recheck() {
                    return Flight::Cached(entry);
                }
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let (sender, receiver) = oneshot::channel();
                let lost = key.clone();
                let fetch = receiver
                    .map(move |received| {
                        received.unwrap_or_else(|_| {
                            Err(FetchError::UpstreamUnreachable {
                                key: lost,
                                message: "fetch task ended without a result".to_owned(),
                            })
                        })
                    })
                    .boxed()
                    .shared();
                vacant.insert(Pending {
                    id,
                    fetch: fetch.clone(),
                });
                (id, fetch, sender)
            }
        };

        start(FlightGuard {
            requests: Arc::clone(&self.requests),
            key: key.clone(),
            id,
            sender: Some(sender),
        });
        Flight::Started(fetch)
    }

    /// Number of outstanding fetches.
    pub(crate) fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if a fetch for `key` is outstanding.
    pub(crate) fn contains(&self, key: &ResourceKey) -> bool {
        self.requests.contains_key(key)
    }
}

/// Owns one registration until the fetch settles.
///
/// Dropping the guard clears the registration it was created for, never a
/// newer fetch for the same key.
pub(crate) struct FlightGuard {
    requests: Arc<DashMap<ResourceKey, Pending>>,
    key: ResourceKey,
    id: u64,
    sender: Option<oneshot::Sender<Outcome>>,
}

impl FlightGuard {
    /// Clears the registration, then hands `outcome` to every caller.
    pub(crate) fn finish(mut self, outcome: Outcome) {
        let sender = self.sender.take();
        drop(self);
        if let Some(sender) = sender {
            // Every caller may have gone away.
            let _ = sender.send(outcome);
        }
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.requests
            .remove_if(&self.key, |_, pending| pending.id == self.id);
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use dexcache_core::ResourceKind;

    use super::*;

    fn key(id: &str) -> ResourceKey {
        ResourceKey::new(ResourceKind::Move, id).unwrap()
    }

    fn payload(value: u32) -> Payload {
        Arc::new(value)
    }

    #[tokio::test]
    async fn second_caller_joins_the_first_fetch() {
        let in_flight = InFlight::new();
        let mut guard = None;

        let first = in_flight.get_or_start(&key("thunderbolt"), || None, |g| guard = Some(g));
        let Flight::Started(first) = first else {
            panic!("expected to start a fetch");
        };
        assert!(in_flight.contains(&key("thunderbolt")));

        let second = in_flight.get_or_start(
            &key("thunderbolt"),
            || None,
            |_| unreachable!("a fetch is already outstanding"),
        );
        let Flight::Joined(second) = second else {
            panic!("expected to join the outstanding fetch");
        };

        guard.take().unwrap().finish(Ok(payload(85)));
        assert_eq!(in_flight.len(), 0);

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first.unwrap().downcast_ref::<u32>(), Some(&85));
        assert_eq!(second.unwrap().downcast_ref::<u32>(), Some(&85));
    }

    #[tokio::test]
    async fn recheck_short_circuits_the_start() {
        let in_flight = InFlight::new();
        let flight = in_flight.get_or_start(
            &key("surf"),
            || Some(CacheEntry::new(payload(90), std::time::Duration::from_secs(60))),
            |_| unreachable!("the store already holds a fresh entry"),
        );
        assert!(matches!(flight, Flight::Cached(_)));
        assert_eq!(in_flight.len(), 0);
    }

    #[tokio::test]
    async fn dropped_guard_fails_every_caller() {
        let in_flight = InFlight::new();
        let mut guard = None;
        let Flight::Started(fetch) = in_flight.get_or_start(&key("ember"), || None, |g| guard = Some(g))
        else {
            panic!("expected to start a fetch");
        };

        drop(guard);
        assert!(!in_flight.contains(&key("ember")));
        let error = fetch.await.unwrap_err();
        assert!(matches!(error, FetchError::UpstreamUnreachable { .. }));
    }

    #[test]
    fn panicking_start_releases_the_registration() {
        let in_flight = InFlight::new();

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            in_flight.get_or_start(&key("tackle"), || None, |_guard| panic!("no runtime"))
        }));
        assert!(outcome.is_err());
        assert!(!in_flight.contains(&key("tackle")));

        // The shard is still usable for the same key and its neighbours.
        let mut guard = None;
        let flight = in_flight.get_or_start(&key("tackle"), || None, |g| guard = Some(g));
        assert!(matches!(flight, Flight::Started(_)));
        assert!(in_flight.contains(&key("tackle")));
        drop(guard);
        assert_eq!(in_flight.len(), 0);
    }

    #[tokio::test]
    async fn stale_guard_leaves_newer_fetch_alone() {
        let in_flight = InFlight::new();
        let mut first_guard = None;
        let _ = in_flight.get_or_start(&key("tackle"), || None, |g| first_guard = Some(g));
        drop(first_guard);
        assert_eq!(in_flight.len(), 0);

        let mut second_guard = None;
        let _ = in_flight.get_or_start(&key("tackle"), || None, |g| second_guard = Some(g));

        // A guard carrying an old id must not remove the new registration.
        drop(FlightGuard {
            requests: Arc::clone(&in_flight.requests),
            key: key("tackle"),
            id: 0,
            sender: None,
        });
        assert!(in_flight.contains(&key("tackle")));

        drop(second_guard);
        assert!(!in_flight.contains(&key("tackle")));
    }
}
