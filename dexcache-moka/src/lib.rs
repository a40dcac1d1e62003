#![warn(missing_docs)]
//! # dexcache-moka
//!
//! In-memory [`Store`](dexcache_core::Store) for dexcache backed by
//! [Moka](https://docs.rs/moka).
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use dexcache_core::{ResourceKey, ResourceKind, Store};
//! use dexcache_moka::MokaStore;
//!
//! let store = MokaStore::builder()
//!     .ttl(Duration::from_secs(3600))
//!     .max_entries(5_000)
//!     .build();
//!
//! let key = ResourceKey::new(ResourceKind::Pokemon, "pikachu").unwrap();
//! store.put(key.clone(), Arc::new(25u32));
//! assert!(store.get(&key).is_some());
//! ```

mod builder;
pub mod metrics;
mod store;

pub use builder::{DEFAULT_TTL, MokaStoreBuilder};
pub use moka::policy::EvictionPolicy;
pub use store::MokaStore;
