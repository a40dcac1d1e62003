#![warn(missing_docs)]
//! # dexcache-core
//!
//! Core types and traits for the dexcache resource fetch cache.
//!
//! This crate holds everything the fetch layer agrees on without choosing
//! an implementation:
//!
//! - **Identify** a cacheable unit ([`ResourceKind`], [`ResourceKey`])
//! - **Hold** a fetched payload with its freshness window ([`CacheEntry`])
//! - **Store** entries with lazy expiry ([`Store`])
//! - **Reach** the upstream API ([`Transport`])
//! - **Classify** what went wrong ([`FetchError`], [`InvalidKeyError`])
//!
//! Implementations live in sibling crates: `dexcache-moka` provides the
//! in-memory store and `dexcache-reqwest` the HTTP transport. The
//! orchestrating `FetchCache` lives in `dexcache`.

pub mod error;
pub mod key;
pub mod kind;
pub mod label;
pub mod store;
pub mod upstream;
pub mod value;

pub use error::{FetchError, InvalidKeyError, ServerErrorReason, TransportError};
pub use key::ResourceKey;
pub use kind::ResourceKind;
pub use label::StoreLabel;
pub use store::Store;
pub use upstream::{Transport, UpstreamResponse};
pub use value::{CacheEntry, Payload};
