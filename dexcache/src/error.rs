//! Errors raised while assembling a [`FetchCache`](crate::FetchCache).
//!
//! Request-time failures are [`FetchError`](dexcache_core::FetchError)s and
//! are re-exported from the crate root.

use thiserror::Error;

use crate::config::ConfigError;

/// A [`FetchCache`](crate::FetchCache) could not be built.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP transport could not be built.
    #[error(transparent)]
    Transport(#[from] dexcache_reqwest::Error),
}
