//! # dexcache-reqwest
//!
//! [`Transport`](dexcache_core::Transport) implementation on top of the
//! [reqwest](https://docs.rs/reqwest) HTTP client.
//!
//! ```no_run
//! use std::time::Duration;
//! use dexcache_reqwest::ReqwestTransport;
//!
//! # fn main() -> Result<(), dexcache_reqwest::Error> {
//! let transport = ReqwestTransport::builder()
//!     .base_url("https://pokeapi.co/api/v2")
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod error;
mod transport;

pub use error::Error;
pub use transport::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ReqwestTransport, ReqwestTransportBuilder};

/// Re-export of the reqwest client type for custom client configuration.
pub use reqwest::Client;
