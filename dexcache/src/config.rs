//! Fetch layer configuration.
//!
//! [`FetchConfig`] collects the recognized options of a deployment: upstream
//! base URL, entry TTL, per-request timeout, an optional entry cap and an
//! optional sweep interval. It deserializes from YAML with human readable
//! durations:
//!
//! ```
//! use std::time::Duration;
//! use dexcache::FetchConfig;
//!
//! let config = FetchConfig::from_yaml(
//!     r#"
//!     ttl: 30m
//!     request_timeout: 2s
//!     max_cache_entries: 5000
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.ttl, Duration::from_secs(30 * 60));
//! assert_eq!(config.request_timeout, Duration::from_secs(2));
//! assert_eq!(config.max_cache_entries, Some(5000));
//! assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dexcache_moka::DEFAULT_TTL;
pub use dexcache_reqwest::DEFAULT_TIMEOUT as DEFAULT_REQUEST_TIMEOUT;

/// Configuration for a [`FetchCache`](crate::FetchCache).
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Upstream base URL; resources live at `<base_url>/<kind>/<id>`.
    pub base_url: String,
    /// How long an entry stays fresh (e.g. "1h", "90s").
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
    /// Upper bound for a single upstream call (e.g. "5s", "800ms").
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Maximum number of entries; least recently read entries are evicted
    /// beyond it. Unbounded if unset.
    pub max_cache_entries: Option<u64>,
    /// Period of the background sweep that drops expired entries. No sweep
    /// runs if unset; expired entries are then dropped on read only.
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Option<Duration>,
    /// `User-Agent` sent upstream.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: dexcache_reqwest::DEFAULT_BASE_URL.to_string(),
            ttl: DEFAULT_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_cache_entries: None,
            sweep_interval: None,
            user_agent: concat!("dexcache/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Invalid configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("invalid configuration: {0}")]
    Yaml(String),
    /// `base_url` is empty.
    #[error("base_url must not be empty")]
    EmptyBaseUrl,
    /// `ttl` is zero, nothing could ever be served from cache.
    #[error("ttl must be greater than zero")]
    ZeroTtl,
    /// `request_timeout` is zero, every call would time out.
    #[error("request_timeout must be greater than zero")]
    ZeroTimeout,
    /// `max_cache_entries` is zero, nothing could ever be stored.
    #[error("max_cache_entries must be greater than zero when set")]
    ZeroCapacity,
    /// `sweep_interval` is zero.
    #[error("sweep_interval must be greater than zero when set")]
    ZeroSweepInterval,
}

impl FetchConfig {
    /// Creates a new builder starting from the defaults.
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }

    /// Parses and validates a YAML document. Missing fields take their
    /// defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: FetchConfig =
            serde_saphyr::from_str(yaml).map_err(|error| ConfigError::Yaml(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants every component relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_cache_entries == Some(0) {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.sweep_interval.is_some_and(|interval| interval.is_zero()) {
            return Err(ConfigError::ZeroSweepInterval);
        }
        Ok(())
    }
}

/// Builder for [`FetchConfig`].
#[derive(Debug, Clone, Default)]
pub struct FetchConfigBuilder {
    config: FetchConfig,
}

impl FetchConfigBuilder {
    /// Set the upstream base URL.
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        Self {
            config: FetchConfig {
                base_url: base_url.into(),
                ..self.config
            },
        }
    }

    /// Set the entry TTL.
    pub fn ttl(self, ttl: Duration) -> Self {
        Self {
            config: FetchConfig { ttl, ..self.config },
        }
    }

    /// Set the per-request timeout.
    pub fn request_timeout(self, request_timeout: Duration) -> Self {
        Self {
            config: FetchConfig {
                request_timeout,
                ..self.config
            },
        }
    }

    /// Cap the number of cached entries.
    pub fn max_cache_entries(self, max_cache_entries: u64) -> Self {
        Self {
            config: FetchConfig {
                max_cache_entries: Some(max_cache_entries),
                ..self.config
            },
        }
    }

    /// Enable the background sweep.
    pub fn sweep_interval(self, sweep_interval: Duration) -> Self {
        Self {
            config: FetchConfig {
                sweep_interval: Some(sweep_interval),
                ..self.config
            },
        }
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
        Self {
            config: FetchConfig {
                user_agent: user_agent.into(),
                ..self.config
            },
        }
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<FetchConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_yields_defaults() {
        let config = FetchConfig::from_yaml("{}").unwrap();
        assert_eq!(config, FetchConfig::default());
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.user_agent.starts_with("dexcache/"));
    }

    #[test]
    fn every_field_is_recognized() {
        let config = FetchConfig::from_yaml(
            r#"
            base_url: http://localhost:8000/api/v2
            ttl: 10m
            request_timeout: 750ms
            max_cache_entries: 100
            sweep_interval: 5m
            user_agent: pokedex-frontend
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            FetchConfig {
                base_url: "http://localhost:8000/api/v2".into(),
                ttl: Duration::from_secs(600),
                request_timeout: Duration::from_millis(750),
                max_cache_entries: Some(100),
                sweep_interval: Some(Duration::from_secs(300)),
                user_agent: "pokedex-frontend".into(),
            }
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            FetchConfig::from_yaml("ttl_seconds: 60"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn degenerate_values_are_rejected() {
        assert_eq!(FetchConfig::from_yaml("ttl: 0s"), Err(ConfigError::ZeroTtl));
        assert_eq!(
            FetchConfig::from_yaml("request_timeout: 0ms"),
            Err(ConfigError::ZeroTimeout)
        );
        assert_eq!(
            FetchConfig::from_yaml("max_cache_entries: 0"),
            Err(ConfigError::ZeroCapacity)
        );
        assert_eq!(
            FetchConfig::builder().base_url("  ").build(),
            Err(ConfigError::EmptyBaseUrl)
        );
        assert_eq!(
            FetchConfig::builder()
                .sweep_interval(Duration::ZERO)
                .build(),
            Err(ConfigError::ZeroSweepInterval)
        );
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = FetchConfig::builder()
            .ttl(Duration::from_secs(42))
            .max_cache_entries(7)
            .build()
            .unwrap();
        assert_eq!(config.ttl, Duration::from_secs(42));
        assert_eq!(config.max_cache_entries, Some(7));
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn defaults_agree_with_store_and_transport() {
        let config = FetchConfig::default();
        assert_eq!(config.ttl, dexcache_moka::MokaStore::builder().build().ttl());
        assert_eq!(config.request_timeout, dexcache_reqwest::DEFAULT_TIMEOUT);
        assert_eq!(config.base_url, dexcache_reqwest::DEFAULT_BASE_URL);
    }
}
