//! Error taxonomy for the fetch layer.
//!
//! Every getter returns a [`FetchError`] on failure. The variants split into
//! two groups that callers are expected to treat differently:
//!
//! - **Not found** ([`FetchError::UpstreamNotFound`]) - render a
//!   domain-specific "not found" state.
//! - **Everything else** - render a generic "temporarily unavailable" state.
//!   [`FetchError::is_transient`] tells which of these are worth retrying.
//!
//! Failures are never cached, so a retry always reaches upstream.

use std::time::Duration;

use smol_str::SmolStr;
use thiserror::Error;

use crate::key::ResourceKey;
use crate::kind::ResourceKind;

/// A resource key could not be built from caller input.
///
/// This is a caller bug and retrying with the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidKeyError {
    /// The identifier was empty after trimming whitespace.
    #[error("empty identifier for resource kind `{kind}`")]
    EmptyIdentifier {
        /// Kind the identifier was meant for.
        kind: ResourceKind,
    },

    /// The identifier contains characters that would address another URL.
    #[error("malformed identifier `{identifier}` for resource kind `{kind}`")]
    MalformedIdentifier {
        /// Kind the identifier was meant for.
        kind: ResourceKind,
        /// The offending identifier, after trimming and lowercasing.
        identifier: SmolStr,
    },

    /// The resource kind is not part of the supported set.
    #[error("unsupported resource kind `{0}`")]
    UnsupportedKind(SmolStr),

    /// A resource URL did not end in `<kind>/<id>`.
    #[error("malformed resource url `{0}`")]
    MalformedUrl(String),

    /// A link pointed at a different kind than the one requested.
    #[error("expected a `{expected}` link, found `{found}`")]
    KindMismatch {
        /// Kind the caller asked for.
        expected: ResourceKind,
        /// Kind the link addresses.
        found: ResourceKind,
    },
}

/// Why an upstream response was classified as a server error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerErrorReason {
    /// Upstream answered with a 5xx status.
    #[error("status {0}")]
    Status(u16),
    /// Upstream answered with a status outside 2xx, 4xx and 5xx.
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),
    /// The body was not valid JSON or did not have the expected shape.
    #[error("malformed body: {0}")]
    MalformedBody(String),
}

/// Failure reported by a [`Transport`](crate::Transport) before any HTTP
/// status was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// DNS, connect or send failure.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),
}

/// Classified failure returned by every resource getter.
///
/// `FetchError` is [`Clone`] so that a single upstream outcome can be
/// delivered to every caller that waited on the same in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Caller supplied an unusable kind or identifier.
    #[error(transparent)]
    InvalidKey(#[from] InvalidKeyError),

    /// Upstream answered 4xx: the resource does not exist.
    #[error("{key} not found upstream (status {status})")]
    UpstreamNotFound {
        /// Requested resource.
        key: ResourceKey,
        /// The 4xx status upstream returned.
        status: u16,
    },

    /// The upstream call exceeded the request timeout.
    #[error("upstream timed out fetching {key} after {timeout:?}")]
    UpstreamTimeout {
        /// Requested resource.
        key: ResourceKey,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// Upstream answered 5xx or returned an unusable body.
    #[error("upstream server error fetching {key}: {reason}")]
    UpstreamServer {
        /// Requested resource.
        key: ResourceKey,
        /// What exactly went wrong.
        reason: ServerErrorReason,
    },

    /// The upstream could not be reached at all.
    #[error("upstream unreachable fetching {key}: {message}")]
    UpstreamUnreachable {
        /// Requested resource.
        key: ResourceKey,
        /// Transport-level description.
        message: String,
    },
}

impl FetchError {
    /// Builds the error for a transport failure on `key`.
    pub fn from_transport(key: ResourceKey, error: TransportError) -> Self {
        match error {
            TransportError::Timeout(timeout) => FetchError::UpstreamTimeout { key, timeout },
            TransportError::Unreachable(message) => FetchError::UpstreamUnreachable { key, message },
        }
    }

    /// Returns `true` if an immediate retry may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::UpstreamTimeout { .. }
                | FetchError::UpstreamServer { .. }
                | FetchError::UpstreamUnreachable { .. }
        )
    }

    /// Returns `true` if upstream reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::UpstreamNotFound { .. })
    }

    /// Short class name, used for log fields and metric labels.
    pub fn class(&self) -> &'static str {
        match self {
            FetchError::InvalidKey(_) => "invalid_key",
            FetchError::UpstreamNotFound { .. } => "not_found",
            FetchError::UpstreamTimeout { .. } => "timeout",
            FetchError::UpstreamServer { .. } => "server",
            FetchError::UpstreamUnreachable { .. } => "unreachable",
        }
    }

    /// The key the failure concerns, if one could be built.
    pub fn key(&self) -> Option<&ResourceKey> {
        match self {
            FetchError::InvalidKey(_) => None,
            FetchError::UpstreamNotFound { key, .. }
            | FetchError::UpstreamTimeout { key, .. }
            | FetchError::UpstreamServer { key, .. }
            | FetchError::UpstreamUnreachable { key, .. } => Some(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ResourceKey {
        ResourceKey::new(ResourceKind::Ability, "overgrow").unwrap()
    }

    #[test]
    fn only_upstream_hiccups_are_transient() {
        let timeout = FetchError::UpstreamTimeout {
            key: key(),
            timeout: Duration::from_secs(5),
        };
        let server = FetchError::UpstreamServer {
            key: key(),
            reason: ServerErrorReason::Status(503),
        };
        let unreachable = FetchError::UpstreamUnreachable {
            key: key(),
            message: "connection refused".into(),
        };
        let not_found = FetchError::UpstreamNotFound {
            key: key(),
            status: 404,
        };
        let invalid = FetchError::from(InvalidKeyError::UnsupportedKind("trainer".into()));

        assert!(timeout.is_transient());
        assert!(server.is_transient());
        assert!(unreachable.is_transient());
        assert!(!not_found.is_transient());
        assert!(!invalid.is_transient());

        assert!(not_found.is_not_found());
        assert!(!server.is_not_found());
    }

    #[test]
    fn transport_errors_map_onto_fetch_errors() {
        let err = FetchError::from_transport(key(), TransportError::Timeout(Duration::from_millis(250)));
        assert_eq!(
            err,
            FetchError::UpstreamTimeout {
                key: key(),
                timeout: Duration::from_millis(250)
            }
        );
        assert_eq!(err.class(), "timeout");

        let err = FetchError::from_transport(key(), TransportError::Unreachable("dns".into()));
        assert_eq!(err.class(), "unreachable");
        assert_eq!(err.key(), Some(&key()));
    }

    #[test]
    fn messages_name_the_resource() {
        let err = FetchError::UpstreamNotFound {
            key: key(),
            status: 404,
        };
        assert_eq!(err.to_string(), "ability/overgrow not found upstream (status 404)");
    }
}
