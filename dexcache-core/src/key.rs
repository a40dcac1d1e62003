//! Cache key types and normalization.
//!
//! A [`ResourceKey`] identifies one cacheable unit: a resource kind plus an
//! identifier (slug or numeric ID). Identifiers are normalized on
//! construction so that every spelling of the same resource shares one
//! cache entry and one in-flight request:
//!
//! 1. surrounding whitespace is trimmed
//! 2. the identifier is lowercased
//! 3. empty and URL-breaking identifiers are rejected
//!
//! ```
//! use dexcache_core::{ResourceKey, ResourceKind};
//!
//! let a = ResourceKey::new(ResourceKind::Pokemon, "  Pikachu ").unwrap();
//! let b = ResourceKey::normalize("pokemon", "pikachu").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "pokemon/pikachu");
//!
//! let c = ResourceKey::new(ResourceKind::Pokemon, 25).unwrap();
//! assert_eq!(c.identifier(), "25");
//! ```
//!
//! ## Format
//!
//! Keys display as `{kind}/{identifier}`, which is also the path of the
//! resource below the upstream base URL.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::InvalidKeyError;
use crate::kind::ResourceKind;

/// Normalized identity of one upstream resource.
///
/// Two keys are equal iff their kinds are equal and their normalized
/// identifiers are equal. Cloning is cheap: identifiers up to 23 bytes are
/// stored inline by [`SmolStr`] and longer ones are reference counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    kind: ResourceKind,
    identifier: SmolStr,
}

impl ResourceKey {
    /// Builds a key for `kind` from a raw identifier.
    ///
    /// Accepts anything displayable, so both `"Pikachu"` and `25` work.
    ///
    /// # Errors
    ///
    /// [`InvalidKeyError::EmptyIdentifier`] if nothing is left after trimming,
    /// [`InvalidKeyError::MalformedIdentifier`] if the identifier contains
    /// whitespace or any of `/ ? # %`.
    pub fn new(kind: ResourceKind, raw: impl fmt::Display) -> Result<Self, InvalidKeyError> {
        let raw = raw.to_string();
        let identifier = raw.trim().to_lowercase();

        if identifier.is_empty() {
            return Err(InvalidKeyError::EmptyIdentifier { kind });
        }
        if identifier
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'))
        {
            return Err(InvalidKeyError::MalformedIdentifier {
                kind,
                identifier: identifier.into(),
            });
        }

        Ok(Self {
            kind,
            identifier: identifier.into(),
        })
    }

    /// Builds a key from a kind name and a raw identifier.
    ///
    /// # Errors
    ///
    /// [`InvalidKeyError::UnsupportedKind`] if `kind` is not a supported
    /// collection, otherwise the same errors as [`ResourceKey::new`].
    pub fn normalize(kind: &str, raw: impl fmt::Display) -> Result<Self, InvalidKeyError> {
        Self::new(kind.parse()?, raw)
    }

    /// Parses an upstream resource link such as
    /// `https://pokeapi.co/api/v2/ability/65/`.
    ///
    /// Only the trailing `<kind>/<identifier>` segments are inspected, so the
    /// host and API prefix do not matter. Query strings and fragments are
    /// ignored.
    pub fn from_resource_url(url: &str) -> Result<Self, InvalidKeyError> {
        let malformed = || InvalidKeyError::MalformedUrl(url.to_owned());

        let path = url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_end_matches('/');

        let mut segments = path.rsplit('/');
        let identifier = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        let kind = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;

        Self::normalize(kind, identifier)
    }

    /// The resource kind.
    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The normalized identifier.
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns `true` if the identifier is a numeric ID rather than a slug.
    pub fn is_numeric(&self) -> bool {
        self.identifier.bytes().all(|b| b.is_ascii_digit())
    }

    /// Path of the resource below the upstream base URL, without a leading
    /// slash.
    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn case_and_whitespace_do_not_split_entries() {
        let variants = ["pikachu", "Pikachu", "PIKACHU", "  pikachu\t", "\npIkAcHu "];
        let expected = ResourceKey::new(ResourceKind::Pokemon, "pikachu").unwrap();
        for raw in variants {
            assert_eq!(ResourceKey::new(ResourceKind::Pokemon, raw).unwrap(), expected);
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        for kind in ResourceKind::ALL {
            for raw in ["Thunder-Punch", " 42 ", "mr-mime"] {
                let once = ResourceKey::new(*kind, raw).unwrap();
                let twice = ResourceKey::new(*kind, once.identifier()).unwrap();
                assert_eq!(once, twice);
                let upper = ResourceKey::new(*kind, raw.to_uppercase()).unwrap();
                assert_eq!(once, upper);
            }
        }
    }

    #[test]
    fn numeric_identifiers_are_accepted() {
        let key = ResourceKey::new(ResourceKind::Machine, 1024u32).unwrap();
        assert_eq!(key.identifier(), "1024");
        assert!(key.is_numeric());
        assert!(!ResourceKey::new(ResourceKind::Pokemon, "porygon2").unwrap().is_numeric());
    }

    #[test]
    fn empty_identifier_is_rejected() {
        assert_eq!(
            ResourceKey::new(ResourceKind::Berry, "   "),
            Err(InvalidKeyError::EmptyIdentifier {
                kind: ResourceKind::Berry
            })
        );
    }

    #[test]
    fn url_breaking_identifiers_are_rejected() {
        for raw in ["pika chu", "pikachu/evolve", "a?b", "a#b", "%2f"] {
            assert!(
                matches!(
                    ResourceKey::new(ResourceKind::Pokemon, raw),
                    Err(InvalidKeyError::MalformedIdentifier { .. })
                ),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn unsupported_kind_is_rejected() {
        assert_eq!(
            ResourceKey::normalize("gym-leader", "brock"),
            Err(InvalidKeyError::UnsupportedKind("gym-leader".into()))
        );
    }

    #[test]
    fn display_matches_upstream_path() {
        let key = ResourceKey::normalize("Version-Group", "Red-Blue").unwrap();
        assert_eq!(key.to_string(), "version-group/red-blue");
        assert_eq!(key.path(), "version-group/red-blue");
    }

    #[test]
    fn resource_urls_parse_into_keys() {
        let key = ResourceKey::from_resource_url("https://pokeapi.co/api/v2/ability/65/").unwrap();
        assert_eq!(key, ResourceKey::new(ResourceKind::Ability, 65).unwrap());

        let key = ResourceKey::from_resource_url("/api/v2/pokemon-species/Eevee?x=1").unwrap();
        assert_eq!(key, ResourceKey::new(ResourceKind::PokemonSpecies, "eevee").unwrap());
    }

    #[test]
    fn resource_urls_without_a_tail_are_rejected() {
        assert_eq!(
            ResourceKey::from_resource_url("65"),
            Err(InvalidKeyError::MalformedUrl("65".into()))
        );
        assert_eq!(
            ResourceKey::from_resource_url("https://pokeapi.co/api/v2/trainer/1/"),
            Err(InvalidKeyError::UnsupportedKind("trainer".into()))
        );
    }
}
