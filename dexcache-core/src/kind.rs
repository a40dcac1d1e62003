//! Upstream collection names.
//!
//! [`ResourceKind`] is the closed set of collections the fetch layer knows
//! how to address. Each kind maps to exactly one path segment of the
//! upstream API, e.g. `/pokemon/<id>` or `/version-group/<id>`.
//!
//! ```
//! use dexcache_core::ResourceKind;
//!
//! let kind: ResourceKind = " Version-Group ".parse().unwrap();
//! assert_eq!(kind, ResourceKind::VersionGroup);
//! assert_eq!(kind.as_str(), "version-group");
//! assert!("trainer".parse::<ResourceKind>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidKeyError;

macro_rules! resource_kinds {
    ($($(#[$doc:meta])* $variant:ident => $segment:literal,)+) => {
        /// One upstream collection type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum ResourceKind {
            $($(#[$doc])* $variant,)+
        }

        impl ResourceKind {
            /// Every supported kind, in declaration order.
            pub const ALL: &'static [ResourceKind] = &[$(ResourceKind::$variant,)+];

            /// Upstream path segment for this kind.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(ResourceKind::$variant => $segment,)+
                }
            }

            fn from_segment(segment: &str) -> Option<Self> {
                match segment {
                    $($segment => Some(ResourceKind::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

resource_kinds! {
    /// `/pokemon/<id>`
    Pokemon => "pokemon",
    /// `/pokemon-species/<id>`
    PokemonSpecies => "pokemon-species",
    /// `/evolution-chain/<id>`, numeric IDs only upstream.
    EvolutionChain => "evolution-chain",
    /// `/ability/<id>`
    Ability => "ability",
    /// `/berry/<id>`
    Berry => "berry",
    /// `/move/<id>`
    Move => "move",
    /// `/item/<id>`
    Item => "item",
    /// `/type/<id>`
    Type => "type",
    /// `/region/<id>`
    Region => "region",
    /// `/location/<id>`
    Location => "location",
    /// `/generation/<id>`
    Generation => "generation",
    /// `/version/<id>`
    Version => "version",
    /// `/version-group/<id>`
    VersionGroup => "version-group",
    /// `/nature/<id>`
    Nature => "nature",
    /// `/growth-rate/<id>`
    GrowthRate => "growth-rate",
    /// `/berry-flavor/<id>`
    BerryFlavor => "berry-flavor",
    /// `/location-area/<id>`
    LocationArea => "location-area",
    /// `/pal-park-area/<id>`
    PalParkArea => "pal-park-area",
    /// `/pokedex/<id>`
    Pokedex => "pokedex",
    /// `/machine/<id>`, numeric IDs only upstream.
    Machine => "machine",
}

impl FromStr for ResourceKind {
    type Err = InvalidKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segment = s.trim().to_ascii_lowercase();
        Self::from_segment(&segment).ok_or_else(|| InvalidKeyError::UnsupportedKind(segment.into()))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_segment() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.as_str().parse::<ResourceKind>(), Ok(*kind));
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(
            "  POKEMON-Species\n".parse::<ResourceKind>(),
            Ok(ResourceKind::PokemonSpecies)
        );
    }

    #[test]
    fn unknown_kind_is_rejected_with_normalized_name() {
        assert_eq!(
            " Trainer ".parse::<ResourceKind>(),
            Err(InvalidKeyError::UnsupportedKind("trainer".into()))
        );
    }
}
