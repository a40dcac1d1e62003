//! Building blocks shared by every resource model.

use serde::{Deserialize, Serialize};

use dexcache_core::{InvalidKeyError, ResourceKey};

/// Link to another resource by name and URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedApiResource {
    /// Slug of the referenced resource.
    pub name: String,
    /// Absolute URL of the referenced resource.
    pub url: String,
}

/// Anything pointing at an upstream resource by URL.
pub trait Link {
    /// Absolute URL of the referenced resource.
    fn url(&self) -> &str;

    /// Cache key of the referenced resource.
    fn key(&self) -> Result<ResourceKey, InvalidKeyError> {
        ResourceKey::from_resource_url(self.url())
    }
}

impl Link for NamedApiResource {
    fn url(&self) -> &str {
        &self.url
    }
}

/// Link to another resource by URL only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResource {
    /// Absolute URL of the referenced resource.
    pub url: String,
}

impl Link for ApiResource {
    fn url(&self) -> &str {
        &self.url
    }
}

/// Localized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    /// The name in `language`.
    pub name: String,
    /// Language of `name`.
    pub language: NamedApiResource,
}

/// Localized description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// The description in `language`.
    pub description: String,
    /// Language of `description`.
    pub language: NamedApiResource,
}

/// Localized effect text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    /// The effect text in `language`.
    pub effect: String,
    /// Language of `effect`.
    pub language: NamedApiResource,
}

/// Localized effect text with a one-line summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerboseEffect {
    /// Full effect text.
    pub effect: String,
    /// One-line summary.
    pub short_effect: String,
    /// Language of both texts.
    pub language: NamedApiResource,
}

/// Localized flavor text, optionally tied to a game version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorText {
    /// The flavor text.
    pub flavor_text: String,
    /// Language of the text.
    pub language: NamedApiResource,
    /// Version the text appears in.
    #[serde(default)]
    pub version: Option<NamedApiResource>,
}

/// Localized flavor text tied to a version group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionGroupFlavorText {
    /// The flavor text.
    pub text: String,
    /// Language of the text.
    pub language: NamedApiResource,
    /// Version group the text appears in.
    pub version_group: NamedApiResource,
}

/// Internal index of a resource within a generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationGameIndex {
    /// Index used by the games.
    pub game_index: u32,
    /// Generation the index applies to.
    pub generation: NamedApiResource,
}

/// Internal index of a resource within a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionGameIndex {
    /// Index used by the games.
    pub game_index: u32,
    /// Version the index applies to.
    pub version: NamedApiResource,
}

#[cfg(test)]
mod tests {
    use dexcache_core::ResourceKind;

    use super::*;

    #[test]
    fn links_resolve_to_cache_keys() {
        let named = NamedApiResource {
            name: "static".into(),
            url: "https://pokeapi.co/api/v2/ability/9/".into(),
        };
        let key = named.key().unwrap();
        assert_eq!(key.kind(), ResourceKind::Ability);
        assert_eq!(key.identifier(), "9");

        let chain = ApiResource {
            url: "https://pokeapi.co/api/v2/evolution-chain/10/".into(),
        };
        assert_eq!(chain.key().unwrap().kind(), ResourceKind::EvolutionChain);
    }

    #[test]
    fn links_to_unknown_collections_are_rejected() {
        let link = NamedApiResource {
            name: "ash".into(),
            url: "https://pokeapi.co/api/v2/trainer/1/".into(),
        };
        assert!(link.key().is_err());
    }
}
