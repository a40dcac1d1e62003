//! Items.

use serde::{Deserialize, Serialize};

use super::common::{
    GenerationGameIndex, Name, NamedApiResource, VerboseEffect, VersionGroupFlavorText,
};

/// `/item/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `master-ball`.
    pub name: String,
    /// Price at a Poké Mart.
    pub cost: u32,
    /// Power of Fling with this item.
    #[serde(default)]
    pub fling_power: Option<u32>,
    /// Effect of Fling with this item.
    #[serde(default)]
    pub fling_effect: Option<NamedApiResource>,
    /// Bag pocket category.
    pub category: NamedApiResource,
    /// Item attributes, e.g. `holdable`.
    #[serde(default)]
    pub attributes: Vec<NamedApiResource>,
    /// Localized effect texts.
    #[serde(default)]
    pub effect_entries: Vec<VerboseEffect>,
    /// Localized in-game texts.
    #[serde(default)]
    pub flavor_text_entries: Vec<VersionGroupFlavorText>,
    /// Per-generation internal indices.
    #[serde(default)]
    pub game_indices: Vec<GenerationGameIndex>,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Sprite URLs.
    #[serde(default)]
    pub sprites: ItemSprites,
    /// Wild Pokémon that may hold it, version details kept raw.
    #[serde(default)]
    pub held_by_pokemon: Vec<ItemHolderPokemon>,
    /// Machines are items too; set when this one is.
    #[serde(default)]
    pub machines: Vec<serde_json::Value>,
}

/// Sprite URLs of an [`Item`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSprites {
    /// Default sprite.
    #[serde(default)]
    pub default: Option<String>,
}

/// Wild Pokémon that may hold an [`Item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemHolderPokemon {
    /// The Pokémon.
    pub pokemon: NamedApiResource,
    /// Hold rarity per version.
    #[serde(default)]
    pub version_details: Vec<serde_json::Value>,
}

resource!(Item => Item, named);
