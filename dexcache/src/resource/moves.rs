//! Moves.

use serde::{Deserialize, Serialize};

use super::common::{Name, NamedApiResource, VerboseEffect};

/// `/move/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `thunderbolt`.
    pub name: String,
    /// Hit chance in percent, `None` for moves that never miss.
    #[serde(default)]
    pub accuracy: Option<u32>,
    /// Base power, `None` for status moves.
    #[serde(default)]
    pub power: Option<u32>,
    /// Power points.
    #[serde(default)]
    pub pp: Option<u32>,
    /// Turn order modifier, between -8 and 8.
    #[serde(default)]
    pub priority: i32,
    /// Chance of the secondary effect in percent.
    #[serde(default)]
    pub effect_chance: Option<u32>,
    /// Elemental type.
    #[serde(rename = "type")]
    pub type_: NamedApiResource,
    /// Physical, special or status.
    #[serde(default)]
    pub damage_class: Option<NamedApiResource>,
    /// What the move targets.
    #[serde(default)]
    pub target: Option<NamedApiResource>,
    /// Generation it was introduced in.
    pub generation: NamedApiResource,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Localized effect texts.
    #[serde(default)]
    pub effect_entries: Vec<VerboseEffect>,
    /// Localized in-game texts.
    #[serde(default)]
    pub flavor_text_entries: Vec<MoveFlavorText>,
    /// Machines teaching this move, kept raw.
    #[serde(default)]
    pub machines: Vec<serde_json::Value>,
    /// Pokémon that can learn it.
    #[serde(default)]
    pub learned_by_pokemon: Vec<NamedApiResource>,
}

impl Move {
    /// Returns `true` for moves dealing no direct damage.
    pub fn is_status(&self) -> bool {
        self.damage_class
            .as_ref()
            .is_some_and(|class| class.name == "status")
    }
}

/// In-game text of a [`Move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFlavorText {
    /// The text.
    pub flavor_text: String,
    /// Language of the text.
    pub language: NamedApiResource,
    /// Version group the text appears in.
    pub version_group: NamedApiResource,
}

resource!(Move => Move, named);
