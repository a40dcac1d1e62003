//! Species, forms and their traits.

use serde::{Deserialize, Serialize};

use super::common::{
    ApiResource, Description, FlavorText, Name, NamedApiResource, VerboseEffect, VersionGameIndex,
};

/// `/pokemon/<id>`: one battle form of a species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `pikachu`.
    pub name: String,
    /// Experience gained for defeating it.
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Sort order, grouping families together.
    #[serde(default)]
    pub order: i32,
    /// Whether this is the species' default form.
    #[serde(default)]
    pub is_default: bool,
    /// Species this form belongs to.
    pub species: NamedApiResource,
    /// Abilities this form may have.
    pub abilities: Vec<PokemonAbility>,
    /// Types, in slot order.
    pub types: Vec<PokemonType>,
    /// Base stats.
    pub stats: Vec<PokemonStat>,
    /// Learnable moves.
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
    /// Per-version internal indices.
    #[serde(default)]
    pub game_indices: Vec<VersionGameIndex>,
    /// Sprite URLs.
    #[serde(default)]
    pub sprites: PokemonSprites,
}

/// Ability slot of a [`Pokemon`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonAbility {
    /// Whether this is a hidden ability.
    pub is_hidden: bool,
    /// Slot number.
    pub slot: u8,
    /// The ability.
    pub ability: NamedApiResource,
}

/// Type slot of a [`Pokemon`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    /// Slot number.
    pub slot: u8,
    /// The type.
    #[serde(rename = "type")]
    pub type_: NamedApiResource,
}

/// Base stat of a [`Pokemon`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    /// The stat.
    pub stat: NamedApiResource,
    /// Base value.
    pub base_stat: u32,
    /// Effort points gained for defeating it.
    pub effort: u32,
}

/// Move a [`Pokemon`] can learn. Learn details are kept raw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonMove {
    /// The move.
    #[serde(rename = "move")]
    pub move_: NamedApiResource,
    /// How and when the move is learned, per version group.
    #[serde(default)]
    pub version_group_details: Vec<serde_json::Value>,
}

/// Sprite URLs of a [`Pokemon`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PokemonSprites {
    /// Default front sprite.
    #[serde(default)]
    pub front_default: Option<String>,
    /// Shiny front sprite.
    #[serde(default)]
    pub front_shiny: Option<String>,
    /// Default back sprite.
    #[serde(default)]
    pub back_default: Option<String>,
    /// Shiny back sprite.
    #[serde(default)]
    pub back_shiny: Option<String>,
    /// Artwork from other sources, kept raw.
    #[serde(default)]
    pub other: serde_json::Value,
}

/// `/pokemon-species/<id>`: what all forms of a species share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    /// Upstream ID, equal to the national dex number.
    pub id: u32,
    /// Slug, e.g. `pikachu`.
    pub name: String,
    /// Sort order, grouping families together.
    #[serde(default)]
    pub order: i32,
    /// Chance of being female in eighths, `-1` for genderless.
    pub gender_rate: i32,
    /// Base capture rate, up to 255.
    pub capture_rate: u32,
    /// Base happiness when caught.
    #[serde(default)]
    pub base_happiness: Option<u32>,
    /// Whether this is a baby species.
    #[serde(default)]
    pub is_baby: bool,
    /// Whether this is a legendary species.
    #[serde(default)]
    pub is_legendary: bool,
    /// Whether this is a mythical species.
    #[serde(default)]
    pub is_mythical: bool,
    /// Egg cycles to hatch.
    #[serde(default)]
    pub hatch_counter: Option<u32>,
    /// Growth rate curve.
    pub growth_rate: NamedApiResource,
    /// Egg groups.
    #[serde(default)]
    pub egg_groups: Vec<NamedApiResource>,
    /// Pokédex color.
    #[serde(default)]
    pub color: Option<NamedApiResource>,
    /// Species it evolves from.
    #[serde(default)]
    pub evolves_from_species: Option<NamedApiResource>,
    /// Evolution chain it belongs to.
    #[serde(default)]
    pub evolution_chain: Option<ApiResource>,
    /// Generation it was introduced in.
    pub generation: NamedApiResource,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Localized Pokédex entries.
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    /// Localized genus, e.g. "Mouse Pokémon".
    #[serde(default)]
    pub genera: Vec<Genus>,
    /// Forms of this species.
    #[serde(default)]
    pub varieties: Vec<PokemonSpeciesVariety>,
}

/// Localized genus of a [`PokemonSpecies`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genus {
    /// The genus.
    pub genus: String,
    /// Language of `genus`.
    pub language: NamedApiResource,
}

/// Form of a [`PokemonSpecies`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSpeciesVariety {
    /// Whether this is the default form.
    pub is_default: bool,
    /// The form.
    pub pokemon: NamedApiResource,
}

/// `/evolution-chain/<id>`: the evolution tree of a family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionChain {
    /// Upstream ID.
    pub id: u32,
    /// Item a parent must hold to breed the baby form.
    #[serde(default)]
    pub baby_trigger_item: Option<NamedApiResource>,
    /// Root of the tree.
    pub chain: ChainLink,
}

/// Node of an [`EvolutionChain`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLink {
    /// Whether this node is a baby form.
    #[serde(default)]
    pub is_baby: bool,
    /// Species at this node.
    pub species: NamedApiResource,
    /// Conditions for evolving into this node.
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    /// Children.
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl ChainLink {
    /// Species names in depth-first order, starting at this node.
    pub fn species_names(&self) -> Vec<&str> {
        let mut names = vec![self.species.name.as_str()];
        for child in &self.evolves_to {
            names.extend(child.species_names());
        }
        names
    }
}

/// One way of reaching a [`ChainLink`]. Rare conditions are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionDetail {
    /// What triggers the evolution (level-up, trade, ...).
    pub trigger: NamedApiResource,
    /// Minimum level, if any.
    #[serde(default)]
    pub min_level: Option<u32>,
    /// Item used, if any.
    #[serde(default)]
    pub item: Option<NamedApiResource>,
    /// Item held, if any.
    #[serde(default)]
    pub held_item: Option<NamedApiResource>,
    /// Minimum happiness, if any.
    #[serde(default)]
    pub min_happiness: Option<u32>,
    /// Required time of day, empty if any.
    #[serde(default)]
    pub time_of_day: String,
}

/// `/ability/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `static`.
    pub name: String,
    /// Whether the ability exists in the main game series.
    #[serde(default)]
    pub is_main_series: bool,
    /// Generation it was introduced in.
    pub generation: NamedApiResource,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Localized effect texts.
    pub effect_entries: Vec<VerboseEffect>,
    /// Localized in-game texts.
    #[serde(default)]
    pub flavor_text_entries: Vec<AbilityFlavorText>,
    /// Pokémon that may have it.
    #[serde(default)]
    pub pokemon: Vec<AbilityPokemon>,
}

/// In-game text of an [`Ability`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityFlavorText {
    /// The text.
    pub flavor_text: String,
    /// Language of the text.
    pub language: NamedApiResource,
    /// Version group the text appears in.
    pub version_group: NamedApiResource,
}

/// Pokémon that may have an [`Ability`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityPokemon {
    /// Whether it is a hidden ability for this Pokémon.
    pub is_hidden: bool,
    /// Slot number.
    pub slot: u8,
    /// The Pokémon.
    pub pokemon: NamedApiResource,
}

/// `/type/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `electric`.
    pub name: String,
    /// Effectiveness against and from other types.
    pub damage_relations: TypeRelations,
    /// Generation it was introduced in.
    pub generation: NamedApiResource,
    /// Damage class of its moves before the physical/special split.
    #[serde(default)]
    pub move_damage_class: Option<NamedApiResource>,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Pokémon of this type.
    #[serde(default)]
    pub pokemon: Vec<TypePokemon>,
    /// Moves of this type.
    #[serde(default)]
    pub moves: Vec<NamedApiResource>,
}

/// Damage relations of a [`Type`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeRelations {
    /// Types this type does not affect.
    pub no_damage_to: Vec<NamedApiResource>,
    /// Types this type is not very effective against.
    pub half_damage_to: Vec<NamedApiResource>,
    /// Types this type is super effective against.
    pub double_damage_to: Vec<NamedApiResource>,
    /// Types that do not affect this type.
    pub no_damage_from: Vec<NamedApiResource>,
    /// Types not very effective against this type.
    pub half_damage_from: Vec<NamedApiResource>,
    /// Types super effective against this type.
    pub double_damage_from: Vec<NamedApiResource>,
}

/// Pokémon of a [`Type`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePokemon {
    /// Slot the type occupies on the Pokémon.
    pub slot: u8,
    /// The Pokémon.
    pub pokemon: NamedApiResource,
}

/// `/nature/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nature {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `adamant`.
    pub name: String,
    /// Stat lowered by 10%, `None` for neutral natures.
    #[serde(default)]
    pub decreased_stat: Option<NamedApiResource>,
    /// Stat raised by 10%, `None` for neutral natures.
    #[serde(default)]
    pub increased_stat: Option<NamedApiResource>,
    /// Disliked berry flavor.
    #[serde(default)]
    pub hates_flavor: Option<NamedApiResource>,
    /// Liked berry flavor.
    #[serde(default)]
    pub likes_flavor: Option<NamedApiResource>,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
}

impl Nature {
    /// Returns `true` if the nature changes no stat.
    pub fn is_neutral(&self) -> bool {
        self.increased_stat == self.decreased_stat
    }
}

/// `/growth-rate/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthRate {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `medium-slow`.
    pub name: String,
    /// LaTeX formula for experience per level.
    pub formula: String,
    /// Localized descriptions.
    #[serde(default)]
    pub descriptions: Vec<Description>,
    /// Experience needed per level.
    pub levels: Vec<GrowthRateExperienceLevel>,
    /// Species using this curve.
    #[serde(default)]
    pub pokemon_species: Vec<NamedApiResource>,
}

impl GrowthRate {
    /// Experience needed to reach `level`.
    pub fn experience_at(&self, level: u32) -> Option<u32> {
        self.levels
            .iter()
            .find(|entry| entry.level == level)
            .map(|entry| entry.experience)
    }
}

/// Experience threshold of one level of a [`GrowthRate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthRateExperienceLevel {
    /// The level.
    pub level: u32,
    /// Experience needed to reach it.
    pub experience: u32,
}

resource!(Pokemon => Pokemon, named);
resource!(PokemonSpecies => PokemonSpecies, named);
resource!(EvolutionChain => EvolutionChain, unnamed);
resource!(Ability => Ability, named);
resource!(Type => Type, named);
resource!(Nature => Nature, named);
resource!(GrowthRate => GrowthRate, named);
