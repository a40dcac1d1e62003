//! Generations, versions and Pokédexes.

use serde::{Deserialize, Serialize};

use super::common::{Description, Name, NamedApiResource};

/// `/generation/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `generation-i`.
    pub name: String,
    /// Region introduced in this generation.
    pub main_region: NamedApiResource,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Abilities introduced.
    #[serde(default)]
    pub abilities: Vec<NamedApiResource>,
    /// Moves introduced.
    #[serde(default)]
    pub moves: Vec<NamedApiResource>,
    /// Species introduced.
    #[serde(default)]
    pub pokemon_species: Vec<NamedApiResource>,
    /// Types introduced.
    #[serde(default)]
    pub types: Vec<NamedApiResource>,
    /// Version groups of this generation.
    #[serde(default)]
    pub version_groups: Vec<NamedApiResource>,
}

/// `/version/<id>`: a single game, e.g. Red.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `red`.
    pub name: String,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Version group it belongs to.
    pub version_group: NamedApiResource,
}

/// `/version-group/<id>`: games released together, e.g. Red and Blue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionGroup {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `red-blue`.
    pub name: String,
    /// Release order.
    pub order: u32,
    /// Generation of the group.
    pub generation: NamedApiResource,
    /// Ways moves are learned in these games.
    #[serde(default)]
    pub move_learn_methods: Vec<NamedApiResource>,
    /// Pokédexes of these games.
    #[serde(default)]
    pub pokedexes: Vec<NamedApiResource>,
    /// Regions visitable in these games.
    #[serde(default)]
    pub regions: Vec<NamedApiResource>,
    /// The games.
    #[serde(default)]
    pub versions: Vec<NamedApiResource>,
}

/// `/pokedex/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokedex {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `kanto`.
    pub name: String,
    /// Whether this dex is used in the main series.
    #[serde(default)]
    pub is_main_series: bool,
    /// Localized descriptions.
    #[serde(default)]
    pub descriptions: Vec<Description>,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Entries, in dex order.
    pub pokemon_entries: Vec<PokemonEntry>,
    /// Region the dex covers.
    #[serde(default)]
    pub region: Option<NamedApiResource>,
    /// Version groups using this dex.
    #[serde(default)]
    pub version_groups: Vec<NamedApiResource>,
}

/// Entry of a [`Pokedex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEntry {
    /// Number within the dex.
    pub entry_number: u32,
    /// The species.
    pub pokemon_species: NamedApiResource,
}

resource!(Generation => Generation, named);
resource!(Version => Version, named);
resource!(VersionGroup => VersionGroup, named);
resource!(Pokedex => Pokedex, named);
