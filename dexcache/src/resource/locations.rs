//! Regions, locations and encounters.

use serde::{Deserialize, Serialize};

use super::common::{GenerationGameIndex, Name, NamedApiResource};

/// `/region/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `kanto`.
    pub name: String,
    /// Locations in the region.
    #[serde(default)]
    pub locations: Vec<NamedApiResource>,
    /// Generation the region was introduced in.
    #[serde(default)]
    pub main_generation: Option<NamedApiResource>,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Pokédexes covering the region.
    #[serde(default)]
    pub pokedexes: Vec<NamedApiResource>,
    /// Version groups set in the region.
    #[serde(default)]
    pub version_groups: Vec<NamedApiResource>,
}

/// `/location/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `canalave-city`.
    pub name: String,
    /// Region the location is in.
    #[serde(default)]
    pub region: Option<NamedApiResource>,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Per-generation internal indices.
    #[serde(default)]
    pub game_indices: Vec<GenerationGameIndex>,
    /// Areas within the location.
    #[serde(default)]
    pub areas: Vec<NamedApiResource>,
}

/// `/location-area/<id>`: a part of a location with its own encounters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationArea {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `canalave-city-area`.
    pub name: String,
    /// Internal index used by the games.
    #[serde(default)]
    pub game_index: u32,
    /// Location the area belongs to.
    pub location: NamedApiResource,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Encounter rates per method, kept raw.
    #[serde(default)]
    pub encounter_method_rates: Vec<serde_json::Value>,
    /// Pokémon encountered in the area.
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

/// Pokémon encountered in a [`LocationArea`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    /// The Pokémon.
    pub pokemon: NamedApiResource,
    /// Encounter details per version.
    #[serde(default)]
    pub version_details: Vec<VersionEncounterDetail>,
}

/// Encounters of one Pokémon in one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEncounterDetail {
    /// The version.
    pub version: NamedApiResource,
    /// Sum of all encounter chances.
    pub max_chance: u32,
    /// Individual encounters.
    #[serde(default)]
    pub encounter_details: Vec<EncounterDetail>,
}

/// One way of encountering a Pokémon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterDetail {
    /// Lowest level.
    pub min_level: u32,
    /// Highest level.
    pub max_level: u32,
    /// Chance in percent.
    pub chance: u32,
    /// Method, e.g. `walk` or `surf`.
    pub method: NamedApiResource,
    /// Required conditions, e.g. time of day.
    #[serde(default)]
    pub condition_values: Vec<NamedApiResource>,
}

/// `/pal-park-area/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalParkArea {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `forest`.
    pub name: String,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
    /// Species found in the area.
    #[serde(default)]
    pub pokemon_encounters: Vec<PalParkEncounterSpecies>,
}

/// Species found in a [`PalParkArea`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalParkEncounterSpecies {
    /// Score gained when caught.
    pub base_score: u32,
    /// Encounter rate.
    pub rate: u32,
    /// The species.
    pub pokemon_species: NamedApiResource,
}

resource!(Region => Region, named);
resource!(Location => Location, named);
resource!(LocationArea => LocationArea, named);
resource!(PalParkArea => PalParkArea, named);
