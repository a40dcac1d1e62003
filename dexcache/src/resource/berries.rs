//! Berries and their flavors.

use serde::{Deserialize, Serialize};

use super::common::{Name, NamedApiResource};

/// `/berry/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Berry {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `cheri`.
    pub name: String,
    /// Hours per growth stage.
    pub growth_time: u32,
    /// Maximum number grown on one tree.
    pub max_harvest: u32,
    /// Power of Natural Gift with this berry.
    #[serde(default)]
    pub natural_gift_power: u32,
    /// Type of Natural Gift with this berry.
    #[serde(default)]
    pub natural_gift_type: Option<NamedApiResource>,
    /// Size in millimetres.
    #[serde(default)]
    pub size: u32,
    /// Smoothness, used for Pokéblocks and Poffins.
    #[serde(default)]
    pub smoothness: u32,
    /// Speed at which soil dries.
    #[serde(default)]
    pub soil_dryness: u32,
    /// Firmness.
    pub firmness: NamedApiResource,
    /// Flavor potencies.
    #[serde(default)]
    pub flavors: Vec<BerryFlavorMap>,
    /// Item form of the berry.
    pub item: NamedApiResource,
}

impl Berry {
    /// Potency of the named flavor, zero if absent.
    pub fn potency(&self, flavor: &str) -> u32 {
        self.flavors
            .iter()
            .find(|entry| entry.flavor.name == flavor)
            .map_or(0, |entry| entry.potency)
    }
}

/// Flavor potency of a [`Berry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BerryFlavorMap {
    /// How strongly the berry has the flavor.
    pub potency: u32,
    /// The flavor.
    pub flavor: NamedApiResource,
}

/// `/berry-flavor/<id>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BerryFlavor {
    /// Upstream ID.
    pub id: u32,
    /// Slug, e.g. `spicy`.
    pub name: String,
    /// Berries with this flavor.
    #[serde(default)]
    pub berries: Vec<FlavorBerryMap>,
    /// Contest type the flavor maps to.
    #[serde(default)]
    pub contest_type: Option<NamedApiResource>,
    /// Localized names.
    #[serde(default)]
    pub names: Vec<Name>,
}

/// Berry having a [`BerryFlavor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorBerryMap {
    /// How strongly the berry has the flavor.
    pub potency: u32,
    /// The berry.
    pub berry: NamedApiResource,
}

resource!(Berry => Berry, named);
resource!(BerryFlavor => BerryFlavor, named);
