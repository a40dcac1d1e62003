//! Typed resource models.
//!
//! One model per [`ResourceKind`], shaped after the upstream JSON. Fields the
//! pages depend on are required, so a payload missing them is rejected as
//! malformed instead of reaching a renderer; list-valued fields default to
//! empty. Unknown fields are ignored.
//!
//! Every model implements [`Resource`], which binds it to its kind and adds a
//! shallow sanity check on top of what deserialization already enforces.

use serde::de::DeserializeOwned;

use dexcache_core::ResourceKind;

mod sealed {
    pub trait Sealed {}
}

/// A model that can be fetched through the cache.
///
/// Sealed: each kind has exactly one model, which is what lets the cache
/// store payloads type-erased and downcast them safely.
pub trait Resource: DeserializeOwned + Send + Sync + 'static + sealed::Sealed {
    /// Kind this model is fetched from.
    const KIND: ResourceKind;

    /// Upstream numeric ID.
    fn id(&self) -> u32;

    /// Upstream slug, `None` for kinds addressed by ID only.
    fn name(&self) -> Option<&str>;

    /// Shallow sanity check run before a payload is cached.
    fn validate(&self) -> Result<(), String> {
        if self.id() == 0 {
            return Err(format!("{} payload has id 0", Self::KIND));
        }
        if self.name().is_some_and(|name| name.trim().is_empty()) {
            return Err(format!("{} payload has an empty name", Self::KIND));
        }
        Ok(())
    }
}

macro_rules! resource {
    ($model:ty => $kind:ident, named) => {
        impl $crate::resource::sealed::Sealed for $model {}

        impl $crate::resource::Resource for $model {
            const KIND: ::dexcache_core::ResourceKind = ::dexcache_core::ResourceKind::$kind;

            fn id(&self) -> u32 {
                self.id
            }

            fn name(&self) -> Option<&str> {
                Some(&self.name)
            }
        }
    };
    ($model:ty => $kind:ident, unnamed) => {
        impl $crate::resource::sealed::Sealed for $model {}

        impl $crate::resource::Resource for $model {
            const KIND: ::dexcache_core::ResourceKind = ::dexcache_core::ResourceKind::$kind;

            fn id(&self) -> u32 {
                self.id
            }

            fn name(&self) -> Option<&str> {
                None
            }
        }
    };
}

mod berries;
mod common;
mod games;
mod items;
mod locations;
mod machines;
mod moves;
mod pokemon;

pub use berries::{Berry, BerryFlavor, BerryFlavorMap, FlavorBerryMap};
pub use common::{
    ApiResource, Description, Effect, FlavorText, GenerationGameIndex, Link, Name,
    NamedApiResource, VerboseEffect, VersionGameIndex, VersionGroupFlavorText,
};
pub use games::{Generation, Pokedex, PokemonEntry, Version, VersionGroup};
pub use items::{Item, ItemHolderPokemon, ItemSprites};
pub use locations::{
    EncounterDetail, Location, LocationArea, PalParkArea, PalParkEncounterSpecies, PokemonEncounter,
    Region, VersionEncounterDetail,
};
pub use machines::Machine;
pub use moves::{Move, MoveFlavorText};
pub use pokemon::{
    Ability, AbilityFlavorText, AbilityPokemon, ChainLink, EvolutionChain, EvolutionDetail,
    Genus, GrowthRate, GrowthRateExperienceLevel, Nature, Pokemon, PokemonAbility, PokemonMove,
    PokemonSpecies, PokemonSpeciesVariety, PokemonSprites, PokemonStat, PokemonType, Type,
    TypePokemon, TypeRelations,
};
