//! One named getter per resource kind.

use std::fmt;
use std::sync::Arc;

use dexcache_core::{FetchError, Store, Transport};

use crate::FetchCache;
use crate::resource::{
    Ability, Berry, BerryFlavor, EvolutionChain, Generation, GrowthRate, Item, Location,
    LocationArea, Machine, Move, Nature, PalParkArea, Pokedex, Pokemon, PokemonSpecies, Region,
    Type, Version, VersionGroup,
};

macro_rules! getters {
    ($($(#[$doc:meta])* $getter:ident => $model:ty,)+) => {
        impl<S, T> FetchCache<S, T>
        where
            S: Store,
            T: Transport,
        {
            $(
                $(#[$doc])*
                pub async fn $getter(
                    &self,
                    identifier: impl fmt::Display,
                ) -> Result<Arc<$model>, FetchError> {
                    self.fetch::<$model>(identifier).await
                }
            )+
        }
    };
}

getters! {
    /// Fetches a Pokémon form by slug or ID, e.g. `"pikachu"` or `25`.
    get_pokemon_detail => Pokemon,
    /// Fetches a species by slug or ID.
    get_pokemon_species_detail => PokemonSpecies,
    /// Fetches an evolution chain by ID.
    get_evolution_chain_detail => EvolutionChain,
    /// Fetches an ability by slug or ID.
    get_ability_detail => Ability,
    /// Fetches a berry by slug or ID.
    get_berry_detail => Berry,
    /// Fetches a move by slug or ID.
    get_move_detail => Move,
    /// Fetches an item by slug or ID.
    get_item_detail => Item,
    /// Fetches a type by slug or ID.
    get_type_detail => Type,
    /// Fetches a region by slug or ID.
    get_region_detail => Region,
    /// Fetches a location by slug or ID.
    get_location_detail => Location,
    /// Fetches a generation by slug or ID.
    get_generation_detail => Generation,
    /// Fetches a game version by slug or ID.
    get_version_detail => Version,
    /// Fetches a version group by slug or ID.
    get_version_group_detail => VersionGroup,
    /// Fetches a nature by slug or ID.
    get_nature_detail => Nature,
    /// Fetches a growth rate by slug or ID.
    get_growth_rate_detail => GrowthRate,
    /// Fetches a berry flavor by slug or ID.
    get_berry_flavor_detail => BerryFlavor,
    /// Fetches a location area by slug or ID.
    get_location_area_detail => LocationArea,
    /// Fetches a Pal Park area by slug or ID.
    get_pal_park_area_detail => PalParkArea,
    /// Fetches a Pokédex by slug or ID.
    get_pokedex_detail => Pokedex,
    /// Fetches a machine by ID.
    get_machine_detail => Machine,
}
