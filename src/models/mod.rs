//! PokeAPI response models
//!
//! Deserialization targets for the JSON bodies returned by the remote API.
//! Unknown fields are ignored.

pub mod location;
pub mod pokemon;

pub use location::{LocationAreaDetail, LocationAreaPage, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
