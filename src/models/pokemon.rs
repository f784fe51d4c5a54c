//! Creature DTOs
//!
//! Shape of the `/pokemon/{name}` response, trimmed to the fields the REPL shows.

use serde::Deserialize;

use super::NamedResource;

/// Response of `GET /pokemon/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Null for a handful of forms; treated as zero
    #[serde(default, deserialize_with = "null_as_zero")]
    pub base_experience: u32,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
}

/// Type slot, e.g. `{ "slot": 1, "type": { "name": "electric" } }`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// Base stat, e.g. `{ "base_stat": 35, "effort": 0, "stat": { "name": "hp" } }`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}
