//! API Client Module
//!
//! HTTP access to the PokeAPI. Every GET is served from the response cache
//! when possible and stored back into it on a miss.

mod pokeapi;

pub use pokeapi::PokeApiClient;
