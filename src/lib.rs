//! Pokedex - an interactive PokeAPI explorer
//!
//! Pages through location areas, explores encounters, and catches creatures,
//! serving repeated requests from a time-bounded response cache.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pokedex;
pub mod repl;
pub mod tasks;

pub use cache::TtlCache;
pub use client::PokeApiClient;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
