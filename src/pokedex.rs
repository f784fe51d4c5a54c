//! Session Pokedex
//!
//! Creatures caught during the current session and the catch roll.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::{PokedexError, Result};
use crate::models::Pokemon;

/// Upper bound of the catch roll; a roll above the base experience catches.
pub const CATCH_ROLL_MAX: u32 = 1000;

/// Probability that a creature with `base_experience` is caught.
pub fn catch_chance(base_experience: u32) -> f64 {
    let misses = base_experience.min(CATCH_ROLL_MAX);
    f64::from(CATCH_ROLL_MAX - misses) / f64::from(CATCH_ROLL_MAX)
}

/// Rolls `1..=CATCH_ROLL_MAX` and reports whether the catch succeeds.
pub fn roll_catch<R: Rng + ?Sized>(base_experience: u32, rng: &mut R) -> bool {
    rng.gen_range(1..=CATCH_ROLL_MAX) > base_experience
}

/// A creature in the pokedex.
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Creatures caught this session, keyed by name.
#[derive(Debug, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors with [`PokedexError::AlreadyCaught`] if `name` is already present.
    pub fn ensure_not_caught(&self, name: &str) -> Result<()> {
        if self.caught.contains_key(name) {
            return Err(PokedexError::AlreadyCaught(name.to_string()));
        }
        Ok(())
    }

    /// Records `pokemon` as caught now.
    pub fn add(&mut self, pokemon: Pokemon) {
        let entry = CaughtPokemon {
            pokemon,
            caught_at: Utc::now(),
        };
        self.caught.insert(entry.pokemon.name.clone(), entry);
    }

    pub fn get(&self, name: &str) -> Result<&CaughtPokemon> {
        self.caught
            .get(name)
            .ok_or_else(|| PokedexError::NotCaught(name.to_string()))
    }

    /// Caught creatures in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CaughtPokemon> {
        self.caught.values()
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}
