//! Error types for the Pokedex
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the cache, the API client and the REPL.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Cache constructed with a zero time-to-live
    #[error("Invalid cache TTL: {0}")]
    InvalidTtl(String),

    /// Transport-level HTTP failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Writing REPL output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `mapb` issued while on the first page
    #[error("no previous page")]
    NoPreviousPage,

    /// `map` issued after the last page
    #[error("no next page")]
    NoNextPage,

    /// Command not recognised
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command issued without its required argument
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// Command issued with more arguments than it accepts
    #[error("Too many arguments for {0}")]
    UnexpectedArguments(String),

    /// Creature already in the session pokedex
    #[error("you've already caught {0}")]
    AlreadyCaught(String),

    /// Creature not in the session pokedex
    #[error("you have not caught {0}")]
    NotCaught(String),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex.
pub type Result<T> = std::result::Result<T, PokedexError>;
