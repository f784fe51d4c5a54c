//! Configuration Module
//!
//! Handles loading and managing explorer configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default PokeAPI root
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Explorer configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the remote API, without trailing slash
    pub api_base_url: String,
    /// Cache time-to-live in seconds, also the sweep cadence
    pub cache_ttl: u64,
    /// Number of location areas fetched per `map` page
    pub page_size: u32,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_API_BASE_URL` - API root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_CACHE_TTL` - Cache TTL in seconds (default: 300)
    /// - `POKEDEX_PAGE_SIZE` - Location areas per page (default: 20)
    /// - `POKEDEX_REQUEST_TIMEOUT` - HTTP timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("POKEDEX_API_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_base_url),
            cache_ttl: parse_var("POKEDEX_CACHE_TTL").unwrap_or(defaults.cache_ttl),
            page_size: parse_var("POKEDEX_PAGE_SIZE").unwrap_or(defaults.page_size),
            request_timeout: parse_var("POKEDEX_REQUEST_TIMEOUT")
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Cache TTL as a Duration.
    pub fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Request timeout as a Duration.
    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl: 300,
            page_size: 20,
            request_timeout: 10,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
