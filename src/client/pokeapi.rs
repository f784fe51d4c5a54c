//! PokeAPI Client
//!
//! Cache-aside fetching of location areas and creatures.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationAreaDetail, LocationAreaPage, Pokemon};

/// Client for the PokeAPI backed by a [`TtlCache`].
///
/// Cache keys are fully qualified request URLs and cached values are the raw
/// response bodies.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
    cache: TtlCache,
}

impl PokeApiClient {
    /// Creates a client for `config.api_base_url` that caches through `cache`.
    pub fn new(config: &Config, cache: TtlCache) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout_duration())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
            cache,
        })
    }

    /// URL of the first page of location areas.
    pub fn first_page_url(&self) -> String {
        format!(
            "{}/location-area?offset=0&limit={}",
            self.base_url, self.page_size
        )
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// Fetches the location-area page at `url`.
    pub async fn location_areas(&self, url: &str) -> Result<LocationAreaPage> {
        self.get_json(url).await
    }

    /// Fetches a location area and its encounters by name or id.
    pub async fn location_area(&self, name: &str) -> Result<LocationAreaDetail> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.get_json(&url).await
    }

    /// Fetches a creature by name or id.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_bytes(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Cache-aside GET ==
    /// Returns the body at `url`, from the cache when present.
    ///
    /// Only success responses are stored.
    async fn get_bytes(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.lookup(url).await {
            debug!(url, "Cache hit");
            return Ok(body);
        }

        debug!(url, "Cache miss, fetching");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        self.cache.store(url, body.clone()).await;
        Ok(body)
    }
}
