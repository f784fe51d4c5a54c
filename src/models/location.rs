//! Location area DTOs
//!
//! Shapes of the `/location-area` list and detail responses.

use serde::Deserialize;

/// A `{ name, url }` reference to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One page of `GET /location-area?offset=..&limit=..`
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas
    pub count: u32,
    /// URL of the following page, absent on the last page
    pub next: Option<String>,
    /// URL of the preceding page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// Response of `GET /location-area/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

/// A creature that can be encountered in a location area.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_deserialize() {
        let json = r#"{
            "count": 1054,
            "next": "https://pokeapi.co/api/v2/location-area?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"},
                {"name": "eterna-city-area", "url": "https://pokeapi.co/api/v2/location-area/2/"}
            ]
        }"#;
        let page: LocationAreaPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.count, 1054);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].name, "canalave-city-area");
    }

    #[test]
    fn test_detail_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "name": "canalave-city-area",
            "game_index": 1,
            "location": {"name": "canalave-city", "url": "https://pokeapi.co/api/v2/location/1/"},
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": "https://pokeapi.co/api/v2/pokemon/72/"},
                 "version_details": [{"rate": 60}]}
            ]
        }"#;
        let detail: LocationAreaDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.name, "canalave-city-area");
        assert_eq!(detail.pokemon_encounters.len(), 1);
        assert_eq!(detail.pokemon_encounters[0].pokemon.name, "tentacool");
    }

    #[test]
    fn test_detail_without_encounters() {
        let json = r#"{"id": 7, "name": "empty-area"}"#;
        let detail: LocationAreaDetail = serde_json::from_str(json).unwrap();
        assert!(detail.pokemon_encounters.is_empty());
    }
}
