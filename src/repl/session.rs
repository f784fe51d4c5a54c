//! REPL Session
//!
//! Pagination cursor, caught creatures, and command execution for one
//! interactive session.

use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::client::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::pokedex::{catch_chance, roll_catch, Pokedex};
use crate::repl::{Command, COMMANDS};

/// Prompt printed before every input line.
pub const PROMPT: &str = "pokedex > ";

/// Whether the REPL should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// State of one interactive session.
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    /// Page shown by the next `map`; `None` past the last page
    next_page: Option<String>,
    /// Page shown by the next `mapb`; `None` on the first page
    previous_page: Option<String>,
    pokedex: Pokedex,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session whose catch rolls come from `rng`.
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            next_page: Some(client.first_page_url()),
            previous_page: None,
            pokedex: Pokedex::new(),
            client,
            rng,
        }
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Parses and executes one input line, printing command failures to `out`.
    ///
    /// Only failures to write to `out` are returned as errors.
    pub async fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let outcome = match Command::parse(line) {
            Ok(Some(command)) => self.execute(command, out).await,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(flow) => Ok(flow),
            Err(PokedexError::Io(err)) => Err(PokedexError::Io(err)),
            Err(err) => {
                debug!(error = %err, "Command failed");
                writeln!(out, "{}", err)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Executes `command`, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => {
                let url = self.next_page.clone().ok_or(PokedexError::NoNextPage)?;
                self.show_page(&url, out).await?;
            }
            Command::MapBack => {
                let url = self
                    .previous_page
                    .clone()
                    .ok_or(PokedexError::NoPreviousPage)?;
                self.show_page(&url, out).await?;
            }
            Command::Explore(location) => self.explore(&location, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for (usage, description) in COMMANDS {
            writeln!(out, "{}: {}", usage, description)?;
        }
        Ok(())
    }

    async fn show_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<()> {
        let page = self.client.location_areas(url).await?;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }

        self.next_page = page.next;
        self.previous_page = page.previous;
        Ok(())
    }

    async fn explore<W: Write>(&self, location: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", location)?;
        let area = self.client.location_area(location).await?;

        writeln!(out, "Found Pokemon:")?;
        for encounter in &area.pokemon_encounters {
            writeln!(out, " - {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        self.pokedex.ensure_not_caught(name)?;
        let pokemon = self.client.pokemon(name).await?;
        // Lookups by id resolve to a name that may already be caught
        self.pokedex.ensure_not_caught(&pokemon.name)?;

        writeln!(
            out,
            "Throwing a Pokeball at {}... (chance of success: {:.1}%)",
            pokemon.name,
            catch_chance(pokemon.base_experience) * 100.0
        )?;

        if roll_catch(pokemon.base_experience, &mut self.rng) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.add(pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let caught = self.pokedex.get(name)?;
        let pokemon = &caught.pokemon;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Base experience: {}", pokemon.base_experience)?;
        writeln!(out, "Caught at: {}", caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for slot in &pokemon.types {
            writeln!(out, "  - {}", slot.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty.")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for caught in self.pokedex.iter() {
            writeln!(out, " - {}", caught.pokemon.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::config::Config;
    use std::time::Duration;

    // Nothing listens on the discard port; tests below only touch the cache
    const BASE: &str = "http://127.0.0.1:9";

    async fn offline_session() -> (Session, TtlCache) {
        let cache = TtlCache::new(Duration::from_secs(60)).unwrap();
        let config = Config {
            api_base_url: BASE.to_string(),
            ..Config::default()
        };
        let client = PokeApiClient::new(&config, cache.clone()).unwrap();
        (Session::with_rng(client, StdRng::seed_from_u64(1)), cache)
    }

    async fn run(session: &mut Session, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = session.handle_line(line, &mut out).await.unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let (mut session, cache) = offline_session().await;

        let (flow, output) = run(&mut session, "help").await;

        assert_eq!(flow, Flow::Continue);
        for (usage, _) in COMMANDS {
            assert!(output.contains(usage), "help is missing {}", usage);
        }
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_exit() {
        let (mut session, cache) = offline_session().await;
        let (flow, output) = run(&mut session, "exit").await;

        assert_eq!(flow, Flow::Exit);
        assert!(output.contains("Goodbye"));
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_blank_line_prints_nothing() {
        let (mut session, cache) = offline_session().await;
        let (flow, output) = run(&mut session, "   ").await;

        assert_eq!(flow, Flow::Continue);
        assert!(output.is_empty());
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_parse_errors_are_printed() {
        let (mut session, cache) = offline_session().await;

        let (_, output) = run(&mut session, "teleport").await;
        assert_eq!(output, "Unknown command: teleport\n");

        let (_, output) = run(&mut session, "catch").await;
        assert_eq!(output, "Usage: catch <pokemon>\n");
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_mapb_on_first_page() {
        let (mut session, cache) = offline_session().await;
        let (flow, output) = run(&mut session, "mapb").await;

        assert_eq!(flow, Flow::Continue);
        assert_eq!(output, "no previous page\n");
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_map_from_cache_advances_cursor() {
        let (mut session, cache) = offline_session().await;
        let first = format!("{}/location-area?offset=0&limit=20", BASE);
        cache
            .store(
                first,
                r#"{"count":1,"next":null,"previous":null,"results":[{"name":"only-area","url":""}]}"#,
            )
            .await;

        let (_, output) = run(&mut session, "map").await;
        assert_eq!(output, "only-area\n");

        let (_, output) = run(&mut session, "map").await;
        assert_eq!(output, "no next page\n");
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_catch_inspect_and_pokedex() {
        let (mut session, cache) = offline_session().await;
        // Zero base experience always catches
        cache
            .store(
                format!("{}/pokemon/magikarp", BASE),
                r#"{"id":129,"name":"magikarp","base_experience":0,"height":9,"weight":100,
                    "types":[{"slot":1,"type":{"name":"water","url":""}}],
                    "stats":[{"base_stat":20,"effort":0,"stat":{"name":"hp","url":""}}]}"#,
            )
            .await;

        let (_, output) = run(&mut session, "pokedex").await;
        assert_eq!(output, "Your Pokedex is empty.\n");

        let (_, output) = run(&mut session, "catch magikarp").await;
        assert!(output.contains("chance of success: 100.0%"));
        assert!(output.contains("magikarp was caught!"));

        let (_, output) = run(&mut session, "catch magikarp").await;
        assert_eq!(output, "you've already caught magikarp\n");

        let (_, output) = run(&mut session, "inspect magikarp").await;
        assert!(output.contains("Name: magikarp"));
        assert!(output.contains("Height: 9"));
        assert!(output.contains("  -hp: 20"));
        assert!(output.contains("  - water"));

        let (_, output) = run(&mut session, "pokedex").await;
        assert_eq!(output, "Your Pokedex:\n - magikarp\n");
        assert_eq!(session.pokedex().len(), 1);
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_failed_catch_leaves_pokedex_empty() {
        let (mut session, cache) = offline_session().await;
        cache
            .store(
                format!("{}/pokemon/arceus", BASE),
                r#"{"id":493,"name":"arceus","base_experience":1000,"height":32,"weight":3200}"#,
            )
            .await;

        let (_, output) = run(&mut session, "catch arceus").await;

        assert!(output.contains("arceus escaped!"));
        assert!(session.pokedex().is_empty());
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_inspect_uncaught() {
        let (mut session, cache) = offline_session().await;
        let (_, output) = run(&mut session, "inspect mew").await;

        assert_eq!(output, "you have not caught mew\n");
        cache.shutdown().await;
    }
}
